use chrono::NaiveDate;
use lexhist_cache::CacheConfig;
use lexhist_core::{
    Amendment, ChangeKind, DocumentId, LegalDocument, MemoryLawSource, SectionChange, SectionKey,
};
use lexhist_engine::LawVersionService;
use std::sync::Arc;

#[allow(dead_code)]
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[allow(dead_code)]
pub fn doc_id() -> DocumentId {
    DocumentId::new("1977:1160")
}

#[allow(dead_code)]
pub fn key(chapter: &str, section: &str) -> SectionKey {
    SectionKey::in_chapter(chapter, section)
}

/// 1 kap. 1 § amended 2000 ("X v1") and 2010 ("X v2"), current "X v3";
/// 2 kap. 5 § introduced 2020-06-01.
#[allow(dead_code)]
pub fn scenario_source() -> Arc<MemoryLawSource> {
    let doc = doc_id();
    let source = MemoryLawSource::new();
    source.insert_document(
        LegalDocument::new(doc.clone(), "Arbetsmiljölag")
            .with_section(key("1", "1"), "X v3")
            .with_section(key("2", "5"), "Ny paragraf."),
    );
    let a2000 = Amendment::new(1, doc.clone(), "SFS 1999:1", date("2000-01-01"));
    let a2010 = Amendment::new(2, doc.clone(), "SFS 2009:2", date("2010-01-01"));
    let a2020 = Amendment::new(3, doc, "SFS 2020:5", date("2020-06-01"));
    source
        .record_history(
            a2000.clone(),
            vec![SectionChange::for_amendment(&a2000, key("1", "1"), ChangeKind::Amended).with_text("X v1")],
        )
        .unwrap();
    source
        .record_history(
            a2010.clone(),
            vec![SectionChange::for_amendment(&a2010, key("1", "1"), ChangeKind::Amended).with_text("X v2")],
        )
        .unwrap();
    source
        .record_history(
            a2020.clone(),
            vec![SectionChange::for_amendment(&a2020, key("2", "5"), ChangeKind::New)
                .with_text("Ny paragraf.")],
        )
        .unwrap();
    Arc::new(source)
}

#[allow(dead_code)]
pub fn service(source: Arc<MemoryLawSource>) -> LawVersionService<Arc<MemoryLawSource>> {
    LawVersionService::new(source, CacheConfig::default())
}
