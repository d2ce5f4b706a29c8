use chrono::NaiveDate;
use lexhist_core::{
    Amendment, ChangeKind, DocumentId, LegalDocument, MemoryLawSource, SectionChange, SectionKey,
};

#[allow(dead_code)]
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[allow(dead_code)]
pub fn doc_id() -> DocumentId {
    DocumentId::new("2010:900")
}

/// Two sections; 1 § amended on 2015-05-02, 2 § added on 2018-01-01
#[allow(dead_code)]
pub fn small_source() -> MemoryLawSource {
    let doc = doc_id();
    let source = MemoryLawSource::new();
    source.insert_document(
        LegalDocument::new(doc.clone(), "Plan- och bygglag")
            .with_section(SectionKey::top_level("1"), "Ursprunglig lydelse."),
    );
    let a1 = Amendment::new(1, doc.clone(), "SFS 2015:80", date("2015-05-02"))
        .with_title("Lag om ändring i plan- och bygglagen");
    source
        .commit_amendment(
            a1.clone(),
            vec![SectionChange::for_amendment(&a1, SectionKey::top_level("1"), ChangeKind::Amended)
                .with_text("Ändrad lydelse.")],
        )
        .unwrap();
    let a2 = Amendment::new(2, doc, "SFS 2017:1200", date("2018-01-01"));
    source
        .commit_amendment(
            a2.clone(),
            vec![SectionChange::for_amendment(&a2, SectionKey::top_level("2"), ChangeKind::New)
                .with_text("Ny paragraf.")],
        )
        .unwrap();
    source
}
