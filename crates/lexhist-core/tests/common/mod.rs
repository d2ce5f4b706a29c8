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
    DocumentId::new("SFS 1977:1160")
}

/// Document with one section per documented scenario
///
/// - 1 kap. 1 §: amended 2000 ("X v1") and 2010 ("X v2"); current "X v3"
/// - 2 kap. 5 §: introduced by NEW on 2020-06-01
/// - 1 kap. 2 §: never amended
/// - 1 kap. 3 §: repealed 2005-01-01, reintroduced 2012-01-01
/// - 1 kap. 4 §: amended 2008 with text that was not captured
#[allow(dead_code)]
pub fn scenario_source() -> MemoryLawSource {
    let doc = doc_id();
    let source = MemoryLawSource::new();
    source.insert_document(
        LegalDocument::new(doc.clone(), "Arbetsmiljölag")
            .with_section(SectionKey::in_chapter("1", "1"), "X v3")
            .with_section(SectionKey::in_chapter("1", "2"), "Oförändrad sedan ikraftträdandet.")
            .with_section(SectionKey::in_chapter("1", "3"), "Återinförd lydelse.")
            .with_section(SectionKey::in_chapter("1", "4"), "Senare lydelse.")
            .with_section(SectionKey::in_chapter("2", "5"), "Ny paragraf."),
    );

    let a2000 = Amendment::new(1, doc.clone(), "SFS 1999:1", date("2000-01-01"));
    let a2005 = Amendment::new(2, doc.clone(), "SFS 2004:7", date("2005-01-01"));
    let a2008 = Amendment::new(3, doc.clone(), "SFS 2007:3", date("2008-01-01"));
    let a2010 = Amendment::new(4, doc.clone(), "SFS 2009:2", date("2010-01-01"));
    let a2012 = Amendment::new(5, doc.clone(), "SFS 2011:9", date("2012-01-01"));
    let a2016 = Amendment::new(6, doc.clone(), "SFS 2015:4", date("2016-01-01"));
    let a2020 = Amendment::new(7, doc.clone(), "SFS 2020:5", date("2020-06-01"));

    let history = vec![
        (
            a2000.clone(),
            vec![SectionChange::for_amendment(&a2000, SectionKey::in_chapter("1", "1"), ChangeKind::Amended)
                .with_text("X v1")],
        ),
        (
            a2005.clone(),
            vec![SectionChange::for_amendment(&a2005, SectionKey::in_chapter("1", "3"), ChangeKind::Repealed)],
        ),
        (
            a2008.clone(),
            vec![SectionChange::for_amendment(&a2008, SectionKey::in_chapter("1", "4"), ChangeKind::Amended)],
        ),
        (
            a2010.clone(),
            vec![SectionChange::for_amendment(&a2010, SectionKey::in_chapter("1", "1"), ChangeKind::Amended)
                .with_text("X v2")],
        ),
        (
            a2012.clone(),
            vec![SectionChange::for_amendment(&a2012, SectionKey::in_chapter("1", "3"), ChangeKind::New)
                .with_text("Återinförd lydelse.")],
        ),
        (
            a2016.clone(),
            vec![SectionChange::for_amendment(&a2016, SectionKey::in_chapter("1", "4"), ChangeKind::Amended)
                .with_text("Senare lydelse.")],
        ),
        (
            a2020.clone(),
            vec![SectionChange::for_amendment(&a2020, SectionKey::in_chapter("2", "5"), ChangeKind::New)
                .with_text("Ny paragraf.")],
        ),
    ];
    for (amendment, changes) in history {
        source.record_history(amendment, changes).unwrap();
    }
    source
}

/// Document whose current text agrees with its latest change everywhere
#[allow(dead_code)]
pub fn consistent_source() -> MemoryLawSource {
    let doc = DocumentId::new("2018:218");
    let source = MemoryLawSource::new();
    source.insert_document(
        LegalDocument::new(doc.clone(), "Dataskyddslag")
            .with_section(SectionKey::top_level("1"), "Lagen gäller.")
            .with_section(SectionKey::top_level("2"), "Definitioner.")
            .with_section(SectionKey::top_level("10"), "Tillsyn."),
    );

    let a1 = Amendment::new(1, doc.clone(), "SFS 2019:100", date("2019-07-01"));
    source
        .commit_amendment(
            a1.clone(),
            vec![
                SectionChange::for_amendment(&a1, SectionKey::top_level("2"), ChangeKind::Amended)
                    .with_text("Definitioner i\nförordningen."),
                SectionChange::for_amendment(&a1, SectionKey::top_level("2a"), ChangeKind::New)
                    .with_text("Undantag."),
                SectionChange::for_amendment(&a1, SectionKey::top_level("1"), ChangeKind::Amended)
                    .with_text("Lagen gäller."),
                SectionChange::for_amendment(&a1, SectionKey::top_level("10"), ChangeKind::Amended)
                    .with_text("Tillsyn."),
            ],
        )
        .unwrap();
    let a2 = Amendment::new(2, doc.clone(), "SFS 2021:50", date("2021-01-01"));
    source
        .commit_amendment(
            a2.clone(),
            vec![
                SectionChange::for_amendment(&a2, SectionKey::top_level("10"), ChangeKind::Repealed),
                SectionChange::for_amendment(&a2, SectionKey::top_level("1"), ChangeKind::Amended)
                    .with_text("Lagen gäller.\nLag (2021:50)."),
            ],
        )
        .unwrap();
    source
}
