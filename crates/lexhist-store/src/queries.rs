//! Read-only queries over the law-history schema
//!
//! All functions take `&Connection` and never write. Rows are decoded into
//! the core domain model; undecodable rows surface as `Persistence` errors
//! rather than being skipped.

#![allow(clippy::result_large_err)]

use chrono::NaiveDate;
use lexhist_core::errors::LawHistoryError;
use lexhist_core::{
    Amendment, ChangeKind, DocumentId, LegalDocument, Metadata, Section, SectionChange, SectionKey,
};
use rusqlite::{Connection, OptionalExtension};

use crate::errors::{from_rusqlite, invalid_row, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

fn parse_date(table: &str, raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|e| invalid_row(table, format!("invalid date '{}': {}", raw, e)))
}

fn to_u32(table: &str, column: &str, value: i64) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| invalid_row(table, format!("{} out of range: {}", column, value)))
}

/// Stored `''` chapter means an unchaptered section
fn section_key(chapter: String, section: String) -> SectionKey {
    SectionKey {
        chapter: if chapter.is_empty() { None } else { Some(chapter) },
        section,
    }
}

fn document_title(conn: &Connection, id: &DocumentId) -> Result<String> {
    conn.query_row(
        "SELECT title FROM legal_documents WHERE id = ?1",
        [id.as_str()],
        |row| row.get::<_, String>(0),
    )
    .optional()
    .map_err(from_rusqlite)?
    .ok_or_else(|| {
        LawHistoryError::DocumentNotFound {
            document_id: id.to_string(),
        }
        .into()
    })
}

/// Document ids in key order
pub fn list_documents(conn: &Connection) -> Result<Vec<DocumentId>> {
    let mut stmt = conn
        .prepare("SELECT id FROM legal_documents ORDER BY id")
        .map_err(from_rusqlite)?;
    let ids = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;
    Ok(ids.into_iter().map(DocumentId::new).collect())
}

/// Document header plus current sections
pub fn load_document(conn: &Connection, id: &DocumentId) -> Result<LegalDocument> {
    let title = document_title(conn, id)?;
    let sections = fetch_sections(conn, id)?;
    Ok(LegalDocument {
        id: id.clone(),
        title,
        sections,
    })
}

/// Current canonical sections
pub fn current_sections(conn: &Connection, id: &DocumentId) -> Result<Vec<Section>> {
    document_title(conn, id)?;
    fetch_sections(conn, id)
}

fn fetch_sections(conn: &Connection, id: &DocumentId) -> Result<Vec<Section>> {
    let mut stmt = conn
        .prepare(
            "SELECT chapter, section, text_content FROM sections
             WHERE document_id = ?1",
        )
        .map_err(from_rusqlite)?;
    let sections = stmt
        .query_map([id.as_str()], |row| {
            Ok(Section {
                key: section_key(row.get(0)?, row.get(1)?),
                text: row.get(2)?,
            })
        })
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;
    Ok(sections)
}

struct AmendmentRow {
    id: i64,
    instrument_id: String,
    title: Option<String>,
    effective_date: String,
    publication_date: Option<String>,
    sequence: i64,
    parse_status: String,
    metadata: String,
}

/// Amendments ordered by effective date, then sequence
pub fn amendments(conn: &Connection, id: &DocumentId) -> Result<Vec<Amendment>> {
    document_title(conn, id)?;
    let mut stmt = conn
        .prepare(
            "SELECT id, instrument_id, title, effective_date, publication_date,
                    sequence, parse_status, metadata
             FROM amendments
             WHERE document_id = ?1
             ORDER BY effective_date, sequence, id",
        )
        .map_err(from_rusqlite)?;
    let rows = stmt
        .query_map([id.as_str()], |row| {
            Ok(AmendmentRow {
                id: row.get(0)?,
                instrument_id: row.get(1)?,
                title: row.get(2)?,
                effective_date: row.get(3)?,
                publication_date: row.get(4)?,
                sequence: row.get(5)?,
                parse_status: row.get(6)?,
                metadata: row.get(7)?,
            })
        })
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    rows.into_iter()
        .map(|row| {
            Ok(Amendment {
                id: row.id,
                document_id: id.clone(),
                instrument_id: row.instrument_id,
                title: row.title,
                effective_date: parse_date("amendments", &row.effective_date)?,
                publication_date: row
                    .publication_date
                    .as_deref()
                    .map(|d| parse_date("amendments", d))
                    .transpose()?,
                sequence: to_u32("amendments", "sequence", row.sequence)?,
                parse_status: row.parse_status.parse()?,
                metadata: Metadata::from_json_str(&row.metadata)
                    .map_err(|e| invalid_row("amendments", format!("invalid metadata: {}", e)))?,
            })
        })
        .collect()
}

struct ChangeRow {
    amendment_id: i64,
    instrument_id: String,
    effective_date: String,
    sequence: i64,
    chapter: String,
    section: String,
    change_type: String,
    new_text: Option<String>,
    sort_order: i64,
    from_chapter: Option<String>,
    from_section: Option<String>,
}

/// Section changes joined to their amendment, in chronological order
pub fn section_changes(conn: &Connection, id: &DocumentId) -> Result<Vec<SectionChange>> {
    document_title(conn, id)?;
    let mut stmt = conn
        .prepare(
            "SELECT sc.amendment_id, a.instrument_id, a.effective_date, a.sequence,
                    sc.chapter, sc.section, sc.change_type, sc.new_text, sc.sort_order,
                    sc.renumbered_from_chapter, sc.renumbered_from_section
             FROM section_changes sc
             JOIN amendments a ON a.id = sc.amendment_id
             WHERE a.document_id = ?1
             ORDER BY a.effective_date, a.sequence, sc.sort_order, sc.id",
        )
        .map_err(from_rusqlite)?;
    let rows = stmt
        .query_map([id.as_str()], |row| {
            Ok(ChangeRow {
                amendment_id: row.get(0)?,
                instrument_id: row.get(1)?,
                effective_date: row.get(2)?,
                sequence: row.get(3)?,
                chapter: row.get(4)?,
                section: row.get(5)?,
                change_type: row.get(6)?,
                new_text: row.get(7)?,
                sort_order: row.get(8)?,
                from_chapter: row.get(9)?,
                from_section: row.get(10)?,
            })
        })
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    rows.into_iter()
        .map(|row| {
            let from = row
                .from_section
                .map(|section| section_key(row.from_chapter.unwrap_or_default(), section));
            Ok(SectionChange {
                amendment_id: row.amendment_id,
                instrument_id: row.instrument_id,
                effective_date: parse_date("section_changes", &row.effective_date)?,
                amendment_sequence: to_u32("amendments", "sequence", row.sequence)?,
                key: section_key(row.chapter, row.section),
                kind: ChangeKind::from_code(&row.change_type, from)?,
                new_text: row.new_text,
                sort_order: to_u32("section_changes", "sort_order", row.sort_order)?,
            })
        })
        .collect()
}
