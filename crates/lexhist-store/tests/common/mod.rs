use lexhist_store::migrations::apply_migrations;
use rusqlite::{params, Connection};

/// Fresh in-memory database with the schema applied
#[allow(dead_code)]
pub fn setup_test_db() -> Connection {
    let mut conn = Connection::open_in_memory().expect("Failed to create in-memory database");
    apply_migrations(&mut conn).expect("Failed to apply migrations");
    conn
}

#[allow(dead_code)]
pub fn insert_document(conn: &Connection, id: &str, title: &str) {
    conn.execute(
        "INSERT INTO legal_documents (id, title) VALUES (?1, ?2)",
        params![id, title],
    )
    .unwrap();
}

#[allow(dead_code)]
pub fn insert_section(conn: &Connection, doc: &str, chapter: &str, section: &str, text: &str) {
    conn.execute(
        "INSERT INTO sections (document_id, chapter, section, text_content) VALUES (?1, ?2, ?3, ?4)",
        params![doc, chapter, section, text],
    )
    .unwrap();
}

#[allow(dead_code)]
pub fn insert_amendment(conn: &Connection, id: i64, doc: &str, instrument: &str, effective: &str, sequence: i64) {
    conn.execute(
        "INSERT INTO amendments (id, document_id, instrument_id, effective_date, sequence)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![id, doc, instrument, effective, sequence],
    )
    .unwrap();
}

#[allow(dead_code)]
pub fn insert_change(
    conn: &Connection,
    amendment_id: i64,
    chapter: &str,
    section: &str,
    change_type: &str,
    new_text: Option<&str>,
) {
    conn.execute(
        "INSERT INTO section_changes (amendment_id, chapter, section, change_type, new_text)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![amendment_id, chapter, section, change_type, new_text],
    )
    .unwrap();
}

/// The documented scenarios, persisted
///
/// 1 kap. 1 § amended 2000 and 2010 with current "X v3"; 2 kap. 5 §
/// introduced 2020-06-01; 1 kap. 3 § repealed 2005 and reintroduced 2012.
#[allow(dead_code)]
pub fn seed_scenario(conn: &Connection) {
    let doc = "1977:1160";
    insert_document(conn, doc, "Arbetsmiljölag");
    insert_section(conn, doc, "1", "1", "X v3");
    insert_section(conn, doc, "1", "3", "Återinförd.");
    insert_section(conn, doc, "2", "5", "Ny paragraf.");

    insert_amendment(conn, 1, doc, "SFS 1999:1", "2000-01-01", 0);
    insert_amendment(conn, 2, doc, "SFS 2004:7", "2005-01-01", 0);
    insert_amendment(conn, 3, doc, "SFS 2009:2", "2010-01-01", 0);
    insert_amendment(conn, 4, doc, "SFS 2011:9", "2012-01-01", 0);
    insert_amendment(conn, 5, doc, "SFS 2020:5", "2020-06-01", 0);

    insert_change(conn, 1, "1", "1", "AMENDED", Some("X v1"));
    insert_change(conn, 2, "1", "3", "REPEALED", None);
    insert_change(conn, 3, "1", "1", "AMENDED", Some("X v2"));
    insert_change(conn, 4, "1", "3", "NEW", Some("Återinförd."));
    insert_change(conn, 5, "2", "5", "NEW", Some("Ny paragraf."));
}
