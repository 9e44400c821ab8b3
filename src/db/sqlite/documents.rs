//! Document storage: JSON records addressed by collection and id

use crate::error::{AppError, Result};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use serde_json::{Map, Value};

/// Equality filter over top-level document fields
pub type Filter = Map<String, Value>;

/// Extract the string `id` every stored document must carry
fn document_id(doc: &Value) -> Result<&str> {
    doc.get("id").and_then(Value::as_str).ok_or_else(|| {
        AppError::Validation("Document must be an object with a string `id`".to_string())
    })
}

fn matches(doc: &Value, filter: &Filter) -> bool {
    filter.iter().all(|(key, expected)| doc.get(key) == Some(expected))
}

/// Insert a document into a collection
pub fn insert(conn: &Connection, collection: &str, doc: &Value) -> Result<()> {
    let id = document_id(doc)?;
    let data = serde_json::to_string(doc)?;

    match conn.execute(
        "INSERT INTO documents (collection, id, data) VALUES (?1, ?2, ?3)",
        params![collection, id, data],
    ) {
        Ok(_) => Ok(()),
        Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
            Err(AppError::Conflict(format!(
                "Document {} already exists in {}",
                id, collection
            )))
        }
        Err(e) => Err(e.into()),
    }
}

/// Find documents matching `filter`, in insertion order, at most `limit`
pub fn find(conn: &Connection, collection: &str, filter: &Filter, limit: usize) -> Result<Vec<Value>> {
    let mut stmt =
        conn.prepare("SELECT data FROM documents WHERE collection = ?1 ORDER BY seq ASC")?;
    let mut rows = stmt.query([collection])?;

    let mut docs = Vec::new();
    while docs.len() < limit {
        let Some(row) = rows.next()? else {
            break;
        };
        let data: String = row.get(0)?;
        let doc: Value = serde_json::from_str(&data)?;
        if matches(&doc, filter) {
            docs.push(doc);
        }
    }

    Ok(docs)
}

/// Get a single document by id
pub fn find_one(conn: &Connection, collection: &str, id: &str) -> Result<Option<Value>> {
    let data: Option<String> = conn
        .query_row(
            "SELECT data FROM documents WHERE collection = ?1 AND id = ?2",
            params![collection, id],
            |row| row.get(0),
        )
        .optional()?;

    data.map(|d| serde_json::from_str(&d).map_err(AppError::from))
        .transpose()
}

/// Merge `fields` into an existing document
pub fn update(conn: &Connection, collection: &str, id: &str, fields: &Filter) -> Result<()> {
    let mut doc = find_one(conn, collection, id)?
        .ok_or_else(|| AppError::NotFound(format!("Document not found: {}/{}", collection, id)))?;

    let Value::Object(ref mut object) = doc else {
        return Err(AppError::Internal(format!(
            "Stored document {}/{} is not an object",
            collection, id
        )));
    };
    for (key, value) in fields {
        // The id is the storage key and never changes
        if key != "id" {
            object.insert(key.clone(), value.clone());
        }
    }

    conn.execute(
        "UPDATE documents SET data = ?1, updated_at = datetime('now')
         WHERE collection = ?2 AND id = ?3",
        params![serde_json::to_string(&doc)?, collection, id],
    )?;

    Ok(())
}

/// Delete a document, returns the number of documents removed
pub fn delete(conn: &Connection, collection: &str, id: &str) -> Result<usize> {
    let rows = conn.execute(
        "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
        params![collection, id],
    )?;
    Ok(rows)
}

/// Count documents in a collection
pub fn count(conn: &Connection, collection: &str) -> Result<usize> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM documents WHERE collection = ?1",
        [collection],
        |row| row.get(0),
    )?;
    Ok(count as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::migrations::run_migrations;
    use serde_json::json;

    fn create_test_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    #[test]
    fn test_insert_and_find_one() {
        let conn = create_test_db();
        insert(&conn, "downloads", &json!({"id": "a", "progress": 0})).unwrap();

        let doc = find_one(&conn, "downloads", "a").unwrap().unwrap();
        assert_eq!(doc["progress"], 0);

        // Same id in another collection is a different document
        assert!(find_one(&conn, "status_checks", "a").unwrap().is_none());
    }

    #[test]
    fn test_insert_requires_id() {
        let conn = create_test_db();
        let result = insert(&conn, "downloads", &json!({"progress": 0}));
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let conn = create_test_db();
        insert(&conn, "downloads", &json!({"id": "a"})).unwrap();
        let result = insert(&conn, "downloads", &json!({"id": "a"}));
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[test]
    fn test_find_preserves_order_and_filters() {
        let conn = create_test_db();
        for (id, status) in [("1", "done"), ("2", "running"), ("3", "done")] {
            insert(&conn, "jobs", &json!({"id": id, "status": status})).unwrap();
        }

        let all = find(&conn, "jobs", &Filter::new(), 1000).unwrap();
        let ids: Vec<_> = all.iter().map(|d| d["id"].as_str().unwrap()).collect();
        assert_eq!(ids, ["1", "2", "3"]);

        let mut filter = Filter::new();
        filter.insert("status".into(), json!("done"));
        let done = find(&conn, "jobs", &filter, 1000).unwrap();
        assert_eq!(done.len(), 2);
        assert_eq!(done[1]["id"], "3");
    }

    #[test]
    fn test_find_respects_limit() {
        let conn = create_test_db();
        for i in 0..5 {
            insert(&conn, "status_checks", &json!({"id": i.to_string()})).unwrap();
        }
        let docs = find(&conn, "status_checks", &Filter::new(), 3).unwrap();
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[2]["id"], "2");
    }

    #[test]
    fn test_update_merges_fields() {
        let conn = create_test_db();
        insert(
            &conn,
            "downloads",
            &json!({"id": "a", "filename": "f.zip", "progress": 0, "status": "downloading"}),
        )
        .unwrap();

        let mut fields = Filter::new();
        fields.insert("progress".into(), json!(50.0));
        fields.insert("id".into(), json!("hijacked"));
        update(&conn, "downloads", "a", &fields).unwrap();

        let doc = find_one(&conn, "downloads", "a").unwrap().unwrap();
        assert_eq!(doc["progress"], 50.0);
        assert_eq!(doc["filename"], "f.zip");
        assert_eq!(doc["status"], "downloading");
        assert_eq!(doc["id"], "a");
    }

    #[test]
    fn test_update_missing_document() {
        let conn = create_test_db();
        let result = update(&conn, "downloads", "missing", &Filter::new());
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_delete_reports_count() {
        let conn = create_test_db();
        insert(&conn, "downloads", &json!({"id": "a"})).unwrap();

        assert_eq!(delete(&conn, "downloads", "a").unwrap(), 1);
        assert_eq!(delete(&conn, "downloads", "a").unwrap(), 0);
        assert_eq!(count(&conn, "downloads").unwrap(), 0);
    }
}
