//! Local document store
//!
//! Stands in for the hosted document database: one JSON document per
//! transaction, keyed by an opaque id, with an "all records for one owner
//! ordered by date" query. Documents keep whatever fields they were written
//! with; mapping them to records happens in [`super::mapping`].

use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{TrackerError, TrackerResult};
use crate::models::{OwnerId, RecordId, TransactionRecord};

use super::file_io::{read_json, read_json_required, write_json_atomic};
use super::mapping::{document_to_record, FieldMapping};

/// A stored document: an id plus free-form fields
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: RecordId,
    pub fields: Map<String, Value>,
}

impl Document {
    /// Create a document
    pub fn new(id: RecordId, fields: Map<String, Value>) -> Self {
        Self { id, fields }
    }

    /// Build a document from a JSON object carrying an `id` (or `_id`) string
    pub fn from_value(value: Value) -> Option<Self> {
        let Value::Object(mut fields) = value else {
            return None;
        };
        let id = match fields.remove("id").or_else(|| fields.remove("_id")) {
            Some(Value::String(id)) if !id.trim().is_empty() => RecordId::new(id.trim()),
            _ => return None,
        };
        Some(Self { id, fields })
    }

    /// JSON object with the id merged back in
    pub fn to_value(&self) -> Value {
        let mut object = Map::with_capacity(self.fields.len() + 1);
        object.insert("id".into(), Value::String(self.id.to_string()));
        for (key, value) in &self.fields {
            object.insert(key.clone(), value.clone());
        }
        Value::Object(object)
    }
}

/// On-disk layout written by [`DocumentStore::save`]
#[derive(Debug, Default, Serialize, Deserialize)]
struct DocumentFile {
    documents: Vec<Value>,
}

/// Records for one owner, plus the documents that could not be read
#[derive(Debug, Clone, Default)]
pub struct LoadedRecords {
    /// Records ordered by resolved date, unresolvable dates last
    pub records: Vec<TransactionRecord>,
    /// Owner's documents skipped for a missing or invalid amount
    pub malformed: usize,
}

/// JSON-file backed document store
pub struct DocumentStore {
    path: PathBuf,
    documents: RwLock<Vec<Document>>,
}

impl DocumentStore {
    /// Create a store backed by `path` (nothing is read yet)
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            documents: RwLock::new(Vec::new()),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load documents from disk; a missing file is an empty store
    pub fn load(&self) -> TrackerResult<()> {
        let value: Value = read_json(&self.path)?;
        self.replace_all(value)
    }

    /// Load documents from disk, failing if the file does not exist
    ///
    /// Used for exports handed over explicitly with `--file`.
    pub fn load_required(&self) -> TrackerResult<()> {
        if !self.path.exists() {
            return Err(TrackerError::Storage(format!(
                "File not found: {}",
                self.path.display()
            )));
        }
        let value: Value = read_json_required(&self.path)?;
        self.replace_all(value)
    }

    fn replace_all(&self, value: Value) -> TrackerResult<()> {
        let items = match value {
            Value::Null => Vec::new(),
            Value::Array(items) => items,
            Value::Object(mut object) => match object
                .remove("documents")
                .or_else(|| object.remove("transactions"))
            {
                Some(Value::Array(items)) => items,
                _ => {
                    return Err(TrackerError::Storage(format!(
                        "{} has no \"documents\" array",
                        self.path.display()
                    )))
                }
            },
            _ => {
                return Err(TrackerError::Storage(format!(
                    "{} is not a document list",
                    self.path.display()
                )))
            }
        };

        let total = items.len();
        let parsed: Vec<Document> = items.into_iter().filter_map(Document::from_value).collect();
        if parsed.len() < total {
            warn!(
                skipped = total - parsed.len(),
                path = %self.path.display(),
                "ignored entries without a string id"
            );
        }
        debug!(count = parsed.len(), "loaded documents");

        *self.write()? = parsed;
        Ok(())
    }

    /// Save documents to disk atomically
    pub fn save(&self) -> TrackerResult<()> {
        let documents = self.read()?;
        let file = DocumentFile {
            documents: documents.iter().map(Document::to_value).collect(),
        };
        write_json_atomic(&self.path, &file)
    }

    /// Number of stored documents (all owners)
    pub fn len(&self) -> TrackerResult<usize> {
        Ok(self.read()?.len())
    }

    /// Check whether the store is empty
    pub fn is_empty(&self) -> TrackerResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Get a document by id
    pub fn get(&self, id: &RecordId) -> TrackerResult<Option<Document>> {
        Ok(self.read()?.iter().find(|d| &d.id == id).cloned())
    }

    /// Insert a new document
    pub fn insert(&self, document: Document) -> TrackerResult<()> {
        let mut documents = self.write()?;
        if documents.iter().any(|d| d.id == document.id) {
            return Err(TrackerError::Storage(format!(
                "Document already exists: {}",
                document.id
            )));
        }
        documents.push(document);
        Ok(())
    }

    /// Merge `patch` into an existing document's fields
    pub fn update(&self, id: &RecordId, patch: Map<String, Value>) -> TrackerResult<Document> {
        let mut documents = self.write()?;
        let document = documents
            .iter_mut()
            .find(|d| &d.id == id)
            .ok_or_else(|| TrackerError::record_not_found(id.to_string()))?;
        for (key, value) in patch {
            document.fields.insert(key, value);
        }
        Ok(document.clone())
    }

    /// Remove a document
    pub fn delete(&self, id: &RecordId) -> TrackerResult<Document> {
        let mut documents = self.write()?;
        let index = documents
            .iter()
            .position(|d| &d.id == id)
            .ok_or_else(|| TrackerError::record_not_found(id.to_string()))?;
        Ok(documents.remove(index))
    }

    /// Owner of a stored document, via the mapping's owner chain
    pub fn owner_of(&self, id: &RecordId, mapping: &FieldMapping) -> TrackerResult<Option<String>> {
        Ok(self.get(id)?.and_then(|d| mapping.owner_of(&d.fields)))
    }

    /// All records for one owner, ordered by date
    pub fn records_for_owner(
        &self,
        owner: &OwnerId,
        mapping: &FieldMapping,
    ) -> TrackerResult<LoadedRecords> {
        let documents = self.read()?;
        let mut loaded = LoadedRecords::default();

        for document in documents.iter() {
            if mapping.owner_of(&document.fields).as_deref() != Some(owner.as_str()) {
                continue;
            }
            match document_to_record(document, mapping, owner) {
                Ok(record) => loaded.records.push(record),
                Err(issue) => {
                    debug!(id = %document.id, %issue, "skipping document");
                    loaded.malformed += 1;
                }
            }
        }

        if loaded.malformed > 0 {
            warn!(
                count = loaded.malformed,
                "documents skipped for a missing or invalid amount"
            );
        }

        // Stable: same-day records keep their stored order
        loaded.records.sort_by_key(|r| {
            let date = r.date();
            (date.is_none(), date)
        });

        Ok(loaded)
    }

    fn read(&self) -> TrackerResult<RwLockReadGuard<'_, Vec<Document>>> {
        self.documents
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> TrackerResult<RwLockWriteGuard<'_, Vec<Document>>> {
        self.documents
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;
    use tempfile::TempDir;

    fn store_with(value: Value) -> (TempDir, DocumentStore) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transactions.json");
        std::fs::write(&path, value.to_string()).unwrap();
        let store = DocumentStore::new(path);
        store.load().unwrap();
        (temp_dir, store)
    }

    fn doc(id: &str, owner: &str, date: Value, amount: Value) -> Value {
        json!({
            "id": id,
            "title": format!("t-{}", id),
            "amount": amount,
            "type": "expense",
            "category": "Shopping",
            "date": date,
            "user_id": owner,
        })
    }

    #[test]
    fn test_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = DocumentStore::new(temp_dir.path().join("none.json"));
        store.load().unwrap();
        assert!(store.is_empty().unwrap());
        assert!(store.load_required().is_err());
    }

    #[test]
    fn test_accepts_bare_array_and_wrapped_layouts() {
        let (_t, bare) = store_with(json!([doc("a", "u1", json!("2025-01-01"), json!(1))]));
        assert_eq!(bare.len().unwrap(), 1);

        let (_t, wrapped) = store_with(json!({
            "transactions": [doc("a", "u1", json!("2025-01-01"), json!(1))]
        }));
        assert_eq!(wrapped.len().unwrap(), 1);
    }

    #[test]
    fn test_rejects_unknown_layout() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("t.json");
        std::fs::write(&path, r#"{"rows": []}"#).unwrap();
        let store = DocumentStore::new(path);
        assert!(matches!(store.load(), Err(TrackerError::Storage(_))));
    }

    #[test]
    fn test_records_scoped_to_owner_and_ordered_by_date() {
        let (_t, store) = store_with(json!([
            doc("late", "u1", json!("2025-03-01"), json!(3)),
            doc("bad", "u1", json!("N/A"), json!(4)),
            doc("other", "u2", json!("2025-01-01"), json!(9)),
            doc("early", "u1", json!("2025-01-05"), json!(1)),
            doc("noamount", "u1", json!("2025-01-06"), Value::Null),
        ]));

        let loaded = store
            .records_for_owner(&OwnerId::new("u1"), &FieldMapping::default())
            .unwrap();
        let ids: Vec<&str> = loaded.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["early", "late", "bad"]);
        assert_eq!(loaded.malformed, 1);
    }

    #[test]
    fn test_oversized_amounts_are_skipped_not_summed() {
        let (_t, store) = store_with(json!([
            doc("huge-1", "u1", json!("2025-01-02"), json!(5e16)),
            doc("huge-2", "u1", json!("2025-01-03"), json!("50000000000000000")),
            doc("rent", "u1", json!("2025-01-04"), json!(60)),
        ]));

        let loaded = store
            .records_for_owner(&OwnerId::new("u1"), &FieldMapping::default())
            .unwrap();
        assert_eq!(loaded.malformed, 2);
        assert_eq!(loaded.records.len(), 1);

        let summary = crate::reports::compute_summary(&loaded.records, &Default::default());
        assert_eq!(summary.total_expense.cents(), 6000);
        assert_eq!(summary.balance.cents(), -6000);
    }

    #[test]
    fn test_insert_update_delete_and_save() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("transactions.json");
        let store = DocumentStore::new(path.clone());
        store.load().unwrap();

        let mut fields = Map::new();
        fields.insert("title".into(), json!("Lunch"));
        fields.insert("amount".into(), json!(12.5));
        fields.insert("type".into(), json!("expense"));
        fields.insert("date".into(), json!("2025-01-02"));
        fields.insert("user_id".into(), json!("u1"));
        let id = RecordId::new("doc-1");
        store.insert(Document::new(id.clone(), fields.clone())).unwrap();
        assert!(store.insert(Document::new(id.clone(), fields)).is_err());

        let mut patch = Map::new();
        patch.insert("amount".into(), json!(15));
        let updated = store.update(&id, patch).unwrap();
        assert_eq!(updated.fields["amount"], json!(15));

        store.save().unwrap();
        let reloaded = DocumentStore::new(path);
        reloaded.load().unwrap();
        let records = reloaded
            .records_for_owner(&OwnerId::new("u1"), &FieldMapping::default())
            .unwrap()
            .records;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].amount.cents(), 1500);
        assert_eq!(records[0].date(), NaiveDate::from_ymd_opt(2025, 1, 2));

        store.delete(&id).unwrap();
        assert!(store.delete(&id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_document_value_round_trip() {
        let value = json!({ "id": "x1", "title": "Coffee", "amount": 3 });
        let document = Document::from_value(value.clone()).unwrap();
        assert_eq!(document.id.as_str(), "x1");
        assert!(!document.fields.contains_key("id"));
        assert_eq!(document.to_value(), value);
        assert!(Document::from_value(json!({ "title": "no id" })).is_none());
    }
}
