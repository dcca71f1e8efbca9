//! Record service
//!
//! Owner-scoped create, edit and delete of transaction records. New and
//! edited documents are always written in the canonical field layout, with
//! the date under the head of the configured date chain.

use chrono::{Local, NaiveDate, SecondsFormat, Utc};
use serde_json::{json, Map, Value};
use tracing::info;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{EntryType, Money, OwnerId, RecordId, TransactionRecord, SUGGESTED_CATEGORIES};
use crate::storage::mapping::keys;
use crate::storage::{document_to_record, Document, FieldMapping, LoadedRecords, Storage};

/// Smallest amount accepted for a new record
pub const MIN_AMOUNT: Money = Money::from_cents(1);

/// Input for recording a new transaction
#[derive(Debug, Clone)]
pub struct NewRecord {
    pub title: String,
    pub amount: Money,
    pub entry_type: EntryType,
    /// Defaults to the first suggested category
    pub category: Option<String>,
    /// Defaults to today
    pub date: Option<NaiveDate>,
}

/// Changes to an existing record; `None` leaves a field untouched
#[derive(Debug, Clone, Default)]
pub struct RecordPatch {
    pub title: Option<String>,
    pub amount: Option<Money>,
    pub entry_type: Option<EntryType>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
}

impl RecordPatch {
    /// Check whether the patch changes anything
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.amount.is_none()
            && self.entry_type.is_none()
            && self.category.is_none()
            && self.date.is_none()
    }
}

/// Service for record management
pub struct RecordService<'a> {
    storage: &'a Storage,
    mapping: FieldMapping,
}

impl<'a> RecordService<'a> {
    /// Create a new record service
    pub fn new(storage: &'a Storage, mapping: FieldMapping) -> Self {
        Self { storage, mapping }
    }

    /// All records belonging to `owner`, ordered by date
    pub fn list(&self, owner: &OwnerId) -> TrackerResult<LoadedRecords> {
        self.storage.documents.records_for_owner(owner, &self.mapping)
    }

    /// Get one of `owner`'s records
    pub fn get(&self, owner: &OwnerId, id: &RecordId) -> TrackerResult<TransactionRecord> {
        let document = self.owned_document(owner, id)?;
        document_to_record(&document, &self.mapping, owner).map_err(|issue| {
            TrackerError::Validation(format!("Transaction {} is unreadable: {}", id, issue))
        })
    }

    /// Record a new transaction
    pub fn create(&self, owner: &OwnerId, input: NewRecord) -> TrackerResult<TransactionRecord> {
        if owner.is_blank() {
            return Err(TrackerError::Validation("Owner cannot be empty".into()));
        }
        let title = validate_title(&input.title)?;
        validate_amount(input.amount)?;

        let category = input
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| SUGGESTED_CATEGORIES[0].to_string());
        let date = input.date.unwrap_or_else(|| Local::now().date_naive());

        let mut fields = Map::new();
        fields.insert(keys::TITLE.into(), json!(title));
        fields.insert(keys::AMOUNT.into(), amount_value(input.amount));
        fields.insert(keys::TYPE.into(), json!(input.entry_type.as_str()));
        fields.insert(keys::CATEGORY.into(), json!(category));
        fields.insert(self.mapping.primary_date_field().into(), date_value(date));
        fields.insert(keys::OWNER.into(), json!(owner.as_str()));
        fields.insert(
            keys::CREATED_AT.into(),
            json!(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
        );

        let id = RecordId::generate();
        self.storage.documents.insert(Document::new(id.clone(), fields))?;
        self.storage.save_all()?;

        info!(%id, owner = %owner, amount = %input.amount, kind = input.entry_type.as_str(), "recorded transaction");

        Ok(TransactionRecord::new(
            id,
            owner.clone(),
            title,
            input.amount,
            input.entry_type,
            category,
            date,
        ))
    }

    /// Edit one of `owner`'s records
    pub fn update(
        &self,
        owner: &OwnerId,
        id: &RecordId,
        patch: RecordPatch,
    ) -> TrackerResult<TransactionRecord> {
        self.owned_document(owner, id)?;

        let mut fields = Map::new();
        if let Some(title) = &patch.title {
            fields.insert(keys::TITLE.into(), json!(validate_title(title)?));
        }
        if let Some(amount) = patch.amount {
            validate_amount(amount)?;
            fields.insert(keys::AMOUNT.into(), amount_value(amount));
        }
        if let Some(entry_type) = patch.entry_type {
            fields.insert(keys::TYPE.into(), json!(entry_type.as_str()));
        }
        if let Some(category) = &patch.category {
            let category = category.trim();
            if category.is_empty() {
                return Err(TrackerError::Validation("Category cannot be empty".into()));
            }
            fields.insert(keys::CATEGORY.into(), json!(category));
        }
        if let Some(date) = patch.date {
            // Canonical field wins the date chain; legacy date fields stay as-is
            fields.insert(self.mapping.primary_date_field().into(), date_value(date));
        }

        if !fields.is_empty() {
            self.storage.documents.update(id, fields)?;
            self.storage.save_all()?;
            info!(%id, owner = %owner, "updated transaction");
        }

        self.get(owner, id)
    }

    /// Delete one of `owner`'s records
    pub fn delete(&self, owner: &OwnerId, id: &RecordId) -> TrackerResult<RecordId> {
        self.owned_document(owner, id)?;
        let removed = self.storage.documents.delete(id)?;
        self.storage.save_all()?;

        info!(%id, owner = %owner, "deleted transaction");
        Ok(removed.id)
    }

    /// Document lookup that hides other owners' records
    fn owned_document(&self, owner: &OwnerId, id: &RecordId) -> TrackerResult<Document> {
        self.storage
            .documents
            .get(id)?
            .filter(|d| self.mapping.owner_of(&d.fields).as_deref() == Some(owner.as_str()))
            .ok_or_else(|| TrackerError::record_not_found(id.to_string()))
    }
}

fn validate_title(title: &str) -> TrackerResult<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TrackerError::Validation("Title cannot be empty".into()));
    }
    Ok(trimmed.to_string())
}

fn validate_amount(amount: Money) -> TrackerResult<()> {
    if amount < MIN_AMOUNT {
        return Err(TrackerError::Validation(format!(
            "Amount must be at least {}",
            MIN_AMOUNT
        )));
    }
    Ok(())
}

fn amount_value(amount: Money) -> Value {
    json!(amount.to_decimal())
}

fn date_value(date: NaiveDate) -> Value {
    json!(date.format("%Y-%m-%d").to_string())
}
