//! Document to record mapping
//!
//! Legacy documents name the owner and the date under several different
//! fields. The candidates are an explicit, ordered configuration: the first
//! field holding a non-null value wins.

use serde_json::{Map, Value};
use tracing::debug;

use crate::models::{Money, OwnerId, RawDate, RecordKind, TransactionRecord};

use super::documents::Document;

/// Date fields checked by default, in order
pub const DEFAULT_DATE_FIELDS: [&str; 8] = [
    "date",
    "timestamp",
    "createdAt",
    "time",
    "addedOn",
    "created_at",
    "ts",
    "created",
];

/// Owner fields checked by default, in order
pub const DEFAULT_OWNER_FIELDS: [&str; 5] = ["user_id", "userId", "user", "uid", "ownerId"];

/// Canonical field names written for new documents
pub mod keys {
    pub const TITLE: &str = "title";
    pub const AMOUNT: &str = "amount";
    pub const TYPE: &str = "type";
    pub const CATEGORY: &str = "category";
    pub const DATE: &str = "date";
    pub const OWNER: &str = "user_id";
    pub const CREATED_AT: &str = "createdAt";
}

/// Title shown for documents stored without one
pub const UNTITLED: &str = "(untitled)";

/// Ordered fallback chains for reading documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    date_fields: Vec<String>,
    owner_fields: Vec<String>,
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self::new(
            DEFAULT_DATE_FIELDS.iter().map(|s| s.to_string()).collect(),
            DEFAULT_OWNER_FIELDS.iter().map(|s| s.to_string()).collect(),
        )
    }
}

impl FieldMapping {
    /// Create a mapping from explicit chains (blank names are dropped)
    pub fn new(date_fields: Vec<String>, owner_fields: Vec<String>) -> Self {
        let clean = |fields: Vec<String>| -> Vec<String> {
            fields
                .into_iter()
                .map(|f| f.trim().to_string())
                .filter(|f| !f.is_empty())
                .collect()
        };
        Self {
            date_fields: clean(date_fields),
            owner_fields: clean(owner_fields),
        }
    }

    /// Date field candidates in priority order
    pub fn date_fields(&self) -> &[String] {
        &self.date_fields
    }

    /// Field new and edited dates are written to (head of the date chain)
    pub fn primary_date_field(&self) -> &str {
        self.date_fields
            .first()
            .map(String::as_str)
            .unwrap_or(keys::DATE)
    }

    /// Owner field candidates in priority order
    pub fn owner_fields(&self) -> &[String] {
        &self.owner_fields
    }

    /// Owner of a document, from the first non-null owner field
    pub fn owner_of(&self, fields: &Map<String, Value>) -> Option<String> {
        first_present(fields, &self.owner_fields).and_then(|value| match value {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    /// Date of a document, from the first non-null date field
    pub fn raw_date_of(&self, fields: &Map<String, Value>) -> RawDate {
        first_present(fields, &self.date_fields)
            .map(RawDate::from_value)
            .unwrap_or(RawDate::Missing)
    }
}

fn first_present<'a>(fields: &'a Map<String, Value>, candidates: &[String]) -> Option<&'a Value> {
    candidates.iter().find_map(|name| match fields.get(name) {
        Some(Value::Null) | None => None,
        Some(value) => Some(value),
    })
}

/// Why a document could not become a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingIssue {
    /// No amount field at all
    MissingAmount,
    /// Amount present but not a number or numeric string
    InvalidAmount(String),
}

impl std::fmt::Display for MappingIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingAmount => write!(f, "missing amount"),
            Self::InvalidAmount(raw) => write!(f, "invalid amount: {}", raw),
        }
    }
}

/// Parse an amount value into a magnitude
pub fn parse_amount(value: &Value) -> Result<Money, MappingIssue> {
    let amount = match value {
        Value::Null => return Err(MappingIssue::MissingAmount),
        Value::Number(n) => n
            .as_f64()
            .and_then(Money::from_decimal)
            .ok_or_else(|| MappingIssue::InvalidAmount(n.to_string()))?,
        Value::String(s) => {
            Money::parse(s).map_err(|_| MappingIssue::InvalidAmount(s.clone()))?
        }
        other => return Err(MappingIssue::InvalidAmount(other.to_string())),
    };

    if amount.is_negative() {
        debug!(amount = %amount, "negative amount stored; using its magnitude");
    }
    Ok(amount.abs())
}

/// Convert a stored document into a record owned by `owner`
pub fn document_to_record(
    doc: &Document,
    mapping: &FieldMapping,
    owner: &OwnerId,
) -> Result<TransactionRecord, MappingIssue> {
    let fields = &doc.fields;

    let amount = parse_amount(fields.get(keys::AMOUNT).unwrap_or(&Value::Null))?;

    let title = fields
        .get(keys::TITLE)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(UNTITLED)
        .to_string();

    let kind = match fields.get(keys::TYPE) {
        Some(Value::String(s)) => RecordKind::from(s.clone()),
        Some(Value::Null) | None => RecordKind::Unrecognized(String::new()),
        Some(other) => RecordKind::Unrecognized(other.to_string()),
    };

    let category = fields
        .get(keys::CATEGORY)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Ok(TransactionRecord {
        id: doc.id.clone(),
        title,
        amount,
        kind,
        category,
        occurred_at: mapping.raw_date_of(fields),
        owner_id: owner.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryType, RecordId};
    use chrono::NaiveDate;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        Document::from_value(value).unwrap()
    }

    #[test]
    fn test_owner_fallback_order() {
        let mapping = FieldMapping::default();
        let d = doc(json!({ "id": "a", "userId": "u-2", "uid": "u-3" }));
        assert_eq!(mapping.owner_of(&d.fields).as_deref(), Some("u-2"));

        let d = doc(json!({ "id": "a", "user_id": null, "ownerId": "u-9" }));
        assert_eq!(mapping.owner_of(&d.fields).as_deref(), Some("u-9"));

        let d = doc(json!({ "id": "a" }));
        assert_eq!(mapping.owner_of(&d.fields), None);
    }

    #[test]
    fn test_date_fallback_order() {
        let mapping = FieldMapping::default();
        let d = doc(json!({
            "id": "a",
            "createdAt": { "seconds": 1_736_899_200, "nanoseconds": 0 },
            "timestamp": "2025-02-01"
        }));
        // "timestamp" precedes "createdAt" in the chain
        assert_eq!(
            mapping.raw_date_of(&d.fields).resolve(),
            NaiveDate::from_ymd_opt(2025, 2, 1)
        );
    }

    #[test]
    fn test_custom_chain_is_respected() {
        let mapping = FieldMapping::new(vec!["when".into(), " ".into()], vec!["owner".into()]);
        assert_eq!(mapping.date_fields(), &["when".to_string()]);
        assert_eq!(mapping.primary_date_field(), "when");
        assert_eq!(FieldMapping::default().primary_date_field(), "date");
        assert_eq!(FieldMapping::new(vec![], vec![]).primary_date_field(), "date");

        let d = doc(json!({ "id": "a", "date": "2025-01-01", "when": "2024-06-30" }));
        assert_eq!(
            mapping.raw_date_of(&d.fields).resolve(),
            NaiveDate::from_ymd_opt(2024, 6, 30)
        );
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(&json!(12.5)).unwrap().cents(), 1250);
        assert_eq!(parse_amount(&json!("40")).unwrap().cents(), 4000);
        assert_eq!(parse_amount(&json!(-3)).unwrap().cents(), 300);
        assert_eq!(parse_amount(&json!("₹-12")).unwrap().cents(), 1200);
        assert_eq!(parse_amount(&Value::Null), Err(MappingIssue::MissingAmount));
        assert!(matches!(
            parse_amount(&json!(5e16)),
            Err(MappingIssue::InvalidAmount(_))
        ));
        assert!(matches!(
            parse_amount(&json!("lots")),
            Err(MappingIssue::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_document_to_record() {
        let owner = OwnerId::new("u-1");
        let d = doc(json!({
            "id": "doc-7",
            "title": "  Salary ",
            "amount": 100,
            "type": "income",
            "category": "Salary",
            "date": "2025-01-15",
            "user_id": "u-1"
        }));

        let record = document_to_record(&d, &FieldMapping::default(), &owner).unwrap();
        assert_eq!(record.id, RecordId::new("doc-7"));
        assert_eq!(record.title, "Salary");
        assert_eq!(record.amount.cents(), 10000);
        assert_eq!(record.entry_type(), Some(EntryType::Income));
        assert_eq!(record.date(), NaiveDate::from_ymd_opt(2025, 1, 15));
    }

    #[test]
    fn test_lenient_fields() {
        let owner = OwnerId::new("u-1");
        let d = doc(json!({ "id": "doc-8", "amount": 5, "type": 3 }));

        let record = document_to_record(&d, &FieldMapping::default(), &owner).unwrap();
        assert_eq!(record.title, UNTITLED);
        assert_eq!(record.category_label(), "Other");
        assert_eq!(record.kind, RecordKind::Unrecognized("3".into()));
        assert!(record.occurred_at.is_missing());
    }
}
