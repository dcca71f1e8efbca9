//! Transaction record model
//!
//! A record is one income or expense entry as handed over by the document
//! store. The amount is always a magnitude; direction comes from the type.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::category::category_label;
use super::date::RawDate;
use super::ids::{OwnerId, RecordId};
use super::money::Money;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Income,
    Expense,
}

impl EntryType {
    /// Wire name used in documents
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

impl FromStr for EntryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(format!(
                "Invalid transaction type: {}. Use income or expense",
                other
            )),
        }
    }
}

/// The type field of a record as found in the store
///
/// Values other than "income"/"expense" are kept verbatim so they can be
/// reported, and are never coerced into either direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecordKind {
    Known(EntryType),
    Unrecognized(String),
}

impl RecordKind {
    /// The recognized direction, if any
    pub fn entry_type(&self) -> Option<EntryType> {
        match self {
            Self::Known(t) => Some(*t),
            Self::Unrecognized(_) => None,
        }
    }

    /// Check whether this kind is a recognized direction
    pub fn is_recognized(&self) -> bool {
        matches!(self, Self::Known(_))
    }
}

impl From<String> for RecordKind {
    fn from(value: String) -> Self {
        // Exact match only: "Income" or " income" are data-quality issues
        match value.as_str() {
            "income" => Self::Known(EntryType::Income),
            "expense" => Self::Known(EntryType::Expense),
            _ => Self::Unrecognized(value),
        }
    }
}

impl From<RecordKind> for String {
    fn from(kind: RecordKind) -> Self {
        match kind {
            RecordKind::Known(t) => t.as_str().to_string(),
            RecordKind::Unrecognized(s) => s,
        }
    }
}

impl From<EntryType> for RecordKind {
    fn from(t: EntryType) -> Self {
        Self::Known(t)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(t) => write!(f, "{}", t),
            Self::Unrecognized(s) => write!(f, "?{}", s),
        }
    }
}

/// A single income or expense entry owned by one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Opaque document id
    pub id: RecordId,

    /// Display title
    pub title: String,

    /// Non-negative magnitude
    pub amount: Money,

    /// Income, expense, or an unrecognized value
    #[serde(rename = "type")]
    pub kind: RecordKind,

    /// Category label (may be empty in legacy data)
    #[serde(default)]
    pub category: String,

    /// Date the transaction is attributed to, in whatever shape it was stored
    pub occurred_at: RawDate,

    /// Owning user
    pub owner_id: OwnerId,
}

impl TransactionRecord {
    /// Create a record with a canonical calendar date
    pub fn new(
        id: impl Into<RecordId>,
        owner_id: impl Into<OwnerId>,
        title: impl Into<String>,
        amount: Money,
        entry_type: EntryType,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            amount: amount.abs(),
            kind: RecordKind::Known(entry_type),
            category: category.into(),
            occurred_at: RawDate::from_date(date),
            owner_id: owner_id.into(),
        }
    }

    /// Replace the raw date (used for legacy shapes)
    pub fn with_raw_date(mut self, occurred_at: RawDate) -> Self {
        self.occurred_at = occurred_at;
        self
    }

    /// Replace the kind (used for unrecognized type values)
    pub fn with_kind(mut self, kind: RecordKind) -> Self {
        self.kind = kind;
        self
    }

    /// Resolved calendar date, if the stored shape is recognized
    pub fn date(&self) -> Option<NaiveDate> {
        self.occurred_at.resolve()
    }

    /// Recognized direction, if any
    pub fn entry_type(&self) -> Option<EntryType> {
        self.kind.entry_type()
    }

    /// Check if this is an income record
    pub fn is_income(&self) -> bool {
        self.entry_type() == Some(EntryType::Income)
    }

    /// Check if this is an expense record
    pub fn is_expense(&self) -> bool {
        self.entry_type() == Some(EntryType::Expense)
    }

    /// Category used for grouping (sentinel for blank)
    pub fn category_label(&self) -> &str {
        category_label(&self.category)
    }

    /// Amount with direction applied: positive for income, negative for expense
    pub fn signed_amount(&self) -> Option<Money> {
        match self.entry_type()? {
            EntryType::Income => Some(self.amount),
            EntryType::Expense => Some(-self.amount),
        }
    }
}

impl fmt::Display for TransactionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.title, self.kind, self.amount)
    }
}
