//! Data-quality accounting
//!
//! The engine never fails on a bad record. It excludes the record from the
//! aggregates it cannot take part in and counts it here so callers can show
//! a warning.

use serde::Serialize;

use crate::models::TransactionRecord;

use super::register::FilterOutcome;

/// Counts of records a view could not fully use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DataQuality {
    /// Records (before filtering) whose date cannot be resolved
    pub unresolved_dates: usize,
    /// Records left out of this view because their date cannot be resolved
    pub excluded_unresolved: usize,
    /// Records in this view left out of income/expense sums
    pub unrecognized_types: usize,
    /// Stored documents skipped before reaching the engine
    pub malformed_documents: usize,
}

impl DataQuality {
    /// Quality of a filtered view over `records`
    pub fn for_view(records: &[TransactionRecord], outcome: &FilterOutcome<'_>) -> Self {
        Self {
            unresolved_dates: count_unresolved(records),
            excluded_unresolved: outcome.excluded_unresolved,
            unrecognized_types: outcome
                .records
                .iter()
                .filter(|r| !r.kind.is_recognized())
                .count(),
            malformed_documents: 0,
        }
    }

    /// Attach the storage layer's count of skipped documents
    pub fn with_malformed(mut self, malformed: usize) -> Self {
        self.malformed_documents = malformed;
        self
    }

    /// Check whether nothing needs reporting
    pub fn is_clean(&self) -> bool {
        self.excluded_unresolved == 0
            && self.unrecognized_types == 0
            && self.malformed_documents == 0
            && self.unresolved_dates == 0
    }

    /// Human-readable warnings, one per issue
    pub fn notes(&self) -> Vec<String> {
        let mut notes = Vec::new();
        if self.excluded_unresolved > 0 {
            notes.push(format!(
                "{} record(s) excluded: date could not be read",
                self.excluded_unresolved
            ));
        } else if self.unresolved_dates > 0 {
            notes.push(format!(
                "{} record(s) have an unreadable date (counted in totals, not in any month)",
                self.unresolved_dates
            ));
        }
        if self.unrecognized_types > 0 {
            notes.push(format!(
                "{} record(s) excluded from totals: type is neither income nor expense",
                self.unrecognized_types
            ));
        }
        if self.malformed_documents > 0 {
            notes.push(format!(
                "{} stored document(s) skipped: missing or invalid amount",
                self.malformed_documents
            ));
        }
        notes
    }

    /// Footer block for terminal reports (empty when clean)
    pub fn format_footer(&self) -> String {
        let notes = self.notes();
        if notes.is_empty() {
            return String::new();
        }

        let mut output = String::from("\nData quality:\n");
        for note in notes {
            output.push_str(&format!("  ! {}\n", note));
        }
        output
    }
}

/// Number of records whose date cannot be resolved
pub fn count_unresolved<'a, I>(records: I) -> usize
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    records.into_iter().filter(|r| r.date().is_none()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_quality_has_no_footer() {
        let quality = DataQuality::default();
        assert!(quality.is_clean());
        assert!(quality.format_footer().is_empty());
    }

    #[test]
    fn test_notes() {
        let quality = DataQuality {
            unresolved_dates: 2,
            excluded_unresolved: 1,
            unrecognized_types: 3,
            malformed_documents: 0,
        }
        .with_malformed(4);

        let notes = quality.notes();
        assert_eq!(notes.len(), 3);
        assert!(notes[0].starts_with("1 record(s) excluded"));
        assert!(quality.format_footer().contains("Data quality:"));
    }

    #[test]
    fn test_unresolved_in_unfiltered_view_is_still_reported() {
        let quality = DataQuality {
            unresolved_dates: 1,
            ..Default::default()
        };
        assert!(!quality.is_clean());
        assert!(quality.notes()[0].contains("counted in totals"));
    }
}
