//! User settings for expense-tracker
//!
//! Manages display preferences, the default owner and the ordered field
//! fallback chains used to read legacy documents.

use serde::{Deserialize, Serialize};

use super::paths::TrackerPaths;
use crate::error::TrackerError;
use crate::models::{Granularity, OwnerId};
use crate::storage::mapping::{FieldMapping, DEFAULT_DATE_FIELDS, DEFAULT_OWNER_FIELDS};

/// User settings for expense-tracker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when formatting amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Owner whose records are shown when `--owner` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_owner: Option<String>,

    /// Bucket size for trend reports when none is given
    #[serde(default)]
    pub default_granularity: Granularity,

    /// Number of rows shown by `recent`
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,

    /// Document fields checked, in order, for the transaction date
    #[serde(default = "default_date_fields")]
    pub date_fields: Vec<String>,

    /// Document fields checked, in order, for the owning user
    #[serde(default = "default_owner_fields")]
    pub owner_fields: Vec<String>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "₹".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_recent_limit() -> usize {
    10
}

fn default_date_fields() -> Vec<String> {
    DEFAULT_DATE_FIELDS.iter().map(|s| s.to_string()).collect()
}

fn default_owner_fields() -> Vec<String> {
    DEFAULT_OWNER_FIELDS.iter().map(|s| s.to_string()).collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            default_owner: None,
            default_granularity: Granularity::default(),
            recent_limit: default_recent_limit(),
            date_fields: default_date_fields(),
            owner_fields: default_owner_fields(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &TrackerPaths) -> Result<Self, TrackerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                TrackerError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                TrackerError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TrackerPaths) -> Result<(), TrackerError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            TrackerError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            TrackerError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Reject fallback chains that could never match anything
    pub fn validate(&self) -> Result<(), TrackerError> {
        if self.date_fields.iter().all(|f| f.trim().is_empty()) {
            return Err(TrackerError::Config(
                "date_fields must name at least one document field".into(),
            ));
        }
        if self.owner_fields.iter().all(|f| f.trim().is_empty()) {
            return Err(TrackerError::Config(
                "owner_fields must name at least one document field".into(),
            ));
        }
        Ok(())
    }

    /// Field fallback chains for the document mapper
    pub fn field_mapping(&self) -> FieldMapping {
        FieldMapping::new(self.date_fields.clone(), self.owner_fields.clone())
    }

    /// Owner to scope reports to: the explicit one, else the configured default
    pub fn resolve_owner(&self, explicit: Option<String>) -> Result<OwnerId, TrackerError> {
        explicit
            .or_else(|| self.default_owner.clone())
            .map(OwnerId::from)
            .filter(|owner| !owner.is_blank())
            .ok_or_else(|| {
                TrackerError::Validation(
                    "No owner given. Pass --owner or set default_owner in config.json".into(),
                )
            })
    }

    /// Format an amount with the configured currency symbol
    pub fn format_money(&self, amount: crate::models::Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }
}
