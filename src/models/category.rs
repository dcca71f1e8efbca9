//! Category vocabulary
//!
//! Categories are an open vocabulary: the store does not enforce them, the
//! suggestions below are what the entry form offers.

/// Label applied when a record has no category
pub const SENTINEL_CATEGORY: &str = "Other";

/// Categories offered when recording a transaction
pub const SUGGESTED_CATEGORIES: [&str; 10] = [
    "Food & Dining",
    "Transportation",
    "Shopping",
    "Entertainment",
    "Bills & Utilities",
    "Healthcare",
    "Salary",
    "Freelance",
    "Investments",
    "Other",
];

/// Category label used for grouping, falling back to the sentinel
pub fn category_label(category: &str) -> &str {
    let trimmed = category.trim();
    if trimmed.is_empty() {
        SENTINEL_CATEGORY
    } else {
        trimmed
    }
}

/// Check whether a category is one of the suggestions (case-insensitive)
pub fn is_suggested(category: &str) -> bool {
    SUGGESTED_CATEGORIES
        .iter()
        .any(|c| c.eq_ignore_ascii_case(category.trim()))
}
