//! Category encoding
//!
//! Each categorical survey field carries a [`CategoryEncoder`] built from the
//! training data: the classes seen at training time, lowercased and sorted,
//! with each class coded by its sorted position. A value outside the class
//! set encodes to a reserved sentinel instead of failing.

use serde::{Deserialize, Serialize};

/// Code substituted for a category that was not seen at training time
pub const UNSEEN_CATEGORY_CODE: i64 = -1;

/// Encoder for one categorical survey field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEncoder {
    /// Known classes, lowercase and sorted; the code of a class is its index
    classes: Vec<String>,
}

impl CategoryEncoder {
    /// Build an encoder from raw training-time values.
    ///
    /// Values are trimmed, lowercased, and deduplicated; codes follow sorted
    /// class order.
    pub fn fit<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut classes: Vec<String> = values
            .into_iter()
            .map(|v| v.as_ref().trim().to_lowercase())
            .filter(|v| !v.is_empty())
            .collect();
        classes.sort();
        classes.dedup();
        Self { classes }
    }

    /// Known classes in code order
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Number of known classes
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether the encoder has no classes
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Look up the code for `value`, lowercasing before comparison
    pub fn code(&self, value: &str) -> Option<i64> {
        let needle = value.trim().to_lowercase();
        self.classes.binary_search(&needle).ok().map(|i| i as i64)
    }

    /// Encode `value`, substituting [`UNSEEN_CATEGORY_CODE`] when the value
    /// is outside the training-time class set
    pub fn encode(&self, value: &str) -> i64 {
        self.code(value).unwrap_or(UNSEEN_CATEGORY_CODE)
    }

    /// Whether the class list is lowercase, sorted, duplicate-free, and has
    /// no empty entries. Lookup relies on this holding.
    pub fn is_canonical(&self) -> bool {
        self.classes
            .iter()
            .all(|c| !c.is_empty() && *c == c.to_lowercase())
            && self.classes.windows(2).all(|w| w[0] < w[1])
    }
}
