//! Feature vector construction
//!
//! Builds the numeric row the regression models expect from one respondent's
//! raw answers, aligned to the training-time column order. The build is
//! total: malformed or missing input degrades to fallback values instead of
//! failing.

use crate::encoder::CategoryEncoder;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Numeric feature row aligned to the training-time column order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    values: Vec<f64>,
}

impl FeatureVector {
    /// Create a vector from raw values
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Number of features
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the vector has no features
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Feature value at `index`, or 0.0 when out of range
    pub fn get(&self, index: usize) -> f64 {
        self.values.get(index).copied().unwrap_or(0.0)
    }

    /// All feature values in column order
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Build the feature row for one respondent.
///
/// Each column in `expected_columns` is resolved in order:
/// - no answer for the column: 0
/// - the column has an encoder: the lowercased answer's class code, or -1
///   when the value was not seen at training time
/// - otherwise: the answer parsed as a number, or 0 on parse failure
///
/// # Arguments
/// * `answers` - Raw answers keyed by question key
/// * `encoders` - Category encoders keyed by column name
/// * `expected_columns` - Column order used at training time
///
/// # Returns
/// One feature row aligned to `expected_columns`; deterministic for the
/// same answers and encoders
pub fn build_feature_vector(
    answers: &HashMap<String, String>,
    encoders: &BTreeMap<String, CategoryEncoder>,
    expected_columns: &[String],
) -> FeatureVector {
    let values = expected_columns
        .iter()
        .map(|column| match answers.get(column) {
            None => 0.0,
            Some(raw) => match encoders.get(column) {
                Some(encoder) => encoder.encode(raw) as f64,
                None => parse_numeric(raw),
            },
        })
        .collect();

    FeatureVector::new(values)
}

/// Parse a numeric answer, falling back to 0 on malformed input
fn parse_numeric(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::CategoryEncoder;
    use pretty_assertions::assert_eq;

    fn make_test_encoders() -> BTreeMap<String, CategoryEncoder> {
        let mut encoders = BTreeMap::new();
        encoders.insert(
            "Gender".to_string(),
            CategoryEncoder::fit(["female", "male", "other"]),
        );
        encoders.insert(
            "Most_Used_Platform".to_string(),
            CategoryEncoder::fit(["instagram", "tiktok", "youtube"]),
        );
        encoders
    }

    fn make_test_columns() -> Vec<String> {
        vec![
            "Age".to_string(),
            "Gender".to_string(),
            "Most_Used_Platform".to_string(),
            "Sleep_Hours_Per_Night".to_string(),
        ]
    }

    fn make_answers(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_build_aligns_to_column_order() {
        let answers = make_answers(&[
            ("Age", "21"),
            ("Gender", "female"),
            ("Most_Used_Platform", "tiktok"),
            ("Sleep_Hours_Per_Night", "7.5"),
        ]);

        let vector = build_feature_vector(&answers, &make_test_encoders(), &make_test_columns());

        assert_eq!(vector.values(), &[21.0, 0.0, 1.0, 7.5]);
    }

    #[test]
    fn test_missing_answer_fills_zero() {
        let answers = make_answers(&[("Age", "19")]);

        let vector = build_feature_vector(&answers, &make_test_encoders(), &make_test_columns());

        assert_eq!(vector.values(), &[19.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_unseen_category_becomes_sentinel() {
        let answers = make_answers(&[("Most_Used_Platform", "myspace")]);

        let vector = build_feature_vector(&answers, &make_test_encoders(), &make_test_columns());

        assert_eq!(vector.get(2), -1.0);
    }

    #[test]
    fn test_category_lookup_ignores_case() {
        let answers = make_answers(&[("Gender", "FEMALE")]);

        let vector = build_feature_vector(&answers, &make_test_encoders(), &make_test_columns());

        assert_eq!(vector.get(1), 0.0);
        assert_eq!(
            build_feature_vector(
                &make_answers(&[("Gender", "Other")]),
                &make_test_encoders(),
                &make_test_columns()
            )
            .get(1),
            2.0
        );
    }

    #[test]
    fn test_unparsable_numeric_becomes_zero() {
        let answers = make_answers(&[
            ("Age", "twenty"),
            ("Sleep_Hours_Per_Night", "about 7"),
        ]);

        let vector = build_feature_vector(&answers, &make_test_encoders(), &make_test_columns());

        assert_eq!(vector.get(0), 0.0);
        assert_eq!(vector.get(3), 0.0);
    }

    #[test]
    fn test_numeric_parse_trims_whitespace() {
        let answers = make_answers(&[("Sleep_Hours_Per_Night", "  6.5  ")]);

        let vector = build_feature_vector(&answers, &make_test_encoders(), &make_test_columns());

        assert_eq!(vector.get(3), 6.5);
    }

    #[test]
    fn test_build_is_deterministic() {
        let answers = make_answers(&[
            ("Age", "22"),
            ("Gender", "male"),
            ("Most_Used_Platform", "snapchat"),
            ("Sleep_Hours_Per_Night", "6"),
        ]);
        let encoders = make_test_encoders();
        let columns = make_test_columns();

        let first = build_feature_vector(&answers, &encoders, &columns);
        let second = build_feature_vector(&answers, &encoders, &columns);

        assert_eq!(first, second);
    }

    #[test]
    fn test_out_of_range_index_reads_zero() {
        let vector = FeatureVector::new(vec![1.0, 2.0]);
        assert_eq!(vector.get(5), 0.0);
    }
}
