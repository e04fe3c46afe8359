// Reference-data store
//
// A flat key -> number map loaded once at startup from a JSON document
// and passed by reference to every consumer; read-only after load.
// A missing key reads as NaN so the metric formulas degrade to
// non-finite display values instead of halting the pipeline.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;

/// Built-in reference data for demo mode (mirrors the shipped data.json).
const SAMPLE_DATA: &str = include_str!("../data.json");

#[derive(Debug, Clone, Default)]
pub struct DataStore {
    values: HashMap<String, f64>,
}

impl DataStore {
    /// Load the store from a JSON document on disk.
    pub async fn load(path: &Path) -> Result<Self> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Parse a flat key -> number JSON object.
    pub fn from_json(json: &str) -> Result<Self> {
        let values: HashMap<String, f64> = serde_json::from_str(json)?;
        Ok(Self { values })
    }

    /// Built-in sample data, used by demo mode and tests.
    pub fn sample() -> Self {
        Self::from_json(SAMPLE_DATA).expect("embedded sample data is valid JSON")
    }

    /// Read a constant. Missing keys read as NaN; the formulas carry the
    /// degenerate value through to the display.
    pub fn get(&self, key: &str) -> f64 {
        self.values.get(key).copied().unwrap_or(f64::NAN)
    }

    /// Read a constant only if present (the reference panel shows a
    /// placeholder for absent keys).
    pub fn lookup(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_flat_map() {
        let store = DataStore::from_json(r#"{"gold_price": 74.6, "unit_price": 4.5}"#).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("gold_price"), 74.6);
    }

    #[test]
    fn test_missing_key_reads_as_nan() {
        let store = DataStore::default();
        assert!(store.get("gold_price").is_nan());
        assert_eq!(store.lookup("gold_price"), None);
    }

    #[test]
    fn test_rejects_non_numeric_values() {
        assert!(DataStore::from_json(r#"{"gold_price": "many"}"#).is_err());
        assert!(DataStore::from_json("not json").is_err());
    }

    #[test]
    fn test_sample_covers_every_formula_constant() {
        let store = DataStore::sample();
        for key in [
            "gold_price",
            "coin_weight",
            "coin_height",
            "coin_diameter",
            "diamond_carat",
            "savings_baseline",
            "annual_income",
            "col_zurich",
            "col_new_york",
            "col_london",
            "col_lisbon",
            "col_bangkok",
            "unit_price",
        ] {
            assert!(store.get(key).is_finite(), "missing sample constant {key}");
        }
    }
}
