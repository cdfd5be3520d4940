//! Audit result documents as produced by Lighthouse.
//!
//! Only the `audits` object is modelled. Everything else in the document is
//! carried along untouched in the raw JSON text kept by the caller.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single named check within an audit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckRecord {
    /// Score in [0, 1], or null when the check is informative only
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl CheckRecord {
    pub fn new(score: Option<f64>, title: &str, description: &str) -> Self {
        Self {
            score,
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct Document {
    audits: IndexMap<String, CheckRecord>,
}

/// Ordered mapping from check identifier to check record.
///
/// Iteration follows the order of the `audits` object in the source document.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    checks: IndexMap<String, CheckRecord>,
}

impl ResultSet {
    /// Parse a Lighthouse JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: Document =
            serde_json::from_str(json).context("Audit document has no valid `audits` object")?;
        Ok(Self { checks: doc.audits })
    }

    /// Build a set from in-memory records, keeping their order.
    pub fn from_checks<I, S>(checks: I) -> Self
    where
        I: IntoIterator<Item = (S, CheckRecord)>,
        S: Into<String>,
    {
        Self {
            checks: checks
                .into_iter()
                .map(|(id, record)| (id.into(), record))
                .collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&CheckRecord> {
        self.checks.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CheckRecord)> {
        self.checks.iter().map(|(id, record)| (id.as_str(), record))
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_document_order() {
        let json = r#"{"lighthouseVersion":"9.6.8","audits":{
            "speed-index":{"score":0.91,"title":"Speed Index","description":"How quickly content is visible."},
            "first-contentful-paint":{"score":0.8,"title":"First Contentful Paint","description":"FCP"},
            "bf-cache":{"score":null,"title":"Back/forward cache","description":"bfcache"}
        }}"#;

        let set = ResultSet::from_json(json).unwrap();
        let ids: Vec<&str> = set.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["speed-index", "first-contentful-paint", "bf-cache"]);
        assert_eq!(set.get("speed-index").unwrap().score, Some(0.91));
        assert_eq!(set.get("bf-cache").unwrap().score, None);
        assert_eq!(set.get("first-contentful-paint").unwrap().title, "First Contentful Paint");
    }

    #[test]
    fn test_parse_tolerates_missing_fields() {
        let json = r#"{"audits":{"a":{},"b":{"score":1,"details":{"type":"table"}}}}"#;
        let set = ResultSet::from_json(json).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("a").unwrap(), &CheckRecord::default());
        assert_eq!(set.get("b").unwrap().score, Some(1.0));
    }

    #[test]
    fn test_parse_rejects_document_without_audits() {
        assert!(ResultSet::from_json(r#"{"categories":{}}"#).is_err());
        assert!(ResultSet::from_json("not json").is_err());
    }

    #[test]
    fn test_parse_rejects_non_numeric_score() {
        let json = r#"{"audits":{"a":{"score":"high"}}}"#;
        let err = ResultSet::from_json(json).unwrap_err();
        assert!(err.to_string().contains("audits"));
    }

    #[test]
    fn test_from_checks_replaces_duplicates_in_place() {
        let set = ResultSet::from_checks([
            ("a", CheckRecord::new(Some(0.1), "A", "")),
            ("b", CheckRecord::new(Some(0.2), "B", "")),
            ("a", CheckRecord::new(Some(0.3), "A", "")),
        ]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().next().unwrap().0, "a");
        assert_eq!(set.get("a").unwrap().score, Some(0.3));
    }
}
