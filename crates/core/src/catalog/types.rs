//! Types for catalog API responses.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A candidate image from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogItem {
    /// Catalog identifier, reused as the stored object's file stem.
    pub id: String,
    /// Where to download the image from.
    #[serde(rename = "url")]
    pub fetch_url: String,
    /// Why the catalog entry is unusable, if it is. Defective items stay in
    /// the batch and fail on their own.
    #[serde(skip)]
    pub defect: Option<String>,
}

impl CatalogItem {
    pub fn new(id: impl Into<String>, fetch_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fetch_url: fetch_url.into(),
            defect: None,
        }
    }

    /// An entry that cannot be processed.
    pub fn defective(id: impl Into<String>, defect: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fetch_url: String::new(),
            defect: Some(defect.into()),
        }
    }

    /// Build an item from one element of a search response.
    ///
    /// Never fails: a missing or non-string `url` yields a defective item.
    /// Entries without a usable `id` are named after their batch position.
    pub fn from_entry(index: usize, entry: &Value) -> Self {
        let id = match entry.get("id") {
            Some(Value::String(id)) if !id.is_empty() => id.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => format!("entry-{}", index),
        };

        match entry.get("url") {
            Some(Value::String(url)) if !url.is_empty() => Self::new(id, url.clone()),
            Some(_) => Self::defective(id, "catalog entry has an unusable url"),
            None => Self::defective(id, "catalog entry has no url"),
        }
    }

    pub fn is_defective(&self) -> bool {
        self.defect.is_some()
    }
}
