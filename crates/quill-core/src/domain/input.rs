//! Raw post payload as it arrives over the wire, before normalization.

use serde::Deserialize;
use serde_json::Value;

use super::Patch;

/// Create/update request body. Every key is presence-tracked.
///
/// Values stay untyped JSON so a wrongly typed field is reported against its
/// own key during normalization instead of rejecting the whole body.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PostInput {
    #[serde(default)]
    pub title: Patch<Value>,
    #[serde(default)]
    pub slug: Patch<Value>,
    #[serde(default)]
    pub body: Patch<Value>,
    #[serde(default)]
    pub is_published: Patch<Value>,
    #[serde(default)]
    pub published_date: Patch<Value>,
    #[serde(default)]
    pub meta_description: Patch<Value>,
    /// Comma-separated text or an array of strings.
    #[serde(default)]
    pub tags: Patch<Value>,
    /// Whitespace-separated text or an array of strings.
    #[serde(default)]
    pub keywords: Patch<Value>,
}
