use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::locale::Locale;

/// One nested record of the `Document` schema.
///
/// Optional and repeated fields are `None` when absent. A repeated field that
/// is present always holds at least one element, so the JSON form never
/// carries `[]` or `null` for these fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Document {
    /// Sequential identifier, unique within one generated collection.
    #[serde(rename = "DocId")]
    pub doc_id: u64,
    #[serde(rename = "Links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub names: Option<Vec<NameEntry>>,
}

impl Document {
    pub fn new(doc_id: u64) -> Self {
        Self {
            doc_id,
            links: None,
            names: None,
        }
    }

    /// Backward links in generation order, empty when the field is absent.
    pub fn backward(&self) -> &[u64] {
        self.links
            .as_ref()
            .and_then(|links| links.backward.as_deref())
            .unwrap_or_default()
    }

    /// Forward links in generation order, empty when the field is absent.
    pub fn forward(&self) -> &[u64] {
        self.links
            .as_ref()
            .and_then(|links| links.forward.as_deref())
            .unwrap_or_default()
    }

    pub fn names(&self) -> &[NameEntry] {
        self.names.as_deref().unwrap_or_default()
    }
}

/// Backward/forward references to other documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Links {
    #[serde(rename = "Backward", default, skip_serializing_if = "Option::is_none")]
    pub backward: Option<Vec<u64>>,
    #[serde(rename = "Forward", default, skip_serializing_if = "Option::is_none")]
    pub forward: Option<Vec<u64>>,
}

impl Links {
    pub fn is_empty(&self) -> bool {
        self.backward.is_none() && self.forward.is_none()
    }
}

/// A localized name group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NameEntry {
    #[serde(rename = "Language", default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<Language>>,
    #[serde(rename = "Url", default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl NameEntry {
    pub fn is_empty(&self) -> bool {
        self.languages.is_none() && self.url.is_none()
    }

    pub fn languages(&self) -> &[Language] {
        self.languages.as_deref().unwrap_or_default()
    }
}

/// Language code with an optional country drawn from the same locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Language {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Country", default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl Language {
    pub fn from_locale(locale: &Locale, with_country: bool) -> Self {
        Self {
            code: locale.code.to_string(),
            country: with_country.then(|| locale.country.to_string()),
        }
    }
}
