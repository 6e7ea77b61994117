use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Promotion {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub image: String,
    pub link: String,
    // The feed calls this "tag" even though it holds a list
    #[serde(rename = "tag", default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms: Option<Vec<String>>,
}

impl Promotion {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Text the search box matches against: title, subtitle and brand
    /// joined by spaces, lowercased. Missing fields contribute nothing.
    pub fn search_text(&self) -> String {
        format!(
            "{} {} {}",
            self.title,
            self.subtitle.as_deref().unwrap_or(""),
            self.brand.as_deref().unwrap_or("")
        )
        .to_lowercase()
    }

    pub fn terms(&self) -> &[String] {
        self.terms.as_deref().unwrap_or(&[])
    }
}

/// `null` reads the same as a missing list.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Sorted, de-duplicated union of every tag in the catalog.
pub fn collect_tags(promos: &[Promotion]) -> Vec<String> {
    promos
        .iter()
        .flat_map(|p| p.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
