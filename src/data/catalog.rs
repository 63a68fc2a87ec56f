//! Topics advertised by the host.

use serde::{Deserialize, Serialize};

/// A topic the host currently exposes. Names are unique within a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicCatalogEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_name: Option<String>,
}

impl TopicCatalogEntry {
    pub fn new(name: impl Into<String>, schema_name: Option<&str>) -> Self {
        Self {
            name: name.into(),
            schema_name: schema_name.map(str::to_string),
        }
    }
}

/// Look up a topic by name.
pub fn find_topic<'a>(catalog: &'a [TopicCatalogEntry], name: &str) -> Option<&'a TopicCatalogEntry> {
    catalog.iter().find(|t| t.name == name)
}

/// Schema name of `name`, or `None` when the topic is absent or untyped.
pub fn schema_name_of<'a>(catalog: &'a [TopicCatalogEntry], name: &str) -> Option<&'a str> {
    find_topic(catalog, name).and_then(|t| t.schema_name.as_deref())
}
