//! Projection of stored preferences onto the subscription list handed to the host.

use serde::{Deserialize, Serialize};

use crate::data::catalog::schema_name_of;
use crate::data::catalog::TopicCatalogEntry;
use crate::data::preferences::PanelPreferenceState;

/// One entry of the subscription set requested from the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRequest {
    pub topic: String,
    pub preload: bool,
    /// `None` while the topic is missing from the catalog; the host resolves
    /// it once the topic reappears.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_name: Option<String>,
}

/// Visible topics of `prefs`, in preference order, annotated with their schema.
pub fn project_subscriptions(
    prefs: &PanelPreferenceState,
    catalog: &[TopicCatalogEntry],
) -> Vec<SubscriptionRequest> {
    prefs
        .subscriptions
        .iter()
        .filter(|(_, pref)| pref.is_visible())
        .map(|(topic, pref)| SubscriptionRequest {
            topic: topic.clone(),
            preload: pref.preloads(),
            schema_name: schema_name_of(catalog, topic).map(str::to_string),
        })
        .collect()
}
