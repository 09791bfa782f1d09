use serde::{Deserialize, Serialize};

/// Asset profile data from market data providers
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetProfile {
    /// Provider that supplied this profile (e.g., "YAHOO")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Long company/asset name, e.g. "Apple Inc."
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Short display name as listed by the exchange
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,

    /// Quote type (e.g., "EQUITY", "ETF")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_type: Option<String>,

    /// Trading currency (ISO 4217)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl AssetProfile {
    /// The long name, if the provider supplied a non-blank one.
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}
