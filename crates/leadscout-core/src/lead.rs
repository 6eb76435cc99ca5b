//! Lead and source-platform value types shared across the workspace.

use serde::{Deserialize, Serialize};

/// The external directory a lead was extracted from.
///
/// Stored and serialized as its display name (e.g. `"IndiaMART"`) so a
/// future multi-source merge can distinguish collaborator instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourcePlatform {
    #[serde(rename = "IndiaMART")]
    IndiaMart,
}

impl SourcePlatform {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SourcePlatform::IndiaMart => "IndiaMART",
        }
    }
}

impl std::fmt::Display for SourcePlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured business-contact record extracted from one listing block.
///
/// `business_name` is the only required field; extraction drops the whole
/// candidate when it is missing. Every other field is best-effort and may be
/// `None`. Leads are values — nothing mutates them after construction, and
/// `created_at` is assigned by the database at insert time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub business_name: String,
    pub owner_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
    pub source_platform: SourcePlatform,
}

impl Lead {
    /// Builds a lead with only the required name set; optional contact
    /// fields default to absent.
    #[must_use]
    pub fn named(business_name: impl Into<String>, source_platform: SourcePlatform) -> Self {
        Self {
            business_name: business_name.into(),
            owner_name: None,
            phone: None,
            address: None,
            website: None,
            email: None,
            source_platform,
        }
    }
}
