//! The validated search request value passed through the scrape pipeline.

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// An immutable location/keyword search request.
///
/// `radius_km` is carried for the future geocode-and-filter step; nothing in
/// the current pipeline reads it, but it is part of the submission contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    keywords: String,
    location: String,
    radius_km: i32,
}

impl SearchQuery {
    /// Validates and builds a query. Keywords and location must be non-empty
    /// after trimming; interior whitespace runs are collapsed to single
    /// spaces so URL construction sees one token separator per gap.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyQueryField`] when keywords or location are
    /// blank.
    pub fn new(
        keywords: impl AsRef<str>,
        location: impl AsRef<str>,
        radius_km: i32,
    ) -> Result<Self, CoreError> {
        let keywords = normalize(keywords.as_ref());
        let location = normalize(location.as_ref());

        if keywords.is_empty() {
            return Err(CoreError::EmptyQueryField { field: "keywords" });
        }
        if location.is_empty() {
            return Err(CoreError::EmptyQueryField { field: "location" });
        }

        Ok(Self {
            keywords,
            location,
            radius_km,
        })
    }

    #[must_use]
    pub fn keywords(&self) -> &str {
        &self.keywords
    }

    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    #[must_use]
    pub fn radius_km(&self) -> i32 {
        self.radius_km
    }
}

fn normalize(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
