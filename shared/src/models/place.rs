//! Candidate places returned by the nearby search

use serde::{Deserialize, Serialize};

use crate::types::Coordinates;

/// A raw nearby-search result, before enrichment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CandidatePlace {
    pub place_id: String,
    pub name: String,
    pub coordinates: Coordinates,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default)]
    pub photo_references: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl CandidatePlace {
    /// Address handed to the crowd provider; falls back to `lat,lon`
    pub fn best_address(&self) -> String {
        self.address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.coordinates.to_string())
    }

    pub fn first_photo(&self) -> Option<&str> {
        self.photo_references.first().map(String::as_str)
    }
}
