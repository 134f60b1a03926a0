//! Ship catalog enumerations.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The closed set of ship categories.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipType {
    /// Cargo and passenger haulers.
    Transport,
    /// Combat vessels.
    Military,
    /// Trade vessels.
    Merchant,
}

impl ShipType {
    /// Stored text representation, matching the wire casing.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShipType::Transport => "TRANSPORT",
            ShipType::Military => "MILITARY",
            ShipType::Merchant => "MERCHANT",
        }
    }
}

/// Sortable ship columns for search results.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    /// Sort by identifier.
    Id,
    /// Sort by speed.
    Speed,
    /// Sort by crew size.
    CrewSize,
    /// Sort by rating.
    Rating,
    /// Sort by production date.
    ProdDate,
}
