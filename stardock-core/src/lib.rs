#![deny(missing_docs)]
//! Stardock core library.
//!
//! Domain rules for the ship catalog: the closed ship-type set, field
//! validation with distinct create/update modes, and the derived rating
//! calculation. Storage and HTTP concerns live in the server crate.

pub mod error;
pub mod rating;
pub mod ship;
pub mod validation;

pub use error::{CatalogError, Result};
pub use rating::{compute_rating, round2};
pub use ship::{ShipType, SortField};
pub use validation::{ShipDraft, ValidationMode, validate_draft};
