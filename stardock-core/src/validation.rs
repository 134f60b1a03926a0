//! Field validation for ship payloads.

use chrono::{Datelike, NaiveDate};

use crate::error::{CatalogError, Result};
use crate::ship::ShipType;

/// Maximum accepted length for name and planet, inclusive.
pub const TEXT_MAX_LEN: usize = 50;

/// Production year lower bound, exclusive.
pub const MIN_PROD_YEAR: i32 = 2800;

/// Production year upper bound, exclusive.
pub const MAX_PROD_YEAR: i32 = 3019;

/// Minimum accepted speed, inclusive.
pub const MIN_SPEED: f64 = 0.01;

/// Maximum accepted speed, inclusive.
pub const MAX_SPEED: f64 = 0.99;

/// Minimum accepted crew size, inclusive.
pub const MIN_CREW_SIZE: i32 = 1;

/// Maximum accepted crew size, inclusive.
pub const MAX_CREW_SIZE: i32 = 9999;

/// Whether a payload is checked as a full create or a partial update.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ValidationMode {
    /// Every field must be present and pass its bounds.
    Create,
    /// Absent fields are left untouched; present fields must pass bounds.
    Update,
}

impl ValidationMode {
    fn requires_presence(self) -> bool {
        matches!(self, ValidationMode::Create)
    }
}

/// Candidate ship fields for a create or partial-update request.
///
/// Every field is optional; `ValidationMode` decides whether absence is
/// acceptable. A draft with all fields absent passes `Update` validation
/// and yields a no-op write.
#[derive(Debug, Clone, Default)]
pub struct ShipDraft {
    /// Ship name.
    pub name: Option<String>,
    /// Home planet.
    pub planet: Option<String>,
    /// Ship category.
    pub ship_type: Option<ShipType>,
    /// Production date.
    pub prod_date: Option<NaiveDate>,
    /// Whether the ship is used; defaults to false on create.
    pub is_used: Option<bool>,
    /// Speed in [0.01, 0.99].
    pub speed: Option<f64>,
    /// Crew size in [1, 9999].
    pub crew_size: Option<i32>,
}

/// Validate a draft against every field rule for the given mode.
///
/// Fails on the first offending field; no partial acceptance.
pub fn validate_draft(draft: &ShipDraft, mode: ValidationMode) -> Result<()> {
    check_text("name", draft.name.as_deref(), mode)?;
    check_text("planet", draft.planet.as_deref(), mode)?;
    check_ship_type(draft.ship_type, mode)?;
    check_prod_date(draft.prod_date, mode)?;
    check_speed(draft.speed, mode)?;
    check_crew_size(draft.crew_size, mode)?;
    Ok(())
}

fn missing(field: &str) -> CatalogError {
    CatalogError::InvalidInput(format!("{field} is required"))
}

fn check_text(field: &str, value: Option<&str>, mode: ValidationMode) -> Result<()> {
    match value {
        None if mode.requires_presence() => Err(missing(field)),
        None => Ok(()),
        Some(text) if text.is_empty() || text.chars().count() > TEXT_MAX_LEN => {
            Err(CatalogError::InvalidInput(format!(
                "{field} must be 1-{TEXT_MAX_LEN} characters"
            )))
        }
        Some(_) => Ok(()),
    }
}

fn check_ship_type(value: Option<ShipType>, mode: ValidationMode) -> Result<()> {
    // Membership in the closed set is enforced by the type itself.
    if value.is_none() && mode.requires_presence() {
        return Err(missing("shipType"));
    }
    Ok(())
}

fn check_prod_date(value: Option<NaiveDate>, mode: ValidationMode) -> Result<()> {
    match value {
        None if mode.requires_presence() => Err(missing("prodDate")),
        None => Ok(()),
        Some(date) => {
            let year = date.year();
            if year <= MIN_PROD_YEAR || year >= MAX_PROD_YEAR {
                Err(CatalogError::InvalidInput(format!(
                    "prodDate year must lie strictly between {MIN_PROD_YEAR} and {MAX_PROD_YEAR}"
                )))
            } else {
                Ok(())
            }
        }
    }
}

fn check_speed(value: Option<f64>, mode: ValidationMode) -> Result<()> {
    match value {
        None if mode.requires_presence() => Err(missing("speed")),
        None => Ok(()),
        Some(speed) if !(MIN_SPEED..=MAX_SPEED).contains(&speed) => {
            Err(CatalogError::InvalidInput(format!(
                "speed must be between {MIN_SPEED} and {MAX_SPEED}"
            )))
        }
        Some(_) => Ok(()),
    }
}

fn check_crew_size(value: Option<i32>, mode: ValidationMode) -> Result<()> {
    match value {
        None if mode.requires_presence() => Err(missing("crewSize")),
        None => Ok(()),
        Some(crew) if !(MIN_CREW_SIZE..=MAX_CREW_SIZE).contains(&crew) => {
            Err(CatalogError::InvalidInput(format!(
                "crewSize must be between {MIN_CREW_SIZE} and {MAX_CREW_SIZE}"
            )))
        }
        Some(_) => Ok(()),
    }
}
