//! Database models for Stardock server.

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::schema::ships;

#[derive(Debug, Clone, Queryable, Identifiable, Selectable, AsChangeset)]
#[diesel(table_name = ships)]
/// Ship database record.
pub struct Ship {
    /// Storage-assigned identifier.
    pub id: i64,
    /// Ship name, 1-50 characters.
    pub name: String,
    /// Home planet, 1-50 characters.
    pub planet: String,
    /// Ship category, one of the closed enumeration, stored as text.
    pub ship_type: String,
    /// Production date; the year drives validation and rating.
    pub prod_date: NaiveDate,
    /// Whether the ship is used.
    pub is_used: bool,
    /// Speed in [0.01, 0.99].
    pub speed: f64,
    /// Crew size in [1, 9999].
    pub crew_size: i32,
    /// Derived rating, recomputed on every write.
    pub rating: f64,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = ships)]
/// Insertable ship record; the store assigns the identifier.
pub struct NewShip {
    /// Ship name.
    pub name: String,
    /// Home planet.
    pub planet: String,
    /// Ship category, stored as text.
    pub ship_type: String,
    /// Production date.
    pub prod_date: NaiveDate,
    /// Whether the ship is used.
    pub is_used: bool,
    /// Speed in [0.01, 0.99].
    pub speed: f64,
    /// Crew size in [1, 9999].
    pub crew_size: i32,
    /// Derived rating computed before insert.
    pub rating: f64,
}
