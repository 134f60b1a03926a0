//! Dynamic search query construction for the ship catalog.

use chrono::{DateTime, NaiveDate};
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::Deserialize;
use stardock_core::{CatalogError, Result, ShipType, SortField};
use utoipa::IntoParams;

use crate::schema::ships;

/// Page size applied when the request omits one.
pub const DEFAULT_PAGE_SIZE: i64 = 3;

/// Flat optional search parameters for ship listing and counting.
///
/// Absent parameters impose no constraint. Range bounds are inclusive on
/// whichever ends are present; `after`/`before` are epoch milliseconds.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ShipSearch {
    /// Case-sensitive substring match on name.
    pub name: Option<String>,
    /// Case-sensitive substring match on planet.
    pub planet: Option<String>,
    /// Exact ship category match.
    pub ship_type: Option<ShipType>,
    /// Inclusive lower production-date bound, epoch milliseconds.
    pub after: Option<i64>,
    /// Inclusive upper production-date bound, epoch milliseconds.
    pub before: Option<i64>,
    /// Exact used-flag match.
    pub is_used: Option<bool>,
    /// Inclusive minimum speed.
    pub min_speed: Option<f64>,
    /// Inclusive maximum speed.
    pub max_speed: Option<f64>,
    /// Inclusive minimum crew size.
    pub min_crew_size: Option<i32>,
    /// Inclusive maximum crew size.
    pub max_crew_size: Option<i32>,
    /// Inclusive minimum rating.
    pub min_rating: Option<f64>,
    /// Inclusive maximum rating.
    pub max_rating: Option<f64>,
    /// Zero-based page number, default 0.
    pub page_number: Option<i64>,
    /// Page size, default 3.
    pub page_size: Option<i64>,
    /// Single ascending sort key; natural order when absent.
    pub order_by: Option<SortField>,
}

impl ShipSearch {
    /// Rows skipped before the page window, evaluated after filter and sort.
    pub fn offset(&self) -> i64 {
        self.page_number.unwrap_or(0) * self.limit()
    }

    /// Maximum rows returned in the page window.
    pub fn limit(&self) -> i64 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }
}

fn bound_date(field: &str, millis: i64) -> Result<NaiveDate> {
    DateTime::from_timestamp_millis(millis)
        .map(|moment| moment.date_naive())
        .ok_or_else(|| {
            CatalogError::InvalidInput(format!("{field} is not a representable timestamp"))
        })
}

/// Fold the present parameters into a single conjunction of predicates.
///
/// Each call builds a fresh boxed query; the page load and the count both
/// run against the same predicate set. Empty-string name and planet values
/// impose no constraint.
pub fn filtered(search: &ShipSearch) -> Result<ships::BoxedQuery<'static, Pg>> {
    let mut query = ships::table.into_boxed();
    if let Some(name) = search.name.as_deref().filter(|text| !text.is_empty()) {
        query = query.filter(ships::name.like(format!("%{name}%")));
    }
    if let Some(planet) = search.planet.as_deref().filter(|text| !text.is_empty()) {
        query = query.filter(ships::planet.like(format!("%{planet}%")));
    }
    if let Some(ship_type) = search.ship_type {
        query = query.filter(ships::ship_type.eq(ship_type.as_str()));
    }
    if let Some(after) = search.after {
        query = query.filter(ships::prod_date.ge(bound_date("after", after)?));
    }
    if let Some(before) = search.before {
        query = query.filter(ships::prod_date.le(bound_date("before", before)?));
    }
    if let Some(is_used) = search.is_used {
        query = query.filter(ships::is_used.eq(is_used));
    }
    if let Some(min_speed) = search.min_speed {
        query = query.filter(ships::speed.ge(min_speed));
    }
    if let Some(max_speed) = search.max_speed {
        query = query.filter(ships::speed.le(max_speed));
    }
    if let Some(min_crew_size) = search.min_crew_size {
        query = query.filter(ships::crew_size.ge(min_crew_size));
    }
    if let Some(max_crew_size) = search.max_crew_size {
        query = query.filter(ships::crew_size.le(max_crew_size));
    }
    if let Some(min_rating) = search.min_rating {
        query = query.filter(ships::rating.ge(min_rating));
    }
    if let Some(max_rating) = search.max_rating {
        query = query.filter(ships::rating.le(max_rating));
    }
    Ok(query)
}

/// Apply the requested ascending sort, leaving natural order otherwise.
pub fn ordered(
    query: ships::BoxedQuery<'static, Pg>,
    order_by: Option<SortField>,
) -> ships::BoxedQuery<'static, Pg> {
    match order_by {
        None => query,
        Some(SortField::Id) => query.order(ships::id.asc()),
        Some(SortField::Speed) => query.order(ships::speed.asc()),
        Some(SortField::CrewSize) => query.order(ships::crew_size.asc()),
        Some(SortField::Rating) => query.order(ships::rating.asc()),
        Some(SortField::ProdDate) => query.order(ships::prod_date.asc()),
    }
}
