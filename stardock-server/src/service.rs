//! Ship catalog service façade.
//!
//! Orchestrates validation, rating recomputation, and persistence. Every
//! operation validates fully before touching storage; storage failures are
//! surfaced unchanged and never retried.

use chrono::Datelike;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::OptionalExtension;
use stardock_core::{
    CatalogError, Result, ShipDraft, ValidationMode, compute_rating, validate_draft,
};

use crate::models::{NewShip, Ship};
use crate::query::{self, ShipSearch};
use crate::schema::ships;

fn storage(err: diesel::result::Error) -> CatalogError {
    CatalogError::Storage(err.to_string())
}

/// List ships matching the search, sorted and windowed per request.
///
/// An empty result is a benign success, never an error.
pub fn search_ships(conn: &mut PgConnection, search: &ShipSearch) -> Result<Vec<Ship>> {
    query::ordered(query::filtered(search)?, search.order_by)
        .offset(search.offset())
        .limit(search.limit())
        .load::<Ship>(conn)
        .map_err(storage)
}

/// Count ships matching the search, ignoring pagination and sort.
pub fn count_ships(conn: &mut PgConnection, search: &ShipSearch) -> Result<i64> {
    query::filtered(search)?
        .count()
        .get_result(conn)
        .map_err(storage)
}

/// Look up a single ship by identifier.
pub fn find_ship(conn: &mut PgConnection, id: i64) -> Result<Option<Ship>> {
    ships::table
        .find(id)
        .first::<Ship>(conn)
        .optional()
        .map_err(storage)
}

/// Validate, rate, and persist a new ship; the store assigns the id.
pub fn create_ship(conn: &mut PgConnection, draft: &ShipDraft) -> Result<Ship> {
    validate_draft(draft, ValidationMode::Create)?;
    let (Some(name), Some(planet), Some(ship_type), Some(prod_date), Some(speed), Some(crew_size)) = (
        draft.name.clone(),
        draft.planet.clone(),
        draft.ship_type,
        draft.prod_date,
        draft.speed,
        draft.crew_size,
    ) else {
        return Err(CatalogError::InvalidInput(
            "incomplete ship payload".to_string(),
        ));
    };
    let is_used = draft.is_used.unwrap_or(false);
    let record = NewShip {
        name,
        planet,
        ship_type: ship_type.as_str().to_string(),
        prod_date,
        is_used,
        speed,
        crew_size,
        rating: compute_rating(speed, is_used, prod_date.year()),
    };
    diesel::insert_into(ships::table)
        .values(&record)
        .get_result(conn)
        .map_err(storage)
}

/// Validate a partial payload, overlay its present fields onto the stored
/// ship, recompute the rating, and save.
///
/// A payload with every field absent is a valid no-op update; the rating
/// recomputes to the same value and the stored entity is returned.
pub fn update_ship(conn: &mut PgConnection, id: i64, patch: &ShipDraft) -> Result<Ship> {
    validate_draft(patch, ValidationMode::Update)?;
    let mut ship = find_ship(conn, id)?.ok_or(CatalogError::NotFound)?;
    if let Some(name) = &patch.name {
        ship.name = name.clone();
    }
    if let Some(planet) = &patch.planet {
        ship.planet = planet.clone();
    }
    if let Some(ship_type) = patch.ship_type {
        ship.ship_type = ship_type.as_str().to_string();
    }
    if let Some(prod_date) = patch.prod_date {
        ship.prod_date = prod_date;
    }
    if let Some(is_used) = patch.is_used {
        ship.is_used = is_used;
    }
    if let Some(speed) = patch.speed {
        ship.speed = speed;
    }
    if let Some(crew_size) = patch.crew_size {
        ship.crew_size = crew_size;
    }
    ship.rating = compute_rating(ship.speed, ship.is_used, ship.prod_date.year());
    diesel::update(ships::table.find(id))
        .set(&ship)
        .get_result(conn)
        .map_err(storage)
}

/// Remove a ship by identifier.
pub fn delete_ship(conn: &mut PgConnection, id: i64) -> Result<()> {
    let deleted = diesel::delete(ships::table.find(id))
        .execute(conn)
        .map_err(storage)?;
    if deleted == 0 {
        return Err(CatalogError::NotFound);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        count_ships, create_ship, delete_ship, find_ship, search_ships, update_ship,
    };
    use crate::db::TestDatabase;
    use crate::query::ShipSearch;
    use chrono::NaiveDate;
    use stardock_core::{CatalogError, ShipDraft, ShipType, SortField};

    fn draft(name: &str, speed: f64, crew_size: i32, year: i32) -> ShipDraft {
        ShipDraft {
            name: Some(name.to_string()),
            planet: Some("Corellia".to_string()),
            ship_type: Some(ShipType::Transport),
            prod_date: NaiveDate::from_ymd_opt(year, 6, 15),
            is_used: Some(false),
            speed: Some(speed),
            crew_size: Some(crew_size),
        }
    }

    #[test]
    fn create_assigns_id_and_rating() {
        let mut test_db = TestDatabase::new();
        let pool = test_db.pool();
        let mut conn = pool.get().expect("conn");

        let ship = create_ship(&mut conn, &draft("Falcon", 0.8, 42, 3018)).expect("create");

        assert!(ship.id >= 1);
        // 80 * 0.8 / (3019 - 3018 + 1) = 32.0
        assert_eq!(ship.rating, 32.0);
        assert!(!ship.is_used);
        assert_eq!(ship.ship_type, "TRANSPORT");
    }

    #[test]
    fn create_halves_rating_for_used_ships() {
        let mut test_db = TestDatabase::new();
        let pool = test_db.pool();
        let mut conn = pool.get().expect("conn");

        let mut used = draft("Clunker", 0.8, 42, 3018);
        used.is_used = Some(true);
        let ship = create_ship(&mut conn, &used).expect("create");

        assert_eq!(ship.rating, 16.0);
    }

    #[test]
    fn create_rejects_invalid_draft_without_writing() {
        let mut test_db = TestDatabase::new();
        let pool = test_db.pool();
        let mut conn = pool.get().expect("conn");

        let mut bad = draft("Falcon", 1.0, 42, 3018);
        bad.speed = Some(1.0);
        match create_ship(&mut conn, &bad) {
            Err(CatalogError::InvalidInput(_)) => {}
            other => panic!("expected InvalidInput, got {other:?}"),
        }
        let total = count_ships(&mut conn, &ShipSearch::default()).expect("count");
        assert_eq!(total, 0);
    }

    #[test]
    fn update_overlays_only_present_fields() {
        let mut test_db = TestDatabase::new();
        let pool = test_db.pool();
        let mut conn = pool.get().expect("conn");

        let created = create_ship(&mut conn, &draft("Falcon", 0.8, 42, 3018)).expect("create");
        let patch = ShipDraft {
            crew_size: Some(7),
            ..ShipDraft::default()
        };
        let updated = update_ship(&mut conn, created.id, &patch).expect("update");

        assert_eq!(updated.crew_size, 7);
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.speed, created.speed);
        assert_eq!(updated.prod_date, created.prod_date);
        // crew size does not feed the rating
        assert_eq!(updated.rating, created.rating);
    }

    #[test]
    fn update_recomputes_rating_from_new_inputs() {
        let mut test_db = TestDatabase::new();
        let pool = test_db.pool();
        let mut conn = pool.get().expect("conn");

        let created = create_ship(&mut conn, &draft("Falcon", 0.8, 42, 3018)).expect("create");
        let patch = ShipDraft {
            is_used: Some(true),
            ..ShipDraft::default()
        };
        let updated = update_ship(&mut conn, created.id, &patch).expect("update");

        assert_eq!(updated.rating, 16.0);
    }

    #[test]
    fn update_with_all_fields_absent_is_a_noop() {
        let mut test_db = TestDatabase::new();
        let pool = test_db.pool();
        let mut conn = pool.get().expect("conn");

        let created = create_ship(&mut conn, &draft("Falcon", 0.8, 42, 3018)).expect("create");
        let updated =
            update_ship(&mut conn, created.id, &ShipDraft::default()).expect("noop update");

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.rating, created.rating);
    }

    #[test]
    fn update_missing_ship_is_not_found() {
        let mut test_db = TestDatabase::new();
        let pool = test_db.pool();
        let mut conn = pool.get().expect("conn");

        match update_ship(&mut conn, 999, &ShipDraft::default()) {
            Err(CatalogError::NotFound) => {}
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn search_conjoins_range_and_substring_predicates() {
        let mut test_db = TestDatabase::new();
        let pool = test_db.pool();
        let mut conn = pool.get().expect("conn");

        create_ship(&mut conn, &draft("Falcon", 0.7, 10, 3000)).expect("create");
        create_ship(&mut conn, &draft("Falcon II", 0.3, 20, 3000)).expect("create");
        create_ship(&mut conn, &draft("Raven", 0.6, 30, 3000)).expect("create");

        let search = ShipSearch {
            min_speed: Some(0.5),
            max_speed: Some(0.9),
            ..ShipSearch::default()
        };
        let fast = search_ships(&mut conn, &search).expect("search");
        assert_eq!(fast.len(), 2);
        assert!(fast.iter().all(|ship| ship.speed >= 0.5 && ship.speed <= 0.9));

        let search = ShipSearch {
            min_speed: Some(0.5),
            max_speed: Some(0.9),
            name: Some("Falcon".to_string()),
            ..ShipSearch::default()
        };
        let fast_falcons = search_ships(&mut conn, &search).expect("search");
        assert_eq!(fast_falcons.len(), 1);
        assert_eq!(fast_falcons[0].name, "Falcon");
    }

    #[test]
    fn substring_match_is_case_sensitive() {
        let mut test_db = TestDatabase::new();
        let pool = test_db.pool();
        let mut conn = pool.get().expect("conn");

        create_ship(&mut conn, &draft("Falcon", 0.7, 10, 3000)).expect("create");

        let search = ShipSearch {
            name: Some("falcon".to_string()),
            ..ShipSearch::default()
        };
        assert!(search_ships(&mut conn, &search).expect("search").is_empty());
    }

    #[test]
    fn count_matches_unpaginated_search() {
        let mut test_db = TestDatabase::new();
        let pool = test_db.pool();
        let mut conn = pool.get().expect("conn");

        for index in 0..5 {
            create_ship(&mut conn, &draft(&format!("Ship {index}"), 0.5, 10, 3000))
                .expect("create");
        }

        let filter = ShipSearch {
            name: Some("Ship".to_string()),
            page_size: Some(i64::from(i32::MAX)),
            ..ShipSearch::default()
        };
        let listed = search_ships(&mut conn, &filter).expect("search");
        let counted = count_ships(&mut conn, &filter).expect("count");
        assert_eq!(counted, listed.len() as i64);
        assert_eq!(counted, 5);
    }

    #[test]
    fn pagination_windows_after_sorting() {
        let mut test_db = TestDatabase::new();
        let pool = test_db.pool();
        let mut conn = pool.get().expect("conn");

        let mut ids = Vec::new();
        for index in 0..10 {
            let ship = create_ship(&mut conn, &draft(&format!("Ship {index}"), 0.5, 10, 3000))
                .expect("create");
            ids.push(ship.id);
        }
        ids.sort_unstable();

        let search = ShipSearch {
            order_by: Some(SortField::Id),
            page_number: Some(1),
            page_size: Some(3),
            ..ShipSearch::default()
        };
        let page = search_ships(&mut conn, &search).expect("search");
        let page_ids: Vec<i64> = page.iter().map(|ship| ship.id).collect();
        assert_eq!(page_ids, ids[3..6].to_vec());
    }

    #[test]
    fn date_bounds_select_inclusive_range() {
        let mut test_db = TestDatabase::new();
        let pool = test_db.pool();
        let mut conn = pool.get().expect("conn");

        create_ship(&mut conn, &draft("Old", 0.5, 10, 2850)).expect("create");
        create_ship(&mut conn, &draft("Mid", 0.5, 10, 2950)).expect("create");
        create_ship(&mut conn, &draft("New", 0.5, 10, 3010)).expect("create");

        let millis = |year: i32| {
            NaiveDate::from_ymd_opt(year, 1, 1)
                .expect("date")
                .and_time(chrono::NaiveTime::MIN)
                .and_utc()
                .timestamp_millis()
        };
        let search = ShipSearch {
            after: Some(millis(2900)),
            before: Some(millis(3000)),
            ..ShipSearch::default()
        };
        let matched = search_ships(&mut conn, &search).expect("search");
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].name, "Mid");
    }

    #[test]
    fn delete_removes_ship_and_reports_missing() {
        let mut test_db = TestDatabase::new();
        let pool = test_db.pool();
        let mut conn = pool.get().expect("conn");

        let ship = create_ship(&mut conn, &draft("Falcon", 0.8, 42, 3018)).expect("create");
        delete_ship(&mut conn, ship.id).expect("delete");
        assert!(find_ship(&mut conn, ship.id).expect("find").is_none());

        match delete_ship(&mut conn, ship.id) {
            Err(CatalogError::NotFound) => {}
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}
