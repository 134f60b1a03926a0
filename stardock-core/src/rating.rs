//! Derived rating computation.

use crate::validation::MAX_PROD_YEAR;

/// Round half-up to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compute the derived rating from speed, usage flag, and production year.
///
/// `rating = round2(80 * speed * k / (3019 - year + 1))` where `k` is 0.5
/// for a used ship and 1.0 otherwise. Callers guarantee speed and production
/// date are set; every persisted ship satisfies that after create.
pub fn compute_rating(speed: f64, is_used: bool, prod_year: i32) -> f64 {
    let wear = if is_used { 0.5 } else { 1.0 };
    round2(80.0 * speed * wear / f64::from(MAX_PROD_YEAR - prod_year + 1))
}
