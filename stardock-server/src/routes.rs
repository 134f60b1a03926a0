//! HTTP handlers for the Stardock ship catalog.

use actix_web::{HttpResponse, Responder, delete, get, post, web};
use chrono::{DateTime, NaiveTime};
use diesel::pg::PgConnection;
use serde::{Deserialize, Serialize};
use stardock_core::{CatalogError, ShipDraft, ShipType};
use utoipa::ToSchema;

use crate::db::DbPool;
use crate::models::Ship;
use crate::query::ShipSearch;
use crate::service;

#[derive(Clone)]
/// Shared application state for handlers.
pub struct AppState {
    /// Database connection pool.
    pub pool: DbPool,
}

/// Wire representation of a persisted ship.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShipResponse {
    /// Storage-assigned identifier.
    pub id: i64,
    /// Ship name.
    pub name: String,
    /// Home planet.
    pub planet: String,
    /// Ship category constant.
    pub ship_type: String,
    /// Production date as epoch milliseconds.
    pub prod_date: i64,
    /// Whether the ship is used.
    pub is_used: bool,
    /// Speed in [0.01, 0.99].
    pub speed: f64,
    /// Crew size in [1, 9999].
    pub crew_size: i32,
    /// Derived rating.
    pub rating: f64,
}

impl From<Ship> for ShipResponse {
    fn from(ship: Ship) -> Self {
        Self {
            id: ship.id,
            name: ship.name,
            planet: ship.planet,
            ship_type: ship.ship_type,
            prod_date: ship
                .prod_date
                .and_time(NaiveTime::MIN)
                .and_utc()
                .timestamp_millis(),
            is_used: ship.is_used,
            speed: ship.speed,
            crew_size: ship.crew_size,
            rating: ship.rating,
        }
    }
}

/// Request body for creating or partially updating a ship.
///
/// On update, absent or null fields leave the stored value untouched.
/// The rating is derived and never accepted from a caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShipPayload {
    /// Ship name, 1-50 characters.
    pub name: Option<String>,
    /// Home planet, 1-50 characters.
    pub planet: Option<String>,
    /// Ship category.
    pub ship_type: Option<ShipType>,
    /// Production date as epoch milliseconds.
    pub prod_date: Option<i64>,
    /// Whether the ship is used; defaults to false on create.
    pub is_used: Option<bool>,
    /// Speed in [0.01, 0.99].
    pub speed: Option<f64>,
    /// Crew size in [1, 9999].
    pub crew_size: Option<i32>,
}

impl ShipPayload {
    fn into_draft(self) -> Result<ShipDraft, CatalogError> {
        let prod_date = match self.prod_date {
            None => None,
            Some(millis) => Some(
                DateTime::from_timestamp_millis(millis)
                    .map(|moment| moment.date_naive())
                    .ok_or_else(|| {
                        CatalogError::InvalidInput(
                            "prodDate is not a representable timestamp".to_string(),
                        )
                    })?,
            ),
        };
        Ok(ShipDraft {
            name: self.name,
            planet: self.planet,
            ship_type: self.ship_type,
            prod_date,
            is_used: self.is_used,
            speed: self.speed,
            crew_size: self.crew_size,
        })
    }
}

/// Error response payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub message: String,
}

fn error_response(error: CatalogError) -> HttpResponse {
    let message = error.to_string();
    match error {
        CatalogError::InvalidInput(_) => HttpResponse::BadRequest().json(ErrorResponse { message }),
        CatalogError::NotFound => HttpResponse::NotFound().json(ErrorResponse { message }),
        CatalogError::Storage(_) => {
            HttpResponse::InternalServerError().json(ErrorResponse { message })
        }
    }
}

fn invalid_id() -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        message: "id must be a positive integer".to_string(),
    })
}

/// Run a catalog operation on a pooled connection off the async executor.
async fn with_conn<T, F>(pool: DbPool, op: F) -> Result<T, CatalogError>
where
    T: Send + 'static,
    F: FnOnce(&mut PgConnection) -> Result<T, CatalogError> + Send + 'static,
{
    match web::block(move || {
        let mut conn = pool
            .get()
            .map_err(|err| CatalogError::Storage(err.to_string()))?;
        op(&mut conn)
    })
    .await
    {
        Ok(result) => result,
        Err(err) => Err(CatalogError::Storage(format!("blocking task failed: {err}"))),
    }
}

#[utoipa::path(
    get,
    path = "/rest/ships",
    params(ShipSearch),
    responses(
        (status = 200, description = "Matching ships", body = [ShipResponse]),
        (status = 400, description = "Invalid search parameter", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[get("/rest/ships")]
/// List ships matching the filter, sorted and paginated.
pub async fn find_ships(
    state: web::Data<AppState>,
    search: web::Query<ShipSearch>,
) -> impl Responder {
    let search = search.into_inner();
    match with_conn(state.pool.clone(), move |conn| {
        service::search_ships(conn, &search)
    })
    .await
    {
        Ok(ships) => {
            let body: Vec<ShipResponse> = ships.into_iter().map(ShipResponse::from).collect();
            HttpResponse::Ok().json(body)
        }
        Err(error) => error_response(error),
    }
}

#[utoipa::path(
    get,
    path = "/rest/ships/count",
    params(ShipSearch),
    responses(
        (status = 200, description = "Count of matching ships", body = i64),
        (status = 400, description = "Invalid search parameter", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[get("/rest/ships/count")]
/// Count ships matching the filter, ignoring pagination and sort.
pub async fn ships_count(
    state: web::Data<AppState>,
    search: web::Query<ShipSearch>,
) -> impl Responder {
    let search = search.into_inner();
    match with_conn(state.pool.clone(), move |conn| {
        service::count_ships(conn, &search)
    })
    .await
    {
        Ok(count) => HttpResponse::Ok().json(count),
        Err(error) => error_response(error),
    }
}

#[utoipa::path(
    get,
    path = "/rest/ships/{id}",
    params(
        ("id" = i64, Path, description = "Ship identifier")
    ),
    responses(
        (status = 200, description = "Ship found", body = ShipResponse),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "Ship not found", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[get("/rest/ships/{id}")]
/// Fetch a single ship by identifier.
pub async fn find_ship_by_id(state: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    let id = path.into_inner();
    if id < 1 {
        return invalid_id();
    }
    match with_conn(state.pool.clone(), move |conn| service::find_ship(conn, id)).await {
        Ok(Some(ship)) => HttpResponse::Ok().json(ShipResponse::from(ship)),
        Ok(None) => error_response(CatalogError::NotFound),
        Err(error) => error_response(error),
    }
}

#[utoipa::path(
    post,
    path = "/rest/ships",
    request_body = ShipPayload,
    responses(
        (status = 200, description = "Ship created", body = ShipResponse),
        (status = 400, description = "Invalid payload", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[post("/rest/ships")]
/// Validate and persist a new ship.
pub async fn save_ship(
    state: web::Data<AppState>,
    payload: web::Json<ShipPayload>,
) -> impl Responder {
    let draft = match payload.into_inner().into_draft() {
        Ok(draft) => draft,
        Err(error) => return error_response(error),
    };
    match with_conn(state.pool.clone(), move |conn| {
        service::create_ship(conn, &draft)
    })
    .await
    {
        Ok(ship) => HttpResponse::Ok().json(ShipResponse::from(ship)),
        Err(error) => error_response(error),
    }
}

#[utoipa::path(
    post,
    path = "/rest/ships/{id}",
    params(
        ("id" = i64, Path, description = "Ship identifier")
    ),
    request_body = ShipPayload,
    responses(
        (status = 200, description = "Ship updated", body = ShipResponse),
        (status = 400, description = "Invalid id or payload", body = ErrorResponse),
        (status = 404, description = "Ship not found", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[post("/rest/ships/{id}")]
/// Partially update a ship; absent fields keep their stored values.
pub async fn update_ship(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    payload: web::Json<ShipPayload>,
) -> impl Responder {
    let id = path.into_inner();
    if id < 1 {
        return invalid_id();
    }
    let draft = match payload.into_inner().into_draft() {
        Ok(draft) => draft,
        Err(error) => return error_response(error),
    };
    match with_conn(state.pool.clone(), move |conn| {
        service::update_ship(conn, id, &draft)
    })
    .await
    {
        Ok(ship) => HttpResponse::Ok().json(ShipResponse::from(ship)),
        Err(error) => error_response(error),
    }
}

#[utoipa::path(
    delete,
    path = "/rest/ships/{id}",
    params(
        ("id" = i64, Path, description = "Ship identifier")
    ),
    responses(
        (status = 200, description = "Ship deleted"),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "Ship not found", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[delete("/rest/ships/{id}")]
/// Delete a ship by identifier.
pub async fn delete_ship(state: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    let id = path.into_inner();
    if id < 1 {
        return invalid_id();
    }
    match with_conn(state.pool.clone(), move |conn| {
        service::delete_ship(conn, id)
    })
    .await
    {
        Ok(()) => HttpResponse::Ok().finish(),
        Err(error) => error_response(error),
    }
}

#[utoipa::path(
    get,
    path = "/rest/openapi.json",
    responses(
        (status = 200, description = "OpenAPI document", body = serde_json::Value)
    ),
    tag = "system"
)]
#[get("/rest/openapi.json")]
/// Serve the OpenAPI document.
pub async fn openapi_json() -> impl Responder {
    use utoipa::OpenApi;

    HttpResponse::Ok().json(crate::openapi::ApiDoc::openapi())
}
