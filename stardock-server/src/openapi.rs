//! OpenAPI specification for Stardock server.

use utoipa::OpenApi;

use stardock_core::{ShipType, SortField};

use crate::routes::{ErrorResponse, ShipPayload, ShipResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::find_ships,
        crate::routes::ships_count,
        crate::routes::find_ship_by_id,
        crate::routes::save_ship,
        crate::routes::update_ship,
        crate::routes::delete_ship,
        crate::routes::openapi_json
    ),
    components(
        schemas(
            ShipResponse,
            ShipPayload,
            ShipType,
            SortField,
            ErrorResponse
        )
    ),
    tags(
        (name = "ships", description = "Ship catalog"),
        (name = "system", description = "System endpoints")
    )
)]
/// OpenAPI specification for the Stardock server.
pub struct ApiDoc;
