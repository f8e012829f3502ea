/**
 * API Route Handlers
 *
 * # Routes
 *
 * ## Locations (authenticated)
 * - `GET /api/locations` - Paged listing
 * - `POST /api/locations` - Create (ADMIN)
 * - `GET /api/locations/{id}` - Lookup by id
 * - `PUT /api/locations/{id}` - Replace (ADMIN)
 * - `DELETE /api/locations/{id}` - Delete (ADMIN)
 * - `GET /api/locations/code/{code}` - Lookup by location code
 */

use axum::{middleware, routing::get, Router};

use crate::backend::locations::handlers::{
    create_location, delete_location, get_location, get_location_by_code, list_locations,
    update_location,
};
use crate::backend::middleware::require_auth;
use crate::backend::server::state::AppState;

/// Configure API routes
///
/// Every route added here sits behind `require_auth`. Role checks happen in
/// the handlers.
pub fn configure_api_routes(router: Router<AppState>, app_state: AppState) -> Router<AppState> {
    let locations = Router::new()
        .route("/api/locations", get(list_locations).post(create_location))
        .route(
            "/api/locations/{id}",
            get(get_location)
                .put(update_location)
                .delete(delete_location),
        )
        .route("/api/locations/code/{code}", get(get_location_by_code))
        .route_layer(middleware::from_fn_with_state(app_state, require_auth));

    router.merge(locations)
}
