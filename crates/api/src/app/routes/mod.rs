use axum::Router;

use stratus_infra::FeatureFlags;

pub mod forecasts;

/// Router for all forecast endpoints.
pub fn router(flags: FeatureFlags) -> Router {
    Router::new().nest("/weatherforecasts", forecasts::router(flags))
}
