use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use stratus_core::{ForecastId, LocationId};
use stratus_infra::FeatureFlags;
use stratus_infra::backend::GET_FORECAST_BY_DATE_FEATURE;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::middleware::{FeatureGate, feature_gate_middleware};

pub fn router(flags: FeatureFlags) -> Router {
    let by_date = Router::new()
        .route("/byDate", get(get_forecast_by_date))
        .route_layer(axum::middleware::from_fn_with_state(
            FeatureGate::new(GET_FORECAST_BY_DATE_FEATURE, flags.allow_get_forecast_by_date),
            feature_gate_middleware,
        ));

    Router::new()
        .route("/", get(list_forecasts).post(create_forecast))
        .route(
            "/:id",
            get(get_forecast).put(update_forecast).delete(delete_forecast),
        )
        .merge(by_date)
}

fn parse_id(raw: &str) -> Result<ForecastId, axum::response::Response> {
    raw.parse::<ForecastId>()
        .map_err(errors::domain_error_to_response)
}

pub async fn list_forecasts(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let forecasts = match services.forecasts.list_forecasts().await {
        Ok(f) => f,
        Err(e) => return errors::domain_error_to_response(e),
    };

    Json(dto::ForecastListResponse {
        weather_forecasts: forecasts.iter().map(dto::ForecastView::from).collect(),
    })
    .into_response()
}

pub async fn create_forecast(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateForecastRequest>,
) -> axum::response::Response {
    if let Err(resp) = dto::check_scale(&body.scale) {
        return resp;
    }
    let location = match body.location.into_location() {
        Ok(l) => l,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services
        .forecasts
        .create_forecast(location, body.date, body.temperature, &body.scale, &body.summary)
        .await
    {
        Ok(created) => {
            (StatusCode::CREATED, Json(dto::ForecastResponse::new(&created))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_forecast(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.forecasts.get_forecast_by_id(id).await {
        Ok(forecast) => Json(dto::ForecastResponse::new(&forecast)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_forecast_by_date(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::ForecastByDateQuery>,
) -> axum::response::Response {
    match services
        .forecasts
        .get_forecast_for_date(LocationId::new(query.location_id), query.date)
        .await
    {
        Ok(Some(forecast)) => Json(dto::ForecastResponse::new(&forecast)).into_response(),
        Ok(None) => errors::json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            format!(
                "no forecast for location {} on {}",
                query.location_id, query.date
            ),
        ),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_forecast(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateForecastRequest>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if id.get() != body.id {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "invalid_request",
            format!("path id {id} does not match body id {}", body.id),
        );
    }
    if let Err(resp) = dto::check_scale(&body.scale) {
        return resp;
    }
    let forecast = match body.into_forecast() {
        Ok(f) => f,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.forecasts.update_forecast(forecast).await {
        Ok(updated) => Json(dto::ForecastResponse::new(&updated)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_forecast(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.forecasts.delete_forecast(id).await {
        Ok(deleted) => Json(dto::DeleteResponse { deleted }).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
