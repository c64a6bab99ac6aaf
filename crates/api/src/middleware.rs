use axum::{
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::app::errors;

/// Route-level switch for a named runtime feature.
#[derive(Debug, Clone, Copy)]
pub struct FeatureGate {
    pub feature: &'static str,
    pub enabled: bool,
}

impl FeatureGate {
    pub fn new(feature: &'static str, enabled: bool) -> Self {
        Self { feature, enabled }
    }
}

/// Short-circuits with a 404 (and a warning naming the feature) when the
/// gate is closed.
pub async fn feature_gate_middleware(
    State(gate): State<FeatureGate>,
    req: Request<axum::body::Body>,
    next: Next,
) -> Response {
    if !gate.enabled {
        return errors::feature_disabled(gate.feature);
    }
    next.run(req).await
}
