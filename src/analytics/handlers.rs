use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use crate::{auth::AuthUser, error::AppResult, state::AppState};

use super::{dto::AnalyticsResponse, services::AnalyticsAggregator};

pub fn analytics_routes() -> Router<AppState> {
    Router::new().route("/analytics", get(get_analytics))
}

#[instrument(skip(aggregator))]
pub async fn get_analytics(
    State(aggregator): State<AnalyticsAggregator>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<AnalyticsResponse>> {
    let summary = aggregator.summary(user_id).await?;
    Ok(Json(summary.into()))
}
