use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, response::IntoResponse, routing::post, Extension, Json, Router};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dtos::GenerateReferralDto,
    error::{ErrorMessage, HttpError},
    service::referral::issue_referral_link,
    AppState,
};

pub fn referral_handler() -> Router {
    Router::new().route("/generateCode", post(generate_code))
}

pub async fn generate_code(
    Extension(app_state): Extension<Arc<AppState>>,
    payload: Result<Json<GenerateReferralDto>, JsonRejection>,
) -> Result<impl IntoResponse, HttpError> {
    let Json(body) = payload?;

    body.validate()
        .map_err(|_| HttpError::bad_request(ErrorMessage::LeaderUserIdRequired.to_string()))?;

    let leader_user_id = body
        .leader_user_id
        .as_deref()
        .ok_or_else(|| HttpError::bad_request(ErrorMessage::LeaderUserIdRequired.to_string()))?;

    let leader_user_id = Uuid::parse_str(leader_user_id.trim())
        .map_err(|_| HttpError::bad_request(ErrorMessage::InvalidLeaderUserId.to_string()))?;

    let response = issue_referral_link(
        app_state.db_client.as_ref(),
        app_state.code_source.as_ref(),
        &app_state.env.referral_base_url,
        leader_user_id,
    )
    .await
    .map_err(|e| {
        if e.status_code().is_server_error() {
            tracing::error!("Failed to issue referral link for {}: {}", leader_user_id, e);
        } else {
            tracing::warn!("{}", e);
        }
        HttpError::from(e)
    })?;

    tracing::info!(
        "Referral code {} issued for group {}",
        response.referral_code,
        response.group_code
    );

    Ok(Json(response))
}
