use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, response::IntoResponse, routing::post, Extension, Json, Router};

use crate::{
    dtos::ScrapeToSheetDto,
    error::HttpError,
    service::export::export_to_sheet,
    AppState,
};

pub fn scrape_handler() -> Router {
    Router::new().route("/scrape-to-sheets", post(scrape_to_sheets))
}

pub async fn scrape_to_sheets(
    Extension(app_state): Extension<Arc<AppState>>,
    payload: Result<Json<ScrapeToSheetDto>, JsonRejection>,
) -> Result<impl IntoResponse, HttpError> {
    let Json(body) = payload?;

    let response = export_to_sheet(
        app_state.scraper.as_ref(),
        app_state.sheets.as_ref(),
        &app_state.env.spreadsheet_title,
        body.site_url.as_deref(),
    )
    .await
    .map_err(|e| {
        tracing::error!("Scrape to sheets failed: {}", e);
        HttpError::from(e)
    })?;

    Ok(Json(response))
}
