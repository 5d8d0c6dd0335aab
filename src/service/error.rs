use thiserror::Error;
use uuid::Uuid;
use crate::{
    error::{ErrorMessage, HttpError},
    service::sheets::SheetsError,
};
use axum::http::StatusCode;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Group not found for leader {0}")]
    GroupNotFound(Uuid),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Spreadsheet error: {0}")]
    Sheets(#[from] SheetsError),

    /// Raised by site-specific scrapers; `SampleScraper` never fails.
    #[error("Scrape error: {0}")]
    Scrape(String),
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::GroupNotFound(_) => {
                HttpError::not_found(ErrorMessage::GroupNotFound.to_string())
            }
            // Driver messages can leak schema details, keep them in the logs
            ServiceError::Database(_) => {
                HttpError::server_error(ErrorMessage::ServerError.to_string())
            }
            ServiceError::Sheets(_) => {
                HttpError::bad_gateway(ErrorMessage::SpreadsheetUnavailable.to_string())
            }
            ServiceError::Scrape(_) => HttpError::bad_gateway(error.to_string()),
        }
    }
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::GroupNotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::Sheets(_) | ServiceError::Scrape(_) => StatusCode::BAD_GATEWAY,
        }
    }
}
