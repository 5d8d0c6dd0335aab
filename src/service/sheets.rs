use std::{path::Path, sync::Arc, time::Duration};

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tokio::sync::Mutex;

pub const SHEETS_SCOPES: &str =
    "https://spreadsheets.google.com/feeds https://www.googleapis.com/auth/drive";

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const SHEETS_API_BASE: &str = "https://sheets.googleapis.com";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
// Refresh a little before Google expires the token
const TOKEN_REFRESH_MARGIN_SECS: i64 = 60;

#[derive(Debug, Error)]
pub enum SheetsError {
    #[error("Failed to read credentials file: {0}")]
    CredentialsFile(#[from] std::io::Error),
    #[error("Invalid credentials JSON: {0}")]
    CredentialsFormat(#[from] serde_json::Error),
    #[error("JWT signing error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("Spreadsheet API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Unexpected spreadsheet API response: {0}")]
    UnexpectedResponse(String),
    #[error("Invalid spreadsheet API url: {0}")]
    InvalidUrl(String),
}

/// The fields of a Google service account key file this client needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    pub fn from_json(json: &str) -> Result<Self, SheetsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, SheetsError> {
        let contents = tokio::fs::read_to_string(path).await?;
        Self::from_json(&contents)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spreadsheet {
    pub id: String,
    pub first_sheet_title: String,
    pub first_sheet_id: i64,
}

impl Spreadsheet {
    pub fn url(&self) -> String {
        format!(
            "https://docs.google.com/spreadsheets/d/{}/edit#gid={}",
            self.id, self.first_sheet_id
        )
    }

    /// A1 reference to the top-left cell of the first worksheet.
    pub fn first_sheet_origin(&self) -> String {
        format!("'{}'!A1", self.first_sheet_title.replace('\'', "''"))
    }
}

#[async_trait]
pub trait SpreadsheetExt: Send + Sync {
    async fn create_spreadsheet(&self, title: &str) -> Result<Spreadsheet, SheetsError>;

    async fn write_rows(
        &self,
        spreadsheet: &Spreadsheet,
        rows: Vec<Vec<Value>>,
    ) -> Result<(), SheetsError>;
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct AssertionClaims {
    iss: String,
    scope: String,
    aud: String,
    iat: i64,
    exp: i64,
}

impl AssertionClaims {
    fn new(key: &ServiceAccountKey, issued_at: i64) -> Self {
        AssertionClaims {
            iss: key.client_email.clone(),
            scope: SHEETS_SCOPES.to_string(),
            aud: key.token_uri.clone(),
            iat: issued_at,
            exp: issued_at + ASSERTION_LIFETIME_SECS,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    ASSERTION_LIFETIME_SECS
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: i64,
}

impl CachedToken {
    fn is_fresh(&self, now: i64) -> bool {
        now + TOKEN_REFRESH_MARGIN_SECS < self.expires_at
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateSpreadsheetResponse {
    spreadsheet_id: String,
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetProperties {
    #[serde(default)]
    sheet_id: i64,
    title: String,
}

impl TryFrom<CreateSpreadsheetResponse> for Spreadsheet {
    type Error = SheetsError;

    fn try_from(response: CreateSpreadsheetResponse) -> Result<Self, Self::Error> {
        let first = response.sheets.into_iter().next().ok_or_else(|| {
            SheetsError::UnexpectedResponse(format!(
                "spreadsheet {} has no worksheets",
                response.spreadsheet_id
            ))
        })?;

        Ok(Spreadsheet {
            id: response.spreadsheet_id,
            first_sheet_title: first.properties.title,
            first_sheet_id: first.properties.sheet_id,
        })
    }
}

/// Google Sheets v4 client authenticated as a service account.
#[derive(Clone)]
pub struct GoogleSheetsClient {
    client: reqwest::Client,
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    api_base: String,
    token: Arc<Mutex<Option<CachedToken>>>,
}

impl GoogleSheetsClient {
    pub fn new(key: ServiceAccountKey, client: reqwest::Client) -> Result<Self, SheetsError> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())?;

        Ok(Self {
            client,
            key,
            encoding_key,
            api_base: SHEETS_API_BASE.to_string(),
            token: Arc::new(Mutex::new(None)),
        })
    }

    pub async fn from_credentials_file(
        path: impl AsRef<Path>,
        timeout: Duration,
    ) -> Result<Self, SheetsError> {
        let key = ServiceAccountKey::from_file(path).await?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Self::new(key, client)
    }

    #[cfg(test)]
    fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Values endpoint for the first worksheet, with the A1 range encoded as one path segment.
    fn values_url(&self, spreadsheet: &Spreadsheet) -> Result<reqwest::Url, SheetsError> {
        let mut url = reqwest::Url::parse(&self.api_base)
            .map_err(|e| SheetsError::InvalidUrl(format!("{}: {}", self.api_base, e)))?;

        url.path_segments_mut()
            .map_err(|_| SheetsError::InvalidUrl(self.api_base.clone()))?
            .pop_if_empty()
            .extend([
                "v4",
                "spreadsheets",
                spreadsheet.id.as_str(),
                "values",
                spreadsheet.first_sheet_origin().as_str(),
            ]);

        Ok(url)
    }

    async fn access_token(&self) -> Result<String, SheetsError> {
        let mut cached = self.token.lock().await;
        let now = Utc::now().timestamp();

        if let Some(token) = cached.as_ref().filter(|token| token.is_fresh(now)) {
            return Ok(token.access_token.clone());
        }

        tracing::debug!("Requesting spreadsheet access token for {}", self.key.client_email);

        let claims = AssertionClaims::new(&self.key, now);
        let assertion = encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)?;

        let response = self
            .client
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let token: TokenResponse = check_status(response).await?.json().await?;
        let access_token = token.access_token.clone();

        *cached = Some(CachedToken {
            access_token: token.access_token,
            expires_at: now + token.expires_in,
        });

        Ok(access_token)
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, SheetsError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    Err(SheetsError::Api { status, body })
}

#[async_trait]
impl SpreadsheetExt for GoogleSheetsClient {
    async fn create_spreadsheet(&self, title: &str) -> Result<Spreadsheet, SheetsError> {
        let token = self.access_token().await?;

        let response = self
            .client
            .post(format!("{}/v4/spreadsheets", self.api_base))
            .bearer_auth(token)
            .json(&json!({ "properties": { "title": title } }))
            .send()
            .await?;

        let created: CreateSpreadsheetResponse = check_status(response).await?.json().await?;
        let spreadsheet = Spreadsheet::try_from(created)?;

        tracing::info!("Created spreadsheet {} ({})", spreadsheet.id, title);

        Ok(spreadsheet)
    }

    async fn write_rows(
        &self,
        spreadsheet: &Spreadsheet,
        rows: Vec<Vec<Value>>,
    ) -> Result<(), SheetsError> {
        let token = self.access_token().await?;
        let range = spreadsheet.first_sheet_origin();
        let url = self.values_url(spreadsheet)?;

        let response = self
            .client
            .put(url)
            .query(&[("valueInputOption", "RAW")])
            .bearer_auth(token)
            .json(&json!({
                "range": range,
                "majorDimension": "ROWS",
                "values": rows,
            }))
            .send()
            .await?;

        check_status(response).await?;

        Ok(())
    }
}
