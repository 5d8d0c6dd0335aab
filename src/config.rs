// config.rs
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub referral_base_url: String,
    pub google_credentials_path: String,
    pub spreadsheet_title: String,
    pub cors_allowed_origins: Option<Vec<String>>,
    pub http_timeout_secs: u64,
    pub port: u16,
}

pub const DEFAULT_REFERRAL_BASE_URL: &str = "https://site.com";
pub const DEFAULT_SPREADSHEET_TITLE: &str = "Market Ürünleri";

impl Config {
    pub fn init() -> Config {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let referral_base_url = std::env::var("REFERRAL_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_REFERRAL_BASE_URL.to_string());

        // Service account key file for the spreadsheet service
        let google_credentials_path = std::env::var("GOOGLE_APPLICATION_CREDENTIALS")
            .unwrap_or_else(|_| "credentials.json".to_string());
        let spreadsheet_title = std::env::var("SPREADSHEET_TITLE")
            .unwrap_or_else(|_| DEFAULT_SPREADSHEET_TITLE.to_string());

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .ok()
            .map(|origins| parse_origins(&origins))
            .filter(|origins| !origins.is_empty());

        let http_timeout_secs = std::env::var("HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(30);

        let port = std::env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(5000);

        Config {
            database_url,
            referral_base_url,
            google_credentials_path,
            spreadsheet_title,
            cors_allowed_origins,
            http_timeout_secs,
            port,
        }
    }
}

fn parse_origins(origins: &str) -> Vec<String> {
    origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Config {
        Config {
            database_url: "postgres://localhost/superpromo".to_string(),
            referral_base_url: DEFAULT_REFERRAL_BASE_URL.to_string(),
            google_credentials_path: "credentials.json".to_string(),
            spreadsheet_title: DEFAULT_SPREADSHEET_TITLE.to_string(),
            cors_allowed_origins: None,
            http_timeout_secs: 30,
            port: 5000,
        }
    }
}
