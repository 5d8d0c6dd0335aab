use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ScrapeToSheetDto {
    // Passed through to the scraper; the sample scraper does not read it
    #[serde(default)]
    pub site_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetResponseDto {
    pub sheet_url: String,
}
