use crate::{
    dtos::SheetResponseDto,
    models::productmodel::ScrapedProduct,
    service::{error::ServiceError, scraper::Scraper, sheets::SpreadsheetExt},
};

/// Scrapes `site_url` and writes the rows, under a header, into a new spreadsheet.
///
/// Every call creates a new document. If writing the rows fails the document is
/// left behind empty.
pub async fn export_to_sheet(
    scraper: &dyn Scraper,
    sheets: &dyn SpreadsheetExt,
    title: &str,
    site_url: Option<&str>,
) -> Result<SheetResponseDto, ServiceError> {
    let products = scraper.scrape(site_url).await?;

    let spreadsheet = sheets.create_spreadsheet(title).await?;

    let mut rows = Vec::with_capacity(products.len() + 1);
    rows.push(ScrapedProduct::header_row());
    rows.extend(products.iter().map(ScrapedProduct::to_row));

    if let Err(error) = sheets.write_rows(&spreadsheet, rows).await {
        tracing::error!(
            "Writing rows failed, spreadsheet {} left empty: {}",
            spreadsheet.id,
            error
        );
        return Err(error.into());
    }

    tracing::info!("Exported {} products to spreadsheet {}", products.len(), spreadsheet.id);

    Ok(SheetResponseDto {
        sheet_url: spreadsheet.url(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        service::scraper::SampleScraper,
        test_support::RecordingSheets,
    };
    use serde_json::json;

    #[tokio::test]
    async fn test_export_writes_header_then_sample_row() {
        let sheets = RecordingSheets::default();

        let response = export_to_sheet(&SampleScraper, &sheets, "Market Ürünleri", Some("https://onurmarket.com"))
            .await
            .unwrap();

        assert_eq!(
            response.sheet_url,
            "https://docs.google.com/spreadsheets/d/sheet-1/edit#gid=0"
        );
        assert_eq!(sheets.titles().await, vec!["Market Ürünleri".to_string()]);

        let writes = sheets.writes().await;
        assert_eq!(writes.len(), 1);
        assert_eq!(
            writes[0].1,
            vec![
                vec![
                    json!("barcode"), json!("name"), json!("brand"), json!("category"),
                    json!("price"), json!("stock"), json!("imgurl"),
                ],
                vec![
                    json!("1234567890001"), json!("Domates"), json!("Yerel"), json!("Sebze"),
                    json!(39.90), json!(100), json!("https://.../domates.png"),
                ],
            ]
        );
    }

    #[tokio::test]
    async fn test_each_export_creates_a_new_document() {
        let sheets = RecordingSheets::default();

        let first = export_to_sheet(&SampleScraper, &sheets, "Market Ürünleri", None).await.unwrap();
        let second = export_to_sheet(&SampleScraper, &sheets, "Market Ürünleri", None).await.unwrap();

        assert_ne!(first.sheet_url, second.sheet_url);
        assert_eq!(sheets.titles().await.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_write_is_reported() {
        let sheets = RecordingSheets::default().failing_writes();

        let result = export_to_sheet(&SampleScraper, &sheets, "Market Ürünleri", None).await;

        assert!(matches!(result, Err(ServiceError::Sheets(_))));
        assert_eq!(sheets.titles().await.len(), 1);
    }
}
