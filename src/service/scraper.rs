use async_trait::async_trait;

use crate::{models::productmodel::ScrapedProduct, service::error::ServiceError};

/// A site scraper producing normalized product rows.
#[async_trait]
pub trait Scraper: Send + Sync {
    async fn scrape(&self, site_url: Option<&str>) -> Result<Vec<ScrapedProduct>, ServiceError>;
}

/// Placeholder scraper returning a single fixed product whatever the site.
#[derive(Debug, Default, Clone, Copy)]
pub struct SampleScraper;

impl SampleScraper {
    pub fn sample_product() -> ScrapedProduct {
        ScrapedProduct {
            barcode: "1234567890001".to_string(),
            name: "Domates".to_string(),
            brand: "Yerel".to_string(),
            category: "Sebze".to_string(),
            price: 39.90,
            stock: 100,
            imgurl: "https://.../domates.png".to_string(),
        }
    }
}

#[async_trait]
impl Scraper for SampleScraper {
    async fn scrape(&self, site_url: Option<&str>) -> Result<Vec<ScrapedProduct>, ServiceError> {
        tracing::debug!("Sample scraper ignoring site_url {:?}", site_url);
        Ok(vec![Self::sample_product()])
    }
}
