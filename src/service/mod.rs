pub mod error;
pub mod export;
pub mod referral;
pub mod scraper;
pub mod sheets;
