pub mod referral;
pub mod scrape;
