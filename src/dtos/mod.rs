pub mod referraldtos;
pub mod scrapedtos;

pub use referraldtos::*;
pub use scrapedtos::*;
