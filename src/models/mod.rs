pub mod productmodel;
pub mod referralmodel;
