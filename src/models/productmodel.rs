use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScrapedProduct {
    pub barcode: String,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub price: f64,
    pub stock: i64,
    pub imgurl: String,
}

impl ScrapedProduct {
    /// Column names in the order `to_row` emits values.
    pub const HEADER: [&'static str; 7] = [
        "barcode", "name", "brand", "category", "price", "stock", "imgurl",
    ];

    pub fn header_row() -> Vec<Value> {
        Self::HEADER.iter().map(|column| json!(column)).collect()
    }

    pub fn to_row(&self) -> Vec<Value> {
        vec![
            json!(self.barcode),
            json!(self.name),
            json!(self.brand),
            json!(self.category),
            json!(self.price),
            json!(self.stock),
            json!(self.imgurl),
        ]
    }
}
