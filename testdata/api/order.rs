//! Types for the `api` module, inferred from a sample JSON document.

use serde::{Deserialize, Serialize};
#[allow(unused_imports)]
use serde_json::Number;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    #[serde(rename = "code")]
    pub code: String,
    #[serde(rename = "open")]
    pub open: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legs {
    #[serde(rename = "side")]
    pub side: String,
    #[serde(rename = "qty")]
    pub qty: Number,
    #[serde(rename = "venue")]
    pub venue: Venue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meta {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "id")]
    pub id: String,
    #[serde(rename = "filled")]
    pub filled: bool,
    #[serde(rename = "price")]
    pub price: Number,
    #[serde(rename = "tags")]
    pub tags: Vec<String>,
    #[serde(rename = "legs")]
    pub legs: Vec<Legs>,
    #[serde(rename = "meta")]
    pub meta: Meta,
    #[serde(rename = "notes")]
    pub notes: Vec<serde_json::Value>,
    #[serde(rename = "type")]
    pub r#type: String,
}
