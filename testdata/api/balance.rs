//! Types for the `api` module, inferred from a sample JSON document.

use serde::{Deserialize, Serialize};
#[allow(unused_imports)]
use serde_json::Number;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Details {
    #[serde(rename = "availEq")]
    pub avail_eq: String,
    #[serde(rename = "borrowFroz")]
    pub borrow_froz: String,
    #[serde(rename = "cashBal")]
    pub cash_bal: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct First {
    #[serde(rename = "availBal")]
    pub avail_bal: String,
    #[serde(rename = "ccy")]
    pub ccy: String,
    #[serde(rename = "cross_liab")]
    pub cross_liab: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    #[serde(rename = "adjEq")]
    pub adj_eq: String,
    #[serde(rename = "details")]
    pub details: Vec<Details>,
    #[serde(rename = "first")]
    pub first: First,
    #[serde(rename = "isoEq")]
    pub iso_eq: serde_json::Value,
    #[serde(rename = "numbers")]
    pub numbers: Vec<Number>,
    #[serde(rename = "uTime")]
    pub u_time: Number,
    #[serde(rename = "upl")]
    pub upl: Number,
}
