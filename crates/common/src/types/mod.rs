use serde::{Deserialize, Serialize};

use crate::CoreError;

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// A stored product as it travels over HTTP.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
}

/// Body of create and update requests.
///
/// `description` keeps three states apart:
/// - `None`: the key was absent
/// - `Some(None)`: explicit `null`
/// - `Some(Some(s))`: a string, possibly empty
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ProductPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(
        default,
        with = "::serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub price: Option<Price>,
}

/// Prices are accepted either as JSON numbers or as decimal strings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Price {
    Number(f64),
    Text(String),
}

impl Price {
    /// Numeric value of the price. The whole trimmed text must parse.
    pub fn value(&self) -> Result<f64, CoreError> {
        match self {
            Price::Number(n) => Ok(*n),
            Price::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|e| CoreError::Parse(format!("price {s:?}: {e}"))),
        }
    }
}
