//! Wire model for the recipe search API.
//!
//! The backend makes no promises about field types: numeric columns arrive as
//! numbers, quoted numbers, `"NaN"`, or null depending on how the row was
//! imported. Decoding is therefore lenient per field — a malformed value
//! becomes `None` and renders as "N/A" instead of failing the whole page.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A single recipe record as returned by the search endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub prep_time: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub cook_time: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub total_time: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
    /// Nutrient name -> scalar value, e.g. `"calories": "389 kcal"`.
    #[serde(default)]
    pub nutrients: serde_json::Map<String, Value>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub serves: Option<String>,
}

/// One page of search results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub data: Vec<Recipe>,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "first_page")]
    pub page: u32,
}

fn first_page() -> u32 {
    1
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64().filter(|f| f.is_finite()),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    })
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse::<u32>().ok(),
        _ => None,
    })
}

/// Accepts both `"8 servings"` and a bare number like `2`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
