use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::datetime;
use crate::error::{PetTracerError, Result};

/// The keys the portal has been observed to return the bearer token
/// under. `access_token` wins when several are present; empty strings
/// are skipped.
const TOKEN_KEYS: [&str; 3] = ["access_token", "token", "id_token"];

/// Pull the bearer token out of a login response object.
pub(crate) fn extract_token(value: &Value) -> Option<String> {
    TOKEN_KEYS.iter().find_map(|key| {
        value
            .get(key)
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
    })
}

/// Country as the `[id, name]` pair the login response carries.
#[derive(Debug, Clone, PartialEq)]
pub struct Country {
    pub id: i64,
    pub name: String,
}

/// Odoo returns the pair as a two-element array; anything else (absent,
/// `false`, malformed) degrades to `None`.
fn deserialize_country<'de, D>(deserializer: D) -> std::result::Result<Option<Country>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(|value| {
        let pair = value.as_array()?;
        Some(Country {
            id: pair.first()?.as_i64()?,
            name: pair.get(1)?.as_str()?.to_string(),
        })
    }))
}

/// Subscription snapshot nested in the login response under `abo`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubscriptionInfo {
    pub id: Option<i64>,
    #[serde(rename = "userId")]
    pub user_id: Option<i64>,
    #[serde(
        default,
        rename = "dateExpires",
        deserialize_with = "datetime::deserialize_date"
    )]
    pub date_expires: Option<NaiveDate>,
    #[serde(rename = "odooId")]
    pub odoo_id: Option<i64>,
}

/// Parsed login response, minus the token (which the client keeps next
/// to it). Produced once per `login` call and never mutated.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginInfo {
    #[serde(rename = "id")]
    pub user_id: Option<i64>,
    pub name: Option<String>,
    /// The account email; the portal calls this field `login`.
    pub login: Option<String>,
    #[serde(rename = "lang")]
    pub language: Option<String>,
    #[serde(
        default,
        rename = "country_id",
        deserialize_with = "deserialize_country"
    )]
    pub country: Option<Country>,
    #[serde(rename = "numberOfCCs")]
    pub device_count: Option<i64>,
    #[serde(rename = "partnerId")]
    pub partner_id: Option<i64>,
    #[serde(default, deserialize_with = "datetime::deserialize_date")]
    pub expires: Option<NaiveDate>,
    #[serde(rename = "abo")]
    pub subscription: Option<SubscriptionInfo>,
}

impl LoginInfo {
    /// Build a `LoginInfo` from a raw login response object.
    pub fn from_value(value: Value) -> Result<LoginInfo> {
        serde_json::from_value(value)
            .map_err(|err| PetTracerError::Parse(format!("login response: {err}")))
    }
}
