use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use serde_json::Value;

use super::datetime;
use crate::error::{PetTracerError, Result};

/// One tracked collar unit as returned by the `getccs` endpoint family.
///
/// `id` is the only field the portal is guaranteed to send; everything
/// else may be omitted and maps to `None` (or an empty list for `fiFo`).
/// Unknown response fields are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: i64,
    pub accu_warn: Option<i64>,
    pub safety_zone: Option<bool>,
    pub hw: Option<i64>,
    pub sw: Option<i64>,
    pub bl: Option<i64>,
    pub bat: Option<i64>,
    pub chg: Option<i64>,
    pub user_id: Option<i64>,
    pub master_hs: Option<MasterHs>,
    pub mode: Option<i64>,
    pub mode_set: Option<i64>,
    pub status: Option<i64>,
    pub search: Option<bool>,
    pub last_tlg_nr: Option<i64>,
    #[serde(default, deserialize_with = "datetime::deserialize_timestamp")]
    pub last_contact: Option<DateTime<FixedOffset>>,
    pub last_pos: Option<LastPos>,
    pub dev_mode: Option<bool>,
    pub details: Option<Details>,
    pub led: Option<bool>,
    pub ble: Option<bool>,
    pub buz: Option<bool>,
    pub last_rssi: Option<i64>,
    pub flags: Option<i64>,
    pub search_mode_duration: Option<i64>,
    pub master_status: Option<String>,
    pub home: Option<bool>,
    #[serde(default, deserialize_with = "datetime::deserialize_timestamp")]
    pub home_since: Option<DateTime<FixedOffset>>,
    pub owner: Option<bool>,
    #[serde(default)]
    pub fi_fo: Vec<FifoEntry>,
}

impl Device {
    /// Build a `Device` from a raw JSON object. A numeric `id` is the
    /// only hard requirement.
    pub fn from_value(value: Value) -> Result<Device> {
        serde_json::from_value(value).map_err(|err| PetTracerError::Parse(format!("device: {err}")))
    }
}

/// Base-station (master hub) snapshot nested inside a [`Device`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterHs {
    pub id: Option<i64>,
    pub pos_lat: Option<f64>,
    pub pos_long: Option<f64>,
    pub hw: Option<i64>,
    pub sw: Option<i64>,
    pub bl: Option<i64>,
    pub bat: Option<i64>,
    pub user_id: Option<i64>,
    pub status: Option<i64>,
    #[serde(default, deserialize_with = "datetime::deserialize_timestamp")]
    pub last_contact: Option<DateTime<FixedOffset>>,
    pub dev_mode: Option<bool>,
}

/// A GPS fix. Nested in [`Device`] as `lastPos` and returned standalone
/// by the `getccpositions` endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastPos {
    pub id: Option<i64>,
    pub pos_lat: Option<f64>,
    pub pos_long: Option<f64>,
    pub fix_s: Option<i64>,
    pub fix_p: Option<i64>,
    pub hori_prec: Option<i64>,
    pub sat: Option<i64>,
    pub rssi: Option<i64>,
    pub acc: Option<i64>,
    pub flags: Option<i64>,
    #[serde(default, deserialize_with = "datetime::deserialize_timestamp")]
    pub time_measure: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "datetime::deserialize_timestamp")]
    pub time_db: Option<DateTime<FixedOffset>>,
}

impl LastPos {
    /// Build a `LastPos` from a raw JSON object.
    pub fn from_value(value: Value) -> Result<LastPos> {
        serde_json::from_value(value)
            .map_err(|err| PetTracerError::Parse(format!("position: {err}")))
    }
}

/// Pet profile metadata nested inside a [`Device`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Details {
    pub id: Option<i64>,
    pub image: Option<String>,
    pub img: Option<String>,
    pub color: Option<i64>,
    #[serde(default, deserialize_with = "datetime::deserialize_timestamp")]
    pub birth: Option<DateTime<FixedOffset>>,
    pub name: Option<String>,
}

/// Raw device-to-hub message frame. `telegram` is the hex payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelegramPacket {
    pub id: Option<i64>,
    pub device_type: Option<i64>,
    pub device_id: Option<i64>,
    pub hs_id: Option<i64>,
    pub telegram: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "datetime::deserialize_timestamp")]
    pub time_db: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "datetime::deserialize_timestamp")]
    pub time_dev: Option<DateTime<FixedOffset>>,
    pub cmd: Option<i64>,
    pub charging: Option<bool>,
}

/// Which hub received a telegram, and at what signal strength.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceivedBy {
    pub hs_id: Option<i64>,
    pub rssi: Option<i64>,
}

/// A queued telegram and the hubs that received it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FifoEntry {
    pub telegram: Option<TelegramPacket>,
    #[serde(default)]
    pub received_by: Vec<ReceivedBy>,
}
