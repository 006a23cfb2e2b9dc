use std::fmt;

use super::{Client, DeviceInfo, DeviceRef};
use crate::error::Result;
use crate::model::LastPos;

/// Per-device facade over a [`Client`]: binds one device id so repeated
/// calls about the same collar don't have to thread it through.
pub struct DeviceHandle<'a> {
    pub(super) client: &'a Client,
    pub(super) device_id: i64,
}

impl fmt::Debug for DeviceHandle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceHandle")
            .field("device_id", &self.device_id)
            .finish()
    }
}

impl DeviceHandle<'_> {
    pub fn device_id(&self) -> i64 {
        self.device_id
    }

    /// Fetch detail for this device (`getccinfo`).
    pub fn info(&self) -> Result<DeviceInfo> {
        self.client.device_info(DeviceRef::Id(self.device_id))
    }

    /// Fetch this device's GPS fix history over a time range given in
    /// epoch milliseconds (`getccpositions`).
    pub fn positions(&self, filter_time_ms: i64, to_time_ms: i64) -> Result<Vec<LastPos>> {
        self.client
            .device_positions(self.device_id, filter_time_ms, to_time_ms)
    }
}
