//! Authenticated client for the portal's JSON endpoints.
//!
//! Every public operation issues exactly one blocking HTTP request,
//! validates the response shape and maps it through the record model.
//! The client holds the login snapshot behind a single optional field;
//! all account accessors are pure projections over it.

mod device;
mod transport;

pub use device::DeviceHandle;
pub use transport::{ApiRequest, HttpTransport, Method, Transport};

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use serde_json::{json, Map, Value};

use crate::error::{PetTracerError, Result};
use crate::model::{
    extract_token, Country, Device, LastPos, LoginInfo, SubscriptionInfo, UserProfile,
};

const DEFAULT_BASE_URL: &str = "https://portal.pettracer.com";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const LOGIN_PATH: &str = "/api/user/login";
const PROFILE_PATH: &str = "/api/user/profile";
const DEVICE_LIST_PATH: &str = "/api/map/getccs";
const DEVICE_INFO_PATH: &str = "/api/map/getccinfo";
const DEVICE_POSITIONS_PATH: &str = "/api/map/getccpositions";

const ACCEPT: &str = "application/json, text/plain, */*";
const ACCEPT_LANGUAGE: &str = "en-GB,en-US;q=0.9,en;q=0.8";
const USER_AGENT: &str = concat!("pettracer-rust-client/", env!("CARGO_PKG_VERSION"));

/// Construction-time settings, resolved once. A pre-supplied `token`
/// makes the client authenticated without calling [`Client::login`].
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub timeout: Duration,
    pub token: Option<String>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            token: None,
        }
    }
}

/// Identifies the device a `getccinfo` call is about.
///
/// The endpoint wants `{"devId": <id>}`. Callers may also hand over a
/// prepared JSON object keyed by `devId` (sent whole) or `id`
/// (rewritten to `devId`).
#[derive(Debug, Clone)]
pub enum DeviceRef {
    Id(i64),
    Payload(Map<String, Value>),
}

impl From<i64> for DeviceRef {
    fn from(id: i64) -> DeviceRef {
        DeviceRef::Id(id)
    }
}

impl From<Map<String, Value>> for DeviceRef {
    fn from(payload: Map<String, Value>) -> DeviceRef {
        DeviceRef::Payload(payload)
    }
}

impl DeviceRef {
    /// Normalize to the request body the endpoint expects.
    fn into_body(self) -> Result<Value> {
        match self {
            DeviceRef::Id(id) => Ok(json!({ "devId": id })),
            DeviceRef::Payload(payload) => {
                if payload.contains_key("devId") {
                    Ok(Value::Object(payload))
                } else if let Some(id) = payload.get("id") {
                    Ok(json!({ "devId": id.clone() }))
                } else {
                    Err(PetTracerError::Validation(
                        "device payload must contain a `devId` or `id` key".to_string(),
                    ))
                }
            }
        }
    }
}

/// `getccinfo` answers with a single device object or an array of them
/// depending on account setup; both shapes are preserved.
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceInfo {
    One(Box<Device>),
    Many(Vec<Device>),
}

/// Login snapshot: the resolved bearer token plus the parsed response.
struct Session {
    token: String,
    info: LoginInfo,
}

/// Blocking client for the portal API.
///
/// All data-fetching operations require a token, obtained via
/// [`Client::login`] or supplied up front through [`Config::token`].
/// A repeat `login` replaces the session outright; there is no logout
/// or refresh. Callers must not race `login` against other operations
/// on the same instance.
pub struct Client {
    transport: Arc<dyn Transport>,
    config: Config,
    session: Option<Session>,
}

impl Client {
    pub fn new() -> Client {
        Client::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Client {
        Client {
            transport: Arc::new(HttpTransport::new()),
            config,
            session: None,
        }
    }

    /// Swap in a different transport. Used by tests; also the hook for
    /// callers that need custom TLS or proxy handling.
    pub fn with_transport(transport: Arc<dyn Transport>, config: Config) -> Client {
        Client {
            transport,
            config,
            session: None,
        }
    }

    /// Authenticate with username and password, caching the parsed
    /// login response. Any previous session is overwritten.
    pub fn login(&mut self, username: &str, password: &str) -> Result<&LoginInfo> {
        let payload = json!({ "login": username, "password": password });
        let body = payload.to_string();

        // The login endpoint is strict about Content-Length, so set it
        // explicitly from the serialized body. No Authorization header
        // here, even if a stale token exists.
        let mut headers = base_headers();
        headers.push(("Content-Length".to_string(), body.len().to_string()));

        let value = self.dispatch(ApiRequest {
            method: Method::Post,
            url: self.url(LOGIN_PATH),
            headers,
            body: Some(body),
            timeout: self.config.timeout,
        })?;

        if !value.is_object() {
            return Err(PetTracerError::Protocol(
                "login response: expected an object".to_string(),
            ));
        }
        let token = extract_token(&value).ok_or_else(|| {
            PetTracerError::Authentication(
                "login response did not contain an access token".to_string(),
            )
        })?;
        let info = LoginInfo::from_value(value)?;
        debug!("logged in as user {:?}", info.user_id);

        let session = self.session.insert(Session { token, info });
        Ok(&session.info)
    }

    /// Fetch the full device list (`getccs`).
    pub fn device_list(&self) -> Result<Vec<Device>> {
        let value = self.get(DEVICE_LIST_PATH)?;
        let items = value.as_array().ok_or_else(|| {
            PetTracerError::Protocol("device list: expected a list".to_string())
        })?;
        parse_items(items, Device::from_value)
    }

    /// Fetch detail for one device (`getccinfo`).
    pub fn device_info(&self, device: impl Into<DeviceRef>) -> Result<DeviceInfo> {
        let body = device.into().into_body()?;
        let value = self.post(DEVICE_INFO_PATH, &body)?;
        match value {
            Value::Object(_) => Ok(DeviceInfo::One(Box::new(Device::from_value(value)?))),
            Value::Array(items) => Ok(DeviceInfo::Many(parse_items(&items, Device::from_value)?)),
            _ => Err(PetTracerError::Protocol(
                "device info: expected an object or a list".to_string(),
            )),
        }
    }

    /// Fetch a device's GPS fix history over a time range given in
    /// epoch milliseconds (`getccpositions`).
    pub fn device_positions(
        &self,
        device_id: i64,
        filter_time_ms: i64,
        to_time_ms: i64,
    ) -> Result<Vec<LastPos>> {
        let body = json!({
            "devId": device_id,
            "filterTime": filter_time_ms,
            "toTime": to_time_ms,
        });
        let value = self.post(DEVICE_POSITIONS_PATH, &body)?;
        let items = value.as_array().ok_or_else(|| {
            PetTracerError::Protocol("positions: expected a list".to_string())
        })?;
        parse_items(items, LastPos::from_value)
    }

    /// Fetch the account profile for the current token.
    pub fn user_profile(&self) -> Result<UserProfile> {
        let value = self.get(PROFILE_PATH)?;
        if !value.is_object() {
            return Err(PetTracerError::Protocol(
                "user profile: expected an object".to_string(),
            ));
        }
        UserProfile::from_value(value)
    }

    /// Narrow view over one device id. Requires authentication.
    pub fn device(&self, device_id: i64) -> Result<DeviceHandle<'_>> {
        if self.bearer_token().is_none() {
            return Err(not_authenticated());
        }
        Ok(DeviceHandle {
            client: self,
            device_id,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.bearer_token().is_some()
    }

    /// The active bearer token: the last login's token, falling back
    /// to a token supplied through [`Config::token`].
    pub fn token(&self) -> Option<&str> {
        self.bearer_token()
    }

    pub fn login_info(&self) -> Option<&LoginInfo> {
        self.session.as_ref().map(|session| &session.info)
    }

    pub fn user_id(&self) -> Option<i64> {
        self.login_info().and_then(|info| info.user_id)
    }

    pub fn user_name(&self) -> Option<&str> {
        self.login_info().and_then(|info| info.name.as_deref())
    }

    /// The account email (the portal calls this field `login`).
    pub fn email(&self) -> Option<&str> {
        self.login_info().and_then(|info| info.login.as_deref())
    }

    pub fn language(&self) -> Option<&str> {
        self.login_info().and_then(|info| info.language.as_deref())
    }

    pub fn country(&self) -> Option<&Country> {
        self.login_info().and_then(|info| info.country.as_ref())
    }

    pub fn country_id(&self) -> Option<i64> {
        self.country().map(|country| country.id)
    }

    pub fn country_name(&self) -> Option<&str> {
        self.country().map(|country| country.name.as_str())
    }

    pub fn device_count(&self) -> Option<i64> {
        self.login_info().and_then(|info| info.device_count)
    }

    pub fn partner_id(&self) -> Option<i64> {
        self.login_info().and_then(|info| info.partner_id)
    }

    pub fn token_expires(&self) -> Option<chrono::NaiveDate> {
        self.login_info().and_then(|info| info.expires)
    }

    pub fn subscription_info(&self) -> Option<&SubscriptionInfo> {
        self.login_info().and_then(|info| info.subscription.as_ref())
    }

    pub fn subscription_id(&self) -> Option<i64> {
        self.subscription_info().and_then(|abo| abo.id)
    }

    pub fn subscription_expires(&self) -> Option<chrono::NaiveDate> {
        self.subscription_info().and_then(|abo| abo.date_expires)
    }

    fn bearer_token(&self) -> Option<&str> {
        self.session
            .as_ref()
            .map(|session| session.token.as_str())
            .or(self.config.token.as_deref())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Headers for an authenticated call; fails before any network
    /// activity when no token is available.
    fn auth_headers(&self) -> Result<Vec<(String, String)>> {
        let token = self.bearer_token().ok_or_else(not_authenticated)?;
        let mut headers = base_headers();
        headers.push(("Authorization".to_string(), format!("Bearer {token}")));
        Ok(headers)
    }

    fn get(&self, path: &str) -> Result<Value> {
        self.dispatch(ApiRequest {
            method: Method::Get,
            url: self.url(path),
            headers: self.auth_headers()?,
            body: None,
            timeout: self.config.timeout,
        })
    }

    fn post(&self, path: &str, body: &Value) -> Result<Value> {
        self.dispatch(ApiRequest {
            method: Method::Post,
            url: self.url(path),
            headers: self.auth_headers()?,
            body: Some(body.to_string()),
            timeout: self.config.timeout,
        })
    }

    fn dispatch(&self, request: ApiRequest) -> Result<Value> {
        debug!("{:?} {}", request.method, request.url);
        let text = self.transport.execute(&request)?;
        serde_json::from_str(&text).map_err(|err| {
            PetTracerError::Protocol(format!("response is not valid json: {err}"))
        })
    }
}

impl Default for Client {
    fn default() -> Self {
        Client::new()
    }
}

fn not_authenticated() -> PetTracerError {
    PetTracerError::Authentication("not authenticated".to_string())
}

fn base_headers() -> Vec<(String, String)> {
    vec![
        ("Accept".to_string(), ACCEPT.to_string()),
        ("Content-Type".to_string(), "application/json".to_string()),
        ("User-Agent".to_string(), USER_AGENT.to_string()),
        ("Accept-Language".to_string(), ACCEPT_LANGUAGE.to_string()),
    ]
}

/// Map every element of a list response, aborting on the first failure
/// with the failing index. Partial results are never returned.
fn parse_items<T>(items: &[Value], parse: fn(Value) -> Result<T>) -> Result<Vec<T>> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            parse(item.clone()).map_err(|err| match err {
                PetTracerError::Parse(msg) => PetTracerError::Parse(format!("item {index}: {msg}")),
                other => other,
            })
        })
        .collect()
}
