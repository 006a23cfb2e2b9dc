//! Typed records for every JSON payload the portal returns.
//!
//! Each standalone record has a single `from_value` factory; nested
//! records are reached through their parent. Parsing is defensive:
//! missing fields map to `None`, list fields default to empty, and
//! malformed datetimes degrade to `None` instead of failing the record.

mod datetime;
pub use datetime::{parse_date, parse_timestamp};

mod device;
pub use device::{Details, Device, FifoEntry, LastPos, MasterHs, ReceivedBy, TelegramPacket};

mod login;
pub(crate) use login::extract_token;
pub use login::{Country, LoginInfo, SubscriptionInfo};

mod profile;
pub use profile::UserProfile;
