use serde::Deserialize;
use serde_json::Value;

use crate::error::{PetTracerError, Result};

/// Account profile returned by `/api/user/profile`. Flat record, keys
/// already snake_case upstream.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserProfile {
    pub id: Option<i64>,
    pub email: Option<String>,
    pub street: Option<String>,
    pub street2: Option<String>,
    pub zip: Option<String>,
    pub city: Option<String>,
    pub name: Option<String>,
    pub mobile: Option<String>,
    pub lang: Option<String>,
    pub country_id: Option<i64>,
    pub title: Option<String>,
    pub image_1920: Option<String>,
    pub x_studio_newsletter: Option<bool>,
}

impl UserProfile {
    /// Build a `UserProfile` from a raw JSON object.
    pub fn from_value(value: Value) -> Result<UserProfile> {
        serde_json::from_value(value)
            .map_err(|err| PetTracerError::Parse(format!("user profile: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::UserProfile;

    #[test]
    fn parses_sample() {
        let profile = UserProfile::from_value(json!({
            "id": 19804,
            "email": "someone@example.net",
            "street": "Webster House",
            "street2": "Shortheath Lane",
            "zip": "RG7 4EQ",
            "city": "Reading",
            "name": "Some One",
            "mobile": "07700900000",
            "lang": "en_GB",
            "country_id": 231,
            "title": null,
            "image_1920": null,
            "x_studio_newsletter": false
        }))
        .unwrap();

        assert_eq!(profile.id, Some(19804));
        assert_eq!(profile.email.as_deref(), Some("someone@example.net"));
        assert_eq!(profile.city.as_deref(), Some("Reading"));
        assert_eq!(profile.country_id, Some(231));
        assert_eq!(profile.title, None);
        assert_eq!(profile.x_studio_newsletter, Some(false));
    }

    #[test]
    fn empty_object_parses() {
        let profile = UserProfile::from_value(json!({})).unwrap();
        assert_eq!(profile.id, None);
        assert_eq!(profile.email, None);
    }
}
