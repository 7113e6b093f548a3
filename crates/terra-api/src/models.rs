// Wire-level types for the registry and auth backend.
//
// Field names match the JSON exactly. Everything the registry may omit
// is an `Option`; `terra-core::convert` validates these into the
// canonical domain record.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::Error;

// ── Registry ────────────────────────────────────────────────────────

/// Raw country record as returned by restcountries.com v3.1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCountry {
    #[serde(default)]
    pub name: Option<RawName>,
    #[serde(default)]
    pub cca3: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub subregion: Option<String>,
    #[serde(default)]
    pub capital: Option<Vec<String>>,
    #[serde(default)]
    pub population: Option<i64>,
    #[serde(default)]
    pub area: Option<f64>,
    #[serde(default)]
    pub flags: Option<RawFlags>,
    #[serde(default)]
    pub borders: Option<Vec<String>>,
    #[serde(default)]
    pub currencies: Option<IndexMap<String, RawCurrency>>,
    #[serde(default)]
    pub languages: Option<IndexMap<String, String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawName {
    #[serde(default)]
    pub common: Option<String>,
    #[serde(default)]
    pub official: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFlags {
    #[serde(default)]
    pub svg: Option<String>,
    #[serde(default)]
    pub png: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCurrency {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
}

/// Decode a registry response body into raw records.
///
/// The body must be a JSON array (the single-object error shape is
/// rejected). Elements that fail to decode are logged and skipped so
/// one odd record cannot blank the whole list.
pub(crate) fn decode_countries(body: &str) -> Result<Vec<RawCountry>, Error> {
    let items: Vec<Value> = serde_json::from_str(body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body: body.to_owned(),
        }
    })?;

    let total = items.len();
    let decoded: Vec<RawCountry> = items
        .into_iter()
        .enumerate()
        .filter_map(|(idx, item)| match serde_json::from_value(item) {
            Ok(country) => Some(country),
            Err(e) => {
                warn!(index = idx, error = %e, "skipping undecodable country record");
                None
            }
        })
        .collect();

    if decoded.len() < total {
        warn!(
            kept = decoded.len(),
            total, "registry response contained undecodable records"
        );
    }
    Ok(decoded)
}

// ── Auth backend ────────────────────────────────────────────────────

/// Successful login payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

/// User profile as persisted under the `user` state key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Error body of the auth backend: `{"msg": "..."}` or `{"error": "..."}`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct AuthErrorBody {
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl AuthErrorBody {
    /// Parse a body, falling back to an empty value on anything unexpected.
    pub(crate) fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    /// The backend-provided message, if any.
    pub(crate) fn message(self) -> Option<String> {
        self.msg
            .or(self.error)
            .map(|m| m.trim().to_owned())
            .filter(|m| !m.is_empty())
    }

    /// The `error` field alone. A 2xx body carrying one is still a rejection;
    /// a bare `msg` on success is informational.
    pub(crate) fn error(self) -> Option<String> {
        self.error
            .map(|m| m.trim().to_owned())
            .filter(|m| !m.is_empty())
    }
}
