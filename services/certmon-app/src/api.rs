//! Backend wire types
//!
//! These types mirror the JSON documents served by the certificate monitor
//! backend. Decoding is tolerant per field: a missing, `null` or oddly typed
//! value falls back to an empty value instead of rejecting the whole record,
//! and a list element that is not a record at all is skipped on its own.

use serde::{Deserialize, Serialize};

/// Certificate as returned by /certs and /report/expire
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateRecord {
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "de::string")]
    pub common_name: String,
    #[serde(default, deserialize_with = "de::string")]
    pub fingerprint: String,
    #[serde(default, deserialize_with = "de::string")]
    pub subject_hash: String,
    /// Older backends send `issuerFingerprint` instead
    #[serde(default, alias = "issuerFingerprint", deserialize_with = "de::string")]
    pub issuer_hash: String,
    #[serde(default, deserialize_with = "de::domains")]
    pub domains: Vec<String>,
    /// Days until the certificate expires
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub expired: Option<i64>,
}

/// Monitored target as returned by /states and /report/valid
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRecord {
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "de::string")]
    pub host: String,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub sni: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "de::opt_i64")]
    pub kind: Option<i64>,
    #[serde(default)]
    pub valid: ValidityCode,
    #[serde(default, deserialize_with = "de::string")]
    pub description: String,
}

/// A state joined with the certificate chain observed for it, as returned by /statecerts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateCertRecord {
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "de::string")]
    pub host: String,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub sni: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "de::opt_i64")]
    pub kind: Option<i64>,
    #[serde(default)]
    pub valid: ValidityCode,
    #[serde(default, deserialize_with = "de::string")]
    pub description: String,
    #[serde(default, deserialize_with = "de::records")]
    pub certificates: Vec<ChainCertificate>,
}

/// One certificate of an observed chain
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainCertificate {
    #[serde(default, deserialize_with = "de::string")]
    pub common_name: String,
    #[serde(default, deserialize_with = "de::domains")]
    pub domains: Vec<String>,
    #[serde(default, deserialize_with = "de::string")]
    pub fingerprint: String,
    #[serde(default, deserialize_with = "de::string")]
    pub subject_hash: String,
    #[serde(default, alias = "issuerFingerprint", deserialize_with = "de::string")]
    pub issuer_hash: String,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub expired: Option<i64>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub not_before: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub not_after: Option<String>,
}

/// Result of an ad-hoc /check request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResponse {
    #[serde(default, deserialize_with = "de::string")]
    pub host: String,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub sni: Option<String>,
    #[serde(default)]
    pub valid: ValidityCode,
    #[serde(default, deserialize_with = "de::string")]
    pub description: String,
    #[serde(default, deserialize_with = "de::records")]
    pub certificates: Vec<ChainCertificate>,
}

/// Raw tri-state validity code, kept as text so that unexpected values survive decoding
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ValidityCode(pub String);

impl ValidityCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ValidityCode {
    fn default() -> Self {
        Self("-1".to_string())
    }
}

impl From<i64> for ValidityCode {
    fn from(code: i64) -> Self {
        Self(code.to_string())
    }
}

impl std::fmt::Display for ValidityCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Any JSON value is kept; values that are not a known code label as unrecognized
impl<'de> Deserialize<'de> for ValidityCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Null => ValidityCode::default(),
            serde_json::Value::String(code) => ValidityCode(code.trim().to_string()),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(code) => ValidityCode::from(code),
                None => match n.as_f64() {
                    Some(f) if f.fract() == 0.0 => ValidityCode::from(f as i64),
                    _ => ValidityCode(n.to_string()),
                },
            },
            other => ValidityCode(other.to_string()),
        })
    }
}

/// Decode every element of a backend list on its own, skipping the ones that are not records
pub fn decode_list<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> Vec<T> {
    match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match serde_json::from_value(item) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!("Skipping malformed record: {}", e);
                    None
                }
            })
            .collect(),
        serde_json::Value::Null => Vec::new(),
        other => {
            tracing::warn!("Expected a list, got {}", other);
            Vec::new()
        }
    }
}

mod de {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn text(value: Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => {
                tracing::warn!("Ignoring non-text value {}", other);
                String::new()
            }
        }
    }

    /// `null` and non-text values become empty, numbers keep their digits
    pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(text(Value::deserialize(deserializer)?))
    }

    /// Accepts `null`, `""` and whitespace as an absent value
    pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = text(Value::deserialize(deserializer)?);
        Ok(Some(value).filter(|s| !s.trim().is_empty()))
    }

    /// Integers, floats and numeric strings; anything else is absent
    pub fn opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Value::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
            }
            _ => None,
        })
    }

    /// `null` is an empty list and malformed elements are skipped
    pub fn records<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(super::decode_list(Value::deserialize(deserializer)?))
    }

    /// Accepts a JSON list or the backend's `"[a.com b.com]"` text form
    pub fn domains<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => items
                .into_iter()
                .map(text)
                .filter(|s| !s.is_empty())
                .collect(),
            Value::String(s) => s
                .trim()
                .trim_start_matches('[')
                .trim_end_matches(']')
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        })
    }
}
