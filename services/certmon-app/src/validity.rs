//! Tri-state validity reported by the backend

use std::fmt;

use crate::api::ValidityCode;

/// Validity of a monitored host or checked chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    Unknown,
    Invalid,
    Valid,
}

/// A validity code outside `{-1, 0, 1}`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized validity code {0:?}")]
pub struct UnrecognizedValidity(pub String);

impl Validity {
    pub const ALL: [Validity; 3] = [Validity::Unknown, Validity::Invalid, Validity::Valid];

    pub fn code(self) -> i8 {
        match self {
            Validity::Unknown => -1,
            Validity::Invalid => 0,
            Validity::Valid => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Validity::Unknown => "Unknown",
            Validity::Invalid => "Invalid",
            Validity::Valid => "Valid",
        }
    }

    pub fn from_code(code: &ValidityCode) -> Result<Self, UnrecognizedValidity> {
        match code.as_str() {
            "-1" => Ok(Validity::Unknown),
            "0" => Ok(Validity::Invalid),
            "1" => Ok(Validity::Valid),
            other => Err(UnrecognizedValidity(other.to_string())),
        }
    }
}

impl fmt::Display for Validity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display label for a raw code
///
/// Unrecognized codes get an explicit label and a warning so they are never
/// shown as a bare number.
pub fn label_for(code: &ValidityCode) -> (String, Option<Validity>) {
    match Validity::from_code(code) {
        Ok(validity) => (validity.label().to_string(), Some(validity)),
        Err(e) => {
            tracing::warn!("{}", e);
            (format!("Unrecognized ({})", code), None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_map_to_labels() {
        assert_eq!(
            Validity::from_code(&ValidityCode::new("-1")),
            Ok(Validity::Unknown)
        );
        assert_eq!(
            Validity::from_code(&ValidityCode::new("0")),
            Ok(Validity::Invalid)
        );
        assert_eq!(
            Validity::from_code(&ValidityCode::new("1")),
            Ok(Validity::Valid)
        );
    }

    #[test]
    fn every_validity_round_trips_through_its_code() {
        for validity in Validity::ALL {
            let code = ValidityCode::from(i64::from(validity.code()));
            assert_eq!(Validity::from_code(&code), Ok(validity));
            assert!(["Unknown", "Invalid", "Valid"].contains(&validity.label()));
        }
    }

    #[test]
    fn unknown_code_is_flagged() {
        let err = Validity::from_code(&ValidityCode::new("2")).unwrap_err();
        assert_eq!(err, UnrecognizedValidity("2".to_string()));
        assert_eq!(err.to_string(), r#"unrecognized validity code "2""#);
    }

    #[test]
    fn label_for_unrecognized_code_is_explicit() {
        let (label, validity) = label_for(&ValidityCode::new("abc"));
        assert_eq!(label, "Unrecognized (abc)");
        assert_eq!(validity, None);
        assert_ne!(label, "undefined");
    }

    #[test]
    fn display_uses_label() {
        assert_eq!(Validity::Invalid.to_string(), "Invalid");
    }
}
