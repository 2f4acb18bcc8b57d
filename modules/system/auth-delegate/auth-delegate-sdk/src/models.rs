//! Domain models for the auth delegate.

use serde::Deserialize;

/// Identity resolved from a token id by the authorization service.
///
/// Deserializes directly from the service's token record:
/// `{ "id": "...", "user_id": 42, "client_id": 7 }`. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IdentityRecord {
    /// Opaque token identifier, as echoed by the service.
    #[serde(rename = "id")]
    pub token_id: String,

    /// The authenticated user.
    #[serde(rename = "user_id")]
    pub caller_id: i64,

    /// The authenticated application.
    pub client_id: i64,
}

/// Terminal state of a successful `authenticate_request` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// The request is marked public; no resolution was attempted.
    Public,
    /// No identity could be established (no request, no token, or token not found).
    Anonymous,
    /// Identity headers were written from this record.
    Identified(IdentityRecord),
}

impl AuthOutcome {
    /// The attached identity, if any.
    #[must_use]
    pub fn identity(&self) -> Option<&IdentityRecord> {
        match self {
            Self::Identified(record) => Some(record),
            Self::Public | Self::Anonymous => None,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn identity_record_from_wire_format() {
        let record: IdentityRecord = serde_json::from_str(
            r#"{"id":"abc","user_id":42,"client_id":7,"expires":1700000000}"#,
        )
        .unwrap();

        assert_eq!(
            record,
            IdentityRecord {
                token_id: "abc".to_owned(),
                caller_id: 42,
                client_id: 7,
            }
        );
    }

    #[test]
    fn identity_record_rejects_wrong_types() {
        let result =
            serde_json::from_str::<IdentityRecord>(r#"{"id":"abc","user_id":"42","client_id":7}"#);
        assert!(result.is_err());
    }

    #[test]
    fn outcome_identity_accessor() {
        let record = IdentityRecord {
            token_id: "t".to_owned(),
            caller_id: 1,
            client_id: 2,
        };
        assert_eq!(
            AuthOutcome::Identified(record.clone()).identity(),
            Some(&record)
        );
        assert_eq!(AuthOutcome::Public.identity(), None);
        assert_eq!(AuthOutcome::Anonymous.identity(), None);
    }
}
