//! # Board Records
//!
//! Circuits, users and messages as the store hands them out, plus the
//! registration payloads for circuits and users.
//!
//! Field names on the wire follow the board client: identifiers serialize as
//! `_id`, author lists as `userIds`, and the circuit blobs keep the names the
//! verifier expects (`circuit`, `verifier_circuit_data`).
//!
//! All records are immutable once created. There are no update types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::identity::{CircuitId, MessageId, UserId};

/// A registered verification circuit with its opaque blobs.
///
/// Only returned by single-record lookups. Bulk listings use
/// [`CircuitSummary`] so the blobs are not shipped to every caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circuit {
    #[serde(rename = "_id")]
    pub id: CircuitId,
    pub name: String,
    /// Opaque circuit description (common circuit data).
    pub circuit: String,
    /// Opaque verifier parameters.
    pub verifier_circuit_data: String,
}

impl Circuit {
    /// Project to the listing representation.
    pub fn summary(&self) -> CircuitSummary {
        CircuitSummary {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

/// Listing view of a circuit: id and name only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitSummary {
    #[serde(rename = "_id")]
    pub id: CircuitId,
    pub name: String,
}

/// A registered user and the public key they sign rings with.
///
/// `public_key` is empty only for legacy accounts that predate key
/// registration; such users can be named as authors but contribute no key
/// to the verifier input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub name: String,
    pub public_key: String,
}

/// A persisted, verified post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "_id")]
    pub id: MessageId,
    pub message: String,
    /// Assigned when the persisting transaction runs.
    pub timestamp: DateTime<Utc>,
    pub proof: String,
    pub circuit_id: CircuitId,
    #[serde(rename = "userIds")]
    pub user_ids: Vec<UserId>,
}

/// Circuit registration payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewCircuit {
    pub name: String,
    pub circuit: String,
    pub verifier_circuit_data: String,
}

impl NewCircuit {
    /// All three fields are required and must be non-blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require("circuit", &self.circuit)?;
        require("verifier_circuit_data", &self.verifier_circuit_data)?;
        Ok(())
    }
}

/// User registration payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewUser {
    pub name: String,
    pub public_key: String,
}

impl NewUser {
    /// Name and public key are required. New registrations never create
    /// keyless users.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require("public_key", &self.public_key)?;
        Ok(())
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_uses_board_field_names() {
        let msg = Message {
            id: MessageId::new(1),
            message: "hello".into(),
            timestamp: DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            proof: "P1".into(),
            circuit_id: CircuitId::new(2),
            user_ids: vec![UserId::new(5), UserId::new(4)],
        };
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["_id"], 1);
        assert_eq!(value["circuit_id"], 2);
        assert_eq!(value["userIds"], serde_json::json!([5, 4]));
        assert!(value.get("user_ids").is_none());
    }

    #[test]
    fn circuit_summary_drops_blobs() {
        let circuit = Circuit {
            id: CircuitId::new(3),
            name: "ring-v1".into(),
            circuit: "C1".into(),
            verifier_circuit_data: "VD1".into(),
        };
        let value = serde_json::to_value(circuit.summary()).unwrap();
        assert_eq!(value, serde_json::json!({"_id": 3, "name": "ring-v1"}));
    }

    #[test]
    fn new_circuit_requires_every_field() {
        let mut c = NewCircuit {
            name: "ring-v1".into(),
            circuit: "C1".into(),
            verifier_circuit_data: "VD1".into(),
        };
        assert!(c.validate().is_ok());
        c.verifier_circuit_data = "  ".into();
        assert_eq!(
            c.validate(),
            Err(ValidationError::MissingField("verifier_circuit_data"))
        );
    }

    #[test]
    fn new_user_requires_key() {
        let u = NewUser {
            name: "Sarah".into(),
            public_key: String::new(),
        };
        assert_eq!(u.validate(), Err(ValidationError::MissingField("public_key")));
    }

    #[test]
    fn new_user_rejects_unknown_fields() {
        let parsed: Result<NewUser, _> = serde_json::from_value(serde_json::json!({
            "name": "Sarah",
            "public_key": "AAA",
            "role": "admin"
        }));
        assert!(parsed.is_err());
    }
}
