//! Data models for the deposit flow.
//!
//! This module contains the core data structures shared between the
//! provider clients, the flow orchestrator, and the storage collaborator.

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Ephemeral result of a successful deposit submission.
///
/// Built once by the provider client and consumed by the flow orchestrator
/// and the caller; never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositResponse {
    /// Provider-reported outcome. Defaults to `"success"` when the provider
    /// omits it.
    pub status: String,
    /// Provider-assigned transaction identifier. The only field the flow
    /// treats as mandatory.
    #[serde(rename = "transactionId")]
    pub transaction_id: String,
    /// Amount echoed by the provider. Stays 0.0 when the provider does not
    /// echo it; downstream reconciliation relies on this, do not backfill.
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Default status marker used when the provider omits one.
pub const STATUS_SUCCESS: &str = "success";

/// The durable representation of a completed deposit.
///
/// Assembled by the flow orchestrator strictly after a successful
/// submission, then owned by the storage collaborator. `created_at` is
/// `None` until the store assigns it at insert time; the timestamp reflects
/// when the record entered storage, not when the deposit executed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Storage-assigned identifier; absent until persisted.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub transaction_id: String,
    pub amount: f64,
    pub status: String,
    /// Fixed to `"deposit"` for this flow.
    pub transaction_type: String,
    pub payer_name: String,
    pub iban: String,
    pub bank_name: String,
    /// Human-readable label of the provider used, e.g. "Sans Getirsin".
    pub aggregator: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// One bank-account offering returned by a provider during discovery.
///
/// Accounts are transient and scoped to a single flow invocation; they are
/// never cached across flows because eligibility depends on the requested
/// amount.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// Opaque provider identifier.
    pub id: String,
    /// Display name; becomes the record's bank name.
    pub name: String,
    pub logo: Option<String>,
    pub sub_accounts: Vec<SubAccount>,
}

/// A sub-account nested under an [`Account`], carrying the named fields
/// (IBAN, payer name, ...) the deposit is submitted against.
#[derive(Debug, Clone, PartialEq)]
pub struct SubAccount {
    pub id: String,
    pub fields: Vec<AccountField>,
}

/// A named field on a sub-account. Field names vary per provider and are
/// matched against a fixed vocabulary by the flow orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountField {
    pub name: String,
    pub value: String,
}

/// Opaque session token returned by a provider's authentication endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serializes_with_snake_case_names() {
        let record = PaymentRecord {
            id: None,
            transaction_id: "T1".to_string(),
            amount: 100.0,
            status: STATUS_SUCCESS.to_string(),
            transaction_type: "deposit".to_string(),
            payer_name: "Jane Doe".to_string(),
            iban: "TR00".to_string(),
            bank_name: "Test Bank".to_string(),
            aggregator: "Sans Getirsin".to_string(),
            created_at: None,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["transaction_id"], "T1");
        assert_eq!(json["transaction_type"], "deposit");
        assert_eq!(json["payer_name"], "Jane Doe");
        assert_eq!(json["bank_name"], "Test Bank");
        // Unset optional fields stay off the wire entirely.
        assert!(json.get("_id").is_none());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_deposit_response_uses_provider_field_name() {
        let response = DepositResponse {
            status: STATUS_SUCCESS.to_string(),
            transaction_id: "T1".to_string(),
            amount: 0.0,
            secret: None,
            message: None,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["transactionId"], "T1");
        assert!(json.get("secret").is_none());
    }

    #[test]
    fn test_session_token_round_trip() {
        let token = SessionToken::new("abc123");
        assert_eq!(token.as_str(), "abc123");
    }
}
