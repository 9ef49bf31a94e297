//! Payment persistence.
//!
//! The flow hands a finished [`PaymentRecord`] to a [`PaymentStore`] and
//! moves on; writes are fire-and-forget from the flow's perspective, with
//! no lock and no transaction. The store owns the record from then on.

use crate::config::DatabaseConfig;
use crate::error::StoreError;
use crate::models::PaymentRecord;
use async_trait::async_trait;
use chrono::Utc;
use mongodb::{Client, Collection};
use tracing::info;

const COLLECTION: &str = "Payments";

/// Persistence collaborator contract. Insert only; nothing in this flow
/// updates or deletes a payment.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Insert a completed payment. The creation timestamp is assigned here,
    /// at call time; the identifier is assigned by the database.
    async fn insert(&self, record: PaymentRecord) -> Result<(), StoreError>;
}

/// MongoDB-backed store over the `Payments` collection.
pub struct MongoPaymentStore {
    collection: Collection<PaymentRecord>,
}

impl MongoPaymentStore {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let uri = config.uri();
        info!("Connecting to MongoDB at: {}", uri);

        let client = Client::with_uri_str(&uri).await?;
        let collection = client.database(&config.name).collection(COLLECTION);

        Ok(Self { collection })
    }
}

#[async_trait]
impl PaymentStore for MongoPaymentStore {
    async fn insert(&self, record: PaymentRecord) -> Result<(), StoreError> {
        let record = stamped(record);
        self.collection.insert_one(&record).await?;
        Ok(())
    }
}

/// Assign the creation timestamp. It reflects when the record entered
/// storage, not when the deposit executed.
fn stamped(mut record: PaymentRecord) -> PaymentRecord {
    record.created_at = Some(Utc::now());
    record
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unstamped_record() -> PaymentRecord {
        PaymentRecord {
            id: None,
            transaction_id: "T1".to_string(),
            amount: 100.0,
            status: "success".to_string(),
            transaction_type: "deposit".to_string(),
            payer_name: "Jane Doe".to_string(),
            iban: "TR00".to_string(),
            bank_name: "Test Bank".to_string(),
            aggregator: "Sans Getirsin".to_string(),
            created_at: None,
        }
    }

    #[test]
    fn test_stamp_assigns_timestamp_at_persistence_time() {
        let before = Utc::now();
        let record = stamped(unstamped_record());
        let after = Utc::now();

        let created_at = record.created_at.expect("timestamp must be assigned");
        assert!(created_at >= before && created_at <= after);
    }

    #[test]
    fn test_stamp_leaves_other_fields_untouched() {
        let record = stamped(unstamped_record());
        assert_eq!(record.transaction_id, "T1");
        assert_eq!(record.amount, 100.0);
        assert!(record.id.is_none());
    }
}
