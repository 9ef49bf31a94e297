//! Deposit flow orchestrator.
//!
//! Drives the session → discovery → selection → execution sequence over any
//! [`Aggregator`] and assembles the persistence-ready record. Steps are
//! strictly sequential with no branching back; the first failing step
//! aborts the flow and no partial record is returned. Record assembly
//! happens strictly after a successful submission, so there is no
//! compensation state to reach.

use crate::error::{FlowError, SelectionError};
use crate::models::{DepositResponse, PaymentRecord, SubAccount};
use crate::provider::Aggregator;
use crate::selector::Selector;
use serde_json::{json, Map};
use tracing::{info, warn};

/// Transaction type recorded for every flow this orchestrator runs.
const TRANSACTION_TYPE: &str = "deposit";

/// Description passed to the provider in the deposit's extra parameters.
const DEPOSIT_DESCRIPTION: &str = "Test deposit";

/// One deposit flow invocation. Holds no state across invocations; the
/// session token and selected account only travel forward between steps.
pub struct DepositFlow<'a, A: Aggregator + ?Sized, S: Selector> {
    aggregator: &'a A,
    selector: S,
}

impl<'a, A: Aggregator + ?Sized, S: Selector> DepositFlow<'a, A, S> {
    pub fn new(aggregator: &'a A, selector: S) -> Self {
        Self {
            aggregator,
            selector,
        }
    }

    /// Run the four-step sequence for the given amount.
    pub async fn run(&self, amount: f64) -> Result<(DepositResponse, PaymentRecord), FlowError> {
        let token = self.aggregator.initialize_session().await?;

        let accounts = self.aggregator.get_accounts(&token, amount).await?;
        if accounts.is_empty() {
            warn!("No accounts found");
            return Err(FlowError::NoAccounts);
        }

        let index = self.selector.choose(&accounts)?;
        let account = accounts.get(index).ok_or(SelectionError::OutOfRange {
            chosen: index + 1,
            max: accounts.len(),
        })?;

        // The first sub-account determines the field set used for the
        // submission; an account without one is unusable, not a guess.
        let sub = account
            .sub_accounts
            .first()
            .filter(|sub| !sub.fields.is_empty())
            .ok_or(FlowError::UnusableAccount)?;

        let mut extra = Map::new();
        extra.insert("description".to_string(), json!(DEPOSIT_DESCRIPTION));

        let response = self
            .aggregator
            .make_deposit(&token, &sub.id, amount, &extra)
            .await?;

        let beneficiary = Beneficiary::from_fields(sub);
        let record = PaymentRecord {
            id: None,
            transaction_id: response.transaction_id.clone(),
            amount,
            status: response.status.clone(),
            transaction_type: TRANSACTION_TYPE.to_string(),
            payer_name: beneficiary.payer_name,
            iban: beneficiary.iban,
            bank_name: account.name.clone(),
            aggregator: self.aggregator.label().to_string(),
            created_at: None,
        };

        info!(
            "Deposit flow completed: transaction {} via {}",
            record.transaction_id, record.aggregator
        );
        Ok((response, record))
    }
}

/// Payer attributes extracted from the selected sub-account's field set.
struct Beneficiary {
    payer_name: String,
    iban: String,
}

impl Beneficiary {
    /// Match field names against the fixed vocabulary. Matching is exact and
    /// case-sensitive; unmatched fields are ignored and a missing match
    /// leaves the attribute empty (reconciliation is a downstream concern).
    fn from_fields(sub: &SubAccount) -> Self {
        let mut payer_name = String::new();
        let mut iban = String::new();

        for field in &sub.fields {
            match field.name.as_str() {
                "IBAN" => iban = field.value.clone(),
                "Name" | "Full Name" | "Payer" | "Account Holder" => {
                    payer_name = field.value.clone();
                }
                _ => {}
            }
        }

        Self { payer_name, iban }
    }
}
