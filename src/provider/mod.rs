//! Payment provider abstraction.
//!
//! Every aggregator translates the three abstract operations here into its
//! own HTTP/JSON wire format. The flow orchestrator only ever talks to
//! these traits, never to a concrete provider.

pub mod sansgetirsin;

use crate::error::{DiscoveryError, FlowError, SessionError, SubmissionError};
use crate::models::{Account, DepositResponse, PaymentRecord, SessionToken};
use async_trait::async_trait;
use serde_json::{Map, Value};

/// The capability contract every provider client implements.
///
/// Each operation is independently callable and independently failing; no
/// operation retries.
#[async_trait]
pub trait Aggregator: Send + Sync {
    /// Human-readable provider label, recorded on the persisted payment.
    fn label(&self) -> &str;

    /// Establish a session with the configured credentials.
    async fn initialize_session(&self) -> Result<SessionToken, SessionError>;

    /// List the payer's eligible bank accounts. The amount is passed because
    /// provider eligibility rules may depend on it. A legitimately empty
    /// list is `Ok(vec![])`, not an error.
    async fn get_accounts(
        &self,
        token: &SessionToken,
        amount: f64,
    ) -> Result<Vec<Account>, DiscoveryError>;

    /// Submit the deposit against a sub-account. `extra` is a free-form bag
    /// of provider-specific parameters (e.g. a description).
    async fn make_deposit(
        &self,
        token: &SessionToken,
        sub_account_id: &str,
        amount: f64,
        extra: &Map<String, Value>,
    ) -> Result<DepositResponse, SubmissionError>;
}

/// Higher-level capability a provider implements when its flow needs
/// provider-specific interaction (e.g. operator account selection).
///
/// This is the seam between the generic orchestrator and a fully custom
/// flow, and keeps `main` decoupled from either choice.
#[async_trait]
pub trait FlowRunner: Send + Sync {
    async fn run_deposit_flow(
        &self,
        amount: f64,
    ) -> Result<(DepositResponse, PaymentRecord), FlowError>;
}

impl std::fmt::Debug for dyn FlowRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn FlowRunner")
    }
}
