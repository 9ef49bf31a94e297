//! SansGetirSin provider client.
//!
//! Translates the abstract aggregator operations into SansGetirSin's wire
//! format: JSON bodies under a `{error, data}` envelope, session token at
//! `data.token`, accounts as a `data` array, deposit id at
//! `data.transactionId`. A present top-level `error` string is an
//! application-level failure regardless of HTTP status.

use crate::config::SansGetirSinConfig;
use crate::error::{DiscoveryError, FlowError, SessionError, SubmissionError};
use crate::flow::DepositFlow;
use crate::models::{
    Account, AccountField, DepositResponse, PaymentRecord, SessionToken, SubAccount,
    STATUS_SUCCESS,
};
use crate::provider::{Aggregator, FlowRunner};
use crate::selector::StdinSelector;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::time::Duration;
use tracing::{debug, info};

/// Human-readable label recorded on persisted payments.
const LABEL: &str = "Sans Getirsin";

/// Message used when the provider omits one on a successful deposit.
const DEFAULT_DEPOSIT_MESSAGE: &str = "Deposit successful";

/// Client for the SansGetirSin payment aggregator.
pub struct SansGetirSin {
    base_url: String,
    username: String,
    api_key: String,
    /// Free-form session parameters the provider expects alongside the
    /// credentials (userId, paymentMethod, maxWithdrawLimit).
    additional_data: Map<String, Value>,
    http: reqwest::Client,
}

impl SansGetirSin {
    /// Build a ready-configured client from provider settings.
    pub fn from_config(config: &SansGetirSinConfig) -> Self {
        let base_url = config.base_url();
        info!("SansGetirSin: constructed base URL: {}", base_url);

        let mut additional_data = Map::new();
        additional_data.insert("userId".to_string(), json!(config.user_id));
        additional_data.insert("paymentMethod".to_string(), json!(config.payment_method));
        additional_data.insert(
            "maxWithdrawLimit".to_string(),
            json!(config.max_withdraw_limit),
        );

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            username: config.username.clone(),
            api_key: config.api_key.clone(),
            additional_data,
            http,
        }
    }
}

#[async_trait]
impl Aggregator for SansGetirSin {
    fn label(&self) -> &str {
        LABEL
    }

    async fn initialize_session(&self) -> Result<SessionToken, SessionError> {
        info!("SansGetirSin: initializing session...");
        let url = format!("{}/payment/json", self.base_url);

        let request = SessionRequest {
            username: &self.username,
            api_key: &self.api_key,
            additional_data: &self.additional_data,
        };

        let response = self.http.post(&url).json(&request).send().await?;
        let body = response.text().await?;
        debug!("SansGetirSin: raw session response: {}", body);

        let token = decode_session(&body)?;
        info!("SansGetirSin: session initialized successfully");
        Ok(token)
    }

    async fn get_accounts(
        &self,
        token: &SessionToken,
        amount: f64,
    ) -> Result<Vec<Account>, DiscoveryError> {
        info!("SansGetirSin: getting accounts...");
        let url = format!("{}/payment/deposit?amount={:.2}", self.base_url, amount);

        let response = self
            .http
            .get(&url)
            .bearer_auth(token.as_str())
            .send()
            .await?;
        let body = response.text().await?;
        debug!("SansGetirSin: raw accounts response: {}", body);

        decode_accounts(&body)
    }

    async fn make_deposit(
        &self,
        token: &SessionToken,
        sub_account_id: &str,
        amount: f64,
        extra: &Map<String, Value>,
    ) -> Result<DepositResponse, SubmissionError> {
        info!("SansGetirSin: making deposit...");
        let url = format!("{}/payment/deposit", self.base_url);

        let request = DepositRequest {
            bank_account: sub_account_id,
            amount,
            extra_data: extra,
        };
        debug!(
            "SansGetirSin: deposit request payload: {}",
            serde_json::to_string(&request).unwrap_or_default()
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(token.as_str())
            .json(&request)
            .send()
            .await?;
        let body = response.text().await?;
        debug!("SansGetirSin: raw deposit response: {}", body);

        let deposit = decode_deposit(&body)?;
        info!("SansGetirSin: deposit response: {:?}", deposit);
        Ok(deposit)
    }
}

#[async_trait]
impl FlowRunner for SansGetirSin {
    async fn run_deposit_flow(
        &self,
        amount: f64,
    ) -> Result<(DepositResponse, PaymentRecord), FlowError> {
        // Discovery returns several candidate bank accounts and there is no
        // business rule to pick one automatically, so this provider runs the
        // generic flow with the interactive operator selector.
        DepositFlow::new(self, StdinSelector).run(amount).await
    }
}

// --- Wire format ---

/// Response envelope shared by every SansGetirSin endpoint.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    error: Option<String>,
    data: Option<T>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionRequest<'a> {
    username: &'a str,
    api_key: &'a str,
    additional_data: &'a Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct SessionData {
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireAccount {
    #[serde(rename = "_id", default)]
    id: String,
    #[serde(default)]
    name: String,
    logo: Option<String>,
    #[serde(default)]
    accounts: Vec<WireSubAccount>,
}

#[derive(Debug, Deserialize)]
struct WireSubAccount {
    #[serde(rename = "_id", default)]
    id: String,
    #[serde(default)]
    fields: Vec<WireField>,
}

#[derive(Debug, Deserialize)]
struct WireField {
    #[serde(default)]
    name: String,
    #[serde(default)]
    value: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DepositRequest<'a> {
    bank_account: &'a str,
    amount: f64,
    extra_data: &'a Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DepositData {
    transaction_id: Option<String>,
    status: Option<String>,
    amount: Option<f64>,
    secret: Option<String>,
    message: Option<String>,
}

impl From<WireAccount> for Account {
    fn from(wire: WireAccount) -> Self {
        Account {
            id: wire.id,
            name: wire.name,
            logo: wire.logo,
            sub_accounts: wire
                .accounts
                .into_iter()
                .map(|sub| SubAccount {
                    id: sub.id,
                    fields: sub
                        .fields
                        .into_iter()
                        .map(|field| AccountField {
                            name: field.name,
                            value: field.value,
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

fn decode_session(body: &str) -> Result<SessionToken, SessionError> {
    let envelope: Envelope<SessionData> = serde_json::from_str(body)?;
    if let Some(message) = envelope.error {
        return Err(SessionError::Api(message));
    }
    envelope
        .data
        .and_then(|data| data.token)
        .map(SessionToken::new)
        .ok_or(SessionError::MissingToken)
}

fn decode_accounts(body: &str) -> Result<Vec<Account>, DiscoveryError> {
    let envelope: Envelope<Vec<WireAccount>> = serde_json::from_str(body)?;
    if let Some(message) = envelope.error {
        return Err(DiscoveryError::Api(message));
    }
    let data = envelope.data.ok_or(DiscoveryError::MissingData)?;
    Ok(data.into_iter().map(Account::from).collect())
}

fn decode_deposit(body: &str) -> Result<DepositResponse, SubmissionError> {
    let envelope: Envelope<DepositData> = serde_json::from_str(body)?;
    if let Some(message) = envelope.error {
        return Err(SubmissionError::Api(message));
    }
    let data = envelope.data.ok_or(SubmissionError::MissingTransactionId)?;
    let transaction_id = data
        .transaction_id
        .ok_or(SubmissionError::MissingTransactionId)?;

    Ok(DepositResponse {
        status: data.status.unwrap_or_else(|| STATUS_SUCCESS.to_string()),
        transaction_id,
        amount: data.amount.unwrap_or(0.0),
        secret: data.secret,
        message: data
            .message
            .or_else(|| Some(DEFAULT_DEPOSIT_MESSAGE.to_string())),
    })
}
