use super::money::Amount;
use super::request::PhoneNumber;
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An STK-style push asking the payer to approve a charge on their phone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MobileMoneyPush {
    /// Mobile-money network, e.g. `mpesa` or `airtel`.
    pub provider: String,
    pub phone_number: PhoneNumber,
    pub amount: Amount,
    pub reference: String,
    pub description: String,
}

/// The gateway's answer to a push. `success` only means the prompt was sent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PushAcknowledgement {
    pub success: bool,
    pub reference_id: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckoutRequest {
    pub amount: Amount,
    pub currency: String,
    pub product_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostedCheckout {
    pub checkout_url: String,
    pub session_id: String,
}

/// External payment providers. Errors are reported as
/// [`AwamuError::Gateway`](crate::error::AwamuError::Gateway) with the
/// provider's message.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn initiate_mobile_money(&self, push: &MobileMoneyPush) -> Result<PushAcknowledgement>;

    async fn create_hosted_checkout(&self, checkout: &CheckoutRequest) -> Result<HostedCheckout>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Pending,
}

/// Bookkeeping row written after a gateway acknowledges a payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub user_id: String,
    pub method_id: String,
    pub reference: String,
    pub amount: rust_decimal::Decimal,
    pub currency: String,
    pub phone_number: Option<String>,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait TransactionLog: Send + Sync {
    async fn record(&self, record: TransactionRecord) -> Result<()>;
    async fn get(&self, reference: &str) -> Result<Option<TransactionRecord>>;
    async fn all(&self) -> Result<Vec<TransactionRecord>>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: String,
}

#[async_trait]
pub trait AuthService: Send + Sync {
    async fn current_user(&self) -> Option<UserIdentity>;
}

pub type PaymentGatewayBox = Box<dyn PaymentGateway>;
pub type TransactionLogBox = Box<dyn TransactionLog>;
pub type AuthServiceBox = Box<dyn AuthService>;
