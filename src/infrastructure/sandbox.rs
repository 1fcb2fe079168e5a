use crate::domain::ports::{
    CheckoutRequest, HostedCheckout, MobileMoneyPush, PaymentGateway, PushAcknowledgement,
};
use crate::error::{AwamuError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

const SANDBOX_CHECKOUT_BASE: &str = "https://checkout.sandbox.awamu.test/pay";

/// An offline gateway that acknowledges every request.
///
/// References are sequential so runs are reproducible. A failing sandbox
/// rejects every call with a fixed message.
#[derive(Debug, Clone, Default)]
pub struct SandboxGateway {
    sequence: Arc<AtomicU64>,
    failure: Option<String>,
}

impl SandboxGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    fn next(&self) -> Result<u64> {
        if let Some(message) = &self.failure {
            return Err(AwamuError::Gateway(message.clone()));
        }
        Ok(self.sequence.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

#[async_trait]
impl PaymentGateway for SandboxGateway {
    async fn initiate_mobile_money(&self, push: &MobileMoneyPush) -> Result<PushAcknowledgement> {
        let n = self.next()?;
        tracing::debug!(
            provider = %push.provider,
            phone = %push.phone_number,
            reference = %push.reference,
            "sandbox push sent"
        );
        Ok(PushAcknowledgement {
            success: true,
            reference_id: Some(format!("ws_CO_{n:06}")),
            message: Some("Payment request sent to your phone".to_string()),
        })
    }

    async fn create_hosted_checkout(&self, checkout: &CheckoutRequest) -> Result<HostedCheckout> {
        let n = self.next()?;
        let session_id = format!("cs_test_{n:06}");
        tracing::debug!(
            product = %checkout.product_name,
            currency = %checkout.currency,
            "sandbox checkout created"
        );
        Ok(HostedCheckout {
            checkout_url: format!("{SANDBOX_CHECKOUT_BASE}/{session_id}"),
            session_id,
        })
    }
}
