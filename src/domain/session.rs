use super::request::PaymentDetails;
use crate::error::{AwamuError, Result};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Selecting,
    Processing,
    Success,
    Pending,
    Failed,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Selecting => "selecting",
            Self::Processing => "processing",
            Self::Success => "success",
            Self::Pending => "pending",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// External confirmation of a pending payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    Confirmed { transaction_id: Option<String> },
    Rejected { reason: String },
}

/// One checkout attempt.
///
/// Owned by the interaction that created it and never persisted. The status
/// only moves through the transitions below; anything else is rejected with
/// [`AwamuError::InvalidTransition`].
///
/// ```text
/// Selecting -> Processing -> Pending | Success | Failed
/// Processing -> Selecting            (route not available yet)
/// Failed -> Selecting                (retry)
/// Pending | Success -> Selecting     (reset)
/// Pending -> Success | Failed        (settle)
/// ```
#[derive(Debug, Clone, Default)]
pub struct PaymentSession {
    status: PaymentStatus,
    selected_method: Option<String>,
    details: PaymentDetails,
    transaction_id: Option<String>,
    error_message: Option<String>,
    redirect_url: Option<String>,
    notice: Option<String>,
}

impl PaymentSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    pub fn selected_method(&self) -> Option<&str> {
        self.selected_method.as_deref()
    }

    pub fn details(&self) -> &PaymentDetails {
        &self.details
    }

    pub fn details_mut(&mut self) -> &mut PaymentDetails {
        &mut self.details
    }

    pub fn transaction_id(&self) -> Option<&str> {
        self.transaction_id.as_deref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Hosted checkout page the payer should be sent to, if any.
    pub fn redirect_url(&self) -> Option<&str> {
        self.redirect_url.as_deref()
    }

    /// Informational message left by the last dispatch, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub(crate) fn choose_method(&mut self, method_id: &str) -> Result<()> {
        self.expect(PaymentStatus::Selecting, "select a payment method")?;
        self.selected_method = Some(method_id.to_string());
        self.details = PaymentDetails::default();
        self.notice = None;
        Ok(())
    }

    /// Guards against a second in-flight dispatch.
    pub(crate) fn ensure_dispatchable(&self) -> Result<()> {
        if self.status == PaymentStatus::Processing {
            return Err(AwamuError::AlreadyProcessing);
        }
        self.expect(PaymentStatus::Selecting, "dispatch a payment")
    }

    pub(crate) fn begin_processing(&mut self) -> Result<()> {
        self.ensure_dispatchable()?;
        self.status = PaymentStatus::Processing;
        self.error_message = None;
        self.notice = None;
        Ok(())
    }

    pub(crate) fn mark_pending(&mut self, transaction_id: String, redirect_url: Option<String>) {
        self.status = PaymentStatus::Pending;
        self.transaction_id = Some(transaction_id);
        self.redirect_url = redirect_url;
    }

    pub(crate) fn mark_unavailable(&mut self, notice: String) {
        self.status = PaymentStatus::Selecting;
        self.notice = Some(notice);
    }

    pub(crate) fn mark_failed(&mut self, message: String) {
        self.status = PaymentStatus::Failed;
        self.error_message = Some(message);
    }

    /// Returns a failed session to method selection.
    pub fn retry(&mut self) -> Result<()> {
        self.expect(PaymentStatus::Failed, "retry")?;
        self.status = PaymentStatus::Selecting;
        self.error_message = None;
        self.transaction_id = None;
        Ok(())
    }

    /// Starts a new payment after a pending or successful one.
    pub fn reset(&mut self) -> Result<()> {
        if !matches!(self.status, PaymentStatus::Pending | PaymentStatus::Success) {
            return Err(self.invalid("start a new payment"));
        }
        self.status = PaymentStatus::Selecting;
        self.selected_method = None;
        self.details = PaymentDetails::default();
        self.transaction_id = None;
        self.redirect_url = None;
        Ok(())
    }

    /// Applies an external confirmation to a pending payment.
    pub fn settle(&mut self, settlement: Settlement) -> Result<()> {
        self.expect(PaymentStatus::Pending, "settle")?;
        match settlement {
            Settlement::Confirmed { transaction_id } => {
                if let Some(id) = transaction_id {
                    self.transaction_id = Some(id);
                }
                self.status = PaymentStatus::Success;
            }
            Settlement::Rejected { reason } => {
                self.status = PaymentStatus::Failed;
                self.error_message = Some(reason);
            }
        }
        self.redirect_url = None;
        Ok(())
    }

    fn expect(&self, status: PaymentStatus, action: &'static str) -> Result<()> {
        if self.status == status {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn invalid(&self, action: &'static str) -> AwamuError {
        AwamuError::InvalidTransition {
            from: self.status.to_string(),
            action,
        }
    }
}
