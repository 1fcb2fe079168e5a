use crate::config::Config;
use crate::domain::method::{MethodCatalog, PaymentCategory};
use crate::domain::ports::{
    AuthServiceBox, CheckoutRequest, MobileMoneyPush, PaymentGatewayBox, RecordStatus,
    TransactionLogBox, TransactionRecord, UserIdentity,
};
use crate::domain::request::{PaymentDetails, PaymentRequest};
use crate::domain::session::PaymentSession;
use crate::error::{AwamuError, Result};
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};

/// How a dispatch ended from the payer's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The gateway accepted the request; funds are not confirmed yet.
    Pending {
        transaction_id: String,
        redirect_url: Option<String>,
    },
    /// The method has no gateway route yet. The session is back to selecting.
    Unavailable { notice: String },
    Failed { message: String },
}

struct Acknowledgement {
    transaction_id: String,
    redirect_url: Option<String>,
}

/// Validates checkout input and routes payments to the right gateway call.
///
/// The dispatcher holds no per-checkout state. Every operation takes the
/// caller's [`PaymentSession`], so one dispatcher can serve many sessions.
pub struct PaymentDispatcher {
    catalog: MethodCatalog,
    gateway: PaymentGatewayBox,
    ledger: TransactionLogBox,
    auth: AuthServiceBox,
    currency: String,
    default_product: String,
}

impl PaymentDispatcher {
    pub fn new(
        catalog: MethodCatalog,
        gateway: PaymentGatewayBox,
        ledger: TransactionLogBox,
        auth: AuthServiceBox,
    ) -> Self {
        let defaults = Config::default();
        Self {
            catalog,
            gateway,
            ledger,
            auth,
            currency: defaults.currency,
            default_product: defaults.product_name,
        }
    }

    pub fn with_config(mut self, config: &Config) -> Self {
        self.currency = config.currency.clone();
        self.default_product = config.product_name.clone();
        self
    }

    /// Picks a method for the session and clears previously entered details.
    pub fn select_method(&self, session: &mut PaymentSession, method_id: &str) -> Result<()> {
        self.catalog.resolve(method_id)?;
        session.choose_method(method_id)?;
        debug!(method = method_id, "payment method selected");
        Ok(())
    }

    pub fn build_request(
        &self,
        method_id: &str,
        amount: Decimal,
        details: &PaymentDetails,
    ) -> Result<PaymentRequest> {
        let method = self.catalog.resolve(method_id)?;
        let request = PaymentRequest::build(method, amount, details, Utc::now());
        if let Err(e) = &request {
            debug!(method = method_id, error = %e, "payment request rejected");
        }
        request
    }

    /// Builds a request from the session's selected method and details, then
    /// dispatches it.
    pub async fn submit(
        &self,
        session: &mut PaymentSession,
        amount: Decimal,
        product_name: Option<&str>,
    ) -> Result<DispatchOutcome> {
        let method_id = session
            .selected_method()
            .ok_or_else(|| AwamuError::validation("method", "select a payment method"))?
            .to_string();
        let request = self.build_request(&method_id, amount, session.details())?;
        self.dispatch(session, &request, product_name).await
    }

    /// Sends one request to its gateway and records the result on the session.
    ///
    /// Errors are returned only when nothing was attempted: the session was
    /// not selecting, the request is for a method other than the selected
    /// one, or nobody is signed in. Every gateway result, failures
    /// included, comes back as a [`DispatchOutcome`].
    ///
    /// If the returned future is dropped while the gateway call is in flight,
    /// the session stays `Processing`. The upstream call cannot be revoked.
    pub async fn dispatch(
        &self,
        session: &mut PaymentSession,
        request: &PaymentRequest,
        product_name: Option<&str>,
    ) -> Result<DispatchOutcome> {
        session.ensure_dispatchable()?;
        if let Some(selected) = session
            .selected_method()
            .filter(|selected| *selected != request.method_id())
        {
            return Err(AwamuError::validation(
                "method",
                format!(
                    "request is for {} but {selected} is selected",
                    request.method_id()
                ),
            ));
        }
        let user = self
            .auth
            .current_user()
            .await
            .ok_or(AwamuError::AuthRequired)?;
        session.begin_processing()?;

        let product = product_name.unwrap_or(self.default_product.as_str());
        let routed = match request.category() {
            PaymentCategory::Mobile => self.push_mobile_money(request, product).await.map(Some),
            PaymentCategory::Card => self.hosted_checkout(request, product).await.map(Some),
            PaymentCategory::International => Ok(None),
            PaymentCategory::Bank => Err(AwamuError::Gateway(format!(
                "Payment method {} not implemented yet",
                request.method_id()
            ))),
        };

        let outcome = match routed {
            Ok(Some(ack)) => {
                self.record(&user, request, &ack.transaction_id).await;
                info!(
                    method = request.method_id(),
                    transaction_id = %ack.transaction_id,
                    amount = %request.amount(),
                    "payment pending confirmation"
                );
                session.mark_pending(ack.transaction_id.clone(), ack.redirect_url.clone());
                DispatchOutcome::Pending {
                    transaction_id: ack.transaction_id,
                    redirect_url: ack.redirect_url,
                }
            }
            Ok(None) => {
                let name = self
                    .catalog
                    .get(request.method_id())
                    .map_or(request.method_id(), |m| m.name.as_str());
                let notice = format!("{name} integration will be available soon!");
                warn!(method = request.method_id(), "no gateway route for method");
                session.mark_unavailable(notice.clone());
                DispatchOutcome::Unavailable { notice }
            }
            Err(e) => {
                let message = e.payer_message();
                error!(method = request.method_id(), error = %message, "payment failed");
                session.mark_failed(message.clone());
                DispatchOutcome::Failed { message }
            }
        };
        Ok(outcome)
    }

    async fn push_mobile_money(
        &self,
        request: &PaymentRequest,
        product: &str,
    ) -> Result<Acknowledgement> {
        let phone_number = request
            .phone_number()
            .cloned()
            .ok_or_else(|| AwamuError::validation("phone_number", "phone number is required"))?;
        let push = MobileMoneyPush {
            provider: request.method_id().to_string(),
            phone_number,
            amount: request.amount(),
            reference: format!("IP_{}", Utc::now().timestamp_millis()),
            description: format!("Payment for {product}"),
        };

        let ack = self.gateway.initiate_mobile_money(&push).await?;
        if !ack.success {
            return Err(AwamuError::Gateway(
                ack.message
                    .unwrap_or_else(|| "Payment processing failed".to_string()),
            ));
        }
        let transaction_id = ack
            .reference_id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| format!("TXN_{}", Utc::now().timestamp_millis()));
        Ok(Acknowledgement {
            transaction_id,
            redirect_url: None,
        })
    }

    async fn hosted_checkout(
        &self,
        request: &PaymentRequest,
        product: &str,
    ) -> Result<Acknowledgement> {
        let checkout = CheckoutRequest {
            amount: request.amount(),
            currency: self.currency.clone(),
            product_name: product.to_string(),
        };
        let session = self.gateway.create_hosted_checkout(&checkout).await?;
        Ok(Acknowledgement {
            transaction_id: session.session_id,
            redirect_url: Some(session.checkout_url),
        })
    }

    /// Ledger writes never change the payment outcome.
    async fn record(&self, user: &UserIdentity, request: &PaymentRequest, reference: &str) {
        let record = TransactionRecord {
            user_id: user.id.clone(),
            method_id: request.method_id().to_string(),
            reference: reference.to_string(),
            amount: request.amount().value(),
            currency: self.currency.clone(),
            phone_number: request.phone_number().map(|p| p.as_str().to_string()),
            status: RecordStatus::Pending,
            created_at: Utc::now(),
        };
        if let Err(e) = self.ledger.record(record).await {
            error!(reference, error = %e, "failed to record transaction");
        }
    }
}
