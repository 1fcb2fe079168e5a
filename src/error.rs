use thiserror::Error;

#[derive(Error, Debug)]
pub enum AwamuError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },
    #[error("Unknown payment method: {0}")]
    UnknownMethod(String),
    #[error("Payment method {0} is disabled")]
    MethodDisabled(String),
    #[error("Authentication required: please log in to continue with payment")]
    AuthRequired,
    #[error("Gateway error: {0}")]
    Gateway(String),
    #[error("A payment is already processing for this session")]
    AlreadyProcessing,
    #[error("Cannot {action} while {from}")]
    InvalidTransition { from: String, action: &'static str },
    #[error("Emergency funds were already requested this period")]
    EmergencyUnavailable,
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[cfg(feature = "storage-rocksdb")]
    #[error("Storage error: {0}")]
    Storage(#[from] rocksdb::Error),
}

impl AwamuError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// The message shown to the payer when a gateway call goes wrong.
    ///
    /// Provider messages are passed through untouched; any other failure
    /// falls back to its display form.
    pub fn payer_message(&self) -> String {
        match self {
            Self::Gateway(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AwamuError>;
