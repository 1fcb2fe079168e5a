use super::method::{KENYAN_BANKS, PaymentCategory, PaymentMethod};
use super::money::Amount;
use crate::error::{AwamuError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// A Kenyan mobile-money MSISDN, normalized to `254XXXXXXXXX`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Accepts `+2547XXXXXXXX`, `2547XXXXXXXX` or `0[17]XXXXXXXX`.
    ///
    /// Spaces, dashes and parentheses are ignored.
    pub fn parse(raw: &str) -> Result<Self> {
        let cleaned: String = raw
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
            .collect();
        if cleaned.is_empty() {
            return Err(AwamuError::validation(
                "phone_number",
                "phone number is required",
            ));
        }

        let (subscriber, leading) = if let Some(rest) = cleaned.strip_prefix("+254") {
            (rest, &['7'][..])
        } else if let Some(rest) = cleaned.strip_prefix("254") {
            (rest, &['7'][..])
        } else if let Some(rest) = cleaned.strip_prefix('0') {
            (rest, &['1', '7'][..])
        } else {
            return Err(invalid_phone(raw));
        };

        let well_formed = subscriber.len() == 9
            && subscriber.starts_with(leading)
            && subscriber.chars().all(|c| c.is_ascii_digit());
        if !well_formed {
            return Err(invalid_phone(raw));
        }
        Ok(Self(format!("254{subscriber}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn invalid_phone(raw: &str) -> AwamuError {
    AwamuError::validation(
        "phone_number",
        format!("{raw:?} is not a valid Kenyan mobile number"),
    )
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fields the payer types in after picking a method.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentDetails {
    pub phone_number: Option<String>,
    pub bank_name: Option<String>,
    pub bank_account: Option<String>,
}

impl PaymentDetails {
    pub fn with_phone(phone: impl Into<String>) -> Self {
        Self {
            phone_number: Some(phone.into()),
            ..Self::default()
        }
    }

    pub fn with_bank(bank_name: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            bank_name: Some(bank_name.into()),
            bank_account: Some(account.into()),
            ..Self::default()
        }
    }
}

/// A validated outbound payment request.
///
/// Only produced by the dispatcher once every field the method's category
/// needs is present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentRequest {
    method_id: String,
    category: PaymentCategory,
    amount: Amount,
    phone_number: Option<PhoneNumber>,
    bank_name: Option<String>,
    bank_account: Option<String>,
    timestamp: DateTime<Utc>,
}

impl PaymentRequest {
    /// Checks the amount first, then the category's fields, stopping at the
    /// first problem.
    pub(crate) fn build(
        method: &PaymentMethod,
        amount: Decimal,
        details: &PaymentDetails,
        timestamp: DateTime<Utc>,
    ) -> Result<Self> {
        let amount = Amount::new(amount)?;
        let mut request = Self {
            method_id: method.id.clone(),
            category: method.category,
            amount,
            phone_number: None,
            bank_name: None,
            bank_account: None,
            timestamp,
        };

        match method.category {
            PaymentCategory::Mobile => {
                let raw = details.phone_number.as_deref().unwrap_or_default();
                request.phone_number = Some(PhoneNumber::parse(raw)?);
            }
            PaymentCategory::Bank => {
                let bank = non_blank(details.bank_name.as_deref()).ok_or_else(|| {
                    AwamuError::validation("bank_name", "select a bank to pay from")
                })?;
                if !KENYAN_BANKS.contains(&bank) {
                    return Err(AwamuError::validation(
                        "bank_name",
                        format!("{bank} is not a supported bank"),
                    ));
                }
                let account = non_blank(details.bank_account.as_deref()).ok_or_else(|| {
                    AwamuError::validation("bank_account", "bank account number is required")
                })?;
                request.bank_name = Some(bank.to_string());
                request.bank_account = Some(account.to_string());
            }
            PaymentCategory::Card | PaymentCategory::International => {}
        }

        Ok(request)
    }

    pub fn method_id(&self) -> &str {
        &self.method_id
    }

    pub fn category(&self) -> PaymentCategory {
        self.category
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn phone_number(&self) -> Option<&PhoneNumber> {
        self.phone_number.as_ref()
    }

    pub fn bank_name(&self) -> Option<&str> {
        self.bank_name.as_deref()
    }

    pub fn bank_account(&self) -> Option<&str> {
        self.bank_account.as_deref()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
