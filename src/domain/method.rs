use crate::error::{AwamuError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Banks a bank-category payment may be drawn from.
pub const KENYAN_BANKS: [&str; 10] = [
    "KCB Bank",
    "Equity Bank",
    "Cooperative Bank",
    "Standard Chartered",
    "Barclays Bank",
    "Commercial Bank of Africa",
    "Family Bank",
    "I&M Bank",
    "National Bank",
    "NIC Bank",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentCategory {
    Mobile,
    Card,
    Bank,
    International,
}

impl fmt::Display for PaymentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Mobile => "mobile",
            Self::Card => "card",
            Self::Bank => "bank",
            Self::International => "international",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: String,
    pub name: String,
    pub category: PaymentCategory,
    pub enabled: bool,
}

impl PaymentMethod {
    pub fn new(id: &str, name: &str, category: PaymentCategory) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            category,
            enabled: true,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// The payment methods offered at checkout, in display order.
#[derive(Debug, Clone)]
pub struct MethodCatalog {
    methods: Vec<PaymentMethod>,
}

impl MethodCatalog {
    pub fn new(methods: Vec<PaymentMethod>) -> Self {
        Self { methods }
    }

    /// Mobile money, card, pan-African gateways and bank transfers.
    pub fn standard() -> Self {
        use PaymentCategory::*;
        Self::new(vec![
            PaymentMethod::new("mpesa", "M-Pesa", Mobile),
            PaymentMethod::new("airtel", "Airtel Money", Mobile),
            PaymentMethod::new("equitel", "Equitel", Mobile),
            PaymentMethod::new("tkash", "T-Kash", Mobile),
            PaymentMethod::new("stripe", "Credit/Debit Card", Card),
            PaymentMethod::new("flutterwave", "Flutterwave", International),
            PaymentMethod::new("paystack", "Paystack", International),
            PaymentMethod::new("bank_transfer", "Bank Transfer", Bank),
            PaymentMethod::new("mobile_banking", "Mobile Banking", Bank),
        ])
    }

    pub fn get(&self, id: &str) -> Option<&PaymentMethod> {
        self.methods.iter().find(|m| m.id == id)
    }

    /// Looks up a method that can be used right now.
    pub fn resolve(&self, id: &str) -> Result<&PaymentMethod> {
        let method = self
            .get(id)
            .ok_or_else(|| AwamuError::UnknownMethod(id.to_string()))?;
        if !method.enabled {
            return Err(AwamuError::MethodDisabled(id.to_string()));
        }
        Ok(method)
    }

    pub fn by_category(&self, category: PaymentCategory) -> impl Iterator<Item = &PaymentMethod> {
        self.methods.iter().filter(move |m| m.category == category)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PaymentMethod> {
        self.methods.iter()
    }
}

impl Default for MethodCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
