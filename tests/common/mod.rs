#![allow(dead_code)]

use async_trait::async_trait;
use awamu::domain::ports::{
    CheckoutRequest, HostedCheckout, MobileMoneyPush, PaymentGateway, PushAcknowledgement,
    TransactionLog, TransactionRecord,
};
use awamu::error::{AwamuError, Result};
use std::fs::File;
use std::io::Error;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Writes a catalog with `rows` goods whose prices and period ranges vary
/// with the row number.
pub fn generate_catalog(path: &Path, rows: u32) -> std::result::Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["label", "key", "price", "min_period", "max_period"])?;

    for i in 1..=rows {
        let price = 997 * u64::from(i) + 13;
        let min = i % 6 + 1;
        let max = min + i % 18;
        wtr.write_record([
            format!("Good {i}"),
            format!("good-{i}"),
            price.to_string(),
            min.to_string(),
            max.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Answers pushes with a fixed acknowledgement and remembers every request.
#[derive(Clone, Default)]
pub struct ScriptedGateway {
    ack: PushAcknowledgement,
    pushes: Arc<Mutex<Vec<MobileMoneyPush>>>,
    checkouts: Arc<AtomicUsize>,
}

impl ScriptedGateway {
    pub fn answering(ack: PushAcknowledgement) -> Self {
        Self {
            ack,
            ..Self::default()
        }
    }

    pub fn pushes(&self) -> Vec<MobileMoneyPush> {
        self.pushes.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.pushes.lock().unwrap().len() + self.checkouts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentGateway for ScriptedGateway {
    async fn initiate_mobile_money(&self, push: &MobileMoneyPush) -> Result<PushAcknowledgement> {
        self.pushes.lock().unwrap().push(push.clone());
        Ok(self.ack.clone())
    }

    async fn create_hosted_checkout(&self, _checkout: &CheckoutRequest) -> Result<HostedCheckout> {
        let n = self.checkouts.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(HostedCheckout {
            checkout_url: format!("https://checkout.test/{n}"),
            session_id: format!("cs_{n}"),
        })
    }
}

/// A gateway whose calls never complete.
pub struct StalledGateway;

#[async_trait]
impl PaymentGateway for StalledGateway {
    async fn initiate_mobile_money(&self, _push: &MobileMoneyPush) -> Result<PushAcknowledgement> {
        std::future::pending().await
    }

    async fn create_hosted_checkout(&self, _checkout: &CheckoutRequest) -> Result<HostedCheckout> {
        std::future::pending().await
    }
}

/// A ledger that rejects every write.
pub struct BrokenLedger;

#[async_trait]
impl TransactionLog for BrokenLedger {
    async fn record(&self, _record: TransactionRecord) -> Result<()> {
        Err(AwamuError::Io(std::io::Error::other("disk full")))
    }

    async fn get(&self, _reference: &str) -> Result<Option<TransactionRecord>> {
        Ok(None)
    }

    async fn all(&self) -> Result<Vec<TransactionRecord>> {
        Ok(Vec::new())
    }
}
