use awamu::application::assistant::{Assistant, AssistantContext};
use awamu::application::dispatcher::{DispatchOutcome, PaymentDispatcher};
use awamu::config::Config;
use awamu::domain::good::Good;
use awamu::domain::method::MethodCatalog;
use awamu::domain::plan::{InstallmentPlan, PlanSelector};
use awamu::domain::ports::TransactionLogBox;
use awamu::domain::request::PaymentDetails;
use awamu::domain::savings::SavingsAccount;
use awamu::domain::session::PaymentSession;
use awamu::infrastructure::in_memory::{InMemoryTransactionLog, StaticAuth};
use awamu::infrastructure::sandbox::SandboxGateway;
use awamu::interfaces::csv::catalog_reader::CatalogReader;
use awamu::interfaces::csv::ledger_writer::LedgerWriter;
use awamu::interfaces::csv::schedule_writer::ScheduleWriter;
use chrono::Utc;
use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result, miette};
use rust_decimal::Decimal;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Quote the installment plan for one good
    Quote {
        /// Goods catalog CSV file
        #[arg(long)]
        catalog: PathBuf,
        /// Catalog key of the good
        #[arg(long)]
        good: String,
        /// Installment period in months (defaults to the good's minimum)
        #[arg(long)]
        period: Option<u32>,
    },
    /// Write every allowed plan for a good as CSV
    Schedule {
        #[arg(long)]
        catalog: PathBuf,
        #[arg(long)]
        good: String,
    },
    /// Show emergency-fund eligibility and milestone progress
    Emergency {
        #[arg(long)]
        savings: Decimal,
        #[arg(long)]
        milestone: Decimal,
        /// Request the eligible amount now
        #[arg(long)]
        request: bool,
    },
    /// Dispatch a payment through the offline sandbox gateway
    Pay {
        #[arg(long)]
        method: String,
        #[arg(long)]
        amount: Decimal,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        bank: Option<String>,
        #[arg(long)]
        account: Option<String>,
        /// Signed-in user id; payments are refused without one
        #[arg(long)]
        user: Option<String>,
        #[arg(long)]
        product: Option<String>,
        /// Make the sandbox reject the payment with this message
        #[arg(long)]
        fail: Option<String>,
        /// Path to persistent ledger (optional). If provided, uses RocksDB.
        #[arg(long)]
        db_path: Option<PathBuf>,
    },
    /// Print recorded transactions as CSV
    Ledger {
        #[arg(long)]
        db_path: Option<PathBuf>,
    },
    /// Ask the shopping assistant a question
    Chat {
        message: String,
        /// JSON file with purchases, savings and businesses
        #[arg(long)]
        context: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().into_diagnostic()?;

    match cli.command {
        Command::Quote {
            catalog,
            good,
            period,
        } => {
            let good = find_good(&catalog, &good)?;
            let mut selector = PlanSelector::new();
            selector.select_good(good).into_diagnostic()?;
            if let Some(months) = period {
                selector.set_period(months).into_diagnostic()?;
            }
            let plan = selector.current_plan().into_diagnostic()?;
            println!("good: {}", plan.good.label());
            println!("period_months: {}", plan.period_months);
            println!("monthly_amount: {}", plan.monthly_amount);
            println!("service_fee: {}", plan.service_fee);
            println!("total_monthly_payment: {}", plan.total_monthly_payment);
            println!("amount_due: {}", plan.amount_due().into_diagnostic()?);
        }
        Command::Schedule { catalog, good } => {
            let good = find_good(&catalog, &good)?;
            let plans = InstallmentPlan::schedule(&good).into_diagnostic()?;
            let stdout = io::stdout();
            ScheduleWriter::new(stdout.lock())
                .write_plans(&plans)
                .into_diagnostic()?;
        }
        Command::Emergency {
            savings,
            milestone,
            request,
        } => {
            let mut account = SavingsAccount::new(savings, milestone, config.emergency_period)
                .into_diagnostic()?;
            println!("emergency_eligible: {}", account.eligible_amount().normalize());
            println!(
                "progress_percent: {}",
                account.progress_percent().into_diagnostic()?
            );
            if request {
                let now = Utc::now();
                let withdrawal = account.request_emergency(now).into_diagnostic()?;
                println!("requested: {}", withdrawal.amount.normalize());
                println!(
                    "available_again_at: {}",
                    withdrawal.available_again_at.to_rfc3339()
                );
                println!("withdrawn: {}", account.is_withdrawn(now));
            }
        }
        Command::Pay {
            method,
            amount,
            phone,
            bank,
            account,
            user,
            product,
            fail,
            db_path,
        } => {
            let ledger = open_ledger(db_path.or(config.db_path.clone()))?;
            let gateway = match fail {
                Some(message) => SandboxGateway::failing(message),
                None => SandboxGateway::new(),
            };
            let auth = match user {
                Some(id) => StaticAuth::signed_in(id),
                None => StaticAuth::signed_out(),
            };
            let dispatcher = PaymentDispatcher::new(
                MethodCatalog::standard(),
                Box::new(gateway),
                ledger,
                Box::new(auth),
            )
            .with_config(&config);

            let mut session = PaymentSession::new();
            dispatcher
                .select_method(&mut session, &method)
                .into_diagnostic()?;
            *session.details_mut() = PaymentDetails {
                phone_number: phone,
                bank_name: bank,
                bank_account: account,
            };
            let outcome = dispatcher
                .submit(&mut session, amount, product.as_deref())
                .await
                .into_diagnostic()?;

            println!("status: {}", session.status());
            match outcome {
                DispatchOutcome::Pending {
                    transaction_id,
                    redirect_url,
                } => {
                    println!("transaction_id: {transaction_id}");
                    if let Some(url) = redirect_url {
                        println!("redirect_url: {url}");
                    }
                }
                DispatchOutcome::Unavailable { notice } => println!("notice: {notice}"),
                DispatchOutcome::Failed { message } => println!("error: {message}"),
            }
        }
        Command::Ledger { db_path } => {
            let ledger = open_ledger(db_path.or(config.db_path.clone()))?;
            let records = ledger.all().await.into_diagnostic()?;
            let stdout = io::stdout();
            LedgerWriter::new(stdout.lock())
                .write_records(records)
                .into_diagnostic()?;
        }
        Command::Chat { message, context } => {
            let context = match context {
                Some(path) => {
                    let file = File::open(path).into_diagnostic()?;
                    serde_json::from_reader::<_, AssistantContext>(file).into_diagnostic()?
                }
                None => AssistantContext::default(),
            };
            println!("{}", Assistant::respond(&message, &context));
        }
    }

    Ok(())
}

fn find_good(catalog: &Path, key: &str) -> Result<Good> {
    let file = File::open(catalog).into_diagnostic()?;
    for good in CatalogReader::new(file).goods() {
        match good {
            Ok(good) if good.key() == key => return Ok(good),
            Ok(_) => {}
            Err(e) => warn!("Error reading catalog row: {}", e),
        }
    }
    Err(miette!("good {key:?} not found in {}", catalog.display()))
}

#[cfg(feature = "storage-rocksdb")]
fn open_ledger(db_path: Option<PathBuf>) -> Result<TransactionLogBox> {
    use awamu::infrastructure::rocksdb::RocksDBTransactionLog;

    Ok(match db_path {
        Some(path) => Box::new(RocksDBTransactionLog::open(path).into_diagnostic()?),
        None => Box::new(InMemoryTransactionLog::new()),
    })
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_ledger(db_path: Option<PathBuf>) -> Result<TransactionLogBox> {
    if db_path.is_some() {
        warn!(
            "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
        );
    }
    Ok(Box::new(InMemoryTransactionLog::new()))
}
