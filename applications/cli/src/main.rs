/// Condo Control - command line front end for the synchronizer
use clap::{Parser, Subcommand};
use condo_core::{ExpenseCategory, ExpenseDraft, PaymentDraft, PaymentType, SuggestionStatus};
use condo_remote::{AddressLookup, DocumentClient};
use condo_store::LocalCache;
use condo_sync::{PullOutcome, SyncStatus, Synchronizer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;

use config::CliConfig;

#[derive(Parser)]
#[command(name = "condo")]
#[command(about = "Condominium administration over a shared cloud document", long_about = None)]
struct Cli {
    /// Manually supplied linking code, overriding the stored one
    #[arg(long, global = true)]
    code: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pull the shared document and show the sync state
    Status,
    /// List recorded payments
    Payments,
    /// Record a payment
    Pay {
        /// House id; defaults to the configured resident house
        #[arg(long)]
        house: Option<String>,
        /// Amount in Bs.
        #[arg(long)]
        amount_bs: f64,
        /// Bs. per USD exchange rate
        #[arg(long)]
        rate: f64,
        /// 6-digit bank reference
        #[arg(long)]
        reference: String,
        /// Mark the payment extraordinary (requires --reason)
        #[arg(long)]
        extraordinary: bool,
        /// Reason for an extraordinary payment
        #[arg(long)]
        reason: Option<String>,
    },
    /// Delete a payment (administrator only)
    DeletePayment {
        /// Payment id
        id: String,
    },
    /// List recorded expenses
    Expenses,
    /// Record an expense (administrator only)
    AddExpense {
        /// Free-text description
        #[arg(long)]
        concept: String,
        /// maintenance, services, repairs, cleaning, security, gardening
        /// or other
        #[arg(long)]
        category: ExpenseCategory,
        /// Amount in Bs.
        #[arg(long)]
        amount_bs: f64,
        /// Bs. per USD exchange rate
        #[arg(long)]
        rate: f64,
    },
    /// List suggestions
    Suggestions,
    /// Submit a suggestion
    Suggest {
        /// Message text
        message: String,
    },
    /// Change a suggestion's status (administrator only)
    Review {
        /// Suggestion id
        id: String,
        /// pending, reviewed or resolved
        status: SuggestionStatus,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "condo=info,condo_sync=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = CliConfig::load()?;
    let sync = build_synchronizer(&config)?;

    let outcome = sync.login(config.user(), cli.code.as_deref()).await;
    report_pull(outcome);

    match cli.command {
        Commands::Status => status(&sync).await,
        Commands::Payments => list_payments(&sync).await,
        Commands::Pay {
            house,
            amount_bs,
            rate,
            reference,
            extraordinary,
            reason,
        } => {
            let house = house
                .or_else(|| config.session.house_id.clone())
                .unwrap_or_default();
            pay(&sync, house, amount_bs, rate, reference, extraordinary, reason).await?;
        }
        Commands::DeletePayment { id } => {
            sync.delete_payment(&id).await?;
            println!("Payment {id} deleted");
        }
        Commands::Expenses => list_expenses(&sync).await,
        Commands::AddExpense {
            concept,
            category,
            amount_bs,
            rate,
        } => {
            let expense = sync
                .record_expense(ExpenseDraft {
                    concept,
                    category,
                    amount_bs: Some(amount_bs),
                    exchange_rate: Some(rate),
                    invoice_ref: None,
                })
                .await?;
            println!("Recorded expense {} (${:.2})", expense.id, expense.amount);
        }
        Commands::Suggestions => list_suggestions(&sync).await,
        Commands::Suggest { message } => {
            let suggestion = sync.submit_suggestion(&message).await?;
            println!("Suggestion {} submitted", suggestion.id);
        }
        Commands::Review { id, status } => {
            sync.set_suggestion_status(&id, status).await?;
            println!("Suggestion {id} marked {status}");
        }
    }

    // Flush any scheduled push before exiting
    sync.settle().await;
    report_status(&sync).await;

    Ok(())
}

fn build_synchronizer(config: &CliConfig) -> anyhow::Result<Synchronizer> {
    let cache = LocalCache::open(&config.storage.data_dir)?;
    let client = DocumentClient::new(config.remote.store_url.clone())?;
    let lookup = if config.remote.lookup_enabled {
        Some(AddressLookup::default_service()?)
    } else {
        None
    };
    Ok(Synchronizer::with_options(client, cache, lookup))
}

fn report_pull(outcome: PullOutcome) {
    let message = match outcome {
        PullOutcome::Loaded => "Shared document loaded",
        PullOutcome::Created => "New shared document created",
        PullOutcome::InvalidCode => "Linking code not recognized; using local data",
        PullOutcome::Offline => "Cloud unreachable; using local data",
        PullOutcome::AlreadySyncing => "Sync already in progress",
    };
    println!("{message}");
}

async fn report_status(sync: &Synchronizer) {
    let badge = match sync.status() {
        SyncStatus::Syncing => "syncing",
        SyncStatus::LocalMode => "local mode",
        SyncStatus::CloudActive => "cloud active",
    };
    match sync.document_id().await {
        Some(id) => println!("[{badge}] linking code: {id}"),
        None => println!("[{badge}] no linking code yet"),
    }
}

async fn status(sync: &Synchronizer) {
    let snapshot = sync.snapshot().await;
    println!(
        "{} houses, {} payments, {} expenses, {} suggestions",
        snapshot.houses.len(),
        snapshot.payments.len(),
        snapshot.expenses.len(),
        snapshot.suggestions.len()
    );
}

async fn pay(
    sync: &Synchronizer,
    house: String,
    amount_bs: f64,
    rate: f64,
    reference: String,
    extraordinary: bool,
    reason: Option<String>,
) -> anyhow::Result<()> {
    let payment = sync
        .record_payment(PaymentDraft {
            house_id: house,
            amount_bs: Some(amount_bs),
            exchange_rate: Some(rate),
            payment_type: if extraordinary {
                PaymentType::Extraordinary
            } else {
                PaymentType::Ordinary
            },
            extraordinary_reason: reason,
            bank_reference: reference,
            receipt_ref: None,
        })
        .await?;
    println!(
        "Recorded payment {} for {} (${:.2})",
        payment.id, payment.house_id, payment.total_usd
    );
    Ok(())
}

async fn list_payments(sync: &Synchronizer) {
    let snapshot = sync.snapshot().await;
    if snapshot.payments.is_empty() {
        println!("No payments recorded");
        return;
    }
    for p in &snapshot.payments {
        println!(
            "{}  {}  {}  ${:.2}  ref {}",
            p.id,
            p.date.format("%Y-%m-%d"),
            p.house_id,
            p.total_usd,
            p.bank_reference
        );
    }
}

async fn list_expenses(sync: &Synchronizer) {
    let snapshot = sync.snapshot().await;
    if snapshot.expenses.is_empty() {
        println!("No expenses recorded");
        return;
    }
    for e in &snapshot.expenses {
        println!(
            "{}  {}  {}  ${:.2}  {}",
            e.id,
            e.date.format("%Y-%m-%d"),
            e.category,
            e.amount,
            e.concept
        );
    }
}

async fn list_suggestions(sync: &Synchronizer) {
    let snapshot = sync.snapshot().await;
    if snapshot.suggestions.is_empty() {
        println!("No suggestions");
        return;
    }
    for s in &snapshot.suggestions {
        println!(
            "{}  {}  [{}]  {}",
            s.id,
            s.house_id,
            s.status,
            s.message
        );
    }
}
