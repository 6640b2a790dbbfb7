use clap::Parser;
use miette::{IntoDiagnostic, Result};
use payflow::application::orchestrator::PaymentOrchestrator;
use payflow::config::GatewaysConfig;
use payflow::domain::payment::Payment;
use payflow::domain::ports::{GatewayRegistryHandle, PaymentStore, PaymentStoreHandle};
use payflow::error::PaymentError;
use payflow::infrastructure::in_memory::InMemoryPaymentStore;
use payflow::infrastructure::mock_gateway::MockGateway;
use payflow::infrastructure::registry::StaticGatewayRegistry;
use payflow::interfaces::csv::operation_reader::{Operation, OperationKind, OperationReader};
use payflow::interfaces::csv::payment_writer::PaymentWriter;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input operations CSV file
    input: PathBuf,

    /// Gateway fleet TOML file (optional). Defaults to a single
    /// always-successful "mock" gateway.
    #[arg(long)]
    gateways: Option<PathBuf>,

    /// Upper bound for a single gateway call, in milliseconds.
    #[arg(long, default_value_t = 30_000)]
    timeout_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let fleet = match &cli.gateways {
        Some(path) => GatewaysConfig::load(path).into_diagnostic()?,
        None => GatewaysConfig::default_fleet(),
    };

    let mut registry = StaticGatewayRegistry::new();
    for entry in &fleet.gateway {
        registry.register(Arc::new(MockGateway::new(entry.name.as_str(), entry.behavior)));
    }

    let store: PaymentStoreHandle = Arc::new(InMemoryPaymentStore::new());
    let registry: GatewayRegistryHandle = Arc::new(registry);
    let orchestrator = PaymentOrchestrator::new(store.clone(), registry)
        .with_gateway_timeout(Duration::from_millis(cli.timeout_ms));

    // Replay operations
    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = OperationReader::new(file);
    for op_result in reader.operations() {
        match op_result {
            Ok(op) => {
                if let Err(e) = apply_operation(&orchestrator, &store, op).await {
                    eprintln!("Error processing operation: {}", e);
                }
            }
            Err(e) => {
                eprintln!("Error reading operation: {}", e);
            }
        }
    }

    // Output final payment states
    let payments = store.all_payments().await.into_diagnostic()?;
    let stdout = io::stdout();
    let mut writer = PaymentWriter::new(stdout.lock());
    writer.write_payments(payments).into_diagnostic()?;

    Ok(())
}

async fn apply_operation(
    orchestrator: &PaymentOrchestrator,
    store: &PaymentStoreHandle,
    op: Operation,
) -> payflow::error::Result<()> {
    // Owner-side actions manage the record itself; everything else goes
    // through the orchestrator.
    if op.op == OperationKind::Open {
        let total = op
            .amount
            .ok_or_else(|| PaymentError::InvalidOperation("open requires an amount".to_string()))?;
        let payment = Payment::new(op.payment, total, "USD", op.gateway);
        store.upsert(payment).await?;
        return Ok(());
    }

    let mut payment = store
        .get(op.payment)
        .await?
        .ok_or(PaymentError::UnknownPayment(op.payment))?;

    match op.op {
        OperationKind::Open => unreachable!("handled above"),
        OperationKind::Deactivate => {
            payment.is_active = false;
            store.upsert(payment).await?;
        }
        OperationKind::Process => {
            let token = require_token(&op)?;
            orchestrator.process(&mut payment, &token, false).await?;
        }
        OperationKind::Authorize => {
            let token = require_token(&op)?;
            orchestrator.authorize(&mut payment, &token, false).await?;
        }
        OperationKind::Capture => {
            orchestrator.capture(&mut payment, op.amount, false).await?;
        }
        OperationKind::Refund => {
            orchestrator.refund(&mut payment, op.amount).await?;
        }
        OperationKind::Void => {
            orchestrator.void(&mut payment).await?;
        }
        OperationKind::Confirm => {
            orchestrator.confirm(&mut payment).await?;
        }
    }

    Ok(())
}

fn require_token(op: &Operation) -> payflow::error::Result<String> {
    op.token
        .clone()
        .ok_or_else(|| PaymentError::InvalidOperation(format!("{:?} requires a token", op.op)))
}
