use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::Mutex;
use tracing::info;

use listing_labeler::dataset::load_dataset;
use listing_labeler::domain::page::DEFAULT_PAGE_SIZE;
use listing_labeler::repository::{init_db, LabelRepository};
use listing_labeler::session::{Session, UnlabeledPolicy};
use listing_labeler::{api, AppState};

#[derive(Parser, Debug)]
#[command(about = "Manual labeling backend for product listing datasets")]
struct Args {
    /// Path to the listing dataset CSV (columns: title, price, location, sold, link)
    #[arg(long, value_name = "FILE")]
    dataset: PathBuf,
    /// Path to the label database
    #[arg(long, value_name = "FILE", default_value = "labels.db")]
    db: PathBuf,
    /// Address to serve the labeling API on
    #[arg(long, default_value = "127.0.0.1:8080")]
    bind: SocketAddr,
    /// Listings per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,
    /// Fill unlabeled items with "legal" at submit time instead of rejecting
    /// the submission. Defaulted keys are reported in the submit response.
    #[arg(long)]
    default_unlabeled_legal: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("listing_labeler=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let dataset = Arc::new(load_dataset(&args.dataset).context("failed to load dataset")?);

    let conn = init_db(&args.db)
        .await
        .context("failed to open label database")?;
    let store = Arc::new(LabelRepository::new(Arc::new(Mutex::new(conn))));

    let policy = if args.default_unlabeled_legal {
        UnlabeledPolicy::DefaultLegal
    } else {
        UnlabeledPolicy::Reject
    };

    let session = Session::new(dataset.clone(), store, args.page_size, policy)
        .context("failed to start session")?;
    info!(
        items = dataset.len(),
        pages = session.page_count(),
        page_size = args.page_size,
        "session ready"
    );

    let app = api::router(Arc::new(AppState::new(session)));

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;
    info!(addr = %args.bind, "serving labeling API");
    axum::serve(listener, app).await?;

    Ok(())
}
