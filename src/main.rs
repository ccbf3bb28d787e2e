use clap::{Parser, Subcommand};
use docqa_ops::{
    commands,
    config::{self, ConfigOverrides},
    logging,
    report::Reporter,
};
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "docqa-ops",
    version,
    about = "Operational helpers for the document Q&A Qdrant collection"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Drop and recreate the document collection with the configured vector size.
    RecreateCollection {
        /// Collection name (defaults to QDRANT_COLLECTION_NAME).
        #[arg(long)]
        collection: Option<String>,
        /// Vector dimensionality (defaults to EMBEDDING_DIMENSION or 1536).
        #[arg(long)]
        vector_size: Option<u64>,
    },
    /// Probe the Qdrant health endpoint and the collection status endpoint.
    HealthCheck {
        /// Collection name (defaults to QDRANT_COLLECTION_NAME).
        #[arg(long)]
        collection: Option<String>,
    },
    /// Print a walkthrough of the PDF viewer feature.
    Demo,
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init_tracing();
    let mut reporter = Reporter::stdout();
    let code = match Cli::parse().command {
        Command::RecreateCollection {
            collection,
            vector_size,
        } => {
            let loaded = config::init_config(ConfigOverrides {
                collection,
                vector_size,
            });
            commands::recreate_collection(loaded, &mut reporter).await
        }
        Command::HealthCheck { collection } => {
            let loaded = config::init_config(ConfigOverrides {
                collection,
                vector_size: None,
            });
            commands::health_check(loaded, &mut reporter).await
        }
        Command::Demo => commands::demo(&mut std::io::stdout().lock()),
    };
    ExitCode::from(code)
}
