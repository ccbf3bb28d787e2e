//! Entry points of the `docqa-ops` subcommands and their exit statuses.
//!
//! Each command takes the result of configuration loading so that a bad environment is
//! reported the same way as any other failure of that command: an `[ERROR]` line on the
//! report, then the command's documented exit status.

use crate::config::{Config, ConfigError};
use crate::qdrant::{CollectionSpec, QdrantService};
use crate::report::Reporter;
use crate::{demo, health, lifecycle};
use anyhow::{Context, Result};
use std::io::Write;

/// Command finished, or the command never fails by contract.
pub const EXIT_OK: u8 = 0;
/// Collection creation or read-back failed.
pub const EXIT_RECREATE_FAILED: u8 = 1;
/// Configuration or client setup failed before recreation started.
pub const EXIT_SETUP_FAILED: u8 = 2;

fn connect(config: Result<&Config, ConfigError>) -> Result<(&Config, QdrantService)> {
    let config = config.context("failed to load configuration")?;
    let service = QdrantService::from_config(config).context("failed to build Qdrant client")?;
    Ok((config, service))
}

/// `recreate-collection`: exits 1 when creation or read-back fails, 2 on setup failure.
pub async fn recreate_collection<W: Write>(
    config: Result<&Config, ConfigError>,
    reporter: &mut Reporter<W>,
) -> u8 {
    let (config, service) = match connect(config) {
        Ok(connected) => connected,
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "Recreation setup failed");
            reporter.error(format_args!("{err:#}"));
            return EXIT_SETUP_FAILED;
        }
    };
    reporter.info(format_args!("Connecting to Qdrant at {}", service.base_url()));

    let spec = CollectionSpec::from_config(config);
    match lifecycle::recreate_collection(&service, &spec, reporter).await {
        Ok(_) => EXIT_OK,
        Err(err) => {
            tracing::error!(error = %err, "Collection recreation failed");
            EXIT_RECREATE_FAILED
        }
    }
}

/// `health-check`: always exits 0; setup failures are reported like failed checks.
pub async fn health_check<W: Write>(
    config: Result<&Config, ConfigError>,
    reporter: &mut Reporter<W>,
) -> u8 {
    let (config, service) = match connect(config) {
        Ok(connected) => connected,
        Err(err) => {
            tracing::warn!(error = %format!("{err:#}"), "Health check setup failed");
            reporter.error(format_args!("{err:#}"));
            reporter.warn("Qdrant health: service=failed collection=failed");
            return EXIT_OK;
        }
    };

    let report =
        health::run_health_check(&service, &config.qdrant_collection_name, reporter).await;
    tracing::debug!(
        service_ok = report.service_ok,
        collection_ok = report.collection_ok,
        "Health check finished"
    );
    EXIT_OK
}

/// `demo`: always exits 0.
pub fn demo<W: Write>(out: &mut W) -> u8 {
    if let Err(err) = demo::render_walkthrough(out) {
        tracing::warn!(error = %err, "Failed to write walkthrough");
    }
    EXIT_OK
}
