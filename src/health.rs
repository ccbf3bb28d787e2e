//! Health checks against a running Qdrant instance.
//!
//! Two independent, unauthenticated GET requests: the service health endpoint and the
//! status endpoint of one collection. Every failure is printed and folded into a boolean;
//! nothing is raised to the caller.

use crate::qdrant::{CollectionSummary, QdrantService, parse_collection_summary};
use crate::report::{Reporter, format_count};
use std::io::Write;

/// Path of the service-level health endpoint.
pub const HEALTH_PATH: &str = "health";

/// Combined result of both checks.
#[derive(Debug, Clone)]
pub struct HealthReport {
    /// The health endpoint answered with a success status.
    pub service_ok: bool,
    /// The collection endpoint answered 2xx with a well-formed body.
    pub collection_ok: bool,
    /// Collection status and counters when the collection check succeeded.
    pub collection: Option<CollectionSummary>,
}

impl HealthReport {
    /// Both checks passed.
    pub fn healthy(&self) -> bool {
        self.service_ok && self.collection_ok
    }
}

/// `GET /health`; prints the HTTP status and returns whether it was a success.
pub async fn check_service<W: Write>(client: &QdrantService, reporter: &mut Reporter<W>) -> bool {
    reporter.info(format_args!(
        "Checking Qdrant health at {}",
        endpoint(client, HEALTH_PATH)
    ));
    match client.probe(HEALTH_PATH).await {
        Ok(probe) if probe.status.is_success() => {
            reporter.ok(format_args!("Health endpoint responded: {}", probe.status));
            true
        }
        Ok(probe) => {
            tracing::warn!(status = %probe.status, "Health endpoint returned failure status");
            reporter.error(format_args!(
                "Health endpoint returned {}: {}",
                probe.status,
                probe.body.trim()
            ));
            false
        }
        Err(err) => {
            tracing::warn!(error = %err, "Health endpoint unreachable");
            reporter.error(format_args!("Qdrant health check failed: {err}"));
            false
        }
    }
}

/// `GET /collections/{name}`; prints the HTTP status and the collection's `status`,
/// `points_count` and `vectors_count`.
///
/// Only those three fields are decoded; the collection's configuration is not required.
/// Returns them on success, `None` on any transport, status or decoding
/// failure.
pub async fn check_collection<W: Write>(
    client: &QdrantService,
    collection_name: &str,
    reporter: &mut Reporter<W>,
) -> Option<CollectionSummary> {
    let path = format!("collections/{collection_name}");
    reporter.info(format_args!("Checking collection '{collection_name}'"));

    let probe = match client.probe(&path).await {
        Ok(probe) => probe,
        Err(err) => {
            tracing::warn!(collection = collection_name, error = %err, "Collection endpoint unreachable");
            reporter.error(format_args!("Collection check failed: {err}"));
            return None;
        }
    };

    if !probe.status.is_success() {
        tracing::warn!(collection = collection_name, status = %probe.status, "Collection endpoint returned failure status");
        reporter.error(format_args!(
            "Collection endpoint returned {}: {}",
            probe.status,
            probe.body.trim()
        ));
        return None;
    }
    reporter.ok(format_args!("Collection endpoint responded: {}", probe.status));

    match parse_collection_summary(&probe.body) {
        Ok(info) => {
            reporter.line(format_args!("  status:        {}", info.status));
            reporter.line(format_args!("  points_count:  {}", format_count(info.points_count)));
            reporter.line(format_args!("  vectors_count: {}", format_count(info.vectors_count)));
            Some(info)
        }
        Err(err) => {
            tracing::warn!(collection = collection_name, error = %err, "Collection body did not decode");
            reporter.error(format_args!("Could not parse collection response: {err}"));
            None
        }
    }
}

/// Run both checks without credentials. The collection check runs even when the service
/// check fails.
pub async fn run_health_check<W: Write>(
    client: &QdrantService,
    collection_name: &str,
    reporter: &mut Reporter<W>,
) -> HealthReport {
    let client = client.without_api_key();

    let service_ok = check_service(&client, reporter).await;
    reporter.blank();
    let collection = check_collection(&client, collection_name, reporter).await;
    let collection_ok = collection.is_some();

    reporter.blank();
    if service_ok && collection_ok {
        reporter.ok("Qdrant is healthy");
    } else {
        reporter.warn(format_args!(
            "Qdrant health: service={} collection={}",
            pass_fail(service_ok),
            pass_fail(collection_ok)
        ));
    }

    HealthReport {
        service_ok,
        collection_ok,
        collection,
    }
}

fn pass_fail(ok: bool) -> &'static str {
    if ok { "ok" } else { "failed" }
}

fn endpoint(client: &QdrantService, path: &str) -> String {
    format!("{}/{path}", client.base_url().trim_end_matches('/'))
}
