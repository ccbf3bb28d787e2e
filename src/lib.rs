#![deny(missing_docs)]

//! Operational tooling for the document Q&A application's Qdrant collection.

/// Subcommand entry points and exit statuses.
pub mod commands;
/// Environment-driven configuration management.
pub mod config;
/// PDF viewer walkthrough printed by the `demo` command.
pub mod demo;
/// Qdrant health checks.
pub mod health;
/// Collection recreation.
pub mod lifecycle;
/// Structured logging and tracing setup.
pub mod logging;
/// Document metadata payloads.
pub mod metadata;
/// Qdrant vector store integration.
pub mod qdrant;
/// Human-readable console reports.
pub mod report;
