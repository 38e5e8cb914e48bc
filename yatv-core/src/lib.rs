//! Core library for the YaTV query CLI.
//!
//! YaTV is a relational schema for a video-streaming service: users, apps,
//! platforms, shows, seasons, videos, tags, subscriptions and watch history.
//! This crate holds everything the `yatv` binary needs to run one of the
//! fifteen numbered commands against that schema.
//!
//! # Security Guarantees
//! - Passwords are stored only as salted Argon2id hashes
//! - Plain-text passwords live in zeroizing buffers and are never logged
//! - Database URLs are redacted in every log line and error message
//! - Every operator-supplied value is bound as a statement parameter
//!
//! # Architecture
//! A command runs as a three-stage pipeline:
//! - [`collect`]: prompt for parameters, printing reference lists from the store
//! - [`execute`]: run the statement(s) and re-select after writes
//! - [`render`]: format result rows as labeled text lines
//!
//! The store is reached only through the [`VideoStore`] trait, passed by
//! reference to each stage.

pub mod catalog;
pub mod collect;
pub mod config;
pub mod console;
pub mod error;
pub mod execute;
pub mod logging;
pub mod models;
pub mod render;
pub mod security;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use catalog::{Command, usage_text};
pub use collect::CommandRequest;
pub use config::{DEFAULT_DATABASE_URL, HashingConfig, StoreConfig, StoreKind};
pub use console::Console;
pub use error::{Result, YatvError, redact_database_url};
pub use execute::{CommandOutcome, ExecutionContext};
pub use logging::init_logging;
pub use session::run_command;
pub use store::{VideoStore, connect_store};

#[cfg(feature = "mysql")]
pub use store::MySqlStore;

#[cfg(feature = "sqlite")]
pub use store::SqliteStore;
