//! # Seedkit: YAML-driven provisioning for Nextflow Tower
//!
//! Seedkit reads a declarative YAML description of a Tower environment
//! (organizations, teams, workspaces, participants, credentials, secrets,
//! compute environments, actions, datasets, pipelines, and launches) and
//! creates each resource by driving the platform's `tw` command line
//! client, one call at a time, in exactly the order the file lists them.
//!
//! This crate provides:
//!
//! - **Ordered Parsing**: the seed file becomes a [`SeedConfig`] whose
//!   blocks and entries keep document order, because later resources
//!   routinely reference earlier ones
//! - **Routing Table**: a [`Registry`] maps block names to handlers; flat
//!   blocks share a generic add handler while teams, participants,
//!   compute environments, pipelines, and launches get specialized ones
//! - **Pacing**: a [`Pacer`] strategy inserts a pause between consecutive
//!   calls so the platform's rate limits are respected
//! - **Runner Strategies**: the [`TowerClient`] executes through a
//!   [`CommandRunner`], so the same code path serves real runs, dry runs,
//!   and tests
//!
//! ## Core Concepts
//!
//! ### Blocks and Entries
//! A seed file maps block names to lists of entries.  Each entry is a
//! mapping whose keys mirror the `tw` flag vocabulary; a handful of keys
//! (`type`, `file-path`, `members`, `role`, `url`, `pipeline`, `params`)
//! get structural treatment, and the rest flatten to `--key value` flags.
//!
//! ### Error Policy
//! Configuration problems are fatal before anything runs.  Once dispatch
//! starts, failures are per-entry: a resource that already exists or a
//! malformed entry is logged and the run continues, so one bad record
//! cannot strand an environment half-seeded.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────┐
//! │ CLI (seedkit binary, arrrg options)   │
//! ├───────────────────────────────────────┤
//! │ Config loader (YAML → SeedConfig)     │
//! ├───────────────────────────────────────┤
//! │ Dispatcher (Registry routing + Pacer) │
//! ├───────────────────────────────────────┤
//! │ Handlers (entry → tw argv)            │
//! ├───────────────────────────────────────┤
//! │ TowerClient (CommandRunner strategy)  │
//! └───────────────────────────────────────┘
//! ```
//!
//! ## Usage Examples
//!
//! ```rust
//! use seedkit::{
//!     Dispatcher, NoDelay, RecordingRunner, TowerClient, parse_document, standard_registry,
//! };
//!
//! let config = parse_document(
//!     r#"
//! organizations:
//!   - name: acme
//!     full-name: Acme Ltd
//! teams:
//!   - name: devs
//!     organization: acme
//! "#,
//!     "inline",
//! )
//! .unwrap();
//!
//! let runner = RecordingRunner::new();
//! let client = TowerClient::new(Box::new(runner.clone()));
//! let dispatcher = Dispatcher::new(standard_registry(), Box::new(NoDelay));
//! dispatcher.run(&client, &config);
//!
//! let commands = runner.commands();
//! assert_eq!(commands.len(), 2);
//! assert_eq!(
//!     commands[0],
//!     vec!["tw", "organizations", "add", "--name", "acme", "--full-name", "Acme Ltd"]
//! );
//! assert_eq!(
//!     commands[1],
//!     vec!["tw", "teams", "add", "--name", "devs", "--organization", "acme"]
//! );
//! ```

#![deny(missing_docs)]
mod client;
mod config;
mod dispatch;
mod errors;
mod pace;

// CLI utility modules

/// Command-line interface utilities for program termination and logging setup.
///
/// This module provides common CLI utilities for the seedkit binary,
/// including error handling, the `--log-level` vocabulary, and tracing
/// initialization.
pub mod cli_utils;

/// Block handlers turning seed entries into tw invocations.
///
/// This module contains the handlers behind the dispatch table, with each
/// specialized block type implemented in a dedicated submodule.
pub mod handlers;

pub use client::{
    CommandRunner, DryRun, RecordingRunner, RunOutput, TowerClient, TwProcess, render_command,
};
pub use config::{ArgSet, SeedBlock, SeedConfig, load_config, parse_document};
pub use dispatch::{AddHandler, BlockHandler, Dispatcher, Outcome, Registry, RouteKind};
pub use errors::{ClientError, ConfigError, HandlerError, UserError, format_cli_error};
pub use handlers::{GENERIC_ADD_BLOCKS, standard_registry};
pub use pace::{CountingPacer, FixedDelay, NoDelay, Pacer};
