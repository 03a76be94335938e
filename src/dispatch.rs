//! # Block Dispatch
//!
//! This module routes parsed seed blocks to their handlers.  The routing
//! table is a [`Registry`] value injected at construction: a set of block
//! names served by the generic add handler, and a map of names to
//! specialized handlers.  Generic-add membership wins when a name appears
//! in both.  Unknown names are reported and skipped without aborting the
//! run.

use std::collections::HashMap;

use crate::client::TowerClient;
use crate::config::{ArgSet, SeedConfig};
use crate::errors::HandlerError;
use crate::pace::Pacer;

/// Handler for one entry of a specialized block.
pub type BlockHandler =
    Box<dyn Fn(&TowerClient, ArgSet) -> Result<(), HandlerError> + Send + Sync>;

/// Handler for one entry of a generic-add block.  Receives the block name
/// because the same handler serves several blocks.
pub type AddHandler =
    Box<dyn Fn(&TowerClient, &str, ArgSet) -> Result<(), HandlerError> + Send + Sync>;

/// How a block name routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// Served by the generic add handler.
    GenericAdd,
    /// Served by a dedicated handler.
    Specialized,
    /// Not in the table at all.
    Unknown,
}

/// What became of one dispatched entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The handler ran and succeeded.
    Completed,
    /// The handler ran and reported an error.
    Failed,
    /// The block name was unknown; no handler ran.
    Skipped,
}

enum Route<'a> {
    GenericAdd(&'a AddHandler),
    Specialized(&'a BlockHandler),
    Unknown,
}

/// The dispatch table: block names and their handlers.
///
/// Built once at startup ([`crate::handlers::standard_registry`] wires the
/// production table) and never mutated afterwards.  Tests build small
/// registries with stub closures.
pub struct Registry {
    add_blocks: Vec<String>,
    add_handler: AddHandler,
    specialized: HashMap<String, BlockHandler>,
}

impl Registry {
    /// Creates an empty registry around the generic add handler.
    pub fn new(add_handler: AddHandler) -> Self {
        Registry {
            add_blocks: Vec::new(),
            add_handler,
            specialized: HashMap::new(),
        }
    }

    /// Routes `name` to the generic add handler.
    pub fn with_add_block(mut self, name: &str) -> Self {
        self.add_blocks.push(name.to_string());
        self
    }

    /// Routes `name` to a dedicated handler.
    pub fn with_specialized(mut self, name: &str, handler: BlockHandler) -> Self {
        self.specialized.insert(name.to_string(), handler);
        self
    }

    /// Classifies a block name.  Generic-add membership takes precedence
    /// over the specialized map.
    pub fn route_kind(&self, name: &str) -> RouteKind {
        match self.route(name) {
            Route::GenericAdd(_) => RouteKind::GenericAdd,
            Route::Specialized(_) => RouteKind::Specialized,
            Route::Unknown => RouteKind::Unknown,
        }
    }

    fn route(&self, name: &str) -> Route<'_> {
        if self.add_blocks.iter().any(|b| b == name) {
            Route::GenericAdd(&self.add_handler)
        } else if let Some(handler) = self.specialized.get(name) {
            Route::Specialized(handler)
        } else {
            Route::Unknown
        }
    }
}

/// Walks a parsed seed file and hands every entry to its handler.
pub struct Dispatcher {
    registry: Registry,
    pacer: Box<dyn Pacer>,
}

impl Dispatcher {
    /// Creates a dispatcher over `registry`, pausing via `pacer` between
    /// consecutive entries.
    pub fn new(registry: Registry, pacer: Box<dyn Pacer>) -> Self {
        Dispatcher { registry, pacer }
    }

    /// Dispatches a single entry.
    ///
    /// Handler errors are logged with the block name and reported as
    /// [`Outcome::Failed`]; they never propagate.  A provisioning run
    /// should get as far through the file as it can, and one entity that
    /// already exists must not block the rest.
    pub fn dispatch(&self, client: &TowerClient, block: &str, args: ArgSet) -> Outcome {
        match self.registry.route(block) {
            Route::GenericAdd(handler) => settle(block, handler(client, block, args)),
            Route::Specialized(handler) => settle(block, handler(client, args)),
            Route::Unknown => {
                tracing::error!("Unrecognized block in YAML: {}", block);
                Outcome::Skipped
            }
        }
    }

    /// Runs the whole config: blocks in file order, entries in file order,
    /// one pause between consecutive dispatches.  Outcomes surface only as
    /// log lines.
    pub fn run(&self, client: &TowerClient, config: &SeedConfig) {
        let mut first = true;
        for block in &config.blocks {
            for entry in &block.entries {
                if !first {
                    self.pacer.pause();
                }
                first = false;
                tracing::debug!("For block '{}', the arguments are: {:?}", block.name, entry);
                self.dispatch(client, &block.name, entry.clone());
            }
        }
    }
}

fn settle(block: &str, result: Result<(), HandlerError>) -> Outcome {
    match result {
        Ok(()) => Outcome::Completed,
        Err(e) => {
            tracing::error!("Block '{}' entry failed: {}", block, e);
            Outcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::client::RecordingRunner;
    use crate::config::parse_document;
    use crate::pace::{CountingPacer, NoDelay};

    type CallLog = Arc<Mutex<Vec<String>>>;

    fn test_client() -> TowerClient {
        TowerClient::new(Box::new(RecordingRunner::new()))
    }

    /// Registry whose handlers only record which route fired.
    fn logging_registry(log: &CallLog) -> Registry {
        let add_log = Arc::clone(log);
        let teams_log = Arc::clone(log);
        let launch_log = Arc::clone(log);
        Registry::new(Box::new(move |_client, block, _args| {
            add_log.lock().unwrap().push(format!("add:{}", block));
            Ok(())
        }))
        .with_add_block("organizations")
        .with_add_block("datasets")
        .with_specialized(
            "teams",
            Box::new(move |_client, _args| {
                teams_log.lock().unwrap().push("teams".to_string());
                Ok(())
            }),
        )
        .with_specialized(
            "launch",
            Box::new(move |_client, _args| {
                launch_log.lock().unwrap().push("launch".to_string());
                Ok(())
            }),
        )
    }

    #[test]
    fn generic_add_wins_over_specialized() {
        let log: CallLog = Arc::default();
        let registry = logging_registry(&log).with_add_block("teams");
        assert_eq!(registry.route_kind("teams"), RouteKind::GenericAdd);

        let dispatcher = Dispatcher::new(registry, Box::new(NoDelay));
        let outcome = dispatcher.dispatch(&test_client(), "teams", ArgSet::new());
        assert_eq!(outcome, Outcome::Completed);
        assert_eq!(*log.lock().unwrap(), vec!["add:teams"]);
    }

    #[test]
    fn route_kinds_cover_all_three_cases() {
        let log: CallLog = Arc::default();
        let registry = logging_registry(&log);
        assert_eq!(registry.route_kind("organizations"), RouteKind::GenericAdd);
        assert_eq!(registry.route_kind("teams"), RouteKind::Specialized);
        assert_eq!(registry.route_kind("widgets"), RouteKind::Unknown);
    }

    #[test]
    fn unknown_blocks_skip_without_calling_handlers() {
        let log: CallLog = Arc::default();
        let dispatcher = Dispatcher::new(logging_registry(&log), Box::new(NoDelay));
        let outcome = dispatcher.dispatch(&test_client(), "widgets", ArgSet::new());
        assert_eq!(outcome, Outcome::Skipped);
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn run_visits_blocks_and_entries_in_file_order() {
        let log: CallLog = Arc::default();
        let dispatcher = Dispatcher::new(logging_registry(&log), Box::new(NoDelay));
        let config = parse_document(
            r#"
teams:
  - name: t1
organizations:
  - name: o1
  - name: o2
launch:
  - pipeline: p1
"#,
            "test.yml",
        )
        .unwrap();
        dispatcher.run(&test_client(), &config);
        assert_eq!(
            *log.lock().unwrap(),
            vec!["teams", "add:organizations", "add:organizations", "launch"]
        );
    }

    #[test]
    fn pauses_happen_between_consecutive_dispatches_only() {
        let log: CallLog = Arc::default();
        let pacer = CountingPacer::new();
        let dispatcher = Dispatcher::new(logging_registry(&log), Box::new(pacer.clone()));
        let config = parse_document(
            "organizations:\n  - name: a\n  - name: b\nteams:\n  - name: t\n",
            "test.yml",
        )
        .unwrap();
        dispatcher.run(&test_client(), &config);
        assert_eq!(pacer.pauses(), 2);
    }

    #[test]
    fn empty_config_never_pauses_or_dispatches() {
        let log: CallLog = Arc::default();
        let pacer = CountingPacer::new();
        let dispatcher = Dispatcher::new(logging_registry(&log), Box::new(pacer.clone()));
        dispatcher.run(&test_client(), &SeedConfig::default());
        assert_eq!(pacer.pauses(), 0);
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn single_entry_never_pauses() {
        let log: CallLog = Arc::default();
        let pacer = CountingPacer::new();
        let dispatcher = Dispatcher::new(logging_registry(&log), Box::new(pacer.clone()));
        let config = parse_document("organizations:\n  - name: acme\n", "test.yml").unwrap();
        dispatcher.run(&test_client(), &config);
        assert_eq!(pacer.pauses(), 0);
        assert_eq!(*log.lock().unwrap(), vec!["add:organizations"]);
    }

    #[test]
    fn failing_handler_does_not_stop_the_run() {
        let log: CallLog = Arc::default();
        let fail_log = Arc::clone(&log);
        let registry = logging_registry(&log).with_specialized(
            "pipelines",
            Box::new(move |_client, _args| {
                fail_log.lock().unwrap().push("pipelines".to_string());
                Err(HandlerError::MissingField {
                    block: "pipelines".to_string(),
                    field: "url".to_string(),
                })
            }),
        );
        let dispatcher = Dispatcher::new(registry, Box::new(NoDelay));
        let config = parse_document(
            "pipelines:\n  - name: broken\nteams:\n  - name: after\n",
            "test.yml",
        )
        .unwrap();
        dispatcher.run(&test_client(), &config);
        assert_eq!(*log.lock().unwrap(), vec!["pipelines", "teams"]);
    }

    #[test]
    fn failed_dispatch_reports_failed_outcome() {
        let registry = Registry::new(Box::new(|_client, block, _args| {
            Err(HandlerError::MissingField {
                block: block.to_string(),
                field: "name".to_string(),
            })
        }))
        .with_add_block("organizations");
        let dispatcher = Dispatcher::new(registry, Box::new(NoDelay));
        let outcome = dispatcher.dispatch(&test_client(), "organizations", ArgSet::new());
        assert_eq!(outcome, Outcome::Failed);
    }

    #[test]
    fn unknown_entries_still_occupy_pause_slots() {
        let log: CallLog = Arc::default();
        let pacer = CountingPacer::new();
        let dispatcher = Dispatcher::new(logging_registry(&log), Box::new(pacer.clone()));
        let config = parse_document(
            "widgets:\n  - name: w\nteams:\n  - name: t\n",
            "test.yml",
        )
        .unwrap();
        dispatcher.run(&test_client(), &config);
        assert_eq!(pacer.pauses(), 1);
        assert_eq!(*log.lock().unwrap(), vec!["teams"]);
    }
}
