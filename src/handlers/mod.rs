//! # Block Handlers
//!
//! This module contains the handlers that turn seed file entries into tw
//! invocations.  Each specialized block type is implemented in a dedicated
//! submodule; the flat blocks share the generic add handler.
//!
//! ## Structure
//!
//! - `add` - generic `tw <block> add` for the flat blocks
//! - `teams` - team creation plus per-member enrollment
//! - `participants` - participant add plus role update
//! - `compute_envs` - import-from-file or add-by-type routing
//! - `pipelines` - pipeline add with params file support
//! - `launch` - workflow launch with params file support
//! - `shared` - field extraction and params-file helpers

pub mod add;
pub mod compute_envs;
pub mod launch;
pub mod participants;
pub mod pipelines;
pub mod shared;
pub mod teams;

pub use add::handle_add;
pub use compute_envs::handle_compute_envs;
pub use launch::handle_launch;
pub use participants::handle_participants;
pub use pipelines::handle_pipelines;
pub use teams::handle_teams;

use crate::dispatch::Registry;

/// Blocks served by the generic add handler.
pub const GENERIC_ADD_BLOCKS: &[&str] = &[
    "organizations",
    "workspaces",
    "credentials",
    "secrets",
    "actions",
    "datasets",
];

/// Builds the production dispatch table.
///
/// Generic-add membership takes precedence in routing, so adding a name to
/// [`GENERIC_ADD_BLOCKS`] retires any specialized handler of the same name.
pub fn standard_registry() -> Registry {
    let mut registry = Registry::new(Box::new(handle_add));
    for block in GENERIC_ADD_BLOCKS {
        registry = registry.with_add_block(block);
    }
    registry
        .with_specialized("teams", Box::new(handle_teams))
        .with_specialized("participants", Box::new(handle_participants))
        .with_specialized("compute-envs", Box::new(handle_compute_envs))
        .with_specialized("pipelines", Box::new(handle_pipelines))
        .with_specialized("launch", Box::new(handle_launch))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::RouteKind;

    #[test]
    fn standard_registry_routes_every_known_block() {
        let registry = standard_registry();
        for block in GENERIC_ADD_BLOCKS {
            assert_eq!(registry.route_kind(block), RouteKind::GenericAdd, "{}", block);
        }
        for block in ["teams", "participants", "compute-envs", "pipelines", "launch"] {
            assert_eq!(registry.route_kind(block), RouteKind::Specialized, "{}", block);
        }
        assert_eq!(registry.route_kind("widgets"), RouteKind::Unknown);
    }
}
