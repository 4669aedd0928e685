//! Constraint & connector resolution engine for board descriptions.
//!
//! Resolves symbolic resource requests ("give me pin group X") against a
//! finite, consumable pool of board-level resource descriptors: matches and
//! consumes descriptors, infers scalar vs. record shapes, chases pin
//! identifiers that alias other connectors down to terminal physical pins,
//! and flattens everything into per-signal `(pins, attributes)` entries plus
//! deferred, name-templated platform commands.
//!
//! One [`ConstraintEngine`] instance drives one build session: register
//! resources and connectors, issue requests, add platform commands, then
//! finalize exactly once with the external naming service.

pub mod commands;
pub mod connectors;
pub mod engine;
pub mod error;
pub mod flatten;
pub mod pool;

pub use commands::{CommandArg, PlatformCommand, PlatformCommandRegistry, SignalNamer};
pub use connectors::ConnectorTable;
pub use engine::{ConstraintEngine, EnginePhase, FinalizeOutput, NamedConstraint};
pub use error::{EngineError, Result};
pub use flatten::{flatten, SignalConstraint};
pub use pool::ResourcePool;
