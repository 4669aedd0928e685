//! Engine lifecycle: one instance per build session, from registration
//! through a single finalization.

use boardio_model::{ConnectorDecl, ConstraintElement, IoSignal, PinIdentifier, Resource, ResourceTag, Signal};
use serde::Serialize;

use crate::commands::{CommandArg, PlatformCommandRegistry, SignalNamer};
use crate::connectors::ConnectorTable;
use crate::error::{EngineError, Result};
use crate::flatten::flatten;
use crate::pool::ResourcePool;

/// Engine lifecycle phase. Finalization runs exactly once; afterwards the
/// engine is read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnginePhase {
    /// Registration, requests and command additions are allowed.
    Open,
    /// Finalize has run; mutating calls are rejected.
    Finalized,
}

/// A flattened constraint entry with the external name substituted in,
/// consumed by a constraint-file emitter.
#[derive(Debug, Clone, Serialize)]
pub struct NamedConstraint {
    /// Final signal name assigned by the external namer.
    pub name: String,
    /// Resolved pin list, in bit order.
    pub pins: Vec<PinIdentifier>,
    /// Non-pin electrical/tooling attributes.
    pub others: Vec<ConstraintElement>,
    /// Originating resource (and subsignal, if any).
    pub tag: ResourceTag,
}

/// Everything finalization produces for the downstream emitters.
#[derive(Debug, Clone, Serialize)]
pub struct FinalizeOutput {
    /// One entry per elementary signal of every matched resource.
    pub constraints: Vec<NamedConstraint>,
    /// Rendered platform commands, in registration order.
    pub commands: Vec<String>,
}

/// The constraint & connector resolution engine.
///
/// Owns the resource pool, the connector table and the platform command
/// registry for one board build session. Single-threaded; all operations
/// are immediate.
#[derive(Debug)]
pub struct ConstraintEngine {
    pool: ResourcePool,
    connectors: ConnectorTable,
    commands: PlatformCommandRegistry,
    phase: EnginePhase,
}

impl ConstraintEngine {
    /// Create an engine over a board's resources and connectors.
    pub fn new(
        resources: impl IntoIterator<Item = Resource>,
        connectors: impl IntoIterator<Item = ConnectorDecl>,
    ) -> Result<Self> {
        let mut table = ConnectorTable::new();
        table.add_connectors(connectors)?;
        Ok(Self {
            pool: ResourcePool::new(resources),
            connectors: table,
            commands: PlatformCommandRegistry::new(),
            phase: EnginePhase::Open,
        })
    }

    fn ensure_open(&self) -> Result<()> {
        match self.phase {
            EnginePhase::Open => Ok(()),
            EnginePhase::Finalized => Err(EngineError::AlreadyFinalized),
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    /// Register additional resources.
    pub fn add_resources(&mut self, resources: impl IntoIterator<Item = Resource>) -> Result<()> {
        self.ensure_open()?;
        self.pool.extend(resources);
        Ok(())
    }

    /// Register additional connectors.
    pub fn add_connectors(
        &mut self,
        connectors: impl IntoIterator<Item = ConnectorDecl>,
    ) -> Result<()> {
        self.ensure_open()?;
        self.connectors.add_connectors(connectors)
    }

    /// Consume the first available descriptor matching `(name, number)` and
    /// return its allocated signal. Each descriptor is handed out at most
    /// once.
    pub fn request(&mut self, name: &str, number: Option<u32>) -> Result<IoSignal> {
        self.ensure_open()?;
        self.pool.request(name, number)
    }

    /// The signal of an already-requested resource. Does not consume.
    pub fn lookup(&self, name: &str, number: Option<u32>) -> Result<&IoSignal> {
        self.pool.lookup(name, number)
    }

    /// Register a deferred platform command.
    pub fn add_platform_command(
        &mut self,
        template: impl Into<String>,
        args: Vec<(String, CommandArg)>,
    ) -> Result<()> {
        self.ensure_open()?;
        self.commands.add(template, args);
        Ok(())
    }

    /// The connector table, for direct identifier resolution.
    pub fn connectors(&self) -> &ConnectorTable {
        &self.connectors
    }

    /// All elementary signals of matched resources, in request order. This
    /// is the I/O set a netlist emitter binds to ports.
    pub fn io_signals(&self) -> Vec<Signal> {
        self.pool
            .matched()
            .iter()
            .flat_map(|(_, sig)| sig.elementary().into_iter().cloned().collect::<Vec<_>>())
            .collect()
    }

    /// Flatten constraints and render platform commands against the external
    /// namer, then seal the engine. A second call fails with
    /// [`EngineError::AlreadyFinalized`].
    pub fn finalize(&mut self, namer: &dyn SignalNamer) -> Result<FinalizeOutput> {
        self.ensure_open()?;

        let constraints = flatten(self.pool.matched(), &self.connectors)?
            .into_iter()
            .map(|entry| {
                let name = namer.name_of(&entry.signal).ok_or_else(|| {
                    EngineError::UnresolvedSignal {
                        signal: entry.signal.name.clone(),
                    }
                })?;
                Ok(NamedConstraint {
                    name,
                    pins: entry.pins,
                    others: entry.others,
                    tag: entry.tag,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let commands = self.commands.render(namer)?;

        self.phase = EnginePhase::Finalized;
        Ok(FinalizeOutput {
            constraints,
            commands,
        })
    }
}
