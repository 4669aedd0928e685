//! Connector table: recursive resolution of connector-relative pin
//! identifiers to terminal physical pin names.

use std::collections::HashMap;

use boardio_model::{ConnectorDecl, PinIdentifier, PinListForm};

use crate::error::{EngineError, Result};

/// Connector reference chains deeper than this are reported as cyclic.
/// Real boards chain a handful of adapters at most.
const MAX_RESOLUTION_DEPTH: usize = 64;

/// All registered connectors of a board, resolvable by name.
#[derive(Debug, Default)]
pub struct ConnectorTable {
    table: HashMap<String, PinListForm>,
}

impl ConnectorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register connectors. Each name may be registered only once;
    /// a duplicate fails with [`EngineError::DuplicateConnector`], leaving
    /// connectors registered earlier in the same call in place.
    pub fn add_connectors(
        &mut self,
        connectors: impl IntoIterator<Item = ConnectorDecl>,
    ) -> Result<()> {
        for decl in connectors {
            if self.table.contains_key(&decl.name) {
                return Err(EngineError::DuplicateConnector { name: decl.name });
            }
            self.table.insert(decl.name, decl.pins);
        }
        Ok(())
    }

    /// Resolve one pin identifier to a terminal pin.
    ///
    /// An identifier containing `':'` is split into `(connector, key)`; a
    /// decimal key indexes an index-addressed connector, any other key
    /// addresses a key-addressed one. The target entry may itself be
    /// indirect and is resolved recursively, up to a fixed depth bound.
    /// An identifier without `':'` is already terminal.
    pub fn resolve(&self, identifier: &str) -> Result<PinIdentifier> {
        self.resolve_at_depth(identifier, 0)
    }

    /// Resolve a sequence of identifiers, preserving order. Entries that
    /// resolve to a no-connect stay [`PinIdentifier::Unconnected`].
    pub fn resolve_many<I, S>(&self, identifiers: I) -> Result<Vec<PinIdentifier>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        identifiers
            .into_iter()
            .map(|id| self.resolve(id.as_ref()))
            .collect()
    }

    fn resolve_at_depth(&self, identifier: &str, depth: usize) -> Result<PinIdentifier> {
        if depth > MAX_RESOLUTION_DEPTH {
            return Err(EngineError::CyclicConnectorReference {
                identifier: identifier.to_string(),
            });
        }

        let Some((conn, key)) = identifier.split_once(':') else {
            return Ok(PinIdentifier::Pin(identifier.to_string()));
        };

        let pins = self
            .table
            .get(conn)
            .ok_or_else(|| EngineError::UnknownConnector {
                name: conn.to_string(),
            })?;

        let no_such_pin = || EngineError::UnknownConnectorPin {
            connector: conn.to_string(),
            key: key.to_string(),
        };
        let target = match pins {
            PinListForm::Ordered(entries) => key
                .parse::<usize>()
                .ok()
                .and_then(|index| entries.get(index))
                .ok_or_else(no_such_pin)?,
            PinListForm::Keyed(entries) => entries.get(key).ok_or_else(no_such_pin)?,
        };

        match target {
            PinIdentifier::Unconnected => Ok(PinIdentifier::Unconnected),
            PinIdentifier::Pin(next) => self.resolve_at_depth(next, depth + 1),
        }
    }
}
