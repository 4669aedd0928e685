//! Connector declarations: named headers/slots whose entries alias physical
//! pins or other connectors' entries.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// The literal token that declares a no-connect entry in the ordered form.
pub const UNCONNECTED_TOKEN: &str = "None";

/// One entry of a connector's pin table, or one resolved pin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PinIdentifier {
    /// A physical pin name, or an indirect `connector:key` reference.
    Pin(String),
    /// A declared no-connect.
    Unconnected,
}

impl PinIdentifier {
    /// Parse one token of the ordered form, mapping the no-connect literal
    /// to [`PinIdentifier::Unconnected`].
    pub fn parse(token: &str) -> Self {
        if token == UNCONNECTED_TOKEN {
            PinIdentifier::Unconnected
        } else {
            PinIdentifier::Pin(token.to_string())
        }
    }
}

impl fmt::Display for PinIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinIdentifier::Pin(p) => f.write_str(p),
            PinIdentifier::Unconnected => f.write_str(UNCONNECTED_TOKEN),
        }
    }
}

/// A connector's pin table: index-addressed or key-addressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PinListForm {
    /// Positional entries, addressed by decimal index.
    Ordered(Vec<PinIdentifier>),
    /// Named entries, addressed by key. No no-connect normalization is
    /// applied to this form; a key absent at resolve time is a hard error.
    Keyed(BTreeMap<String, PinIdentifier>),
}

/// Declaration of one connector, as supplied by the board description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorDecl {
    /// Connector name, unique within a board.
    pub name: String,
    /// The pin table.
    pub pins: PinListForm,
}

impl ConnectorDecl {
    /// Declare an index-addressed connector from whitespace-token groups,
    /// concatenated in order. The literal `"None"` declares a no-connect.
    pub fn ordered(name: impl Into<String>, groups: &[&str]) -> Self {
        let pins = groups
            .iter()
            .flat_map(|g| g.split_whitespace())
            .map(PinIdentifier::parse)
            .collect();
        Self {
            name: name.into(),
            pins: PinListForm::Ordered(pins),
        }
    }

    /// Declare a key-addressed connector. The mapping is used as-is.
    pub fn keyed(name: impl Into<String>, pins: BTreeMap<String, PinIdentifier>) -> Self {
        Self {
            name: name.into(),
            pins: PinListForm::Keyed(pins),
        }
    }

    /// Build a declaration from the loose in-memory form: a JSON string is
    /// the ordered whitespace-token form, a JSON object of strings the keyed
    /// form. Any other shape fails with
    /// [`ModelError::UnsupportedConnectorFormat`].
    pub fn from_value(name: impl Into<String>, value: &serde_json::Value) -> Result<Self, ModelError> {
        let name = name.into();
        match value {
            serde_json::Value::String(s) => Ok(Self::ordered(name, &[s.as_str()])),
            serde_json::Value::Object(map) => {
                let mut pins = BTreeMap::new();
                for (key, entry) in map {
                    let serde_json::Value::String(pin) = entry else {
                        return Err(ModelError::UnsupportedConnectorFormat {
                            connector: name,
                            found: format!("non-string entry for key '{key}'"),
                        });
                    };
                    pins.insert(key.clone(), PinIdentifier::Pin(pin.clone()));
                }
                Ok(Self::keyed(name, pins))
            }
            other => Err(ModelError::UnsupportedConnectorFormat {
                connector: name,
                found: format!("unexpected value {other}"),
            }),
        }
    }
}
