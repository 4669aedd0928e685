//! Allocated signals: the objects handed to the caller by a successful
//! resource request.
//!
//! A signal is a value with identity: cloning preserves the [`SignalId`], so
//! the engine can keep a clone in its matched list while the caller owns the
//! original. External naming services key on the id.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shape::Shape;

/// Globally unique identifier of one elementary signal.
pub type SignalId = Uuid;

/// One elementary bit-vector signal: a whole scalar resource, or one field
/// of a composite resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    /// Unique identity, stable across clones.
    pub id: SignalId,
    /// Suggested base name (the external namer has the final say).
    pub name: String,
    /// Bit width; `None` for attribute-only record fields.
    pub width: Option<usize>,
    /// Vendor metadata stamped at request time.
    pub platform_info: Option<serde_json::Value>,
}

impl Signal {
    fn allocate(name: String, width: Option<usize>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            width,
            platform_info: None,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.width {
            Some(w) => write!(f, "{}[{}]", self.name, w),
            None => write!(f, "{}[-]", self.name),
        }
    }
}

/// A composite signal: an ordered record of named elementary fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSignal {
    /// Record base name.
    pub name: String,
    /// `(field name, field signal)` pairs in declaration order. The field
    /// signal's own name is `"{record}_{field}"`.
    pub fields: Vec<(String, Signal)>,
    /// Vendor metadata stamped at request time.
    pub platform_info: Option<serde_json::Value>,
}

impl RecordSignal {
    /// Look up a field by its subsignal name.
    pub fn field(&self, name: &str) -> Option<&Signal> {
        self.fields
            .iter()
            .find_map(|(n, s)| (n == name).then_some(s))
    }
}

/// The signal allocated by a resource request: scalar or record, matching
/// the resource's inferred shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IoSignal {
    Scalar(Signal),
    Record(RecordSignal),
}

impl IoSignal {
    /// Allocate a fresh signal of the given shape, stamped with the
    /// resource's vendor metadata.
    pub fn allocate(name: &str, shape: &Shape, platform_info: Option<serde_json::Value>) -> Self {
        match shape {
            Shape::Scalar { width } => {
                let mut sig = Signal::allocate(name.to_string(), Some(*width));
                sig.platform_info = platform_info;
                IoSignal::Scalar(sig)
            }
            Shape::Record { fields } => {
                let fields = fields
                    .iter()
                    .map(|f| {
                        let sig = Signal::allocate(format!("{}_{}", name, f.name), f.width);
                        (f.name.clone(), sig)
                    })
                    .collect();
                IoSignal::Record(RecordSignal {
                    name: name.to_string(),
                    fields,
                    platform_info,
                })
            }
        }
    }

    /// Base name of the allocated signal.
    pub fn name(&self) -> &str {
        match self {
            IoSignal::Scalar(s) => &s.name,
            IoSignal::Record(r) => &r.name,
        }
    }

    /// Elementary signals in order: the scalar itself, or each record field.
    pub fn elementary(&self) -> Vec<&Signal> {
        match self {
            IoSignal::Scalar(s) => vec![s],
            IoSignal::Record(r) => r.fields.iter().map(|(_, s)| s).collect(),
        }
    }

    /// Vendor metadata stamped at request time, if any.
    pub fn platform_info(&self) -> Option<&serde_json::Value> {
        match self {
            IoSignal::Scalar(s) => s.platform_info.as_ref(),
            IoSignal::Record(r) => r.platform_info.as_ref(),
        }
    }
}
