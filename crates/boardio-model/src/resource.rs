//! Resource descriptors: named, numbered, allocatable I/O interface points.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constraint::{ConstraintElement, Pins, Subsignal};

/// One allocatable hardware interface point (an LED, a clock input, a UART…)
/// together with its electrical and pin constraints.
///
/// The identity key is `(name, number)`. Uniqueness is not enforced at
/// registration; the pool always matches the first registered descriptor
/// whose key fits, and a `None` number in a query matches any number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Resource name (e.g. `"led"`, `"clk100"`, `"serial"`).
    pub name: String,
    /// Instance number distinguishing several resources of the same name.
    pub number: Option<u32>,
    /// Constraint list; at most one top-level `Pins`, never mixed with
    /// `Subsignal`s (checked by shape inference).
    pub constraints: Vec<ConstraintElement>,
}

impl Resource {
    pub fn new(
        name: impl Into<String>,
        number: Option<u32>,
        constraints: Vec<ConstraintElement>,
    ) -> Self {
        Self {
            name: name.into(),
            number,
            constraints,
        }
    }

    /// Identity-key match: the name must be equal, and a `None` query number
    /// matches any descriptor number.
    pub fn matches(&self, name: &str, number: Option<u32>) -> bool {
        self.name == name && (number.is_none() || self.number == number)
    }

    /// The subsignals of this resource, in declaration order.
    pub fn subsignals(&self) -> impl Iterator<Item = &Subsignal> {
        self.constraints.iter().filter_map(|c| match c {
            ConstraintElement::Subsignal(s) => Some(s),
            _ => None,
        })
    }

    /// The top-level pin list, if any. Shape inference rejects descriptors
    /// with more than one; this returns the first.
    pub fn top_pins(&self) -> Option<&Pins> {
        self.constraints.iter().find_map(|c| match c {
            ConstraintElement::Pins(p) => Some(p),
            _ => None,
        })
    }

    /// The first top-level `PlatformInfo` payload, if any. The search stops
    /// at the first hit; further entries are ignored.
    pub fn platform_info(&self) -> Option<&serde_json::Value> {
        self.constraints.iter().find_map(|c| match c {
            ConstraintElement::PlatformInfo(p) => Some(&p.info),
            _ => None,
        })
    }

    /// Diagnostic tag for this resource as a whole.
    pub fn tag(&self) -> ResourceTag {
        ResourceTag {
            name: self.name.clone(),
            number: self.number,
            subsignal: None,
        }
    }

    /// Diagnostic tag for one subsignal of this resource.
    pub fn subsignal_tag(&self, subsignal: &str) -> ResourceTag {
        ResourceTag {
            name: self.name.clone(),
            number: self.number,
            subsignal: Some(subsignal.to_string()),
        }
    }
}

/// Identifies a resource, or one field of a composite resource, in
/// diagnostics and flattened constraint entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceTag {
    /// Resource name.
    pub name: String,
    /// Resource instance number, if declared.
    pub number: Option<u32>,
    /// Subsignal name when the entry refers to one field of a composite.
    pub subsignal: Option<String>,
}

impl fmt::Display for ResourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.number {
            Some(n) => write!(f, "{}:{}", self.name, n)?,
            None => write!(f, "{}:None", self.name)?,
        }
        if let Some(ref sub) = self.subsignal {
            write!(f, ".{sub}")?;
        }
        Ok(())
    }
}
