//! Constraint elements: the building blocks of a resource description.
//!
//! A resource's constraint list mixes pin assignments ([`Pins`]), electrical
//! metadata ([`IoStandard`], [`Drive`], [`Misc`]), vendor passthrough data
//! ([`PlatformInfo`]) and named composite fields ([`Subsignal`]).

use std::fmt;

use serde::{Deserialize, Serialize};

/// An ordered list of pin identifiers.
///
/// Identifiers are either physical pin names (`"B8"`) or connector-relative
/// references (`"J1:3"`, resolved by the engine's connector table). Order is
/// significant: it defines the bit ordering of the signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pins {
    /// Pin identifiers, one per bit, LSB first.
    pub identifiers: Vec<String>,
}

impl Pins {
    /// Build a pin list from a whitespace-separated spec string.
    pub fn new(spec: &str) -> Self {
        Self::from_groups(&[spec])
    }

    /// Build a pin list from several spec strings, each split on whitespace,
    /// concatenated in argument order.
    pub fn from_groups(groups: &[&str]) -> Self {
        let identifiers = groups
            .iter()
            .flat_map(|g| g.split_whitespace())
            .map(str::to_string)
            .collect();
        Self { identifiers }
    }

    /// Number of pins (the bit width this list implies).
    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }
}

impl fmt::Display for Pins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pins('{}')", self.identifiers.join(" "))
    }
}

/// An electrical I/O standard constraint (e.g. `"LVCMOS33"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IoStandard {
    /// Standard name, passed through to the constraint emitter.
    pub name: String,
}

impl IoStandard {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for IoStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IOStandard('{}')", self.name)
    }
}

/// A drive strength constraint (e.g. `"8"` or `"quietio"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drive {
    /// Strength value, passed through to the constraint emitter.
    pub strength: String,
}

impl Drive {
    pub fn new(strength: impl Into<String>) -> Self {
        Self {
            strength: strength.into(),
        }
    }
}

impl fmt::Display for Drive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Drive('{}')", self.strength)
    }
}

/// A free-form tooling attribute, order-insensitive, may repeat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Misc {
    /// Opaque attribute payload.
    pub value: serde_json::Value,
}

impl Misc {
    pub fn new(value: impl Into<serde_json::Value>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl fmt::Display for Misc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Misc({})", self.value)
    }
}

/// Vendor metadata attached to the allocated signal.
///
/// Not a constraint: it never appears in flattened attribute lists, the
/// engine stamps it onto the signal at request time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformInfo {
    /// Opaque vendor payload.
    pub info: serde_json::Value,
}

impl PlatformInfo {
    pub fn new(info: impl Into<serde_json::Value>) -> Self {
        Self { info: info.into() }
    }
}

impl fmt::Display for PlatformInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlatformInfo({})", self.info)
    }
}

/// A named field of a composite resource, with its own constraint list.
///
/// The nested list follows the same grammar as a resource's, except that it
/// may not contain another `Subsignal`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subsignal {
    /// Field name within the composite signal.
    pub name: String,
    /// The field's own constraints (at most one `Pins`, no `Subsignal`).
    pub constraints: Vec<ConstraintElement>,
}

impl Subsignal {
    pub fn new(name: impl Into<String>, constraints: Vec<ConstraintElement>) -> Self {
        Self {
            name: name.into(),
            constraints,
        }
    }
}

impl fmt::Display for Subsignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Subsignal('{}')", self.name)
    }
}

/// One element of a resource's constraint list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintElement {
    Pins(Pins),
    IoStandard(IoStandard),
    Drive(Drive),
    Misc(Misc),
    PlatformInfo(PlatformInfo),
    Subsignal(Subsignal),
}

impl ConstraintElement {
    /// Whether this element carries electrical/tooling metadata, as opposed
    /// to pins, fields, or vendor passthrough data.
    pub fn is_attribute(&self) -> bool {
        matches!(
            self,
            ConstraintElement::IoStandard(_) | ConstraintElement::Drive(_) | ConstraintElement::Misc(_)
        )
    }
}

impl fmt::Display for ConstraintElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintElement::Pins(e) => e.fmt(f),
            ConstraintElement::IoStandard(e) => e.fmt(f),
            ConstraintElement::Drive(e) => e.fmt(f),
            ConstraintElement::Misc(e) => e.fmt(f),
            ConstraintElement::PlatformInfo(e) => e.fmt(f),
            ConstraintElement::Subsignal(e) => e.fmt(f),
        }
    }
}

impl From<Pins> for ConstraintElement {
    fn from(v: Pins) -> Self {
        ConstraintElement::Pins(v)
    }
}

impl From<IoStandard> for ConstraintElement {
    fn from(v: IoStandard) -> Self {
        ConstraintElement::IoStandard(v)
    }
}

impl From<Drive> for ConstraintElement {
    fn from(v: Drive) -> Self {
        ConstraintElement::Drive(v)
    }
}

impl From<Misc> for ConstraintElement {
    fn from(v: Misc) -> Self {
        ConstraintElement::Misc(v)
    }
}

impl From<PlatformInfo> for ConstraintElement {
    fn from(v: PlatformInfo) -> Self {
        ConstraintElement::PlatformInfo(v)
    }
}

impl From<Subsignal> for ConstraintElement {
    fn from(v: Subsignal) -> Self {
        ConstraintElement::Subsignal(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pins_split_on_whitespace() {
        let p = Pins::new("B8  C9 D10");
        assert_eq!(p.identifiers, vec!["B8", "C9", "D10"]);
        assert_eq!(p.len(), 3);
    }

    #[test]
    fn pins_from_groups_concatenates_in_order() {
        let p = Pins::from_groups(&["A1 A2", "B1"]);
        assert_eq!(p.identifiers, vec!["A1", "A2", "B1"]);
    }

    #[test]
    fn display_forms() {
        assert_eq!(Pins::new("A1 A2").to_string(), "Pins('A1 A2')");
        assert_eq!(IoStandard::new("LVCMOS33").to_string(), "IOStandard('LVCMOS33')");
        assert_eq!(Drive::new("8").to_string(), "Drive('8')");
    }

    #[test]
    fn attribute_classification() {
        assert!(ConstraintElement::from(IoStandard::new("LVCMOS33")).is_attribute());
        assert!(ConstraintElement::from(Misc::new("SLEW=FAST")).is_attribute());
        assert!(!ConstraintElement::from(Pins::new("A1")).is_attribute());
        assert!(!ConstraintElement::from(PlatformInfo::new("xc7")).is_attribute());
        assert!(!ConstraintElement::from(Subsignal::new("tx", vec![])).is_attribute());
    }
}
