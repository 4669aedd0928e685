//! Constraint flattening: one entry per elementary signal, with its resolved
//! pin list and non-pin attributes.

use boardio_model::{ConstraintElement, IoSignal, PinIdentifier, Pins, Resource, ResourceTag, Signal};
use serde::Serialize;

use crate::connectors::ConnectorTable;
use crate::error::{EngineError, Result};

/// The flattened constraints of one elementary signal, ready for a
/// constraint-file emitter.
#[derive(Debug, Clone, Serialize)]
pub struct SignalConstraint {
    /// The elementary signal this entry constrains (a scalar resource's
    /// signal, or one record field).
    pub signal: Signal,
    /// Resolved pin list, in bit order. No-connects are kept in place;
    /// attribute-only entries have an empty list.
    pub pins: Vec<PinIdentifier>,
    /// Non-pin constraints: the resource's shared attributes plus, for a
    /// record field, the subsignal's own attributes.
    pub others: Vec<ConstraintElement>,
    /// Which resource (and subsignal, if any) produced this entry.
    pub tag: ResourceTag,
}

/// Split a constraint list into its pin list and its attributes.
///
/// `PlatformInfo` is dropped here: it is stamped onto the allocated signal
/// at request time and is not a constraint. Shape inference has already
/// rejected duplicate pin lists.
fn separate_pins(constraints: &[ConstraintElement]) -> (Option<&Pins>, Vec<ConstraintElement>) {
    let mut pins = None;
    let mut others = Vec::new();
    for c in constraints {
        match c {
            ConstraintElement::Pins(p) => pins = pins.or(Some(p)),
            ConstraintElement::Subsignal(_) | ConstraintElement::PlatformInfo(_) => {}
            other => others.push(other.clone()),
        }
    }
    (pins, others)
}

fn resolve_pins(
    pins: Option<&Pins>,
    connectors: &ConnectorTable,
) -> Result<Vec<PinIdentifier>> {
    match pins {
        Some(pins) => connectors.resolve_many(&pins.identifiers),
        None => Ok(Vec::new()),
    }
}

/// Flatten matched resources into per-elementary-signal constraint entries.
///
/// Entries appear in request order; within a composite resource, subsignals
/// keep their declaration order. The connector table is only read.
pub fn flatten(
    matched: &[(Resource, IoSignal)],
    connectors: &ConnectorTable,
) -> Result<Vec<SignalConstraint>> {
    let mut entries = Vec::new();

    for (resource, signal) in matched {
        match signal {
            IoSignal::Record(record) => {
                let (_, shared) = separate_pins(&resource.constraints);
                for sub in resource.subsignals() {
                    // The field exists whenever the signal was allocated from
                    // this descriptor's shape.
                    let field = record.field(&sub.name).ok_or_else(|| {
                        EngineError::Model(boardio_model::ModelError::MalformedResource {
                            tag: resource.subsignal_tag(&sub.name),
                            detail: "signal has no record field for this subsignal".to_string(),
                        })
                    })?;
                    let (pins, own) = separate_pins(&sub.constraints);
                    let mut others = shared.clone();
                    others.extend(own);
                    entries.push(SignalConstraint {
                        signal: field.clone(),
                        pins: resolve_pins(pins, connectors)?,
                        others,
                        tag: resource.subsignal_tag(&sub.name),
                    });
                }
            }
            IoSignal::Scalar(scalar) => {
                let (pins, others) = separate_pins(&resource.constraints);
                entries.push(SignalConstraint {
                    signal: scalar.clone(),
                    pins: resolve_pins(pins, connectors)?,
                    others,
                    tag: resource.tag(),
                });
            }
        }
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::ResourcePool;
    use boardio_model::{ConnectorDecl, Drive, IoStandard, PlatformInfo, Subsignal};

    fn pin(s: &str) -> PinIdentifier {
        PinIdentifier::Pin(s.to_string())
    }

    #[test]
    fn scalar_entry_resolves_through_connector() {
        let mut connectors = ConnectorTable::new();
        connectors
            .add_connectors(vec![ConnectorDecl::ordered("J1", &["P1 P2 None P4"])])
            .unwrap();

        let mut pool = ResourcePool::new(vec![Resource::new(
            "led",
            Some(0),
            vec![Pins::new("J1:0 J1:3").into()],
        )]);
        pool.request("led", None).unwrap();

        let entries = flatten(pool.matched(), &connectors).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].pins, vec![pin("P1"), pin("P4")]);
        assert_eq!(entries[0].tag.to_string(), "led:0");
    }

    #[test]
    fn cardinality_one_scalar_plus_two_field_record() {
        let connectors = ConnectorTable::new();
        let mut pool = ResourcePool::new(vec![
            Resource::new("clk", None, vec![Pins::new("E3").into()]),
            Resource::new(
                "serial",
                Some(0),
                vec![
                    Subsignal::new("tx", vec![Pins::new("D10").into()]).into(),
                    Subsignal::new("rx", vec![Pins::new("A9").into()]).into(),
                ],
            ),
        ]);
        pool.request("clk", None).unwrap();
        pool.request("serial", None).unwrap();

        let entries = flatten(pool.matched(), &connectors).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].tag.to_string(), "serial:0.tx");
        assert_eq!(entries[2].tag.to_string(), "serial:0.rx");
    }

    #[test]
    fn shared_attributes_apply_to_every_field() {
        let connectors = ConnectorTable::new();
        let mut pool = ResourcePool::new(vec![Resource::new(
            "serial",
            Some(0),
            vec![
                IoStandard::new("LVCMOS33").into(),
                Subsignal::new("tx", vec![Pins::new("D10").into(), Drive::new("8").into()]).into(),
                Subsignal::new("rx", vec![Pins::new("A9").into()]).into(),
            ],
        )]);
        pool.request("serial", None).unwrap();

        let entries = flatten(pool.matched(), &connectors).unwrap();
        // tx gets the shared IoStandard plus its own Drive, rx only the shared.
        assert_eq!(entries[0].others.len(), 2);
        assert_eq!(
            entries[0].others[0],
            ConstraintElement::from(IoStandard::new("LVCMOS33"))
        );
        assert_eq!(entries[0].others[1], ConstraintElement::from(Drive::new("8")));
        assert_eq!(entries[1].others.len(), 1);
    }

    #[test]
    fn platform_info_is_not_an_attribute() {
        let connectors = ConnectorTable::new();
        let mut pool = ResourcePool::new(vec![Resource::new(
            "clk",
            None,
            vec![Pins::new("E3").into(), PlatformInfo::new("xc7").into()],
        )]);
        let sig = pool.request("clk", None).unwrap();
        assert_eq!(sig.platform_info(), Some(&serde_json::json!("xc7")));

        let entries = flatten(pool.matched(), &connectors).unwrap();
        assert!(entries[0].others.is_empty());
    }

    #[test]
    fn attribute_only_field_gets_empty_pin_list() {
        let connectors = ConnectorTable::new();
        let mut pool = ResourcePool::new(vec![Resource::new(
            "eth",
            None,
            vec![
                Subsignal::new("mdio", vec![Pins::new("F16").into()]).into(),
                Subsignal::new("rst", vec![IoStandard::new("LVCMOS25").into()]).into(),
            ],
        )]);
        pool.request("eth", None).unwrap();

        let entries = flatten(pool.matched(), &connectors).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[1].pins.is_empty());
        assert_eq!(entries[1].others.len(), 1);
    }
}
