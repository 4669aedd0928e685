//! Shape inference: deciding whether a resource allocates a flat bit vector
//! or a composite record of named fields.

use serde::{Deserialize, Serialize};

use crate::constraint::ConstraintElement;
use crate::error::ModelError;
use crate::resource::Resource;

/// One field of a record shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordField {
    /// Field name, from the subsignal declaration.
    pub name: String,
    /// Bit width from the subsignal's pin list; `None` when the subsignal
    /// carries attributes only (legal but unusual).
    pub width: Option<usize>,
}

/// The inferred structural shape of a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    /// A flat bit vector of the given width.
    Scalar { width: usize },
    /// A record of named fields with independent widths, in declaration
    /// order. Records never nest.
    Record { fields: Vec<RecordField> },
}

/// Infer the shape of `resource` from its constraint list.
///
/// A single top-level `Pins` makes the resource scalar; one or more
/// `Subsignal`s make it a record. Anything else breaks the constraint
/// grammar and is reported as [`ModelError::MalformedResource`].
pub fn infer_shape(resource: &Resource) -> Result<Shape, ModelError> {
    let malformed = |detail: &str| ModelError::MalformedResource {
        tag: resource.tag(),
        detail: detail.to_string(),
    };

    let mut width: Option<usize> = None;
    let mut fields: Vec<RecordField> = Vec::new();

    for element in &resource.constraints {
        match element {
            ConstraintElement::Pins(pins) => {
                if width.is_some() {
                    return Err(malformed("more than one top-level pin list"));
                }
                width = Some(pins.len());
            }
            ConstraintElement::Subsignal(sub) => {
                let mut sub_width: Option<usize> = None;
                for c in &sub.constraints {
                    match c {
                        ConstraintElement::Pins(pins) => {
                            if sub_width.is_some() {
                                return Err(ModelError::MalformedResource {
                                    tag: resource.subsignal_tag(&sub.name),
                                    detail: "more than one pin list in subsignal".to_string(),
                                });
                            }
                            sub_width = Some(pins.len());
                        }
                        ConstraintElement::Subsignal(_) => {
                            return Err(ModelError::MalformedResource {
                                tag: resource.subsignal_tag(&sub.name),
                                detail: "nested subsignal".to_string(),
                            });
                        }
                        _ => {}
                    }
                }
                fields.push(RecordField {
                    name: sub.name.clone(),
                    width: sub_width,
                });
            }
            _ => {}
        }
    }

    match (width, fields.is_empty()) {
        (Some(_), false) => Err(malformed("top-level pin list mixed with subsignals")),
        (Some(width), true) => Ok(Shape::Scalar { width }),
        (None, false) => Ok(Shape::Record { fields }),
        (None, true) => Err(malformed("no pin list and no subsignals")),
    }
}
