//! Board description vocabulary for the boardio constraint engine.
//!
//! A board is described in-memory as a list of [`Resource`]s (named,
//! numbered, allocatable I/O interface points with their electrical and pin
//! constraints) and a list of [`ConnectorDecl`]s (named headers/slots whose
//! entries may alias other connectors). The engine crate consumes this
//! vocabulary; nothing here is parsed from a serialized format.

pub mod connector;
pub mod constraint;
pub mod error;
pub mod resource;
pub mod shape;
pub mod signal;

pub use connector::{ConnectorDecl, PinIdentifier, PinListForm};
pub use constraint::{ConstraintElement, Drive, IoStandard, Misc, Pins, PlatformInfo, Subsignal};
pub use error::ModelError;
pub use resource::{Resource, ResourceTag};
pub use shape::{infer_shape, RecordField, Shape};
pub use signal::{IoSignal, RecordSignal, Signal, SignalId};
