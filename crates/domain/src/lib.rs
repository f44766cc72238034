//! Domain layer for the Luz cloud gateway
//!
//! Contains the backend vocabulary (kinds, outcomes, provenance), the worker
//! entity and domain errors. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod outcome;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use outcome::{BackendOutcome, OutcomeKind};
pub use value_objects::*;
