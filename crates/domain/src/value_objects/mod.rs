//! Value Objects - Immutable, identity-less domain primitives

mod backend_kind;
mod provenance;
mod worker_id;

pub use backend_kind::BackendKind;
pub use provenance::Provenance;
pub use worker_id::WorkerId;
