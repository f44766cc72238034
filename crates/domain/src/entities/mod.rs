//! Domain entities - Objects with identity and lifecycle

mod worker;

pub use worker::WorkerRecord;
