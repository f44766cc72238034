//! Background tasks for the HTTP presentation layer

mod worker_eviction;

pub use worker_eviction::spawn_worker_eviction_task;
