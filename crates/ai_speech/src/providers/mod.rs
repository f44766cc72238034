//! Speech provider implementations

pub mod http;
