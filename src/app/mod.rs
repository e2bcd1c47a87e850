//! Application core — pure domain logic, zero I/O.
//!
//! The monitor's orchestration lives in [`service`]; everything it touches
//! on the outside goes through the port traits in [`ports`], which keeps
//! this layer testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
