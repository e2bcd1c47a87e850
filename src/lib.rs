//! Firewatch firmware library.
//!
//! Temperature and fire-hazard monitor: debounced operator inputs, a
//! three-tier status classifier, an escalating alert sequencer and a
//! one-shot alarm report latch.
//!
//! Exposes the pure-logic modules for integration testing. All
//! ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module.

#![deny(unused_must_use)]

pub mod alert;
pub mod app;
pub mod classifier;
pub mod config;
pub mod debounce;
pub mod display;
pub mod error;
pub mod inputs;
pub mod pins;
pub mod report;
pub mod status;

pub mod adapters;
pub mod drivers;
pub mod sensors;
