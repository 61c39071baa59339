//! `paddock-console` library crate.
//!
//! Holds the view-state store, the synchronization controller, the REPL
//! command parser, and the read-only renderer. The binary entrypoint in
//! `main.rs` only wires these together; everything here is exercised
//! directly by the integration tests.

pub mod command;
pub mod config;
pub mod controller;
pub mod render;
pub mod state;
