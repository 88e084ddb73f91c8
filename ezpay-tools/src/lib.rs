// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Tools for releasing the EzPay contract.
//!
//! A release has two stages: deploying the compiled contract to a configured
//! network, then registering its source with an explorer so third parties can
//! check the deployed bytecode. Both stages are exposed individually, along
//! with an orchestrator that runs them in sequence.

#[macro_use]
mod macros;

pub mod core;
pub(crate) mod error;
pub mod manifest;
pub mod utils;

pub use error::{Error, Result};
