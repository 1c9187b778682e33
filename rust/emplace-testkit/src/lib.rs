//! Test utilities and helpers for the emplace crates.
//!
//! This crate provides:
//! - Hosted values that count their drops and clones, to observe exactly which
//!   lifetime operations a storage type performs
//! - Random data generation for byte-level tests
//!
//! It is intended for use as a dev-dependency only.

pub mod data_gen;
pub mod tracking;

pub use tracking::{DropCounter, Tracked};
