//! Shared test fixtures for capmatch crates.
//!
//! This crate provides problem builders and ready-made inputs for testing.
//! It depends only on `capmatch-core` so every other crate can use it.
//!
//! - [`builder`] - Fluent `ProblemBuilder` using the `Program:Topic:Level` notation
//! - [`scenarios`] - Small hand-checked problems with known outcomes
//! - [`generated`] - Seeded random problems for property tests
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! capmatch-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use capmatch_test::scenarios::{scenario_a, scenario_b};
//! use capmatch_test::generated::generate;
//! ```

pub mod builder;
pub mod generated;
pub mod scenarios;

pub use builder::ProblemBuilder;
pub use generated::{generate, GeneratorSpec};
pub use scenarios::{scenario_a, scenario_b, scenario_c};
