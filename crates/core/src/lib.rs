//! Core library for numfacts
//!
//! This crate implements the **Functional Core** of the numfacts application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`numfacts_core`** (this crate): Pure number classification with zero I/O
//! - **`numfacts`**: HTTP server, remote fact lookups and the CLI (the Imperative Shell)
//!
//! Everything here is deterministic. The one place randomness enters, picking a
//! local fun fact, goes through the [`facts::Picker`] trait so the shell decides
//! where it comes from.
//!
//! # Module Organization
//!
//! - [`primitives`]: Integer predicates (parity, primality, Fibonacci, factors, ...)
//! - [`classify`]: Property record, tag list and emoji for one number
//! - [`facts`]: Local fun-fact templates used when no remote fact is available
//!
//! # Example Usage
//!
//! ```rust
//! use numfacts_core::classify::{classify, Tag};
//!
//! let result = classify(28).unwrap();
//!
//! assert!(result.has_tag(Tag::PerfectNumber));
//! assert_eq!(result.properties.factors, vec![1, 2, 4, 7, 14, 28]);
//! ```

pub mod classify;
mod error;
pub mod facts;
pub mod primitives;

pub use error::Error;
