//! Matjar Core - Shared types library.
//!
//! This crate provides the common types used by the matjar API:
//! type-safe IDs, validated email addresses, access roles, and the
//! order status enum.
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP. This keeps it lightweight and allows it to be used anywhere.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
