//! PetFolio Core - Shared types library.
//!
//! This crate provides common types used across all PetFolio components:
//! - `app` - The public web service
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. Every field constraint the web layer enforces lives here as a
//! parse-style newtype, so a constructed value is always valid.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, and pet fields

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
