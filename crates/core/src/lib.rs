//! TaharLuxe Core - Cart, catalog, and order types.
//!
//! This crate provides the domain logic shared by the storefront:
//! - [`cart`] - The cart state manager (line identity, merge-add, visibility)
//! - [`catalog`] - Product lookup, filtering, search, and sorting
//! - [`orders`] - Orders and the dashboard order book
//! - [`types`] - Newtype wrappers for IDs, prices, and statuses
//!
//! # Architecture
//!
//! The core crate contains no I/O: no HTTP, no sessions, no files. Everything
//! is synchronous and in memory so it can be embedded in any shell.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod orders;
pub mod types;

pub use types::*;
