//! # chathub-realtime
//!
//! In-memory broadcast chat hub. Provides:
//!
//! - Client registration with per-client outbound channels
//! - A single dispatch loop fanning messages out to all registered clients
//! - Write-failure detection with immediate membership removal
//! - Write-through archiving of every dispatched message

pub mod client;
pub mod hub;

pub use client::{ClientHandle, ClientId};
pub use hub::ChatHub;
