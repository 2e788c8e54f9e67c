//! # sim_host
//!
//! Minimal host runtime for actor components.
//!
//! This crate provides:
//!
//! - [`actor`] — lightweight `u64` actor identifiers and their allocator.
//! - [`component`] — the [`ActorComponent`] lifecycle contract and the
//!   [`HostContext`] handed to every hook.
//! - [`host`] — the [`Host`] that owns components, drives begin/end play,
//!   and pumps HTTP completions back to them on the main thread.

pub mod actor;
pub mod component;
pub mod host;

pub use actor::{ActorId, ActorIdAllocator};
pub use component::{ActorComponent, HostContext};
pub use host::Host;
