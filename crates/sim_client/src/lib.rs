//! # sim_client
//!
//! Thin HTTP client component for an external simulation server.
//!
//! The component attaches to a game actor and issues three POST requests:
//! `/load` on begin play, `/save` on end play, and `/tick` whenever game
//! code delivers an event. Every successful reply body is rebroadcast
//! verbatim to subscribers before the component parses it for its own use.
//!
//! This crate provides:
//!
//! - [`component`] — the [`SimClientComponent`] lifecycle wiring, request
//!   dispatch, and response handling.
//! - [`event`] — the [`StateUpdated`] multicast subscribers attach to.
//! - [`script`] — the declarative scripting-surface metadata and the
//!   string-keyed property/call entry points.

pub mod component;
pub mod event;
pub mod script;

pub use component::{DEFAULT_BASE_URL, SimClientComponent};
pub use event::{StateUpdated, SubscriberId};
pub use script::{
    ClassMeta, EventMeta, FunctionMeta, PropertyMeta, SIM_CLIENT_CLASS, ScriptError,
};
