//! Component lifecycle contract and the per-call host context.

use std::any::Any;

use sim_http::{Completion, HandlerId, HttpFacility, HttpRequest};

/// The contract every actor-attached component satisfies.
///
/// All hooks run on the host's main thread, so implementations need no
/// internal synchronisation. `Any` is a supertrait so the host can hand the
/// concrete component type back to game code.
pub trait ActorComponent: Any {
    /// Called exactly once, when the owning actor is spawned.
    fn on_begin_play(&mut self, ctx: &HostContext<'_>) {
        let _ = ctx;
    }

    /// Called exactly once, when the owning actor is despawned and before
    /// the component is dropped.
    fn on_end_play(&mut self, ctx: &HostContext<'_>) {
        let _ = ctx;
    }

    /// Delivered when a request this component dispatched completes.
    ///
    /// Never fires after the component is dropped — completions that outlive
    /// their component are discarded by the host.
    fn on_http_complete(&mut self, ctx: &HostContext<'_>, completion: Completion) {
        let _ = (ctx, completion);
    }
}

/// Facility access scoped to one component's binding identity.
///
/// Handed to every lifecycle hook and to component operations invoked
/// through the host, so every dispatch is tagged with the right handler.
#[derive(Debug)]
pub struct HostContext<'a> {
    http: &'a HttpFacility,
    handler: HandlerId,
}

impl<'a> HostContext<'a> {
    /// Build a context bound to `handler`.
    #[must_use]
    pub fn new(http: &'a HttpFacility, handler: HandlerId) -> Self {
        Self { http, handler }
    }

    /// The binding identity completions for this component will carry.
    #[must_use]
    pub fn handler(&self) -> HandlerId {
        self.handler
    }

    /// Hand a request to the HTTP facility, bound to this component.
    ///
    /// Non-blocking; the completion is delivered later through
    /// [`ActorComponent::on_http_complete`].
    pub fn dispatch(&self, request: HttpRequest) {
        self.http.dispatch(self.handler, request);
    }
}
