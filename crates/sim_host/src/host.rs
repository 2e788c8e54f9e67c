//! The host: owns components, drives lifecycle hooks, pumps completions.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use sim_http::{Completion, HandlerId, HttpFacility, Transport};

use crate::actor::{ActorId, ActorIdAllocator};
use crate::component::{ActorComponent, HostContext};

/// A single-threaded cooperative host for actor components.
///
/// All lifecycle hooks and completion handlers run on the thread that calls
/// [`Host::spawn`], [`Host::despawn`] and [`Host::pump`]; only the HTTP
/// facility's transport work happens off-thread.
pub struct Host {
    http: HttpFacility,
    ids: ActorIdAllocator,
    components: HashMap<ActorId, Box<dyn ActorComponent>>,
}

impl Host {
    /// Create a host whose components dispatch through `transport`.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            http: HttpFacility::new(transport),
            ids: ActorIdAllocator::new(),
            components: HashMap::new(),
        }
    }

    /// Spawn an actor with `component` attached.
    ///
    /// Runs the component's begin-play hook exactly once before returning.
    pub fn spawn(&mut self, component: impl ActorComponent) -> ActorId {
        let id = self.ids.allocate();
        let mut boxed: Box<dyn ActorComponent> = Box::new(component);
        info!(actor = %id, "actor spawned");
        let ctx = HostContext::new(&self.http, Self::handler_for(id));
        boxed.on_begin_play(&ctx);
        self.components.insert(id, boxed);
        id
    }

    /// Despawn an actor.
    ///
    /// Runs the end-play hook exactly once, then drops the component.
    /// Requests still in flight keep their facility slots; their completions
    /// later find no live component and are discarded by [`Host::pump`].
    ///
    /// Returns `true` if the actor existed.
    pub fn despawn(&mut self, id: ActorId) -> bool {
        let Some(mut component) = self.components.remove(&id) else {
            return false;
        };
        let ctx = HostContext::new(&self.http, Self::handler_for(id));
        component.on_end_play(&ctx);
        info!(actor = %id, "actor despawned");
        true
    }

    /// Deliver every queued HTTP completion to its component, on the
    /// calling thread. Non-blocking.
    pub fn pump(&mut self) {
        for completion in self.http.drain() {
            self.deliver(completion);
        }
    }

    /// Deliver completions until no request is in flight.
    pub async fn run_until_idle(&mut self) {
        while self.http.pending() > 0 {
            match self.http.next_completion().await {
                Some(completion) => self.deliver(completion),
                None => break,
            }
        }
    }

    fn deliver(&mut self, completion: Completion) {
        let id = ActorId(completion.handler.0);
        match self.components.get_mut(&id) {
            Some(component) => {
                let ctx = HostContext::new(&self.http, completion.handler);
                component.on_http_complete(&ctx, completion);
            }
            None => {
                // Weak binding: the component is gone, the completion is inert.
                debug!(
                    actor = %id,
                    url = %completion.request.url,
                    "dropping completion for despawned component"
                );
            }
        }
    }

    /// Typed shared access to a live component.
    #[must_use]
    pub fn component<T: ActorComponent>(&self, id: ActorId) -> Option<&T> {
        self.components
            .get(&id)
            .and_then(|c| (c.as_ref() as &dyn Any).downcast_ref::<T>())
    }

    /// Run `f` with mutable access to a live component and a context bound
    /// to it.
    ///
    /// Returns `None` if the actor is gone or its component is not a `T`.
    pub fn with_component_mut<T, R>(
        &mut self,
        id: ActorId,
        f: impl FnOnce(&mut T, &HostContext<'_>) -> R,
    ) -> Option<R>
    where
        T: ActorComponent,
    {
        let component = self.components.get_mut(&id)?;
        let component = (component.as_mut() as &mut dyn Any).downcast_mut::<T>()?;
        let ctx = HostContext::new(&self.http, Self::handler_for(id));
        Some(f(component, &ctx))
    }

    /// The facility shared by every component on this host.
    #[must_use]
    pub fn http(&self) -> &HttpFacility {
        &self.http
    }

    /// Number of live actors.
    #[must_use]
    pub fn actor_count(&self) -> usize {
        self.components.len()
    }

    fn handler_for(id: ActorId) -> HandlerId {
        HandlerId(id.0)
    }
}
