//! The simulation client component: lifecycle wiring, request dispatch,
//! and response handling.

use serde_json::{Map, Value};
use tracing::warn;

use sim_host::{ActorComponent, HostContext};
use sim_http::{Completion, HttpRequest};

use crate::event::StateUpdated;

/// Origin a freshly constructed component targets.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

const LOAD_ENDPOINT: &str = "/load";
const SAVE_ENDPOINT: &str = "/save";
const TICK_ENDPOINT: &str = "/tick";
const EMPTY_BODY: &str = "{}";

/// Thin HTTP client for an external simulation server, attached to a game
/// actor.
///
/// On begin play the component POSTs `/load`; on end play `/save`; game
/// code delivers `/tick` events at any time. All three are fire-and-forget:
/// nothing is surfaced synchronously to the caller, and there is no retry.
/// Every successful reply body is rebroadcast verbatim on
/// [`state_updated`](Self::state_updated) before the component parses it
/// for its own use, so subscribers see even payloads that are not JSON.
///
/// Overlapping requests complete in any order; callers that need
/// save-then-load sequencing must serialise the calls themselves.
#[derive(Debug)]
pub struct SimClientComponent {
    /// Target origin, `scheme://host[:port]`. Mutable from scripting.
    base_url: String,
    /// Multicast event carrying raw reply text.
    state_updated: StateUpdated,
    /// Last successfully parsed reply object. Never exposed to scripting.
    sim_state: Option<Map<String, Value>>,
}

impl SimClientComponent {
    /// Create a component targeting [`DEFAULT_BASE_URL`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a component targeting the given origin.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            state_updated: StateUpdated::new(),
            sim_state: None,
        }
    }

    /// The origin requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Point the component at a different origin.
    ///
    /// Affects only requests dispatched afterwards; requests already in
    /// flight keep their original URL.
    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = base_url.into();
    }

    /// The state-updated event; subscribe here for raw reply text.
    pub fn state_updated(&mut self) -> &mut StateUpdated {
        &mut self.state_updated
    }

    /// Last reply that parsed as a non-empty JSON object.
    ///
    /// Replaced wholesale on each qualifying reply; `None` until the first
    /// one arrives. Scripting never sees this tree — it receives raw text
    /// through [`state_updated`](Self::state_updated) only.
    #[must_use]
    pub fn sim_state(&self) -> Option<&Map<String, Value>> {
        self.sim_state.as_ref()
    }

    /// POST `{base}/load` with an empty JSON object body.
    ///
    /// Issued automatically on begin play.
    pub fn load(&self, ctx: &HostContext<'_>) {
        self.send_post(ctx, LOAD_ENDPOINT, EMPTY_BODY.to_string());
    }

    /// POST `{base}/save` with an empty JSON object body.
    ///
    /// Issued automatically on end play.
    pub fn save(&self, ctx: &HostContext<'_>) {
        self.send_post(ctx, SAVE_ENDPOINT, EMPTY_BODY.to_string());
    }

    /// POST `{base}/tick` with body `{"event":"<event>","params":<params_json>}`.
    ///
    /// `event` is escaped for embedding in a JSON string. `params_json` must
    /// already be serialised JSON and is inlined verbatim — the caller owns
    /// its validity and the server rejects malformed bodies. Scripting
    /// callers go through [`call`](Self::call) instead, which serialises a
    /// structured value.
    pub fn tick(&self, ctx: &HostContext<'_>, event: &str, params_json: &str) {
        let body = format!(
            r#"{{"event":"{}","params":{}}}"#,
            escape_json_string(event),
            params_json
        );
        self.send_post(ctx, TICK_ENDPOINT, body);
    }

    fn send_post(&self, ctx: &HostContext<'_>, endpoint: &str, body: String) {
        if self.base_url.is_empty() {
            warn!(endpoint, "base URL is empty, dropping request");
            return;
        }
        let url = format!("{}{}", self.base_url, endpoint);
        ctx.dispatch(HttpRequest::post(url, body));
    }

    fn handle_response(&mut self, completion: Completion) {
        let response = match (completion.success, completion.response) {
            (true, Some(response)) => response,
            _ => {
                warn!(url = %completion.request.url, "simulation request failed");
                return;
            }
        };

        let text = response.text();
        // Subscribers get the exact body first; parsing never delays or
        // filters the broadcast.
        self.state_updated.broadcast(&text);

        if let Ok(Value::Object(state)) = serde_json::from_str(&text) {
            if !state.is_empty() {
                self.sim_state = Some(state);
            }
        }
    }
}

impl ActorComponent for SimClientComponent {
    fn on_begin_play(&mut self, ctx: &HostContext<'_>) {
        self.load(ctx);
    }

    fn on_end_play(&mut self, ctx: &HostContext<'_>) {
        self.save(ctx);
    }

    fn on_http_complete(&mut self, _ctx: &HostContext<'_>, completion: Completion) {
        self.handle_response(completion);
    }
}

impl Default for SimClientComponent {
    fn default() -> Self {
        Self::new()
    }
}

/// Escape `s` for embedding inside a JSON string literal.
pub(crate) fn escape_json_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                use std::fmt::Write;
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;

    use sim_host::Host;
    use sim_http::{CONTENT_TYPE_JSON, ScriptedTransport};

    use super::*;

    fn scripted_host() -> (Arc<ScriptedTransport>, Host) {
        let transport = Arc::new(ScriptedTransport::new());
        let host = Host::new(transport.clone());
        (transport, host)
    }

    /// Component with a subscriber collecting every broadcast payload.
    fn observed_component() -> (Rc<RefCell<Vec<String>>>, SimClientComponent) {
        let received = Rc::new(RefCell::new(Vec::new()));
        let mut component = SimClientComponent::new();
        let sink = received.clone();
        component
            .state_updated()
            .subscribe(move |payload| sink.borrow_mut().push(payload.to_string()));
        (received, component)
    }

    #[test]
    fn test_escape_json_string() {
        assert_eq!(escape_json_string("player_chat"), "player_chat");
        assert_eq!(escape_json_string(r#"he said "hi""#), r#"he said \"hi\""#);
        assert_eq!(escape_json_string("a\\b"), "a\\\\b");
        assert_eq!(escape_json_string("line\nbreak"), "line\\nbreak");
        assert_eq!(escape_json_string("\u{1}"), "\\u0001");
    }

    #[tokio::test]
    async fn test_begin_play_posts_load() {
        let (transport, mut host) = scripted_host();
        transport.push_response(200, r#"{"state":{}}"#);

        host.spawn(SimClientComponent::new());

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "http://127.0.0.1:8000/load");
        assert_eq!(requests[0].body, "{}");
        assert_eq!(requests[0].content_type, CONTENT_TYPE_JSON);
    }

    #[tokio::test]
    async fn test_end_play_posts_save() {
        let (transport, mut host) = scripted_host();
        transport.push_response(200, r#"{"state":{}}"#);
        transport.push_response(200, r#"{"status":"ok"}"#);

        let id = host.spawn(SimClientComponent::new());
        host.run_until_idle().await;
        host.despawn(id);

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].url, "http://127.0.0.1:8000/save");
        assert_eq!(requests[1].body, "{}");
    }

    #[tokio::test]
    async fn test_tick_body_shape() {
        let (transport, mut host) = scripted_host();
        transport.push_response(200, "{}");
        transport.push_response(200, "{}");

        let id = host.spawn(SimClientComponent::new());
        host.with_component_mut::<SimClientComponent, _>(id, |c, ctx| {
            c.tick(ctx, "player_chat", r#"{"text":"hi"}"#);
        });

        let requests = transport.requests();
        assert_eq!(requests[1].url, "http://127.0.0.1:8000/tick");
        assert_eq!(
            requests[1].body,
            r#"{"event":"player_chat","params":{"text":"hi"}}"#
        );

        // The body is a JSON object with exactly the two expected keys.
        let parsed: Value = serde_json::from_str(&requests[1].body).unwrap();
        let object = parsed.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object["event"], "player_chat");
        assert_eq!(object["params"]["text"], "hi");
    }

    #[tokio::test]
    async fn test_tick_escapes_quotes_in_event() {
        let (transport, mut host) = scripted_host();
        transport.push_response(200, "{}");
        transport.push_response(200, "{}");

        let id = host.spawn(SimClientComponent::new());
        host.with_component_mut::<SimClientComponent, _>(id, |c, ctx| {
            c.tick(ctx, r#"he said "hi""#, "{}");
        });

        let body = &transport.requests()[1].body;
        let parsed: Value = serde_json::from_str(body).unwrap();
        assert_eq!(parsed["event"], r#"he said "hi""#);
    }

    #[tokio::test]
    async fn test_object_reply_broadcasts_then_replaces_state() {
        let (transport, mut host) = scripted_host();
        transport.push_response(200, r#"{"hp":10}"#);

        let (received, component) = observed_component();
        let id = host.spawn(component);
        host.run_until_idle().await;

        assert_eq!(received.borrow().as_slice(), [r#"{"hp":10}"#]);
        let state = host
            .component::<SimClientComponent>(id)
            .unwrap()
            .sim_state()
            .unwrap();
        assert_eq!(state["hp"], 10);
    }

    #[tokio::test]
    async fn test_malformed_reply_broadcasts_and_keeps_state() {
        let (transport, mut host) = scripted_host();
        transport.push_response(200, r#"{"hp":10}"#);
        transport.push_response(200, "not json");

        let (received, component) = observed_component();
        let id = host.spawn(component);
        host.run_until_idle().await;

        host.with_component_mut::<SimClientComponent, _>(id, |c, ctx| {
            c.tick(ctx, "noop", "{}");
        });
        host.run_until_idle().await;

        // Subscribers saw the raw text; the held state is untouched.
        assert_eq!(received.borrow().as_slice(), [r#"{"hp":10}"#, "not json"]);
        let state = host
            .component::<SimClientComponent>(id)
            .unwrap()
            .sim_state()
            .unwrap();
        assert_eq!(state["hp"], 10);
    }

    #[tokio::test]
    async fn test_non_object_reply_keeps_state() {
        let (transport, mut host) = scripted_host();
        transport.push_response(200, r#"{"hp":10}"#);
        transport.push_response(200, "[1,2,3]");
        transport.push_response(200, "{}");

        let (received, component) = observed_component();
        let id = host.spawn(component);
        host.run_until_idle().await;

        host.with_component_mut::<SimClientComponent, _>(id, |c, ctx| {
            c.tick(ctx, "a", "{}");
            c.tick(ctx, "b", "{}");
        });
        host.run_until_idle().await;

        // Arrays and empty objects broadcast but never replace the tree.
        assert_eq!(received.borrow().len(), 3);
        let state = host
            .component::<SimClientComponent>(id)
            .unwrap()
            .sim_state()
            .unwrap();
        assert_eq!(state["hp"], 10);
    }

    #[tokio::test]
    async fn test_transport_failure_notifies_nobody() {
        let (transport, mut host) = scripted_host();
        transport.push_failure("connection dropped");

        let (received, component) = observed_component();
        let id = host.spawn(component);
        host.run_until_idle().await;

        assert!(received.borrow().is_empty());
        assert!(
            host.component::<SimClientComponent>(id)
                .unwrap()
                .sim_state()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_custom_base_url_is_used() {
        let (transport, mut host) = scripted_host();
        transport.push_response(200, "{}");

        host.spawn(SimClientComponent::with_base_url("http://sim.local:9000"));
        assert_eq!(transport.requests()[0].url, "http://sim.local:9000/load");
    }

    #[tokio::test]
    async fn test_empty_base_url_refuses_dispatch() {
        let (transport, mut host) = scripted_host();

        let id = host.spawn(SimClientComponent::with_base_url(""));
        host.with_component_mut::<SimClientComponent, _>(id, |c, ctx| {
            c.tick(ctx, "noop", "{}");
        });

        assert!(transport.requests().is_empty());
        assert_eq!(host.http().pending(), 0);
    }
}
