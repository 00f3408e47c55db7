use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::oneshot;
use tracing::instrument;

use crate::Status;

/// A single way of getting JSON out of the catalog endpoint. Transports are
/// attempted in order by `CatalogApi` and any failure falls through to the
/// next one in the chain.
#[async_trait]
pub trait Transport: Send + Sync {
    fn id(&self) -> &'static str;

    async fn get(&self, url: &str) -> Result<Value, Status>;
}

/// Plain cross-origin GET, the preferred path when the endpoint answers with
/// bare JSON.
pub struct DirectTransport;

#[async_trait]
impl Transport for DirectTransport {
    fn id(&self) -> &'static str {
        "direct"
    }

    #[instrument(level = "trace", skip(self))]
    async fn get(&self, url: &str) -> Result<Value, Status> {
        let resp = reqwest::get(url).await?;
        if !resp.status().is_success() {
            return Err(Status::internal(format!(
                "HTTP {} from catalog endpoint: {url}",
                resp.status()
            )));
        }

        let text = resp.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| Status::internal(format!("Malformed catalog response: {e}")))
    }
}

/// Workaround for endpoints that can only emit script output. The request
/// carries a generated callback name and the response body must be the
/// literal invocation `NAME({...})`. Payloads are routed back through a
/// process-wide registry keyed by callback name, so overlapping requests
/// never pick up each other's responses.
pub struct CallbackTransport;

#[async_trait]
impl Transport for CallbackTransport {
    fn id(&self) -> &'static str {
        "callback"
    }

    #[instrument(level = "trace", skip(self))]
    async fn get(&self, url: &str) -> Result<Value, Status> {
        let slot = CallbackSlot::register();
        let url = format!("{url}&callback={}", slot.name());

        match tokio::time::timeout(CALLBACK_DEADLINE, round_trip(&url, slot)).await {
            Ok(result) => result,
            Err(_) => Err(Status::deadline_exceeded(format!(
                "No callback invocation within {}s: {url}",
                CALLBACK_DEADLINE.as_secs()
            ))),
        }
    }
}

async fn round_trip(url: &str, slot: CallbackSlot) -> Result<Value, Status> {
    let resp = reqwest::get(url).await?;
    if !resp.status().is_success() {
        return Err(Status::internal(format!(
            "HTTP {} from catalog endpoint: {url}",
            resp.status()
        )));
    }

    let text = resp.text().await?;
    let (name, payload) = parse_invocation(&text)?;
    dispatch(&name, payload);

    // Resolves only if the invocation addressed this request's callback.
    // A foreign name leaves the slot pending until the deadline expires.
    slot.wait().await
}

lazy_static::lazy_static! {
    static ref PENDING_CALLBACKS: Mutex<HashMap<String, oneshot::Sender<Value>>> =
        Mutex::new(HashMap::new());
}

static NEXT_CALLBACK: AtomicU64 = AtomicU64::new(0);

/// Scoped registration in the process-wide callback namespace. Names are
/// unique by construction and the entry is removed on every exit path,
/// including timeout, when the slot is dropped.
struct CallbackSlot {
    name: String,
    receiver: Option<oneshot::Receiver<Value>>,
}

impl CallbackSlot {
    fn register() -> Self {
        let name = format!(
            "jsonp_callback_{}",
            NEXT_CALLBACK.fetch_add(1, Ordering::Relaxed)
        );

        let (sender, receiver) = oneshot::channel();
        PENDING_CALLBACKS
            .lock()
            .unwrap()
            .insert(name.clone(), sender);

        CallbackSlot {
            name,
            receiver: Some(receiver),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    async fn wait(mut self) -> Result<Value, Status> {
        let receiver = self.receiver.take().unwrap();
        match receiver.await {
            Ok(payload) => Ok(payload),
            Err(_) => Err(Status::internal(format!(
                "Callback registration vanished: {}",
                self.name
            ))),
        }
    }
}

impl Drop for CallbackSlot {
    fn drop(&mut self) {
        PENDING_CALLBACKS.lock().unwrap().remove(&self.name);
    }
}

/// Routes a parsed payload to the request that registered `name`. Returns
/// false when no such registration exists (stale or foreign callback).
fn dispatch(name: &str, payload: Value) -> bool {
    match PENDING_CALLBACKS.lock().unwrap().remove(name) {
        Some(sender) => sender.send(payload).is_ok(),
        None => false,
    }
}

use lazy_static::lazy_static;
use regex::Regex;

fn parse_invocation(body: &str) -> Result<(String, Value), Status> {
    lazy_static! {
        static ref RE: Regex =
            Regex::new(r"(?s)^\s*(?P<name>[\w$]+)\s*\((?P<payload>.*)\)\s*;?\s*$").unwrap();
    }

    let captures = RE
        .captures(body)
        .ok_or_else(|| Status::internal(format!("Not a callback invocation: {body}")))?;

    let payload = serde_json::from_str(&captures["payload"])
        .map_err(|e| Status::internal(format!("Malformed callback payload: {e}")))?;

    Ok((captures["name"].to_owned(), payload))
}

const CALLBACK_DEADLINE: Duration = Duration::from_secs(10);
