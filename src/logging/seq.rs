//! Seq log sink
//!
//! Converts tracing events into CLEF (compact log event format) documents and
//! ships them to a Seq server in batches from a background task.
//!
//! ```text
//! tracing::info!(..) ──▶ SeqLayer::on_event ──try_send──▶ mpsc ──▶ shipper task ──POST──▶ Seq
//! ```
//!
//! The request path never waits on the sink: when the channel is full the
//! event is dropped, and delivery failures are written to stderr (writing
//! them through tracing would feed back into this layer).

use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use tokio::sync::mpsc;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

use crate::config::LogSinkConfig;

const CHANNEL_CAPACITY: usize = 4096;
const MAX_BATCH: usize = 256;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Targets emitted by the HTTP client stack while shipping a batch.
const INTERNAL_TARGETS: [&str; 5] = ["reqwest", "hyper", "hyper_util", "h2", "rustls"];

pub struct SeqLayer {
    tx: mpsc::Sender<Value>,
}

impl SeqLayer {
    /// Start the shipper task and return the layer feeding it.
    ///
    /// Returns `None` when called outside a tokio runtime.
    pub fn spawn(config: &LogSinkConfig) -> Option<Self> {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                eprintln!("⚠️  Seq sink disabled: no tokio runtime at logging init");
                return None;
            }
        };

        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let endpoint = clef_endpoint(&config.url);
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        handle.spawn(run_shipper(client, endpoint, rx));
        Some(Self { tx })
    }
}

impl<S: Subscriber> Layer<S> for SeqLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let target = event.metadata().target();
        if INTERNAL_TARGETS
            .iter()
            .any(|prefix| target.starts_with(prefix))
        {
            return;
        }
        // Full channel: drop rather than block the caller.
        let _ = self.tx.try_send(to_clef(event));
    }
}

fn clef_endpoint(base_url: &str) -> String {
    format!("{}/api/events/raw?clef", base_url.trim_end_matches('/'))
}

fn seq_level(level: &Level) -> &'static str {
    match *level {
        Level::TRACE => "Verbose",
        Level::DEBUG => "Debug",
        Level::INFO => "Information",
        Level::WARN => "Warning",
        Level::ERROR => "Error",
    }
}

fn to_clef(event: &Event<'_>) -> Value {
    let mut visitor = ClefVisitor::default();
    event.record(&mut visitor);

    let meta = event.metadata();
    let mut doc = visitor.fields;
    doc.insert(
        "@t".to_string(),
        Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)),
    );
    doc.insert(
        "@m".to_string(),
        Value::String(visitor.message.unwrap_or_default()),
    );
    doc.insert(
        "@l".to_string(),
        Value::String(seq_level(meta.level()).to_string()),
    );
    doc.insert(
        "target".to_string(),
        Value::String(meta.target().to_string()),
    );
    Value::Object(doc)
}

#[derive(Default)]
struct ClefVisitor {
    message: Option<String>,
    fields: Map<String, Value>,
}

impl ClefVisitor {
    fn insert(&mut self, field: &Field, value: Value) {
        if field.name() == "message" {
            self.message = Some(match value {
                Value::String(s) => s,
                other => other.to_string(),
            });
        } else {
            self.fields.insert(field.name().to_string(), value);
        }
    }
}

impl Visit for ClefVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.insert(field, Value::String(format!("{:?}", value)));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, Value::String(value.to_string()));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, Value::Bool(value));
    }
}

async fn run_shipper(client: reqwest::Client, endpoint: String, mut rx: mpsc::Receiver<Value>) {
    let mut batch: Vec<Value> = Vec::with_capacity(MAX_BATCH);

    while let Some(first) = rx.recv().await {
        batch.push(first);
        while batch.len() < MAX_BATCH {
            match rx.try_recv() {
                Ok(doc) => batch.push(doc),
                Err(_) => break,
            }
        }

        let body = batch
            .drain(..)
            .map(|doc| doc.to_string())
            .collect::<Vec<_>>()
            .join("\n");

        match client
            .post(&endpoint)
            .header(reqwest::header::CONTENT_TYPE, "application/vnd.serilog.clef")
            .body(body)
            .send()
            .await
        {
            Ok(resp) if resp.status().is_success() => {}
            Ok(resp) => eprintln!("Seq sink rejected batch: HTTP {}", resp.status()),
            Err(e) => eprintln!("Seq sink delivery failed: {}", e),
        }
    }
}
