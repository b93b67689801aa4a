//! Session facade with automatic structural change detection
//!
//! A [`SchemaSession`] remembers the descriptor of the last payload it
//! parsed. Every parse extracts the new descriptor, compares it with the
//! remembered one, notifies the registered listener when anything changed,
//! and then remembers the new descriptor.
//!
//! ```text
//!   Empty ──parse──▶ Populated ──parse──▶ Populated
//!     ▲                  │
//!     └──reset_cache─────┘
//! ```
//!
//! The whole extract → compare → notify → replace step runs under one
//! exclusive lock, so a shared session never exposes a half-updated cache
//! and never skips or duplicates a notification.

use parking_lot::Mutex;
use std::{fmt, sync::Arc};

use crate::{
    config::{DetectionConfig, ParseOptions},
    diff::{self, has_breaking_changes},
    domain::{JsonNode, SchemaChange, SchemaDescriptor},
    error::Result,
    infrastructure::{SchemaStore, namespaced_key},
    parser::{JsonParser, RawInput, extract_schema},
};

/// Receiver of detected structural changes
///
/// Called while the session lock is held: implementations must not call
/// back into the same session. Formatting the session with `{:?}` is the
/// one exception and reports the state as locked.
pub trait SchemaChangeListener: Send + Sync {
    /// Handle a non-empty, ordered list of changes
    fn on_schema_change(&self, changes: &[SchemaChange]);
}

impl<F> SchemaChangeListener for F
where
    F: Fn(&[SchemaChange]) + Send + Sync,
{
    fn on_schema_change(&self, changes: &[SchemaChange]) {
        self(changes)
    }
}

/// Whether a session has a descriptor to compare against
///
/// A session attached to a store that already holds a descriptor starts
/// out `Populated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Next parse is treated as the first one
    Empty,
    /// Next parse is compared with the cached descriptor
    Populated,
}

#[derive(Default)]
struct SessionState {
    cached: Option<SchemaDescriptor>,
    listener: Option<Arc<dyn SchemaChangeListener>>,
}

/// Parser front-end that detects shape changes between successive payloads
///
/// Sessions are independent: create one per payload stream you want to
/// track. Share one across threads with `Arc<SchemaSession>`.
///
/// # Examples
/// ```
/// # use shapejson::session::SchemaSession;
/// # use std::sync::{Arc, Mutex};
/// let session = SchemaSession::new();
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
/// session.enable_schema_detection(move |changes: &[shapejson::domain::SchemaChange]| {
///     sink.lock().unwrap().extend(changes.iter().map(|c| c.path().to_string()));
/// });
///
/// session.parse(r#"{"id": 1}"#).unwrap();
/// session.parse(r#"{"id": 2, "email": "a@b.c"}"#).unwrap();
/// assert_eq!(*seen.lock().unwrap(), ["email"]);
/// ```
pub struct SchemaSession {
    parser: JsonParser,
    state: Mutex<SessionState>,
    store: Option<Arc<dyn SchemaStore>>,
    config: DetectionConfig,
}

impl SchemaSession {
    /// Create an empty session without persistence
    pub fn new() -> Self {
        Self {
            parser: JsonParser::new(),
            state: Mutex::new(SessionState::default()),
            store: None,
            config: DetectionConfig::default(),
        }
    }

    /// Use `parser` for [`parse`](Self::parse)
    pub fn with_parser(mut self, parser: JsonParser) -> Self {
        self.parser = parser;
        self
    }

    /// Persist descriptors to `store` using the keys in `config`
    ///
    /// The stored descriptor, if any, is restored immediately so shape
    /// changes are detected across process restarts. This is the only read
    /// from the store; store failures are logged and treated as absence.
    pub fn with_store(mut self, store: Arc<dyn SchemaStore>, config: DetectionConfig) -> Self {
        self.store = Some(store);
        self.config = config;
        if let Some(restored) = self.restore() {
            self.state.get_mut().cached = Some(restored);
        }
        self
    }

    /// Detection and persistence settings
    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Parse `input` and run change detection
    ///
    /// # Errors
    /// Propagates parser errors; detection itself never fails. A failed
    /// parse leaves the cached descriptor untouched.
    pub fn parse<'a>(&self, input: impl Into<RawInput<'a>>) -> Result<JsonNode> {
        let node = self.parser.parse(input)?;
        self.observe(&node);
        Ok(node)
    }

    /// Parse `input`, validate its root, and run change detection
    ///
    /// # Errors
    /// See [`JsonParser::parse_with_validation`]. Rejected input leaves the
    /// cached descriptor untouched.
    pub fn parse_with_validation<'a>(
        &self,
        input: impl Into<RawInput<'a>>,
        allow_null: bool,
        require_object: bool,
    ) -> Result<JsonNode> {
        let node = self
            .parser
            .parse_with_validation(input, allow_null, require_object)?;
        self.observe(&node);
        Ok(node)
    }

    /// Parse with explicit root validation options
    ///
    /// # Errors
    /// See [`JsonParser::parse_with_validation`].
    pub fn parse_with_options<'a>(
        &self,
        input: impl Into<RawInput<'a>>,
        options: ParseOptions,
    ) -> Result<JsonNode> {
        self.parse_with_validation(input, options.allow_null, options.require_object)
    }

    /// Register `listener`, replacing any previous one
    pub fn enable_schema_detection<L>(&self, listener: L)
    where
        L: SchemaChangeListener + 'static,
    {
        self.state.lock().listener = Some(Arc::new(listener));
    }

    /// Remove the registered listener
    pub fn disable_schema_detection(&self) {
        self.state.lock().listener = None;
    }

    /// Check if a listener is registered
    pub fn is_detection_enabled(&self) -> bool {
        self.state.lock().listener.is_some()
    }

    /// Forget the cached descriptor; the next parse acts as the first one
    ///
    /// The stored copy is cleared too when the session persists. The
    /// listener stays registered.
    pub fn reset_cache(&self) {
        let mut state = self.state.lock();
        state.cached = None;
        self.clear_stored();
        tracing::debug!("schema cache reset");
    }

    /// Forget the cached descriptor and remove the listener
    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.cached = None;
        state.listener = None;
        self.clear_stored();
        tracing::debug!("schema session reset");
    }

    /// Cached descriptor, if any
    pub fn cached_schema(&self) -> Option<SchemaDescriptor> {
        self.state.lock().cached.clone()
    }

    /// Current state of the detection state machine
    pub fn status(&self) -> SessionStatus {
        if self.state.lock().cached.is_some() {
            SessionStatus::Populated
        } else {
            SessionStatus::Empty
        }
    }

    /// Compare two trees without touching session state
    ///
    /// Unlike automatic detection this walks the full trees, including the
    /// first element of each list.
    pub fn compare_schemas(&self, old: &JsonNode, new: &JsonNode) -> Vec<SchemaChange> {
        diff::compare(old, new)
    }

    fn observe(&self, node: &JsonNode) {
        let descriptor = extract_schema(node);
        let mut state = self.state.lock();

        match &state.cached {
            None => tracing::debug!(kind = %descriptor.kind(), "captured initial schema"),
            Some(previous) => {
                let changes = diff::compare_descriptors(previous, &descriptor);
                if changes.is_empty() {
                    tracing::debug!("schema unchanged");
                } else {
                    tracing::info!(
                        changes = changes.len(),
                        breaking = has_breaking_changes(&changes),
                        "schema changes detected"
                    );
                    if let Some(listener) = &state.listener {
                        listener.on_schema_change(&changes);
                    }
                }
            }
        }

        self.persist(&descriptor);
        state.cached = Some(descriptor);
    }

    fn storage_key(&self) -> String {
        namespaced_key(&self.config.namespace, &self.config.schema_key)
    }

    fn restore(&self) -> Option<SchemaDescriptor> {
        let store = self.store.as_ref()?;
        let key = self.storage_key();
        match store.load(&key) {
            Ok(descriptor) => {
                if descriptor.is_some() {
                    tracing::debug!(key = %key, "restored stored schema");
                }
                descriptor
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "failed to load stored schema");
                None
            }
        }
    }

    fn persist(&self, descriptor: &SchemaDescriptor) {
        let Some(store) = &self.store else {
            return;
        };
        if !self.config.persist {
            return;
        }
        let key = self.storage_key();
        if let Err(e) = store.save(&key, descriptor) {
            tracing::warn!(key = %key, error = %e, "failed to store schema");
        }
    }

    fn clear_stored(&self) {
        let Some(store) = &self.store else {
            return;
        };
        if !self.config.persist {
            return;
        }
        let key = self.storage_key();
        if let Err(e) = store.clear(&key) {
            tracing::warn!(key = %key, error = %e, "failed to clear stored schema");
        }
    }
}

impl Default for SchemaSession {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SchemaSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("SchemaSession");
        out.field("parser", &self.parser);
        // try_lock: listeners run under the lock and may format the session
        match self.state.try_lock() {
            Some(state) => {
                out.field("populated", &state.cached.is_some())
                    .field("detection_enabled", &state.listener.is_some());
            }
            None => {
                out.field("state", &format_args!("<locked>"));
            }
        }
        out.field("persistent", &self.store.is_some())
            .field("config", &self.config)
            .finish()
    }
}
