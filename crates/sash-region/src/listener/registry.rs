//! Listener record registry

use tracing::{error, warn};

use super::{BindingToken, ContextId, EventKind, ListenerBackend, ListenerId};

/// Options for [`ListenerRegistry::assign`]
#[derive(Clone, Copy, Debug)]
pub struct AssignOptions {
    pub context: ContextId,
    pub once: bool,
    pub passive: bool,
}

impl Default for AssignOptions {
    fn default() -> Self {
        Self {
            context: ContextId::DOCUMENT,
            once: false,
            passive: false,
        }
    }
}

#[derive(Debug)]
struct ListenerRecord {
    kind: EventKind,
    handler: ListenerId,
    context: ContextId,
    token: BindingToken,
}

/// Ownership registry for the engine's native listeners
///
/// Invariant: no two records share the same `(kind, handler, context)`
/// triple; a second identical `assign` is a logged no-op.
#[derive(Debug)]
pub struct ListenerRegistry<B> {
    backend: B,
    records: Vec<ListenerRecord>,
    verbose: bool,
}

impl<B: ListenerBackend> ListenerRegistry<B> {
    /// Create a registry over a backend
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            records: Vec::new(),
            verbose: false,
        }
    }

    /// Enable misuse warnings
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Bind a handler to a context for an event kind
    ///
    /// Re-registering an identical `(kind, handler, context)` triple is a
    /// no-op. High-frequency kinds are bound passive regardless of the
    /// caller's `passive` choice.
    pub fn assign(&mut self, kind: EventKind, handler: ListenerId, opts: AssignOptions) -> bool {
        if self.has(kind, handler, opts.context) {
            if self.verbose {
                warn!(event = kind.name(), "listener already registered; ignoring");
            }
            return false;
        }

        let passive = opts.passive || kind.forced_passive();
        let Some(token) = self.backend.bind(kind, opts.context, passive, opts.once) else {
            error!(event = kind.name(), "listener bind failed");
            return false;
        };

        self.records.push(ListenerRecord {
            kind,
            handler,
            context: opts.context,
            token,
        });
        true
    }

    /// Remove all records matching an event kind and any of the contexts
    ///
    /// Returns `true` only when every matched record unbound; on partial
    /// failure the failed records stay registered for a later retry.
    pub fn clear(&mut self, kind: EventKind, contexts: &[ContextId]) -> bool {
        let mut complete = true;
        let mut kept = Vec::with_capacity(self.records.len());

        for record in self.records.drain(..) {
            let matched = record.kind == kind && contexts.contains(&record.context);
            if !matched {
                kept.push(record);
                continue;
            }
            if !self
                .backend
                .unbind(record.kind, record.context, record.token)
            {
                error!(event = kind.name(), "listener unbind failed; keeping record");
                complete = false;
                kept.push(record);
            }
        }

        self.records = kept;
        complete
    }

    /// Remove a single record addressed by original handler identity
    ///
    /// A missing record is a warning, not an error.
    pub fn omit(&mut self, kind: EventKind, handler: ListenerId) -> bool {
        let Some(index) = self
            .records
            .iter()
            .position(|record| record.kind == kind && record.handler == handler)
        else {
            if self.verbose {
                warn!(event = kind.name(), "no listener to omit");
            }
            return false;
        };

        let record = &self.records[index];
        if !self
            .backend
            .unbind(record.kind, record.context, record.token)
        {
            error!(event = kind.name(), "listener unbind failed; keeping record");
            return false;
        }
        self.records.remove(index);
        true
    }

    /// Unbind every record the registry owns
    ///
    /// Returns `true` when the registry reaches zero records.
    pub fn clear_all(&mut self) -> bool {
        let kinds: Vec<(EventKind, ContextId)> = self
            .records
            .iter()
            .map(|record| (record.kind, record.context))
            .collect();
        for (kind, context) in kinds {
            self.clear(kind, &[context]);
        }
        self.records.is_empty()
    }

    /// Whether a record exists for the triple
    pub fn has(&self, kind: EventKind, handler: ListenerId, context: ContextId) -> bool {
        self.records.iter().any(|record| {
            record.kind == kind && record.handler == handler && record.context == context
        })
    }

    /// Number of live records
    pub fn active_count(&self) -> usize {
        self.records.len()
    }

    /// Whether the registry owns no listeners
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Access the backend (the wasm layer drains its event queue this way)
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

/// Backend that tracks tokens without a native layer behind it
///
/// Useful for embeddings that only need ownership accounting, and as the
/// default controller backend.
#[derive(Debug, Default)]
pub struct NullBackend {
    next_token: u64,
}

impl ListenerBackend for NullBackend {
    fn bind(
        &mut self,
        _kind: EventKind,
        _context: ContextId,
        _passive: bool,
        _once: bool,
    ) -> Option<BindingToken> {
        self.next_token += 1;
        Some(BindingToken(self.next_token))
    }

    fn unbind(&mut self, _kind: EventKind, _context: ContextId, _token: BindingToken) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    /// Backend that counts binds and can be told to fail unbinding
    #[derive(Debug, Default)]
    struct CountingBackend {
        next_token: u64,
        bound: HashSet<u64>,
        fail_unbind: bool,
    }

    impl ListenerBackend for CountingBackend {
        fn bind(
            &mut self,
            _kind: EventKind,
            _context: ContextId,
            _passive: bool,
            _once: bool,
        ) -> Option<BindingToken> {
            self.next_token += 1;
            self.bound.insert(self.next_token);
            Some(BindingToken(self.next_token))
        }

        fn unbind(&mut self, _kind: EventKind, _context: ContextId, token: BindingToken) -> bool {
            if self.fail_unbind {
                return false;
            }
            self.bound.remove(&token.0)
        }
    }

    const MOVE: ListenerId = ListenerId(1);
    const UP: ListenerId = ListenerId(2);

    #[test]
    fn test_duplicate_assign_is_noop() {
        let mut registry = ListenerRegistry::new(CountingBackend::default());

        assert!(registry.assign(EventKind::PointerMove, MOVE, AssignOptions::default()));
        assert!(!registry.assign(EventKind::PointerMove, MOVE, AssignOptions::default()));
        assert_eq!(registry.active_count(), 1);

        // Same handler on another context is a distinct record
        let other = AssignOptions {
            context: ContextId(7),
            ..Default::default()
        };
        assert!(registry.assign(EventKind::PointerMove, MOVE, other));
        assert_eq!(registry.active_count(), 2);
    }

    #[test]
    fn test_clear_unbinds_matching_contexts() {
        let mut registry = ListenerRegistry::new(CountingBackend::default());
        registry.assign(EventKind::PointerMove, MOVE, AssignOptions::default());
        registry.assign(EventKind::PointerUp, UP, AssignOptions::default());
        registry.assign(
            EventKind::PointerMove,
            MOVE,
            AssignOptions {
                context: ContextId(7),
                ..Default::default()
            },
        );

        assert!(registry.clear(EventKind::PointerMove, &[ContextId::DOCUMENT]));
        assert_eq!(registry.active_count(), 2);
        assert!(registry.has(EventKind::PointerMove, MOVE, ContextId(7)));
        assert!(registry.has(EventKind::PointerUp, UP, ContextId::DOCUMENT));
    }

    #[test]
    fn test_partial_clear_failure_keeps_records() {
        let mut registry = ListenerRegistry::new(CountingBackend::default());
        registry.assign(EventKind::PointerMove, MOVE, AssignOptions::default());

        registry.backend_mut().fail_unbind = true;
        assert!(!registry.clear(EventKind::PointerMove, &[ContextId::DOCUMENT]));
        assert_eq!(registry.active_count(), 1);

        // Backend recovers; the retry succeeds
        registry.backend_mut().fail_unbind = false;
        assert!(registry.clear(EventKind::PointerMove, &[ContextId::DOCUMENT]));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_omit_single_record() {
        let mut registry = ListenerRegistry::new(CountingBackend::default());
        registry.assign(EventKind::PointerMove, MOVE, AssignOptions::default());
        registry.assign(EventKind::PointerUp, UP, AssignOptions::default());

        assert!(registry.omit(EventKind::PointerMove, MOVE));
        assert!(!registry.omit(EventKind::PointerMove, MOVE));
        assert_eq!(registry.active_count(), 1);
    }

    #[test]
    fn test_clear_all_reaches_zero() {
        let mut registry = ListenerRegistry::new(CountingBackend::default());
        registry.assign(EventKind::PointerMove, MOVE, AssignOptions::default());
        registry.assign(EventKind::PointerUp, UP, AssignOptions::default());
        registry.assign(
            EventKind::Resize,
            ListenerId(3),
            AssignOptions {
                context: ContextId::WINDOW,
                ..Default::default()
            },
        );

        assert!(registry.clear_all());
        assert!(registry.is_empty());
        assert!(registry.backend_mut().bound.is_empty());
    }

    proptest! {
        #[test]
        fn prop_registry_never_holds_duplicate_triples(
            calls in proptest::collection::vec((0u8..4, 0u32..3, 0u32..3), 1..60),
        ) {
            let mut registry = ListenerRegistry::new(CountingBackend::default());
            let kinds = [
                EventKind::PointerDown,
                EventKind::PointerMove,
                EventKind::PointerUp,
                EventKind::KeyDown,
            ];

            for (kind_index, handler, context) in calls {
                registry.assign(
                    kinds[kind_index as usize],
                    ListenerId(handler),
                    AssignOptions {
                        context: ContextId(context),
                        ..Default::default()
                    },
                );
            }

            let mut seen = HashSet::new();
            for record in &registry.records {
                prop_assert!(seen.insert((record.kind, record.handler, record.context)));
            }
        }
    }
}
