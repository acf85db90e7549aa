//! Listener ownership module
//!
//! Tracks every native listener the engine owns so teardown can prove
//! nothing leaked. Actual attach/detach goes through a [`ListenerBackend`]
//! so the core never touches the DOM; the `wasm` feature supplies a real
//! backend and tests supply counting mocks.

use serde::Serialize;

mod registry;

pub use registry::{AssignOptions, ListenerRegistry, NullBackend};

/// Native event stream the engine can own a listener for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerDown,
    PointerMove,
    PointerUp,
    TouchStart,
    TouchMove,
    TouchEnd,
    KeyDown,
    Scroll,
    Wheel,
    Resize,
}

impl EventKind {
    /// Native event name
    pub fn name(self) -> &'static str {
        match self {
            EventKind::PointerDown => "pointerdown",
            EventKind::PointerMove => "pointermove",
            EventKind::PointerUp => "pointerup",
            EventKind::TouchStart => "touchstart",
            EventKind::TouchMove => "touchmove",
            EventKind::TouchEnd => "touchend",
            EventKind::KeyDown => "keydown",
            EventKind::Scroll => "scroll",
            EventKind::Wheel => "wheel",
            EventKind::Resize => "resize",
        }
    }

    /// High-frequency streams are forced passive so handlers can never
    /// block the input thread, regardless of caller intent
    #[inline]
    pub fn forced_passive(self) -> bool {
        matches!(
            self,
            EventKind::PointerMove
                | EventKind::Scroll
                | EventKind::Wheel
                | EventKind::Resize
                | EventKind::TouchMove
        )
    }
}

/// Identity of an original handler, assigned by the owning component
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ListenerId(pub u32);

/// Binding context for a listener (an event target)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ContextId(pub u32);

impl ContextId {
    /// Default binding context: the document root
    pub const DOCUMENT: ContextId = ContextId(0);

    /// The window object, used for viewport resize listeners
    pub const WINDOW: ContextId = ContextId(1);
}

/// Backend token for one bound native listener
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BindingToken(pub u64);

/// Native attach/detach surface supplied by the embedding layer
pub trait ListenerBackend {
    /// Attach a native listener; `None` signals a bind failure
    fn bind(
        &mut self,
        kind: EventKind,
        context: ContextId,
        passive: bool,
        once: bool,
    ) -> Option<BindingToken>;

    /// Detach a native listener; `false` signals an unbind failure
    fn unbind(&mut self, kind: EventKind, context: ContextId, token: BindingToken) -> bool;
}
