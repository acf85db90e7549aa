//! WASM exports for the region engine
//!
//! This module provides wasm-bindgen exports for the interaction
//! controller plus a DOM listener backend, so a declarative layer can feed
//! native events in and read engine state out as JSON.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::controller::{InteractionConfig, InteractionController};
use crate::geometry::Pivot;
use crate::listener::{BindingToken, ContextId, EventKind, ListenerBackend};
use crate::math::{Rect, Vec2};

// Import js_sys::Date for timestamps
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Date, js_name = now)]
    fn date_now() -> f64;
}

/// Raw input captured by a DOM listener, drained on the next frame tick
#[derive(Debug)]
struct RawInput {
    kind: EventKind,
    x: f32,
    y: f32,
    key: Option<String>,
}

struct BoundListener {
    target: web_sys::EventTarget,
    name: &'static str,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

/// Listener backend that attaches real DOM listeners
///
/// Captured events land in a shared queue rather than re-entering the
/// engine synchronously; the controller drains them from `tick_frame`.
pub struct DomListenerBackend {
    queue: Rc<RefCell<VecDeque<RawInput>>>,
    bound: HashMap<u64, BoundListener>,
    next_token: u64,
}

impl DomListenerBackend {
    fn new() -> Self {
        Self {
            queue: Rc::new(RefCell::new(VecDeque::new())),
            bound: HashMap::new(),
            next_token: 1,
        }
    }

    fn queue(&self) -> Rc<RefCell<VecDeque<RawInput>>> {
        Rc::clone(&self.queue)
    }

    fn target_for(context: ContextId) -> Option<web_sys::EventTarget> {
        let window = web_sys::window()?;
        if context == ContextId::WINDOW {
            return Some(window.into());
        }
        window.document().map(|document| document.into())
    }

    fn capture(kind: EventKind, event: &web_sys::Event) -> RawInput {
        let mut raw = RawInput {
            kind,
            x: 0.0,
            y: 0.0,
            key: None,
        };
        if let Some(pointer) = event.dyn_ref::<web_sys::PointerEvent>() {
            raw.x = pointer.client_x() as f32;
            raw.y = pointer.client_y() as f32;
        }
        if let Some(keyboard) = event.dyn_ref::<web_sys::KeyboardEvent>() {
            raw.key = Some(keyboard.key());
        }
        raw
    }
}

impl ListenerBackend for DomListenerBackend {
    fn bind(
        &mut self,
        kind: EventKind,
        context: ContextId,
        passive: bool,
        once: bool,
    ) -> Option<BindingToken> {
        let target = Self::target_for(context)?;

        let queue = self.queue();
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            queue.borrow_mut().push_back(Self::capture(kind, &event));
        });

        let options = web_sys::AddEventListenerOptions::new();
        options.set_passive(passive);
        options.set_once(once);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                kind.name(),
                closure.as_ref().unchecked_ref(),
                &options,
            )
            .ok()?;

        let token = self.next_token;
        self.next_token += 1;
        self.bound.insert(
            token,
            BoundListener {
                target,
                name: kind.name(),
                closure,
            },
        );
        Some(BindingToken(token))
    }

    fn unbind(&mut self, _kind: EventKind, _context: ContextId, token: BindingToken) -> bool {
        let Some(bound) = self.bound.remove(&token.0) else {
            return false;
        };
        bound
            .target
            .remove_event_listener_with_callback(
                bound.name,
                bound.closure.as_ref().unchecked_ref(),
            )
            .is_ok()
    }
}

/// Viewport or element bounding rect as JSON
///
/// Window dimensions by default, element offsets otherwise.
#[wasm_bindgen]
pub fn bounding_rect_json(element: Option<web_sys::Element>) -> String {
    let rect = bounding_rect(element);
    serde_json::to_string(&rect).unwrap_or_else(|_| "{}".to_string())
}

fn bounding_rect(element: Option<web_sys::Element>) -> Rect {
    if let Some(element) = element {
        let dom_rect = element.get_bounding_client_rect();
        return Rect::new(
            dom_rect.left() as f32,
            dom_rect.top() as f32,
            dom_rect.width() as f32,
            dom_rect.height() as f32,
        );
    }
    window_rect().unwrap_or(Rect::ZERO)
}

fn window_rect() -> Option<Rect> {
    let window = web_sys::window()?;
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some(Rect::new(0.0, 0.0, width as f32, height as f32))
}

/// Region controller for WASM - wraps the interaction engine with a
/// JS-friendly API
#[wasm_bindgen]
pub struct RegionController {
    engine: InteractionController<DomListenerBackend>,
    events: Rc<RefCell<VecDeque<RawInput>>>,
}

#[wasm_bindgen]
impl RegionController {
    /// Create a new region controller
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let backend = DomListenerBackend::new();
        let events = backend.queue();

        let config = InteractionConfig {
            device_pixel_ratio: web_sys::window()
                .map(|window| window.device_pixel_ratio() as f32)
                .unwrap_or(1.0),
            ..Default::default()
        };
        Self {
            engine: InteractionController::with_backend(config, backend),
            events,
        }
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Initialize with the viewport dimensions
    #[wasm_bindgen]
    pub fn init(&mut self, width: f32, height: f32) {
        self.engine.set_viewport(Rect::new(0.0, 0.0, width, height));
    }

    /// The viewport changed size
    #[wasm_bindgen]
    pub fn resize_viewport(&mut self, width: f32, height: f32) {
        self.engine
            .viewport_resized(Rect::new(0.0, 0.0, width, height), date_now());
    }

    /// Bind the region this controller transforms
    #[wasm_bindgen]
    pub fn bind_region(&mut self, id: u64, x: f32, y: f32, width: f32, height: f32) {
        self.engine.bind_region(id, Rect::new(x, y, width, height));
    }

    /// Overwrite the frame after a host-side geometry change
    #[wasm_bindgen]
    pub fn sync_frame(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.engine.sync_frame(Rect::new(x, y, width, height));
    }

    /// Flip the disabled flag
    #[wasm_bindgen]
    pub fn set_disabled(&mut self, disabled: bool) {
        self.engine.set_disabled(disabled);
    }

    // =========================================================================
    // Input Handling
    // =========================================================================

    /// Handle pointer down; `pivot` is the 1-9 grid index, absent for move
    #[wasm_bindgen]
    pub fn pointer_down(&mut self, x: f32, y: f32, button: u8, pivot: Option<u8>) -> String {
        let pivot = pivot.and_then(Pivot::from_index);
        let result = self
            .engine
            .pointer_down(Vec2::new(x, y), button, pivot, date_now());
        serde_json::to_string(&result).unwrap_or_else(|_| r#"{"type":"unhandled"}"#.to_string())
    }

    /// Handle pointer move
    #[wasm_bindgen]
    pub fn pointer_move(&mut self, x: f32, y: f32) -> String {
        let result = self.engine.pointer_move(Vec2::new(x, y), date_now());
        serde_json::to_string(&result).unwrap_or_else(|_| r#"{"type":"unhandled"}"#.to_string())
    }

    /// Handle pointer up
    #[wasm_bindgen]
    pub fn pointer_up(&mut self) -> String {
        let result = self.engine.pointer_up(date_now());
        serde_json::to_string(&result).unwrap_or_else(|_| r#"{"type":"unhandled"}"#.to_string())
    }

    /// Handle key down
    #[wasm_bindgen]
    pub fn key_down(&mut self, key: &str) -> String {
        let result = self.engine.key_down(key, date_now());
        serde_json::to_string(&result).unwrap_or_else(|_| r#"{"type":"unhandled"}"#.to_string())
    }

    // =========================================================================
    // Geometry Operations
    // =========================================================================

    /// Stretch toward a pivot index, toggling with the cached geometry
    #[wasm_bindgen]
    pub fn stretch(&mut self, pivot: Option<u8>) -> String {
        let outcome = self.engine.stretch_to_index(pivot, date_now());
        serde_json::to_string(&outcome).unwrap_or_else(|_| "{}".to_string())
    }

    /// Write box geometry, clamped to the viewport when `fit` is set
    #[wasm_bindgen]
    pub fn resize_region(&mut self, width: f32, height: f32, fit: bool) {
        let viewport = self.engine.viewport();
        self.engine.resize_region(&crate::geometry::ResizeRequest {
            width: Some(width),
            height: Some(height),
            fit,
            viewport: Some(viewport),
            ..Default::default()
        });
    }

    /// Apply a viewport-clamped translation
    #[wasm_bindgen]
    pub fn translate_region(&mut self, dx: f32, dy: f32) {
        self.engine.translate_region(dx, dy);
    }

    // =========================================================================
    // Unified Frame Tick
    // =========================================================================

    /// Unified frame tick - drains captured DOM events, drives deferred
    /// work, and returns complete frame data
    #[wasm_bindgen]
    pub fn tick_frame(&mut self) -> String {
        let now = date_now();
        self.drain_events(now);
        self.engine.tick(now);

        let hooks = self.engine.drain_hooks();
        serde_json::to_string(&serde_json::json!({
            "phase": self.engine.phase(),
            "region": self.engine.region(),
            "hooks": hooks,
        }))
        .unwrap_or_else(|_| "{}".to_string())
    }

    /// Get the engine-side region state as JSON
    #[wasm_bindgen]
    pub fn get_region_json(&self) -> String {
        serde_json::to_string(self.engine.region()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Release every listener, timer, and frame request
    #[wasm_bindgen]
    pub fn teardown(&mut self) -> bool {
        self.engine.teardown()
    }

    fn drain_events(&mut self, now_ms: f64) {
        loop {
            let raw = self.events.borrow_mut().pop_front();
            let Some(raw) = raw else { break };
            match raw.kind {
                EventKind::PointerMove | EventKind::TouchMove => {
                    self.engine.pointer_move(Vec2::new(raw.x, raw.y), now_ms);
                }
                EventKind::PointerUp | EventKind::TouchEnd => {
                    self.engine.pointer_up(now_ms);
                }
                EventKind::KeyDown => {
                    if let Some(key) = raw.key.as_deref() {
                        self.engine.key_down(key, now_ms);
                    }
                }
                EventKind::Resize => {
                    if let Some(rect) = window_rect() {
                        self.engine.viewport_resized(rect, now_ms);
                    }
                }
                _ => {}
            }
        }
    }
}

impl Default for RegionController {
    fn default() -> Self {
        Self::new()
    }
}
