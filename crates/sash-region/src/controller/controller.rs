//! Interaction state machine
//!
//! One controller instance drives one movable/resizable region:
//! `Idle → Armed → {Moving | Resizing} → Ending → Idle`, with a rapid
//! second trigger short-circuiting into a stretch/restore toggle. Pointer
//! events arrive from the host (pointer events unify mouse and touch);
//! deferred work fires from [`InteractionController::tick`].

use std::collections::VecDeque;

use tracing::warn;

use crate::geometry::{
    self, edge_threshold, fully_outside, is_center_pivot, pointer_edges, EdgeFlags, Pivot,
    ResizeRequest, StretchOutcome, TransformCache,
};
use crate::listener::{
    AssignOptions, ContextId, EventKind, ListenerBackend, ListenerId, ListenerRegistry,
    NullBackend,
};
use crate::math::{Rect, Vec2};
use crate::region::{RegionId, RegionState};
use crate::schedule::{FrameClock, ThrottleScheduler};

use super::config::InteractionConfig;
use super::hooks::{Hook, HookEvent};
use super::session::{EndReason, Phase, Session};
use super::InputResult;

/// Listener identities owned by the controller
const MOVE_LISTENER: ListenerId = ListenerId(0xD1);
const UP_LISTENER: ListenerId = ListenerId(0xD2);
const KEY_LISTENER: ListenerId = ListenerId(0xD3);
const RESIZE_LISTENER: ListenerId = ListenerId(0xD4);

/// Primary pointer button code
const PRIMARY_BUTTON: u8 = 0;

/// Deferred work dispatched through the throttle scheduler
///
/// An explicit command table: equal commands coalesce in the scheduler and
/// dispatch resolves each variant exactly once, with no lookup by name.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Emit an edge-proximity change to the host
    EmitEdges(EdgeFlags),
    /// Recompute a maintained stretch against the current viewport
    Restretch,
}

#[derive(Clone, Copy, Debug)]
struct PressStamp {
    at_ms: f64,
    pivot: Option<Pivot>,
    count: u32,
}

/// State machine for one region's pointer interactions
pub struct InteractionController<B: ListenerBackend = NullBackend> {
    config: InteractionConfig,
    phase: Phase,
    session: Option<Session>,
    region_id: RegionId,
    region: RegionState,
    bound: bool,
    cache: TransformCache,
    listeners: ListenerRegistry<B>,
    throttle: ThrottleScheduler<Command>,
    clock: FrameClock,
    viewport: Rect,
    hooks: VecDeque<HookEvent>,
    disabled: bool,
    last_press: Option<PressStamp>,
}

impl InteractionController<NullBackend> {
    /// Create a controller with accounting-only listener tracking
    pub fn new(config: InteractionConfig) -> Self {
        Self::with_backend(config, NullBackend::default())
    }
}

impl<B: ListenerBackend> InteractionController<B> {
    /// Create a controller over a native listener backend
    pub fn with_backend(config: InteractionConfig, backend: B) -> Self {
        let mut listeners = ListenerRegistry::new(backend);
        listeners.set_verbose(config.verbose);
        let throttle = ThrottleScheduler::with_delay(config.base_delay_ms);
        let clock = FrameClock::new(config.device_pixel_ratio);
        Self {
            config,
            phase: Phase::Idle,
            session: None,
            region_id: 0,
            region: RegionState::default(),
            bound: false,
            cache: TransformCache::new(),
            listeners,
            throttle,
            clock,
            viewport: Rect::ZERO,
            hooks: VecDeque::new(),
            disabled: false,
            last_press: None,
        }
    }

    // =========================================================================
    // Binding and host state
    // =========================================================================

    /// Bind the region this controller transforms
    pub fn bind_region(&mut self, id: RegionId, frame: Rect) {
        self.region_id = id;
        self.region = RegionState::seeded(frame);
        self.bound = true;
    }

    /// Overwrite the frame after an external (host-side) geometry change
    pub fn sync_frame(&mut self, frame: Rect) {
        self.region.frame = frame;
    }

    /// Set the viewport the region is constrained to
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    /// The viewport the region is constrained to
    #[inline]
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// The viewport changed size; maintained stretches follow it
    pub fn viewport_resized(&mut self, viewport: Rect, now_ms: f64) {
        self.viewport = viewport;
        if self.region.stretched.is_some() {
            self.throttle.schedule(Command::Restretch, None, now_ms);
        }
    }

    /// Flip the disabled flag; observed before the next frame update
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Current lifecycle phase
    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether a session is in progress
    #[inline]
    pub fn session_active(&self) -> bool {
        self.session.is_some()
    }

    /// The active session, if any
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Engine-side state of the bound region
    pub fn region(&self) -> &RegionState {
        &self.region
    }

    /// Identifier of the bound region
    pub fn region_id(&self) -> RegionId {
        self.region_id
    }

    /// Live timers owned by this controller
    pub fn pending_timers(&self) -> usize {
        let abort = self
            .session
            .as_ref()
            .and_then(|session| session.abort_deadline_ms)
            .is_some() as usize;
        self.throttle.pending() + abort
    }

    /// Live listener records owned by this controller
    pub fn listener_count(&self) -> usize {
        self.listeners.active_count()
    }

    /// Drain queued hooks for the surrounding layer
    pub fn drain_hooks(&mut self) -> Vec<HookEvent> {
        self.hooks.drain(..).collect()
    }

    // =========================================================================
    // Input entry points
    // =========================================================================

    /// Primary-button press on the bound region
    ///
    /// `pivot` comes from the triggering element (its pivot attribute);
    /// `None` means a plain move grip.
    pub fn pointer_down(
        &mut self,
        pos: Vec2,
        button: u8,
        pivot: Option<Pivot>,
        now_ms: f64,
    ) -> InputResult {
        if button != PRIMARY_BUTTON || self.disabled || !self.bound {
            return InputResult::Unhandled;
        }

        // A rapid second trigger on the same pivot is a stretch request,
        // not a drag.
        if let Some(stamp) = self.last_press {
            if stamp.pivot == pivot && now_ms - stamp.at_ms <= self.config.repeat_window_ms() {
                if self.session.is_some() {
                    self.release_session_resources();
                    self.session = None;
                    self.phase = Phase::Idle;
                }
                self.last_press = Some(PressStamp {
                    at_ms: now_ms,
                    pivot,
                    count: stamp.count + 1,
                });
                self.stretch_to(pivot, now_ms);
                return InputResult::Handled;
            }
        }
        self.last_press = Some(PressStamp {
            at_ms: now_ms,
            pivot,
            count: 1,
        });

        if self.session.is_some() {
            // A new press while a session lingers restarts cleanly
            self.end_session(EndReason::Release);
        }
        self.arm(pos, pivot, now_ms);
        InputResult::Handled
    }

    /// Pointer sample during a session
    pub fn pointer_move(&mut self, pos: Vec2, now_ms: f64) -> InputResult {
        if self.session.is_none() {
            return InputResult::Unhandled;
        }
        if self.disabled {
            return self.end_session(EndReason::Disabled);
        }

        {
            let session = self.session.as_mut().expect("session checked above");
            // Identical coordinates carry no work
            if pos == session.last_pointer {
                return InputResult::Handled;
            }
            session.velocity = pos.sign_from(session.last_pointer);
            session.last_pointer = pos;
        }

        // At most one geometry update per eligible frame
        if !self.clock.should_run(now_ms) {
            return InputResult::Handled;
        }
        self.frame_update(pos, now_ms)
    }

    /// Pointer released (pointer-up / touch-end)
    pub fn pointer_up(&mut self, _now_ms: f64) -> InputResult {
        if self.session.is_none() {
            return InputResult::Unhandled;
        }
        self.end_session(EndReason::Release)
    }

    /// Key press during a session; Escape exits
    pub fn key_down(&mut self, key: &str, _now_ms: f64) -> InputResult {
        if self.session.is_some() && key == "Escape" {
            return self.end_session(EndReason::Escape);
        }
        InputResult::Unhandled
    }

    /// Drive deferred work: abort deadlines and throttled commands
    pub fn tick(&mut self, now_ms: f64) {
        if self.disabled && self.session.is_some() {
            self.end_session(EndReason::Disabled);
        }
        if let Some(deadline) = self
            .session
            .as_ref()
            .and_then(|session| session.abort_deadline_ms)
        {
            if now_ms >= deadline {
                self.end_session(EndReason::Timeout);
            }
        }
        for command in self.throttle.run_due(now_ms) {
            self.dispatch(command, now_ms);
        }
    }

    // =========================================================================
    // Public geometry operations (usable outside a drag)
    // =========================================================================

    /// Stretch toward a pivot, or restore when already stretched there
    pub fn stretch_to(&mut self, pivot: Option<Pivot>, _now_ms: f64) -> StretchOutcome {
        if !self.bound {
            if self.config.verbose {
                warn!("stretch requested with no bound region");
            }
            return StretchOutcome::Unchanged;
        }

        let outcome = geometry::stretch(
            &mut self.region,
            self.region_id,
            pivot,
            self.viewport,
            &mut self.cache,
        );
        match outcome {
            StretchOutcome::Applied { .. } => {
                self.listeners.assign(
                    EventKind::Resize,
                    RESIZE_LISTENER,
                    AssignOptions {
                        context: ContextId::WINDOW,
                        ..Default::default()
                    },
                );
                self.push_hook(Hook::StretchChange {
                    region: self.region_id,
                    stretched: true,
                });
            }
            StretchOutcome::Restored { .. } => {
                self.listeners.omit(EventKind::Resize, RESIZE_LISTENER);
                self.push_hook(Hook::StretchChange {
                    region: self.region_id,
                    stretched: false,
                });
            }
            StretchOutcome::Unchanged => {
                if self.config.verbose {
                    warn!("stretch had no effect and nothing was cached to restore");
                }
            }
        }
        outcome
    }

    /// Stretch by raw pivot index (1-9); invalid indices are a no-op
    pub fn stretch_to_index(&mut self, index: Option<u8>, now_ms: f64) -> StretchOutcome {
        let pivot = match index {
            None | Some(0) => None,
            Some(raw) => match Pivot::from_index(raw) {
                Some(pivot) => Some(pivot),
                None => {
                    if self.config.verbose {
                        warn!(index = raw, "invalid stretch pivot");
                    }
                    return StretchOutcome::Unchanged;
                }
            },
        };
        self.stretch_to(pivot, now_ms)
    }

    /// Write box geometry directly
    pub fn resize_region(&mut self, request: &ResizeRequest) {
        geometry::resize(&mut self.region, request);
    }

    /// Apply a viewport-clamped translation
    pub fn translate_region(&mut self, dx: f32, dy: f32) -> Vec2 {
        geometry::translate(&mut self.region, dx, dy, Some(self.viewport))
    }

    /// Release everything this controller owns
    ///
    /// Returns `true` when no listener or timer survives.
    pub fn teardown(&mut self) -> bool {
        if self.session.is_some() {
            self.end_session(EndReason::Teardown);
        }
        self.throttle.clear_all();
        self.clock.cancel(None);
        let clean = self.listeners.clear_all();
        clean && self.throttle.pending() == 0
    }

    // =========================================================================
    // Session internals
    // =========================================================================

    fn arm(&mut self, pos: Vec2, pivot: Option<Pivot>, now_ms: f64) {
        // Bake any active translation into the frame so the session has a
        // stable absolute baseline
        self.region.frame = self.region.visual_frame();
        self.region.translation = Vec2::ZERO;

        let opts = AssignOptions::default();
        self.listeners.assign(EventKind::PointerMove, MOVE_LISTENER, opts);
        self.listeners.assign(EventKind::PointerUp, UP_LISTENER, opts);
        self.listeners.assign(EventKind::KeyDown, KEY_LISTENER, opts);

        self.clock.begin(now_ms);
        self.session = Some(Session::new(pivot, pos, self.region.frame, 1));
        self.phase = Phase::Armed;
        self.push_hook(Hook::DragStart {
            region: self.region_id,
        });
    }

    fn frame_update(&mut self, pos: Vec2, now_ms: f64) -> InputResult {
        let (pivot, origin, initial, velocity, prev_edges) = {
            let session = self.session.as_ref().expect("active session");
            (
                session.pivot,
                session.origin,
                session.initial_frame,
                session.velocity,
                session.edges,
            )
        };

        let threshold = edge_threshold(self.config.device_pixel_ratio);
        let edges = pointer_edges(pos, self.viewport, threshold);
        if edges != prev_edges {
            if let Some(session) = self.session.as_mut() {
                session.edges = edges;
            }
            // Bursts of identical flag states collapse to one emit
            self.throttle
                .schedule(Command::EmitEdges(edges), None, now_ms);
        }

        if is_center_pivot(pivot) {
            self.frame_move(pos, now_ms)
        } else {
            let pivot = pivot.expect("directional pivot");
            self.frame_resize(pos, pivot, origin, initial, velocity, now_ms)
        }
    }

    fn frame_move(&mut self, pos: Vec2, now_ms: f64) -> InputResult {
        let anchor = self
            .session
            .as_ref()
            .map(|session| session.frame_anchor)
            .expect("active session");
        let delta = pos - anchor;

        geometry::translate(&mut self.region, delta.x, delta.y, Some(self.viewport));
        if let Some(session) = self.session.as_mut() {
            session.frame_anchor = pos;
        }
        if !self.region.grabbed {
            self.region.grabbed = true;
        }
        self.phase = Phase::Moving;

        let outside = !self.viewport.contains(pos)
            || fully_outside(self.region.visual_frame(), self.viewport);
        if outside {
            self.arm_abort_if_unarmed(now_ms, self.config.move_abort_ms);
        } else {
            self.cancel_abort();
        }
        InputResult::Handled
    }

    fn frame_resize(
        &mut self,
        pos: Vec2,
        pivot: Pivot,
        origin: Vec2,
        initial: Rect,
        velocity: (i8, i8),
        now_ms: f64,
    ) -> InputResult {
        let delta = pos - origin;
        let mut frame = self.region.frame;
        let mut degenerate = false;

        // Horizontal axis: zero delta or a stalled pointer leaves the axis
        // untouched, preventing snap-to-current-size flicker
        if pivot.affects_x() && delta.x != 0.0 && velocity.0 != 0 {
            if pivot.east_side() {
                let available = self.viewport.right() - initial.x;
                let proposed = initial.width + delta.x;
                if proposed >= available {
                    degenerate = true;
                } else {
                    frame.width = proposed.max(self.config.min_size.width);
                }
            } else {
                let proposed_x = initial.x + delta.x;
                if proposed_x <= self.viewport.x {
                    degenerate = true;
                } else {
                    let width = (initial.width - delta.x).max(self.config.min_size.width);
                    frame.width = width;
                    frame.x = initial.right() - width;
                }
            }
        }

        if pivot.affects_y() && delta.y != 0.0 && velocity.1 != 0 {
            if pivot.south_side() {
                let available = self.viewport.bottom() - initial.y;
                let proposed = initial.height + delta.y;
                if proposed >= available {
                    degenerate = true;
                } else {
                    frame.height = proposed.max(self.config.min_size.height);
                }
            } else {
                let proposed_y = initial.y + delta.y;
                if proposed_y <= self.viewport.y {
                    degenerate = true;
                } else {
                    let height = (initial.height - delta.y).max(self.config.min_size.height);
                    frame.height = height;
                    frame.y = initial.bottom() - height;
                }
            }
        }

        self.region.frame = frame;
        self.phase = Phase::Resizing;

        let pointer_out = !self.viewport.contains(pos);
        if degenerate {
            // Boundary-degenerate sizes are never committed; the abort
            // timer re-arms instead
            self.arm_abort(now_ms, self.config.resize_abort_ms);
        } else if pointer_out {
            self.arm_abort_if_unarmed(now_ms, self.config.resize_abort_ms);
        } else {
            self.cancel_abort();
        }
        InputResult::Handled
    }

    fn arm_abort(&mut self, now_ms: f64, duration_ms: f64) {
        if let Some(session) = self.session.as_mut() {
            session.abort_deadline_ms = Some(now_ms + duration_ms);
        }
    }

    fn arm_abort_if_unarmed(&mut self, now_ms: f64, duration_ms: f64) {
        if let Some(session) = self.session.as_mut() {
            if session.abort_deadline_ms.is_none() {
                session.abort_deadline_ms = Some(now_ms + duration_ms);
            }
        }
    }

    fn cancel_abort(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.abort_deadline_ms = None;
        }
    }

    /// Cancel timers/frames and unbind session listeners
    fn release_session_resources(&mut self) {
        self.throttle.clear_all();
        self.clock.cancel(None);
        let contexts = [ContextId::DOCUMENT];
        self.listeners.clear(EventKind::PointerMove, &contexts);
        self.listeners.clear(EventKind::PointerUp, &contexts);
        self.listeners.clear(EventKind::KeyDown, &contexts);
        self.region.grabbed = false;
    }

    fn end_session(&mut self, reason: EndReason) -> InputResult {
        if self.session.is_none() {
            return InputResult::Unhandled;
        }
        self.phase = Phase::Ending;
        self.release_session_resources();

        // A region left stretched keeps following viewport resizes until
        // explicitly un-stretched
        if self.region.stretched.is_some() {
            self.listeners.assign(
                EventKind::Resize,
                RESIZE_LISTENER,
                AssignOptions {
                    context: ContextId::WINDOW,
                    ..Default::default()
                },
            );
        }

        self.session = None;
        self.phase = Phase::Idle;
        self.push_hook(Hook::DragEnd {
            region: self.region_id,
            reason,
        });
        InputResult::Handled
    }

    fn dispatch(&mut self, command: Command, _now_ms: f64) {
        match command {
            Command::EmitEdges(edges) => self.push_hook(Hook::EdgeShift {
                region: self.region_id,
                edges,
            }),
            Command::Restretch => {
                geometry::restretch(&mut self.region, self.viewport);
            }
        }
    }

    fn push_hook(&mut self, hook: Hook) {
        self.hooks.push_back(HookEvent {
            hook,
            context: self.config.hook_context,
        });
    }
}
