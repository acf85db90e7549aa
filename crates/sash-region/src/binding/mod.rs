//! Drag/resize binding
//!
//! The per-host policy object: resolves which region actually gets
//! transformed, seeds first-time positioning from the host's current
//! offsets, routes pointer input into the interaction controller, and
//! keeps the host's rendered state in sync with the engine's.

use crate::controller::{InputResult, InteractionController};
use crate::geometry::Pivot;
use crate::listener::ListenerBackend;
use crate::math::{Rect, Vec2};
use crate::region::RegionId;

/// Surface the declarative layer exposes to a binding
///
/// This is the only way the engine reaches the render tree.
pub trait BindingHost {
    /// Nearest ancestor matching a selector, `closest()`-style
    fn closest(&self, selector: &str) -> Option<RegionId>;
    /// The binding's own rendered region, for static bindings
    fn static_region(&self) -> Option<RegionId>;
    /// Root context of the nearest owning component
    fn component_root(&self) -> Option<RegionId>;
    /// The binding element itself; always resolvable
    fn self_region(&self) -> RegionId;

    /// Current box offsets of a region (left/top/width/height)
    fn offsets_of(&self, region: RegionId) -> Rect;
    /// Write absolute box geometry and translation back to a region
    fn apply_frame(&mut self, region: RegionId, frame: Rect, translation: Vec2);
    /// Reflect the grabbed indicator on a region
    fn set_grabbed(&mut self, region: RegionId, grabbed: bool);
    /// Suppress or restore `user-select`/`overflow` while dragging
    fn suppress_drag_styles(&mut self, on: bool);
}

/// Policy object binding one host element to an interaction controller
#[derive(Debug)]
pub struct RegionBinding {
    /// Explicit target selector, highest resolution priority
    selector: Option<String>,
    /// Marked static: the binding's own rendered region is the target
    static_binding: bool,
    seeded: Option<RegionId>,
    engaged: bool,
}

impl RegionBinding {
    /// Create a binding with an optional target selector
    pub fn new(selector: Option<String>, static_binding: bool) -> Self {
        Self {
            selector,
            static_binding,
            seeded: None,
            engaged: false,
        }
    }

    /// Resolve the transformed region in priority order
    ///
    /// Selector match first, then the static binding's own region, then
    /// the owning component's root, then the element itself.
    pub fn resolve<H: BindingHost>(&self, host: &H) -> RegionId {
        if let Some(selector) = self.selector.as_deref() {
            if let Some(id) = host.closest(selector) {
                return id;
            }
        }
        if self.static_binding {
            if let Some(id) = host.static_region() {
                return id;
            }
        }
        host.component_root().unwrap_or_else(|| host.self_region())
    }

    /// Whether a drag is engaged through this binding
    #[inline]
    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    /// Route a pointer-down through the controller
    ///
    /// The first engagement per target seeds absolute positioning from the
    /// host's current offsets so later geometry writes have a stable
    /// baseline.
    pub fn engage<H: BindingHost, B: ListenerBackend>(
        &mut self,
        host: &mut H,
        controller: &mut InteractionController<B>,
        pos: Vec2,
        button: u8,
        pivot: Option<Pivot>,
        now_ms: f64,
    ) -> InputResult {
        let id = self.resolve(host);
        if self.seeded != Some(id) {
            let frame = host.offsets_of(id);
            controller.bind_region(id, frame);
            host.apply_frame(id, frame, Vec2::ZERO);
            self.seeded = Some(id);
        }

        let result = controller.pointer_down(pos, button, pivot, now_ms);
        if controller.session_active() {
            host.suppress_drag_styles(true);
            self.engaged = true;
        }
        self.sync(host, controller);
        result
    }

    /// Route a pointer sample through the controller
    pub fn pointer_move<H: BindingHost, B: ListenerBackend>(
        &mut self,
        host: &mut H,
        controller: &mut InteractionController<B>,
        pos: Vec2,
        now_ms: f64,
    ) -> InputResult {
        let result = controller.pointer_move(pos, now_ms);
        self.sync(host, controller);
        self.settle(host, controller);
        result
    }

    /// Route a pointer release through the controller
    pub fn release<H: BindingHost, B: ListenerBackend>(
        &mut self,
        host: &mut H,
        controller: &mut InteractionController<B>,
        now_ms: f64,
    ) -> InputResult {
        let result = controller.pointer_up(now_ms);
        self.sync(host, controller);
        self.settle(host, controller);
        result
    }

    /// Drive deferred controller work and sync any resulting geometry
    pub fn tick<H: BindingHost, B: ListenerBackend>(
        &mut self,
        host: &mut H,
        controller: &mut InteractionController<B>,
        now_ms: f64,
    ) {
        controller.tick(now_ms);
        self.sync(host, controller);
        self.settle(host, controller);
    }

    /// Push the engine-side region state out to the host
    pub fn sync<H: BindingHost, B: ListenerBackend>(
        &self,
        host: &mut H,
        controller: &InteractionController<B>,
    ) {
        let id = controller.region_id();
        let region = controller.region();
        host.apply_frame(id, region.frame, region.translation);
        host.set_grabbed(id, region.grabbed);
    }

    /// Restore suppressed styles once no session remains
    fn settle<H: BindingHost, B: ListenerBackend>(
        &mut self,
        host: &mut H,
        controller: &InteractionController<B>,
    ) {
        if self.engaged && !controller.session_active() {
            host.suppress_drag_styles(false);
            self.engaged = false;
        }
    }
}
