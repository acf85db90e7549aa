//! Interaction engine for Sash UI regions
//!
//! This crate provides the pointer-driven transform engine behind
//! movable/resizable UI regions:
//! - Listener ownership tracking (dedup, forced-passive, leak-proof teardown)
//! - Argument-aware trailing debounce over an explicit command table
//! - Frame-rate gating with drift-compensated baselines
//! - 9-pivot stretch/resize/translate geometry with viewport clamping
//! - The drag/resize session state machine and its lifecycle hooks
//! - The per-host binding policy (target resolution, style suppression)
//!
//! ## Architecture
//!
//! The crate is organized into focused modules:
//!
//! - [`math`]: Core geometry types (`Vec2`, `Size`, `Rect`)
//! - [`geometry`]: Pivot grid, clamped geometry ops, edge detection, the
//!   pre-stretch transform cache
//! - [`schedule`]: Throttle scheduler and frame clock
//! - [`listener`]: Listener registry over a pluggable native backend
//! - [`controller`]: The interaction session state machine
//! - [`binding`]: Per-host drag/resize binding policy
//!
//! ## Example
//!
//! ```rust
//! use sash_region::{InteractionConfig, InteractionController, Pivot, Rect};
//!
//! let mut controller = InteractionController::new(InteractionConfig::default());
//! controller.set_viewport(Rect::new(0.0, 0.0, 1000.0, 800.0));
//! controller.bind_region(1, Rect::new(50.0, 50.0, 200.0, 150.0));
//!
//! // Programmatic stretch toward the south-east pivot
//! controller.stretch_to(Some(Pivot::SouthEast), 0.0);
//! assert_eq!(controller.region().frame, Rect::new(50.0, 50.0, 950.0, 750.0));
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure Rust Core**: All state management is pure Rust, testable
//!    without a browser
//! 2. **Time Abstraction**: Every deferred mechanism takes injected
//!    `now_ms` timestamps for deterministic testing
//! 3. **Composition Over Inheritance**: Capability objects are owned by
//!    the controller, not layered base classes
//! 4. **No Global State**: Independent instances share nothing

pub mod math;
pub mod geometry;
pub mod schedule;
pub mod listener;
pub mod controller;
pub mod binding;

mod region;

// WASM exports (only available with "wasm" feature)
#[cfg(feature = "wasm")]
mod wasm;
#[cfg(feature = "wasm")]
pub use wasm::*;

// Re-export core types for convenience
pub use math::{Rect, Size, Vec2};
pub use geometry::{
    edge_threshold, is_center_pivot, outside_viewport, parse_translate, pointer_edges,
    write_translate, CacheEntry, EdgeFlags, Pivot, ResizeRequest, StretchOutcome, TransformCache,
};
pub use schedule::{FrameClock, TaskHandle, ThrottleScheduler, BASE_FRAME_INTERVAL_MS};
pub use listener::{
    AssignOptions, BindingToken, ContextId, EventKind, ListenerBackend, ListenerId,
    ListenerRegistry, NullBackend,
};
pub use controller::{
    Command, EndReason, Hook, HookEvent, InputResult, InteractionConfig, InteractionController,
    Phase, Session,
};
pub use binding::{BindingHost, RegionBinding};
pub use region::{RegionId, RegionState};
