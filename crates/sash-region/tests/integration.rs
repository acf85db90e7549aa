//! Integration tests for the region interaction engine
//!
//! These tests verify full interaction workflows including:
//! - Move and resize sessions from pointer-down through pointer-up
//! - Stretch/restore toggling and maintained stretch across resizes
//! - Abort timeouts, Escape, and disable-mid-drag terminal transitions
//! - Resource accounting (no leaked listeners or timers)

use sash_region::{
    EndReason, Hook, InputResult, InteractionConfig, InteractionController, Phase, Pivot, Rect,
    StretchOutcome, Vec2,
};

const VIEWPORT: Rect = Rect::new(0.0, 0.0, 1000.0, 800.0);

fn engine_with_region(frame: Rect) -> InteractionController {
    let mut engine = InteractionController::new(InteractionConfig::default());
    engine.set_viewport(VIEWPORT);
    engine.bind_region(1, frame);
    engine
}

fn hook_kinds(engine: &mut InteractionController) -> Vec<Hook> {
    engine.drain_hooks().into_iter().map(|e| e.hook).collect()
}

// =============================================================================
// Move Session Tests
// =============================================================================

#[test]
fn test_move_session_full() {
    let mut engine = engine_with_region(Rect::new(100.0, 100.0, 400.0, 300.0));

    // Arm on primary button
    let result = engine.pointer_down(Vec2::new(200.0, 200.0), 0, None, 1000.0);
    assert_eq!(result, InputResult::Handled);
    assert_eq!(engine.phase(), Phase::Armed);

    // Drag 60 right, 40 down
    engine.pointer_move(Vec2::new(260.0, 240.0), 1100.0);
    assert_eq!(engine.phase(), Phase::Moving);
    let visual = engine.region().visual_frame();
    assert!((visual.x - 160.0).abs() < 0.001);
    assert!((visual.y - 140.0).abs() < 0.001);

    // Release
    engine.pointer_up(1200.0);
    assert_eq!(engine.phase(), Phase::Idle);
    assert!(!engine.session_active());

    let hooks = hook_kinds(&mut engine);
    assert_eq!(hooks.first(), Some(&Hook::DragStart { region: 1 }));
    assert!(hooks.contains(&Hook::DragEnd {
        region: 1,
        reason: EndReason::Release,
    }));

    // Nothing leaked
    assert_eq!(engine.listener_count(), 0);
    assert_eq!(engine.pending_timers(), 0);
}

#[test]
fn test_move_clamps_to_viewport_for_arbitrary_deltas() {
    let mut engine = engine_with_region(Rect::new(100.0, 100.0, 400.0, 300.0));
    engine.pointer_down(Vec2::new(200.0, 200.0), 0, None, 0.0);

    // A delta several times the viewport size pins the region at the edge
    engine.pointer_move(Vec2::new(9000.0, 9000.0), 100.0);
    let visual = engine.region().visual_frame();
    assert!(visual.right() <= VIEWPORT.right() + 0.001);
    assert!(visual.bottom() <= VIEWPORT.bottom() + 0.001);
}

#[test]
fn test_frame_clock_gates_move_updates() {
    let mut engine = engine_with_region(Rect::new(100.0, 100.0, 400.0, 300.0));
    engine.pointer_down(Vec2::new(200.0, 200.0), 0, None, 1000.0);

    // Below the ~16.7ms frame interval: sample recorded, no geometry
    engine.pointer_move(Vec2::new(210.0, 200.0), 1005.0);
    assert!((engine.region().visual_frame().x - 100.0).abs() < 0.001);

    // Past the interval: geometry catches up to the current pointer
    engine.pointer_move(Vec2::new(230.0, 200.0), 1020.0);
    assert!((engine.region().visual_frame().x - 130.0).abs() < 0.001);
}

#[test]
fn test_identical_coordinates_are_ignored() {
    let mut engine = engine_with_region(Rect::new(100.0, 100.0, 400.0, 300.0));
    engine.pointer_down(Vec2::new(200.0, 200.0), 0, None, 1000.0);
    engine.pointer_move(Vec2::new(260.0, 200.0), 1100.0);
    let after_first = engine.region().visual_frame();

    // Same coordinates again, well past the frame interval
    engine.pointer_move(Vec2::new(260.0, 200.0), 1200.0);
    assert_eq!(engine.region().visual_frame(), after_first);
}

// =============================================================================
// Resize Session Tests
// =============================================================================

#[test]
fn test_east_resize_grows_by_pointer_delta() {
    // Pivot 6, pointer x 300 -> 500, initial width 200 at offsetLeft 100:
    // width becomes 400, left unchanged
    let mut engine = engine_with_region(Rect::new(100.0, 100.0, 200.0, 150.0));
    engine.pointer_down(Vec2::new(300.0, 175.0), 0, Some(Pivot::East), 1000.0);
    engine.pointer_move(Vec2::new(500.0, 175.0), 1100.0);

    assert_eq!(engine.phase(), Phase::Resizing);
    let frame = engine.region().frame;
    assert!((frame.width - 400.0).abs() < 0.001);
    assert!((frame.x - 100.0).abs() < 0.001);
}

#[test]
fn test_corner_resize_drives_both_axes() {
    let mut engine = engine_with_region(Rect::new(100.0, 100.0, 400.0, 300.0));
    engine.pointer_down(Vec2::new(500.0, 400.0), 0, Some(Pivot::SouthEast), 1000.0);
    engine.pointer_move(Vec2::new(580.0, 470.0), 1100.0);

    let frame = engine.region().frame;
    assert!((frame.width - 480.0).abs() < 0.001);
    assert!((frame.height - 370.0).abs() < 0.001);
    assert!((frame.x - 100.0).abs() < 0.001);
    assert!((frame.y - 100.0).abs() < 0.001);
}

#[test]
fn test_north_resize_anchors_bottom_edge() {
    let mut engine = engine_with_region(Rect::new(100.0, 300.0, 400.0, 300.0));
    engine.pointer_down(Vec2::new(300.0, 300.0), 0, Some(Pivot::North), 1000.0);
    engine.pointer_move(Vec2::new(300.0, 250.0), 1100.0);

    let frame = engine.region().frame;
    assert!((frame.y - 250.0).abs() < 0.001);
    assert!((frame.height - 350.0).abs() < 0.001);
    assert!((frame.bottom() - 600.0).abs() < 0.001);
}

#[test]
fn test_resize_respects_min_size() {
    let mut engine = engine_with_region(Rect::new(100.0, 100.0, 400.0, 300.0));
    engine.pointer_down(Vec2::new(500.0, 400.0), 0, Some(Pivot::SouthEast), 1000.0);

    // Collapse toward the origin corner
    engine.pointer_move(Vec2::new(110.0, 110.0), 1100.0);
    let frame = engine.region().frame;
    assert!((frame.width - 300.0).abs() < 0.001);
    assert!((frame.height - 200.0).abs() < 0.001);
}

// =============================================================================
// Stretch Tests
// =============================================================================

#[test]
fn test_stretch_scenario_pivot_nine() {
    // Element at (50,50) sized 200x150 in a 1000x800 viewport
    let mut engine = engine_with_region(Rect::new(50.0, 50.0, 200.0, 150.0));

    let outcome = engine.stretch_to(Some(Pivot::SouthEast), 0.0);
    assert_eq!(
        outcome,
        StretchOutcome::Applied {
            frame: Rect::new(50.0, 50.0, 950.0, 750.0)
        }
    );

    // Second stretch on the same pivot restores the original geometry
    let outcome = engine.stretch_to(Some(Pivot::SouthEast), 100.0);
    assert_eq!(
        outcome,
        StretchOutcome::Restored {
            frame: Rect::new(50.0, 50.0, 200.0, 150.0)
        }
    );
    assert_eq!(engine.region().frame, Rect::new(50.0, 50.0, 200.0, 150.0));
}

#[test]
fn test_stretch_toggle_emits_state_hooks() {
    let mut engine = engine_with_region(Rect::new(50.0, 50.0, 200.0, 150.0));

    engine.stretch_to(None, 0.0);
    engine.stretch_to(None, 100.0);

    let hooks = hook_kinds(&mut engine);
    assert_eq!(
        hooks,
        vec![
            Hook::StretchChange {
                region: 1,
                stretched: true,
            },
            Hook::StretchChange {
                region: 1,
                stretched: false,
            },
        ]
    );
}

#[test]
fn test_maintained_stretch_survives_viewport_resizes() {
    let mut engine = engine_with_region(Rect::new(50.0, 50.0, 200.0, 150.0));
    engine.stretch_to(Some(Pivot::East), 0.0);
    assert_eq!(engine.region().frame, Rect::new(50.0, 50.0, 950.0, 150.0));
    // A window-resize listener keeps the stretch glued to the viewport
    assert_eq!(engine.listener_count(), 1);

    engine.viewport_resized(Rect::new(0.0, 0.0, 1400.0, 800.0), 10.0);
    engine.tick(40.0);
    assert_eq!(engine.region().frame, Rect::new(50.0, 50.0, 1350.0, 150.0));

    // Un-stretching releases the resize listener
    engine.stretch_to(Some(Pivot::East), 100.0);
    assert_eq!(engine.listener_count(), 0);
}

#[test]
fn test_double_trigger_bypasses_drag_and_stretches() {
    let mut engine = engine_with_region(Rect::new(50.0, 50.0, 200.0, 150.0));

    engine.pointer_down(Vec2::new(60.0, 60.0), 0, Some(Pivot::SouthEast), 0.0);
    engine.pointer_up(40.0);

    // Second press inside the repeat window
    engine.pointer_down(Vec2::new(60.0, 60.0), 0, Some(Pivot::SouthEast), 120.0);
    assert!(!engine.session_active());
    assert_eq!(engine.region().frame, Rect::new(50.0, 50.0, 950.0, 750.0));
}

// =============================================================================
// Terminal Transition Tests
// =============================================================================

#[test]
fn test_center_move_timeout_ends_session() {
    // Pointer leaves viewport during a center-pivot move and never returns:
    // the session ends automatically within 3000ms and emits dragend
    let mut engine = engine_with_region(Rect::new(100.0, 100.0, 200.0, 150.0));
    engine.pointer_down(Vec2::new(200.0, 175.0), 0, None, 0.0);
    engine.pointer_move(Vec2::new(-80.0, 175.0), 100.0);

    engine.tick(3000.0);

    assert!(!engine.session_active());
    let hooks = hook_kinds(&mut engine);
    assert!(hooks.contains(&Hook::DragEnd {
        region: 1,
        reason: EndReason::Timeout,
    }));
    assert_eq!(engine.pending_timers(), 0);
    assert_eq!(engine.listener_count(), 0);
}

#[test]
fn test_escape_ends_session_cleanly() {
    let mut engine = engine_with_region(Rect::new(100.0, 100.0, 400.0, 300.0));
    engine.pointer_down(Vec2::new(200.0, 200.0), 0, None, 0.0);
    engine.pointer_move(Vec2::new(260.0, 200.0), 100.0);

    assert_eq!(engine.key_down("Escape", 200.0), InputResult::Handled);
    assert!(!engine.session_active());
    assert_eq!(engine.listener_count(), 0);
    assert_eq!(engine.pending_timers(), 0);

    // Other keys pass through
    engine.pointer_down(Vec2::new(200.0, 200.0), 0, None, 1000.0);
    assert_eq!(engine.key_down("Enter", 1050.0), InputResult::Unhandled);
    assert!(engine.session_active());
}

#[test]
fn test_disable_mid_drag_is_observed_before_next_update() {
    let mut engine = engine_with_region(Rect::new(100.0, 100.0, 400.0, 300.0));
    engine.pointer_down(Vec2::new(200.0, 200.0), 0, None, 0.0);
    engine.pointer_move(Vec2::new(260.0, 200.0), 100.0);
    let before = engine.region().visual_frame();

    engine.set_disabled(true);
    engine.pointer_move(Vec2::new(500.0, 500.0), 200.0);

    assert!(!engine.session_active());
    assert_eq!(engine.region().visual_frame(), before);

    // Disabled engines ignore fresh presses entirely
    assert_eq!(
        engine.pointer_down(Vec2::new(200.0, 200.0), 0, None, 300.0),
        InputResult::Unhandled
    );
}

#[test]
fn test_every_terminal_path_leaves_zero_resources() {
    let frame = Rect::new(100.0, 100.0, 400.0, 300.0);

    // Release
    let mut engine = engine_with_region(frame);
    engine.pointer_down(Vec2::new(200.0, 200.0), 0, None, 0.0);
    engine.pointer_up(50.0);
    assert_eq!((engine.listener_count(), engine.pending_timers()), (0, 0));

    // Escape
    let mut engine = engine_with_region(frame);
    engine.pointer_down(Vec2::new(200.0, 200.0), 0, None, 0.0);
    engine.key_down("Escape", 50.0);
    assert_eq!((engine.listener_count(), engine.pending_timers()), (0, 0));

    // Timeout
    let mut engine = engine_with_region(frame);
    engine.pointer_down(Vec2::new(200.0, 200.0), 0, None, 0.0);
    engine.pointer_move(Vec2::new(-50.0, 200.0), 100.0);
    engine.tick(5000.0);
    assert_eq!((engine.listener_count(), engine.pending_timers()), (0, 0));

    // Teardown mid-drag
    let mut engine = engine_with_region(frame);
    engine.pointer_down(Vec2::new(200.0, 200.0), 0, None, 0.0);
    engine.pointer_move(Vec2::new(260.0, 200.0), 100.0);
    assert!(engine.teardown());
    assert_eq!((engine.listener_count(), engine.pending_timers()), (0, 0));
}

// =============================================================================
// Failure Containment Tests
// =============================================================================

#[test]
fn test_failed_session_leaves_engine_usable() {
    let mut engine = engine_with_region(Rect::new(100.0, 100.0, 200.0, 150.0));

    // Session dies on timeout
    engine.pointer_down(Vec2::new(200.0, 175.0), 0, None, 0.0);
    engine.pointer_move(Vec2::new(-80.0, 175.0), 100.0);
    engine.tick(5000.0);
    assert!(!engine.session_active());

    // The engine accepts a fresh session afterwards
    engine.pointer_down(Vec2::new(200.0, 175.0), 0, None, 6000.0);
    assert!(engine.session_active());
    engine.pointer_move(Vec2::new(260.0, 175.0), 6100.0);
    assert_eq!(engine.phase(), Phase::Moving);
    engine.pointer_up(6200.0);
    assert_eq!(engine.phase(), Phase::Idle);
}

#[test]
fn test_unbound_engine_rejects_input() {
    let mut engine = InteractionController::new(InteractionConfig::default());
    engine.set_viewport(VIEWPORT);

    assert_eq!(
        engine.pointer_down(Vec2::new(200.0, 200.0), 0, None, 0.0),
        InputResult::Unhandled
    );
    assert_eq!(engine.stretch_to(None, 0.0), StretchOutcome::Unchanged);
}
