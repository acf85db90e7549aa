//! Argument-aware trailing debounce
//!
//! Deferred work is scheduled as a command with a deadline and a handle.
//! Scheduling a command equal to one already pending cancels the earlier
//! deadline and installs a new one, so bursts of identical calls collapse
//! into one trailing run; distinct payloads coexist and fire in deadline
//! order. Cancelling the handle is the only other way to suppress a run.

use std::cmp::Ordering;

use super::frame::BASE_FRAME_INTERVAL_MS;

/// Backlog size past which tombstoned slots are compacted
const SWEEP_THRESHOLD: usize = 128;

/// Cancellation token for one scheduled command
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TaskHandle(u64);

#[derive(Debug, PartialEq, Eq)]
enum SlotState {
    Pending,
    Cancelled,
    Fired,
}

#[derive(Debug)]
struct Slot<C> {
    command: C,
    deadline_ms: f64,
    handle: TaskHandle,
    state: SlotState,
}

/// Deadline-based throttle scheduler over a command type
#[derive(Debug)]
pub struct ThrottleScheduler<C> {
    slots: Vec<Slot<C>>,
    default_delay_ms: f64,
    next_handle: u64,
}

impl<C: Clone + PartialEq> ThrottleScheduler<C> {
    /// Create a scheduler with the single-frame default delay
    pub fn new() -> Self {
        Self::with_delay(BASE_FRAME_INTERVAL_MS)
    }

    /// Create a scheduler with a custom default delay
    pub fn with_delay(default_delay_ms: f64) -> Self {
        Self {
            slots: Vec::new(),
            default_delay_ms,
            next_handle: 1,
        }
    }

    /// Schedule a command after `delay_ms` (default: the per-instance delay)
    ///
    /// An equal command already pending is cancelled and replaced; its
    /// earlier deadline never fires.
    pub fn schedule(&mut self, command: C, delay_ms: Option<f64>, now_ms: f64) -> TaskHandle {
        let delay = delay_ms.unwrap_or(self.default_delay_ms);

        for slot in &mut self.slots {
            if slot.state == SlotState::Pending && slot.command == command {
                slot.state = SlotState::Cancelled;
            }
        }

        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        self.slots.push(Slot {
            command,
            deadline_ms: now_ms + delay,
            handle,
            state: SlotState::Pending,
        });
        self.sweep_if_needed();
        handle
    }

    /// Cancel a pending command by handle
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        for slot in &mut self.slots {
            if slot.handle == handle && slot.state == SlotState::Pending {
                slot.state = SlotState::Cancelled;
                return true;
            }
        }
        false
    }

    /// Fire every command whose deadline has passed, in deadline order
    ///
    /// Fired entries are pruned immediately.
    pub fn run_due(&mut self, now_ms: f64) -> Vec<C> {
        let mut due: Vec<(f64, usize)> = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.state == SlotState::Pending && slot.deadline_ms <= now_ms)
            .map(|(index, slot)| (slot.deadline_ms, index))
            .collect();
        due.sort_by(|a, b| {
            a.0.partial_cmp(&b.0)
                .unwrap_or(Ordering::Equal)
                .then(a.1.cmp(&b.1))
        });

        let commands: Vec<C> = due
            .iter()
            .map(|&(_, index)| self.slots[index].command.clone())
            .collect();
        for &(_, index) in &due {
            self.slots[index].state = SlotState::Fired;
        }
        self.slots.retain(|slot| slot.state != SlotState::Fired);
        commands
    }

    /// Cancel every pending command; leaves zero live deadlines
    pub fn clear_all(&mut self) {
        self.slots.clear();
    }

    /// Number of live (pending) commands
    pub fn pending(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.state == SlotState::Pending)
            .count()
    }

    /// Total slots including tombstones awaiting the sweep
    pub fn backlog(&self) -> usize {
        self.slots.len()
    }

    /// Housekeeping only: compacts replaced/cancelled tombstones once the
    /// backlog outgrows the threshold. Never changes what fires.
    fn sweep_if_needed(&mut self) {
        if self.slots.len() > SWEEP_THRESHOLD {
            self.slots.retain(|slot| slot.state == SlotState::Pending);
        }
    }
}

impl<C: Clone + PartialEq> Default for ThrottleScheduler<C> {
    fn default() -> Self {
        Self::new()
    }
}
