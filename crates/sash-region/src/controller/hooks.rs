//! Semantic lifecycle notifications

use serde::Serialize;

use super::session::EndReason;
use crate::geometry::EdgeFlags;
use crate::listener::ContextId;
use crate::region::RegionId;

/// Notification emitted to the surrounding declarative layer
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "hook", rename_all = "lowercase")]
pub enum Hook {
    /// A drag or resize session armed
    #[serde(rename = "dragstart")]
    DragStart { region: RegionId },
    /// A session reached a terminal transition
    #[serde(rename = "dragend")]
    DragEnd { region: RegionId, reason: EndReason },
    /// The pointer's edge-proximity flags changed
    #[serde(rename = "edgeshift")]
    EdgeShift { region: RegionId, edges: EdgeFlags },
    /// The region stretched to a pivot extent, or restored from one
    #[serde(rename = "stretchchange")]
    StretchChange { region: RegionId, stretched: bool },
}

/// A hook plus the context it should bubble to, if any
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct HookEvent {
    #[serde(flatten)]
    pub hook: Hook,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ContextId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hook_serialization_names() {
        let start = serde_json::to_string(&Hook::DragStart { region: 3 }).unwrap();
        assert!(start.contains(r#""hook":"dragstart""#));

        let end = serde_json::to_string(&Hook::DragEnd {
            region: 3,
            reason: EndReason::Timeout,
        })
        .unwrap();
        assert!(end.contains(r#""hook":"dragend""#));
        assert!(end.contains(r#""reason":"timeout""#));
    }

    #[test]
    fn test_hook_event_omits_absent_context() {
        let event = HookEvent {
            hook: Hook::DragStart { region: 1 },
            context: None,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(!json.contains("context"));
    }
}
