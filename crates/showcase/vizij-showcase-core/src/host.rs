//! Host contract: what the surrounding engine provides to the component.
//!
//! Adapters translate their own scene graph, animation system and UI toolkit into
//! these calls. All handles are opaque ids minted by the adapter.

use serde::{Deserialize, Serialize};

use crate::error::HostResult;
use crate::ids::{ElementId, GroupId, ListenerId, NodeId};
use crate::state::Button;
use crate::ui::UiElement;

/// Snapshot of an animation group's public fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupInfo {
    pub name: String,
    pub from: f32,
    pub to: f32,
    pub is_playing: bool,
}

/// Arguments of a group `start` call.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StartArgs {
    pub looping: bool,
    /// Signed playback rate; negative plays from `to` back to `from`.
    pub speed_ratio: f32,
    pub from: f32,
    pub to: f32,
}

/// Visibility/interaction flags of a GUI-control-like element.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlFlags {
    pub is_visible: bool,
    pub is_enabled: bool,
    pub is_hit_test_visible: bool,
}

impl ControlFlags {
    pub fn all(on: bool) -> Self {
        Self {
            is_visible: on,
            is_enabled: on,
            is_hit_test_visible: on,
        }
    }
}

pub trait Host {
    // Scene graph

    /// Resolve a configured node reference.
    fn node_by_ref(&self, reference: &str) -> Option<NodeId>;
    /// Node the component is attached to, used when no root reference resolves.
    fn self_node(&self) -> Option<NodeId>;
    /// All descendants of `node`, excluding `node` itself.
    fn descendants(&self, node: NodeId) -> HostResult<Vec<NodeId>>;

    // Animation groups

    /// Every animation group in the scene, in scene order.
    fn animation_groups(&self) -> Vec<GroupId>;
    fn group_info(&self, group: GroupId) -> Option<GroupInfo>;
    /// Nodes animated by the group, already resolved through any host-side aliasing
    /// (transform node, owner node, ...).
    fn group_targets(&self, group: GroupId) -> Vec<NodeId>;
    fn reset_group(&mut self, group: GroupId) -> HostResult<()>;
    fn start_group(&mut self, group: GroupId, args: StartArgs) -> HostResult<()>;
    fn stop_group(&mut self, group: GroupId) -> HostResult<()>;
    fn go_to_frame(&mut self, group: GroupId, frame: f32) -> HostResult<()>;
    /// Evaluate every targeted animation of the group at `frame`.
    fn evaluate_group(&mut self, _group: GroupId, _frame: f32) -> HostResult<()> {
        Ok(())
    }

    // UI

    /// Resolve a configured UI element reference together with its capability kind.
    fn ui_element(&mut self, reference: &str) -> Option<UiElement>;
    fn add_click_listener(&mut self, element: ElementId, button: Button)
        -> HostResult<ListenerId>;
    fn remove_click_listener(&mut self, element: ElementId, listener: ListenerId)
        -> HostResult<()>;
    fn observe_pointer_up(&mut self, element: ElementId, button: Button) -> HostResult<ListenerId>;
    fn remove_pointer_up_observer(
        &mut self,
        element: ElementId,
        observer: ListenerId,
    ) -> HostResult<()>;
    /// Dom-like visibility: `display` and `pointerEvents` set to "" or "none".
    fn set_style_visibility(&mut self, element: ElementId, visible: bool) -> HostResult<()>;
    fn set_control_flags(&mut self, element: ElementId, flags: ControlFlags) -> HostResult<()>;
}
