//! `Host` implementation over a Bevy `World`.
//!
//! Nodes, groups and UI elements are all entities; their ids carry `Entity::to_bits`.
//! Nodes resolve by `Name`, descendants follow `Children`, groups are
//! [`ShowcaseAnimationGroup`] components and buttons are [`ShowcaseButton`] components.

use std::collections::VecDeque;

use bevy::prelude::*;
use vizij_showcase_core::error::HostResult;
use vizij_showcase_core::{
    Button, ControlFlags, ElementId, GroupId, GroupInfo, Host, HostError, ListenerId, NodeId,
    StartArgs, UiElement,
};

use crate::components::{ShowcaseAnimationGroup, ShowcaseButton, ShowcaseSelf};
use crate::resources::ListenerIds;

fn entity(bits: u64) -> Option<Entity> {
    Entity::try_from_bits(bits).ok()
}

fn node_id(e: Entity) -> NodeId {
    NodeId(e.to_bits())
}

pub struct WorldHost<'w> {
    world: &'w mut World,
}

impl<'w> WorldHost<'w> {
    pub fn new(world: &'w mut World) -> Self {
        Self { world }
    }

    fn named(&self, reference: &str) -> impl Iterator<Item = Entity> + '_ {
        let reference = reference.to_owned();
        self.world.iter_entities().filter_map(move |e| {
            e.get::<Name>()
                .filter(|n| n.as_str() == reference)
                .map(|_| e.id())
        })
    }

    fn group_mut(&mut self, group: GroupId) -> HostResult<Mut<'_, ShowcaseAnimationGroup>> {
        entity(group.0)
            .and_then(|e| self.world.get_mut::<ShowcaseAnimationGroup>(e))
            .ok_or(HostError::GroupNotFound(group))
    }

    fn button_mut(&mut self, element: ElementId) -> HostResult<Mut<'_, ShowcaseButton>> {
        entity(element.0)
            .and_then(|e| self.world.get_mut::<ShowcaseButton>(e))
            .ok_or(HostError::ElementNotFound(element))
    }

    fn set_visibility(&mut self, element: ElementId, visible: bool) -> HostResult<()> {
        let mut e = entity(element.0)
            .and_then(|e| self.world.get_entity_mut(e))
            .ok_or(HostError::ElementNotFound(element))?;
        e.insert(if visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        });
        Ok(())
    }
}

impl Host for WorldHost<'_> {
    fn node_by_ref(&self, reference: &str) -> Option<NodeId> {
        self.named(reference).next().map(node_id)
    }

    fn self_node(&self) -> Option<NodeId> {
        self.world
            .iter_entities()
            .find(|e| e.contains::<ShowcaseSelf>())
            .map(|e| node_id(e.id()))
    }

    fn descendants(&self, node: NodeId) -> HostResult<Vec<NodeId>> {
        let root = entity(node.0)
            .filter(|e| self.world.get_entity(*e).is_some())
            .ok_or(HostError::NodeNotFound(node))?;
        let mut out = Vec::new();
        let mut queue = VecDeque::from([root]);
        while let Some(parent) = queue.pop_front() {
            if let Some(children) = self.world.get::<Children>(parent) {
                for &child in children.iter() {
                    out.push(node_id(child));
                    queue.push_back(child);
                }
            }
        }
        Ok(out)
    }

    fn animation_groups(&self) -> Vec<GroupId> {
        let mut groups: Vec<Entity> = self
            .world
            .iter_entities()
            .filter(|e| e.contains::<ShowcaseAnimationGroup>())
            .map(|e| e.id())
            .collect();
        // spawn order stands in for scene order
        groups.sort();
        groups.into_iter().map(|e| GroupId(e.to_bits())).collect()
    }

    fn group_info(&self, group: GroupId) -> Option<GroupInfo> {
        let e = entity(group.0)?;
        self.world
            .get::<ShowcaseAnimationGroup>(e)
            .map(|g| g.cursor.info())
    }

    fn group_targets(&self, group: GroupId) -> Vec<NodeId> {
        entity(group.0)
            .and_then(|e| self.world.get::<ShowcaseAnimationGroup>(e))
            .map(|g| g.targets.iter().copied().map(node_id).collect())
            .unwrap_or_default()
    }

    fn reset_group(&mut self, group: GroupId) -> HostResult<()> {
        self.group_mut(group)?.cursor.reset();
        Ok(())
    }

    fn start_group(&mut self, group: GroupId, args: StartArgs) -> HostResult<()> {
        self.group_mut(group)?.cursor.start(args);
        Ok(())
    }

    fn stop_group(&mut self, group: GroupId) -> HostResult<()> {
        self.group_mut(group)?.cursor.stop();
        Ok(())
    }

    fn go_to_frame(&mut self, group: GroupId, frame: f32) -> HostResult<()> {
        self.group_mut(group)?.cursor.go_to_frame(frame);
        Ok(())
    }

    fn ui_element(&mut self, reference: &str) -> Option<UiElement> {
        let found = self
            .named(reference)
            .find(|e| self.world.get::<ShowcaseButton>(*e).is_some())?;
        Some(UiElement::Control(ElementId(found.to_bits())))
    }

    fn add_click_listener(&mut self, _element: ElementId, _button: Button) -> HostResult<ListenerId> {
        Err(HostError::Unsupported {
            op: "add_click_listener",
        })
    }

    fn remove_click_listener(&mut self, _element: ElementId, _listener: ListenerId) -> HostResult<()> {
        Err(HostError::Unsupported {
            op: "remove_click_listener",
        })
    }

    fn observe_pointer_up(&mut self, element: ElementId, button: Button) -> HostResult<ListenerId> {
        let id = {
            let mut ids = self.world.get_resource_or_insert_with(ListenerIds::default);
            let id = ListenerId(ids.next);
            ids.next += 1;
            id
        };
        self.button_mut(element)?.listeners.push((id, button));
        Ok(id)
    }

    fn remove_pointer_up_observer(
        &mut self,
        element: ElementId,
        observer: ListenerId,
    ) -> HostResult<()> {
        let mut button = self.button_mut(element)?;
        let before = button.listeners.len();
        button.listeners.retain(|(id, _)| *id != observer);
        if button.listeners.len() == before {
            return Err(HostError::ListenerNotFound(observer));
        }
        Ok(())
    }

    fn set_style_visibility(&mut self, element: ElementId, visible: bool) -> HostResult<()> {
        self.set_visibility(element, visible)
    }

    fn set_control_flags(&mut self, element: ElementId, flags: ControlFlags) -> HostResult<()> {
        {
            let mut button = self.button_mut(element)?;
            button.enabled = flags.is_enabled;
            button.hit_test_visible = flags.is_hit_test_visible;
        }
        self.set_visibility(element, flags.is_visible)
    }
}
