use bevy::prelude::*;
use vizij_showcase_core::{Button, GroupCursor, ListenerId};

/// An animation group living on an entity. The cursor is the group's clock and is
/// advanced every frame by the plugin; `targets` are the entities it animates.
#[derive(Component, Debug, Clone)]
pub struct ShowcaseAnimationGroup {
    pub cursor: GroupCursor,
    pub targets: Vec<Entity>,
}

impl ShowcaseAnimationGroup {
    pub fn new(name: impl Into<String>, from: f32, to: f32) -> Self {
        Self {
            cursor: GroupCursor::new(name, from, to),
            targets: Vec::new(),
        }
    }

    pub fn with_targets(mut self, targets: impl IntoIterator<Item = Entity>) -> Self {
        self.targets.extend(targets);
        self
    }

    pub fn name(&self) -> &str {
        &self.cursor.name
    }
}

/// A clickable showcase button. Resolved by its `Name`; clicks come from the
/// entity's `Interaction`.
#[derive(Component, Debug, Clone)]
pub struct ShowcaseButton {
    pub enabled: bool,
    pub hit_test_visible: bool,
    pub listeners: Vec<(ListenerId, Button)>,
}

impl Default for ShowcaseButton {
    fn default() -> Self {
        Self {
            enabled: true,
            hit_test_visible: true,
            listeners: Vec::new(),
        }
    }
}

impl ShowcaseButton {
    pub fn accepts_clicks(&self) -> bool {
        self.enabled && self.hit_test_visible
    }
}

/// Marks the entity the showcase is attached to. Used as the car root when the
/// configured root name does not resolve.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct ShowcaseSelf;
