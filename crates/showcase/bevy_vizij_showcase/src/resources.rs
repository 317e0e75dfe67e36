use bevy::prelude::*;
use vizij_showcase_core::{Button, CarShowcase, ShowcaseConfig};

/// Configuration used by the next attach.
#[derive(Resource, Debug, Clone, Default)]
pub struct ShowcaseSettings(pub ShowcaseConfig);

/// The attached component, if any.
#[derive(Resource, Debug, Default)]
pub struct ShowcaseInstance(pub Option<CarShowcase>);

impl ShowcaseInstance {
    pub fn get(&self) -> Option<&CarShowcase> {
        self.0.as_ref()
    }
}

/// Frames per second at which group cursors advance.
#[derive(Resource, Debug, Clone, Copy)]
pub struct ShowcaseFrameRate(pub f32);

impl Default for ShowcaseFrameRate {
    fn default() -> Self {
        Self(60.0)
    }
}

/// Source of listener ids handed out by the world host.
#[derive(Resource, Debug, Default)]
pub struct ListenerIds {
    pub(crate) next: u64,
}

/// Attach the showcase, replacing the settings first when `config` is given.
/// An instance that is already attached is detached beforehand.
#[derive(Event, Debug, Clone, Default)]
pub struct AttachShowcase {
    pub config: Option<ShowcaseConfig>,
}

#[derive(Event, Debug, Clone, Copy, Default)]
pub struct DetachShowcase;

/// A button click delivered to the showcase.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowcaseClicked {
    pub button: Button,
}
