use bevy::prelude::*;
use vizij_showcase_core::ShowcaseConfig;

pub mod components;
pub mod host;
pub mod resources;
pub mod systems;

pub use components::{ShowcaseAnimationGroup, ShowcaseButton, ShowcaseSelf};
pub use host::WorldHost;
pub use resources::{
    AttachShowcase, DetachShowcase, ListenerIds, ShowcaseClicked, ShowcaseFrameRate,
    ShowcaseInstance, ShowcaseSettings,
};

/// Runs a car showcase over the app's entities. Nothing is wired until an
/// [`AttachShowcase`] event is sent.
#[derive(Default)]
pub struct VizijShowcasePlugin {
    pub config: ShowcaseConfig,
}

impl Plugin for VizijShowcasePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ShowcaseSettings(self.config.clone()))
            .init_resource::<ShowcaseInstance>()
            .init_resource::<ShowcaseFrameRate>()
            .init_resource::<ListenerIds>()
            .add_event::<AttachShowcase>()
            .add_event::<DetachShowcase>()
            .add_event::<ShowcaseClicked>()
            .add_systems(
                Update,
                (
                    systems::emit_button_clicks,
                    systems::advance_group_cursors,
                    systems::handle_lifecycle_requests,
                    systems::dispatch_clicks,
                    systems::advance_showcase_timers,
                )
                    .chain(),
            );
    }
}
