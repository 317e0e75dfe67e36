use bevy::prelude::*;
use vizij_showcase_core::CarShowcase;

use crate::components::{ShowcaseAnimationGroup, ShowcaseButton};
use crate::host::WorldHost;
use crate::resources::{
    AttachShowcase, DetachShowcase, ShowcaseClicked, ShowcaseFrameRate, ShowcaseInstance,
    ShowcaseSettings,
};

/// Pressed buttons report one click per registered listener, unless disabled or
/// hidden from hit testing.
pub fn emit_button_clicks(
    buttons: Query<(&Interaction, &ShowcaseButton), Changed<Interaction>>,
    mut clicks: EventWriter<ShowcaseClicked>,
) {
    for (interaction, button) in buttons.iter() {
        if *interaction != Interaction::Pressed || !button.accepts_clicks() {
            continue;
        }
        for &(_, b) in &button.listeners {
            clicks.send(ShowcaseClicked { button: b });
        }
    }
}

/// Advance every group cursor by this frame's delta.
pub fn advance_group_cursors(
    time: Res<Time>,
    rate: Res<ShowcaseFrameRate>,
    mut groups: Query<&mut ShowcaseAnimationGroup>,
) {
    let frames = time.delta_seconds() * rate.0;
    if frames <= 0.0 {
        return;
    }
    for mut group in groups.iter_mut() {
        if group.cursor.playing {
            group.cursor.advance(frames);
        }
    }
}

/// Apply pending attach/detach requests. A detach queued together with an attach
/// runs first.
pub fn handle_lifecycle_requests(world: &mut World) {
    let detach = world
        .resource_mut::<Events<DetachShowcase>>()
        .drain()
        .count()
        > 0;
    let attach = world
        .resource_mut::<Events<AttachShowcase>>()
        .drain()
        .last();
    if !detach && attach.is_none() {
        return;
    }

    world.resource_scope(|world, mut instance: Mut<ShowcaseInstance>| {
        if let Some(mut showcase) = instance.0.take() {
            showcase.detach(&mut WorldHost::new(world));
            info!("car showcase detached");
        }
        let Some(request) = attach else {
            return;
        };
        if let Some(config) = request.config {
            world.insert_resource(ShowcaseSettings(config));
        }
        let config = world.resource::<ShowcaseSettings>().0.clone();
        let showcase = CarShowcase::attach(&mut WorldHost::new(world), config);
        if showcase.root().is_none() {
            warn!("car showcase attached without a root; nothing is wired");
        } else {
            info!(
                "car showcase attached: {} car animation groups, {} buttons wired",
                showcase.groups().car_groups().count(),
                showcase.registrations().len()
            );
        }
        instance.0 = Some(showcase);
    });
}

pub fn dispatch_clicks(world: &mut World) {
    let clicks: Vec<ShowcaseClicked> = world
        .resource_mut::<Events<ShowcaseClicked>>()
        .drain()
        .collect();
    if clicks.is_empty() {
        return;
    }
    world.resource_scope(|world, mut instance: Mut<ShowcaseInstance>| {
        let Some(showcase) = instance.0.as_mut() else {
            debug!("{} clicks dropped: showcase not attached", clicks.len());
            return;
        };
        let mut host = WorldHost::new(world);
        for click in clicks {
            let outcome = showcase.handle_click(&mut host, click.button);
            debug!("{:?} click: {outcome:?}", click.button);
        }
    });
}

/// Run the component's timers (deferred reset, completion polls) on the frame clock.
pub fn advance_showcase_timers(world: &mut World) {
    let dt = world.resource::<Time>().delta();
    world.resource_scope(|world, mut instance: Mut<ShowcaseInstance>| {
        if let Some(showcase) = instance.0.as_mut() {
            showcase.advance(&mut WorldHost::new(world), dt);
        }
    });
}
