use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy_vizij_showcase::{
    AttachShowcase, DetachShowcase, ShowcaseAnimationGroup, ShowcaseButton, ShowcaseClicked,
    ShowcaseFrameRate, ShowcaseInstance, ShowcaseSelf, ShowcaseSettings, VizijShowcasePlugin,
};
use serde_json::json;
use vizij_showcase_core::{Button, ShowcaseConfig};

struct Car {
    door_group: Entity,
    wheel_group: Entity,
    doors_button: Entity,
    wheel_button: Entity,
}

fn config() -> ShowcaseConfig {
    serde_json::from_value(json!({
        "carRoot": "CarRoot",
        "buttonDoors": "btn-doors",
        "buttonToggleInterior": "btn-toggle",
        "buttonSteeringWheel": "btn-wheel",
    }))
    .expect("config should parse")
}

fn car_app(config: ShowcaseConfig) -> (App, Car) {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(VizijShowcasePlugin { config })
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(50)));

    let world = app.world_mut();
    let root = world.spawn((Name::new("CarRoot"), ShowcaseSelf)).id();
    let door = world.spawn(Name::new("Door_BL")).id();
    let wheel = world.spawn(Name::new("SteeringWheel")).id();
    world.entity_mut(root).add_child(door);
    world.entity_mut(root).add_child(wheel);

    let door_group = world
        .spawn(ShowcaseAnimationGroup::new("mk_animation_ID0_BL", 0.0, 60.0).with_targets([door]))
        .id();
    let wheel_group = world
        .spawn(
            ShowcaseAnimationGroup::new("mk_animation_ID8_Wheel", 0.0, 120.0)
                .with_targets([wheel]),
        )
        .id();

    let mut button = |name: &str| {
        world
            .spawn((Name::new(name.to_string()), ShowcaseButton::default(), Interaction::None))
            .id()
    };
    let doors_button = button("btn-doors");
    let wheel_button = button("btn-wheel");
    button("btn-toggle");

    (
        app,
        Car {
            door_group,
            wheel_group,
            doors_button,
            wheel_button,
        },
    )
}

fn attached_car() -> (App, Car) {
    let (mut app, car) = car_app(config());
    app.world_mut().send_event(AttachShowcase::default());
    app.update();
    (app, car)
}

fn press(app: &mut App, button: Entity) {
    let mut interaction = app
        .world_mut()
        .get_mut::<Interaction>(button)
        .expect("button has Interaction");
    *interaction = Interaction::Pressed;
}

fn doors_open(app: &App) -> bool {
    app.world()
        .resource::<ShowcaseInstance>()
        .get()
        .is_some_and(|s| s.state().doors_open)
}

#[test]
fn plugin_inserts_resources() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(VizijShowcasePlugin::default());

    assert!(app.world().get_resource::<ShowcaseSettings>().is_some());
    assert!(app.world().resource::<ShowcaseInstance>().get().is_none());
    assert_eq!(app.world().resource::<ShowcaseFrameRate>().0, 60.0);
}

#[test]
fn attach_wires_buttons_and_shows_exterior_set() {
    let (app, car) = attached_car();
    let world = app.world();

    let showcase = world.resource::<ShowcaseInstance>().get().expect("attached");
    assert_eq!(showcase.registrations().len(), 3);
    assert_eq!(showcase.groups().car_groups().count(), 2);

    let doors = world.get::<ShowcaseButton>(car.doors_button).unwrap();
    assert_eq!(doors.listeners.len(), 1);
    assert!(doors.accepts_clicks());
    assert_eq!(world.get::<Visibility>(car.doors_button), Some(&Visibility::Inherited));

    let wheel = world.get::<ShowcaseButton>(car.wheel_button).unwrap();
    assert!(!wheel.accepts_clicks());
    assert_eq!(world.get::<Visibility>(car.wheel_button), Some(&Visibility::Hidden));
}

#[test]
fn pressed_button_opens_the_doors() {
    let (mut app, car) = attached_car();
    press(&mut app, car.doors_button);
    app.update();

    let group = app.world().get::<ShowcaseAnimationGroup>(car.door_group).unwrap();
    assert!(group.cursor.playing);
    assert!(!doors_open(&app));

    for _ in 0..200 {
        if doors_open(&app) {
            break;
        }
        app.update();
    }
    assert!(doors_open(&app));
    let group = app.world().get::<ShowcaseAnimationGroup>(car.door_group).unwrap();
    assert!(!group.cursor.playing);
    assert_eq!(group.cursor.frame, 60.0);
}

#[test]
fn hidden_button_ignores_presses() {
    let (mut app, car) = attached_car();
    press(&mut app, car.wheel_button);
    app.update();

    let group = app.world().get::<ShowcaseAnimationGroup>(car.wheel_group).unwrap();
    assert!(!group.cursor.playing);
}

#[test]
fn toggle_click_reveals_interior_buttons() {
    let (mut app, car) = attached_car();
    app.world_mut().send_event(ShowcaseClicked {
        button: Button::ToggleInterior,
    });
    app.update();

    let world = app.world();
    assert!(world.resource::<ShowcaseInstance>().get().unwrap().state().is_interior);
    assert!(world.get::<ShowcaseButton>(car.wheel_button).unwrap().accepts_clicks());
    assert_eq!(world.get::<Visibility>(car.doors_button), Some(&Visibility::Hidden));

    press(&mut app, car.wheel_button);
    app.update();
    let group = app.world().get::<ShowcaseAnimationGroup>(car.wheel_group).unwrap();
    assert!(group.cursor.playing);
}

#[test]
fn detach_request_removes_listeners() {
    let (mut app, car) = attached_car();
    app.world_mut().send_event(DetachShowcase);
    app.update();

    assert!(app.world().resource::<ShowcaseInstance>().get().is_none());
    let doors = app.world().get::<ShowcaseButton>(car.doors_button).unwrap();
    assert!(doors.listeners.is_empty());

    // clicks after detach are dropped
    press(&mut app, car.doors_button);
    app.update();
    let group = app.world().get::<ShowcaseAnimationGroup>(car.door_group).unwrap();
    assert!(!group.cursor.playing);
}

#[test]
fn unresolved_root_falls_back_to_the_self_marker() {
    let mut cfg = config();
    cfg.car_root = Some("NoSuchNode".into());
    let (mut app, _) = car_app(cfg);
    app.world_mut().send_event(AttachShowcase::default());
    app.update();

    let showcase = app.world().resource::<ShowcaseInstance>().get().unwrap();
    assert!(showcase.root().is_some());
    assert_eq!(showcase.groups().car_groups().count(), 2);
}

#[test]
fn attach_event_can_replace_the_settings() {
    let (mut app, _) = car_app(ShowcaseConfig::default());
    let fixture = vizij_test_fixtures::configs::load("car_exact").unwrap();
    app.world_mut().send_event(AttachShowcase {
        config: Some(fixture.clone()),
    });
    app.update();

    assert_eq!(app.world().resource::<ShowcaseSettings>().0, fixture);
    let showcase = app.world().resource::<ShowcaseInstance>().get().unwrap();
    assert_eq!(showcase.registrations().len(), 1);
}
