use std::time::Duration;

use vizij_showcase_core::{
    Button, CarShowcase, ClickOutcome, NumberParam, ShowcaseConfig, StartArgs, UiMode,
};
use vizij_test_fixtures::mock::{run_for, run_until_settled};
use vizij_test_fixtures::{configs, scenes, HostCall, MockScene};

const DOORS: [&str; 4] = [
    "mk_animation_ID0_BL",
    "mk_animation_ID0_BR",
    "mk_animation_ID0_FL",
    "mk_animation_ID0_FR",
];

fn attached_with(cfg: ShowcaseConfig) -> (MockScene, CarShowcase) {
    let mut scene = scenes::load("car").expect("car scene fixture");
    let mut showcase = CarShowcase::attach(&mut scene, cfg);
    // let the deferred reset run
    showcase.advance(&mut scene, Duration::ZERO);
    (scene, showcase)
}

fn attached() -> (MockScene, CarShowcase) {
    attached_with(configs::load("car_default").expect("default config fixture"))
}

fn settle(showcase: &mut CarShowcase, scene: &mut MockScene) -> Duration {
    let spent = run_until_settled(showcase, scene, Duration::from_secs(10));
    assert_eq!(showcase.pending_waits(), 0, "animation never settled");
    spent
}

fn click(showcase: &mut CarShowcase, scene: &mut MockScene, reference: &str) -> ClickOutcome {
    let buttons = scene.click(reference);
    assert_eq!(buttons.len(), 1, "{reference} should carry one listener");
    showcase.handle_click(scene, buttons[0])
}

#[test]
fn doors_open_then_close_back_to_initial_state() {
    let (mut scene, mut showcase) = attached();
    assert!(!showcase.state().doors_open);

    let outcome = click(&mut showcase, &mut scene, "btn-doors");
    assert!(matches!(outcome, ClickOutcome::Pending(_)));
    assert!(!showcase.state().doors_open, "state flips only on completion");
    for name in DOORS {
        let g = scene.group(name).unwrap();
        assert!(g.playing, "{name} should be playing");
        assert_eq!(g.speed_ratio, 1.0);
    }
    settle(&mut showcase, &mut scene);
    assert!(showcase.state().doors_open);
    for name in DOORS {
        assert_eq!(scene.group(name).unwrap().frame, 60.0);
    }

    click(&mut showcase, &mut scene, "btn-doors");
    for name in DOORS {
        assert_eq!(scene.group(name).unwrap().speed_ratio, -1.0);
    }
    settle(&mut showcase, &mut scene);
    assert!(!showcase.state().doors_open);
    for name in DOORS {
        assert_eq!(scene.group(name).unwrap().frame, 0.0);
    }
}

#[test]
fn frame_limit_caps_playback_window() {
    let mut cfg = configs::load("car_default").unwrap();
    cfg.frames_doors = NumberParam::Number(30.0);
    let (mut scene, mut showcase) = attached_with(cfg);
    let door = scene.group_id("mk_animation_ID0_BL").unwrap();
    scene.calls.clear();

    click(&mut showcase, &mut scene, "btn-doors");
    assert!(scene.calls.contains(&HostCall::Start(
        door,
        StartArgs {
            looping: false,
            speed_ratio: 1.0,
            from: 0.0,
            to: 30.0,
        }
    )));
    settle(&mut showcase, &mut scene);
    assert_eq!(scene.group("mk_animation_ID0_BL").unwrap().frame, 30.0);

    // closing seeks to the limited end and plays back to the start
    scene.calls.clear();
    click(&mut showcase, &mut scene, "btn-doors");
    assert!(scene.calls.contains(&HostCall::GoTo(door, 30.0)));
    settle(&mut showcase, &mut scene);
    assert_eq!(scene.group("mk_animation_ID0_BL").unwrap().frame, 0.0);
}

#[test]
fn trunk_click_issues_stop_seek_start() {
    let (mut scene, mut showcase) = attached();
    let trunk = scene.group_id("mk_animation_ID6_Trunk_Open").unwrap();
    scene.calls.clear();

    click(&mut showcase, &mut scene, "btn-trunk");

    assert_eq!(
        scene.calls,
        vec![
            HostCall::Stop(trunk),
            HostCall::GoTo(trunk, 0.0),
            HostCall::Start(
                trunk,
                StartArgs {
                    looping: false,
                    speed_ratio: 1.0,
                    from: 0.0,
                    to: 90.0,
                }
            ),
        ]
    );
}

#[test]
fn speed_multiplier_scales_the_playback_rate() {
    let mut cfg = configs::load("car_default").unwrap();
    cfg.speed_multiplier = NumberParam::Number(2.0);
    let (mut scene, mut showcase) = attached_with(cfg);

    click(&mut showcase, &mut scene, "btn-doors");
    assert_eq!(scene.group(DOORS[0]).unwrap().speed_ratio, 2.0);
    let spent = settle(&mut showcase, &mut scene);
    assert!(spent <= Duration::from_millis(600), "took {spent:?}");
    assert!(showcase.state().doors_open);
}

#[test]
fn single_group_parts_toggle() {
    let (mut scene, mut showcase) = attached();

    click(&mut showcase, &mut scene, "btn-charging");
    settle(&mut showcase, &mut scene);
    assert!(showcase.state().charging_port_open);

    click(&mut showcase, &mut scene, "btn-trunk");
    settle(&mut showcase, &mut scene);
    assert!(showcase.state().trunk_open);

    click(&mut showcase, &mut scene, "btn-trunk");
    settle(&mut showcase, &mut scene);
    assert!(!showcase.state().trunk_open);
    assert!(showcase.state().charging_port_open);
}

#[test]
fn screen_plays_its_own_frame_range() {
    let (mut scene, mut showcase) = attached();
    showcase.handle_click(&mut scene, Button::ToggleInterior);

    click(&mut showcase, &mut scene, "btn-screen");
    settle(&mut showcase, &mut scene);
    assert!(showcase.state().screen_open);
    assert_eq!(scene.group("mk_animation_ID7_Screen").unwrap().frame, 50.0);

    click(&mut showcase, &mut scene, "btn-screen");
    settle(&mut showcase, &mut scene);
    assert!(!showcase.state().screen_open);
    assert_eq!(scene.group("mk_animation_ID7_Screen").unwrap().frame, 10.0);
}

#[test]
fn steering_wheel_always_plays_forward_from_start() {
    let (mut scene, mut showcase) = attached();
    let wheel = scene.group_id("mk_animation_ID8_Wheel").unwrap();
    let before = *showcase.state();

    for _ in 0..2 {
        scene.calls.clear();
        click(&mut showcase, &mut scene, "btn-wheel");
        assert_eq!(scene.calls.first(), Some(&HostCall::Reset(wheel)));
        assert_eq!(scene.group("mk_animation_ID8_Wheel").unwrap().speed_ratio, 1.0);
        settle(&mut showcase, &mut scene);
        assert_eq!(scene.group("mk_animation_ID8_Wheel").unwrap().frame, 120.0);
    }
    assert_eq!(*showcase.state(), before);
}

#[test]
fn nfc_alternates_between_close_and_open_clips() {
    let (mut scene, mut showcase) = attached();
    assert!(showcase.state().nfc_open);

    click(&mut showcase, &mut scene, "btn-nfc");
    let close = scene.group("mk_animation_ID18_NFC_Close").unwrap();
    assert!(close.playing);
    assert_eq!(close.speed_ratio, 1.0);
    assert!(!scene.group("mk_animation_ID18_NFC_Open").unwrap().playing);
    settle(&mut showcase, &mut scene);
    assert!(!showcase.state().nfc_open);

    click(&mut showcase, &mut scene, "btn-nfc");
    let open = scene.group("mk_animation_ID18_NFC_Open").unwrap();
    assert!(open.playing);
    assert_eq!(open.speed_ratio, 1.0);
    settle(&mut showcase, &mut scene);
    assert!(showcase.state().nfc_open);
}

#[test]
fn nfc_without_clips_is_a_no_op() {
    let mut cfg = configs::load("car_default").unwrap();
    cfg.animations.nfc_open = "no_such_clip_open".into();
    cfg.animations.nfc_close = "no_such_clip_close".into();
    let (mut scene, mut showcase) = attached_with(cfg);

    let outcome = click(&mut showcase, &mut scene, "btn-nfc");
    assert_eq!(outcome, ClickOutcome::Ignored);
    assert!(showcase.state().nfc_open);
    assert!(!scene.any_playing());
}

#[test]
fn toggle_swaps_button_sets_immediately() {
    let (mut scene, mut showcase) = attached();

    let outcome = click(&mut showcase, &mut scene, "btn-toggle");
    assert_eq!(outcome, ClickOutcome::Applied);
    assert_eq!(showcase.ui_mode(), UiMode::Interior);
    assert!(showcase.state().is_interior);
    assert_eq!(scene.element("btn-doors").unwrap().visible(), Some(false));
    assert_eq!(scene.element("btn-wheel").unwrap().visible(), Some(true));
    assert_eq!(scene.element("btn-toggle").unwrap().visible(), Some(true));
    let flags = scene.element("btn-screen").unwrap().flags.unwrap();
    assert!(flags.is_enabled && flags.is_hit_test_visible);

    click(&mut showcase, &mut scene, "btn-toggle");
    assert_eq!(showcase.ui_mode(), UiMode::Exterior);
    assert_eq!(scene.element("btn-doors").unwrap().visible(), Some(true));
    assert_eq!(scene.element("btn-wheel").unwrap().visible(), Some(false));
    assert_eq!(scene.element("btn-toggle").unwrap().visible(), Some(true));
}

#[test]
fn rapid_second_click_is_ignored_while_pending() {
    let (mut scene, mut showcase) = attached();

    let first = click(&mut showcase, &mut scene, "btn-doors");
    assert!(matches!(first, ClickOutcome::Pending(_)));
    let second = click(&mut showcase, &mut scene, "btn-doors");
    assert_eq!(second, ClickOutcome::Ignored);
    // other parts are not blocked
    let trunk = click(&mut showcase, &mut scene, "btn-trunk");
    assert!(matches!(trunk, ClickOutcome::Pending(_)));

    settle(&mut showcase, &mut scene);
    assert!(showcase.state().doors_open);
    assert!(showcase.state().trunk_open);
}

#[test]
fn unguarded_double_click_replays_the_same_direction() {
    let mut cfg = configs::load("car_default").unwrap();
    cfg.guard_reentrant_clicks = false;
    let (mut scene, mut showcase) = attached_with(cfg);

    click(&mut showcase, &mut scene, "btn-doors");
    let second = click(&mut showcase, &mut scene, "btn-doors");
    assert!(matches!(second, ClickOutcome::Pending(_)));
    assert_eq!(showcase.pending_waits(), 2);
    assert_eq!(scene.group(DOORS[0]).unwrap().speed_ratio, 1.0);

    settle(&mut showcase, &mut scene);
    assert!(showcase.state().doors_open);
}

#[test]
fn cancelled_wait_never_commits() {
    let (mut scene, mut showcase) = attached();

    let ClickOutcome::Pending(handle) = click(&mut showcase, &mut scene, "btn-trunk") else {
        panic!("trunk click should be pending");
    };
    assert!(showcase.wait_pending(handle));
    assert!(showcase.cancel_wait(handle));
    assert!(!showcase.cancel_wait(handle));
    assert!(!showcase.wait_pending(handle));
    assert_eq!(showcase.pending_timers(), 0);

    run_for(
        &mut showcase,
        &mut scene,
        Duration::from_secs(3),
        Duration::from_millis(20),
    );
    assert!(!showcase.state().trunk_open);
    // the animation itself still ran to the end
    assert_eq!(scene.group("mk_animation_ID6_Trunk_Open").unwrap().frame, 90.0);
}

#[test]
fn wait_timeout_commits_even_if_the_group_keeps_playing() {
    let mut cfg = configs::load("car_default").unwrap();
    cfg.wait_timeout_ms = Some(100);
    let (mut scene, mut showcase) = attached_with(cfg);

    click(&mut showcase, &mut scene, "btn-trunk");
    scene.group_mut("mk_animation_ID6_Trunk_Open").unwrap().looping = true;

    run_for(
        &mut showcase,
        &mut scene,
        Duration::from_millis(200),
        Duration::from_millis(10),
    );
    assert_eq!(showcase.pending_waits(), 0);
    assert!(showcase.state().trunk_open);
}

#[test]
fn unbounded_wait_keeps_polling() {
    let mut cfg = configs::load("car_default").unwrap();
    cfg.wait_timeout_ms = None;
    let (mut scene, mut showcase) = attached_with(cfg);

    click(&mut showcase, &mut scene, "btn-trunk");
    scene.group_mut("mk_animation_ID6_Trunk_Open").unwrap().looping = true;

    run_for(
        &mut showcase,
        &mut scene,
        Duration::from_secs(30),
        Duration::from_millis(100),
    );
    assert_eq!(showcase.pending_waits(), 1);
    assert_eq!(showcase.pending_timers(), 1);
    assert!(!showcase.state().trunk_open);
}

#[test]
fn zero_length_clip_commits_on_next_poll() {
    let mut cfg = configs::load("car_default").unwrap();
    cfg.frames_charging_port = NumberParam::Number(0.0);
    let (mut scene, mut showcase) = attached_with(cfg);
    // a zero-length clip finishes on the host's next tick
    scene.group_mut("mk_animation_ID10_ChargingPort").unwrap().to = 0.0;

    let outcome = click(&mut showcase, &mut scene, "btn-charging");
    assert!(matches!(outcome, ClickOutcome::Pending(_)));
    scene.step(Duration::from_millis(10));
    showcase.advance(&mut scene, Duration::from_millis(20));
    assert!(showcase.state().charging_port_open);
}

#[test]
fn rejected_playback_leaves_state_untouched() {
    let (mut scene, mut showcase) = attached();
    scene.fail_group_ops = true;

    for reference in ["btn-trunk", "btn-nfc", "btn-wheel"] {
        let outcome = click(&mut showcase, &mut scene, reference);
        assert_eq!(outcome, ClickOutcome::Ignored, "{reference}");
    }
    assert!(!showcase.state().trunk_open);
    assert!(showcase.state().nfc_open);
    assert_eq!(showcase.pending_waits(), 0);

    // once the host accepts calls again the trunk still opens forward
    scene.fail_group_ops = false;
    click(&mut showcase, &mut scene, "btn-trunk");
    let trunk = scene.group("mk_animation_ID6_Trunk_Open").unwrap();
    assert_eq!(trunk.speed_ratio, 1.0);
    settle(&mut showcase, &mut scene);
    assert!(showcase.state().trunk_open);
    assert_eq!(scene.group("mk_animation_ID6_Trunk_Open").unwrap().frame, 90.0);
}
