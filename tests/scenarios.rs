mod support;

use car_damage::domain::CameraPosition;
use car_damage::frameworks::server::{RunSettings, run};
use car_damage::interface_adapters::scene::Scene;
use car_damage::use_cases::drive::DriveSettings;
use std::time::Duration;

#[test]
fn head_on_collision_damages_slow_and_fast_car() {
    // "slow" tops out at 2.0, "fast" is near 5.0 when they meet.
    let (mut session, renderer) = support::session_from(
        r#"
        [[vehicles]]
        name = "slow"
        max_speed = 1.95

        [[vehicles.script]]
        ticks = 200
        accelerate = true

        [[vehicles]]
        name = "fast"
        y = 9.3
        heading = 180.0

        [[vehicles.script]]
        ticks = 200
        accelerate = true
        "#,
    );

    let update = support::run_ticks(&mut session, 110);
    let slow = update.vehicle("slow").expect("slow present");
    let fast = update.vehicle("fast").expect("fast present");
    assert!(slow.speed < 3.5);
    assert!(fast.speed > 3.5);
    assert!(slow.damaged, "slow car is damaged by the fast partner");
    assert!(fast.damaged);

    let visuals = renderer.visual_state();
    assert_eq!(visuals.damaged_sprites.len(), 2);
    assert!(visuals.inactive_parts.is_empty());
}

#[test]
fn gentle_bump_into_scenery_is_harmless() {
    let (mut session, renderer) = support::session_from(
        r#"
        [[vehicles]]
        name = "car"

        [[vehicles.parts]]
        name = "hood"
        disable = ["headlight"]

        [[vehicles.script]]
        ticks = 30
        accelerate = true

        [[obstacles]]
        name = "post"
        y = 1.2
        radius = 0.5
        x = 0.0
        "#,
    );

    let update = support::run_ticks(&mut session, 120);
    let car = update.vehicle("car").expect("car present");
    assert!(!car.damaged);
    assert!(car.damaged_parts.is_empty());
    assert_eq!(renderer.visual_state(), Default::default());
}

#[test]
fn frontal_impact_disables_only_the_parts_it_touches() {
    let (mut session, renderer) = support::session_from(
        r#"
        [[vehicles]]
        name = "car"
        radius = 0.6

        [[vehicles.parts]]
        name = "hood"
        offset_y = 0.6
        radius = 0.3
        disable = ["headlight_left", "headlight_right"]

        [[vehicles.parts]]
        name = "trunk"
        offset_y = -0.5
        radius = 0.2

        [[vehicles.script]]
        ticks = 150
        accelerate = true

        [[obstacles]]
        name = "wall"
        y = 9.0
        x = 0.0
        radius = 1.0
        "#,
    );

    // The hood reaches the wall around tick 119, the body at 122; the trunk
    // would only get there at 129.
    let update = support::run_ticks(&mut session, 125);
    let car = update.vehicle("car").expect("car present");
    assert!(car.speed > 3.5);
    assert!(car.damaged);
    assert_eq!(car.damaged_parts, vec!["hood"]);

    let visuals = renderer.visual_state();
    assert_eq!(visuals.damaged_sprites.len(), 2);
    assert_eq!(visuals.inactive_parts.len(), 2);
}

#[test]
fn rear_impact_spares_the_front_part() {
    let (mut session, renderer) = support::session_from(
        r#"
        [[vehicles]]
        name = "parked"

        [[vehicles.parts]]
        name = "front_bumper"
        offset_y = 0.7
        radius = 0.3
        disable = ["headlight"]

        [[vehicles]]
        name = "chaser"
        y = -10.0

        [[vehicles.script]]
        ticks = 200
        accelerate = true
        "#,
    );

    // The chaser meets the parked body at tick 134 and would reach the bumper at 141.
    let update = support::run_ticks(&mut session, 137);
    let parked = update.vehicle("parked").expect("parked present");
    let chaser = update.vehicle("chaser").expect("chaser present");
    assert!(chaser.speed > 3.5);
    assert!(parked.damaged, "the fast chaser damages the parked body");
    assert!(parked.damaged_parts.is_empty());
    assert!(chaser.damaged);

    let visuals = renderer.visual_state();
    assert_eq!(visuals.damaged_sprites.len(), 2);
    assert!(visuals.inactive_parts.is_empty());
}

#[test]
fn camera_sits_at_offset_above_parked_target() {
    let (mut session, _renderer) = support::session_from(
        r#"
        [camera]
        target = "car"
        offset_y = 2.0

        [[vehicles]]
        name = "car"
        x = 10.0
        y = 20.0
        "#,
    );

    let expected = CameraPosition {
        x: 10.0,
        y: 22.0,
        z: -10.0,
    };
    for _ in 0..5 {
        assert_eq!(session.tick().camera, Some(expected));
    }
}

#[test]
fn demo_scene_damages_player_only() {
    let scene = Scene::load(&support::demo_scene_path()).expect("demo scene loads");
    let (mut session, renderer) = support::build(&scene);

    let update = support::run_ticks(&mut session, 300);
    let player = update.vehicle("player").expect("player present");
    let rival = update.vehicle("rival").expect("rival present");
    assert!(player.damaged);
    assert_eq!(player.damaged_parts, vec!["front_bumper"]);
    assert!(!rival.damaged);

    let visuals = renderer.visual_state();
    assert!(
        visuals
            .inactive_parts
            .contains(&("player".to_string(), "plate".to_string()))
    );
}

#[tokio::test]
async fn run_reports_final_state() {
    let scene = Scene::load(&support::demo_scene_path()).expect("demo scene loads");
    let summary = run(
        scene,
        RunSettings {
            drive: DriveSettings {
                // The interval is also the simulation step, so keep the real 50 Hz rate.
                tick_interval: Duration::from_millis(20),
                max_ticks: 150,
            },
            snapshot_every: None,
        },
    )
    .await
    .expect("run completes");

    assert_eq!(summary.ticks, 150);
    let player = summary
        .vehicles
        .iter()
        .find(|v| v.name == "player")
        .expect("player present");
    assert!(player.damaged);
    assert_eq!(summary.visuals.inactive_parts.len(), 3);
}
