use bloomfocus_core::placement::sampler::{SpiralParams, SpiralSampler};
use bloomfocus_core::{
    GardenConfig, GardenError, GardenSession, PlacementEngine, PlacementStrategy, SharedGarden,
    Sketch, TimerEvent, TimerMode,
};
use std::thread;

const FOCUS_MS: u64 = 1_000;
const BREAK_MS: u64 = 200;

fn small_config() -> GardenConfig {
    GardenConfig {
        focus_duration_ms: FOCUS_MS,
        break_duration_ms: BREAK_MS,
        sketch_gallery_capacity: 3,
        placed_gallery_capacity: 2,
        palette_size: 2,
        ..GardenConfig::default()
    }
}

fn sketch(width: u32, height: u32) -> Sketch {
    Sketch::with_dimensions(vec![0xAB; 32], width, height).expect("valid sketch")
}

/// Ticks through `cycles` full focus/break cycles starting at `start_ms`.
fn run_cycles(session: &mut GardenSession, start_ms: u64, cycles: u64) -> u64 {
    let mut now = start_ms;
    for _ in 0..cycles {
        now += FOCUS_MS;
        session.tick(now);
        now += BREAK_MS;
        session.tick(now);
    }
    now
}

#[test]
fn focus_completion_plants_most_recent_sketch() {
    let mut session = GardenSession::new(small_config(), 0).unwrap();
    let older = sketch(100, 100);
    let newer = sketch(200, 100);
    session.on_save(older);
    session.on_save(newer.clone());

    assert_eq!(session.tick(FOCUS_MS - 1), Default::default());
    let outcome = session.tick(FOCUS_MS);

    assert_eq!(outcome.event, Some(TimerEvent::FocusCompleted { cycle: 1 }));
    let planted = outcome.planted.expect("a sketch was available");
    assert_eq!(planted.sketch_id(), newer.id());
    assert_eq!(planted.created_order, 0);
    assert_eq!(session.placed_count(), 1);
    assert_eq!(session.timer().mode(), TimerMode::Break);
}

#[test]
fn completion_with_empty_gallery_is_a_noop() {
    let mut session = GardenSession::new(small_config(), 0).unwrap();

    let outcome = session.tick(FOCUS_MS);
    assert_eq!(outcome.event, Some(TimerEvent::FocusCompleted { cycle: 1 }));
    assert_eq!(outcome.planted, None);
    assert_eq!(session.placed_count(), 0);

    let err = session.plant_most_recent().expect_err("nothing to plant");
    assert!(matches!(err, GardenError::EmptySource));
    assert_eq!(session.placed_count(), 0);
}

#[test]
fn placed_gallery_evicts_oldest_plantings() {
    let mut session = GardenSession::new(small_config(), 0).unwrap();
    session.on_save(sketch(64, 64));

    run_cycles(&mut session, 0, 3);

    let placed = session.placed_objects();
    let orders: Vec<u64> = placed.iter().map(|object| object.created_order).collect();
    assert_eq!(orders, vec![1, 2]);
}

#[test]
fn sketch_gallery_keeps_most_recent_first_and_palette_is_bounded() {
    let mut session = GardenSession::new(small_config(), 0).unwrap();
    let saved: Vec<Sketch> = (1..=4).map(|n| sketch(10 * n, 10)).collect();
    for item in &saved {
        session.on_save(item.clone());
    }

    let ids: Vec<_> = session.sketches().iter().map(Sketch::id).collect();
    assert_eq!(ids, vec![saved[3].id(), saved[2].id(), saved[1].id()]);

    let palette: Vec<_> = session.recent_palette().iter().map(Sketch::id).collect();
    assert_eq!(palette, vec![saved[3].id(), saved[2].id()]);
}

#[test]
fn manual_planting_uses_the_chosen_sketch() {
    let mut session = GardenSession::new(small_config(), 0).unwrap();
    let first = sketch(50, 50);
    session.on_save(first.clone());
    session.on_save(sketch(70, 50));

    let planted = session.plant_sketch(&first);
    assert_eq!(planted.sketch_id(), first.id());
    assert_eq!(session.placed_objects()[0].id, planted.id);
}

#[test]
fn pause_holds_planting_until_resume() {
    let mut session = GardenSession::new(small_config(), 0).unwrap();
    session.on_save(sketch(40, 40));
    session.pause(400);

    assert_eq!(session.tick(10_000).event, None);
    assert_eq!(session.timer_display(10_000).remaining_ms, 600);

    session.resume(10_000);
    let outcome = session.tick(10_600);
    assert!(outcome.planted.is_some());
}

#[test]
fn reset_restarts_focus_without_planting() {
    let mut session = GardenSession::new(small_config(), 0).unwrap();
    session.on_save(sketch(40, 40));
    session.reset(FOCUS_MS - 1).unwrap();

    assert_eq!(session.tick(FOCUS_MS).event, None);
    assert_eq!(session.placed_count(), 0);
    assert_eq!(session.timer_display(FOCUS_MS).clock, "00:00");
}

#[test]
fn invalid_config_fails_at_construction() {
    let config = GardenConfig {
        focus_duration_ms: 0,
        ..GardenConfig::default()
    };
    let err = GardenSession::new(config, 0).err().expect("zero focus must fail");
    assert!(matches!(err, GardenError::Config(_)));

    let config = GardenConfig {
        sketch_gallery_capacity: 0,
        ..GardenConfig::default()
    };
    assert!(GardenSession::new(config, 0).is_err());
}

#[test]
fn huge_placed_capacity_builds_and_plants() {
    let config = GardenConfig::from_json_str(
        r#"{ "placedGalleryCapacity": 100000000000000, "sketchGalleryCapacity": 100000000000000 }"#,
    )
    .expect("large capacities are valid");
    let mut session = GardenSession::new(config, 0).expect("construction must not allocate capacity");
    session.on_save(sketch(64, 64));
    for _ in 0..3 {
        session.plant_most_recent().expect("a sketch is saved");
    }
    assert_eq!(session.placed_count(), 3);
    assert_eq!(session.sketch_count(), 1);
}

#[test]
fn sphere_strategy_places_objects_on_the_sphere() {
    let config = GardenConfig {
        placement_strategy: PlacementStrategy::Sphere,
        ..small_config()
    };
    let radius = config.sphere.surface_radius + config.sphere.offset;
    let mut session = GardenSession::new(config, 0).unwrap();
    session.on_save(sketch(30, 30));

    let planted = session.plant_most_recent().unwrap();
    assert!((planted.position.length() - radius).abs() < 1e-9);
    assert!((planted.normal.length() - 1.0).abs() < 1e-9);
}

#[test]
fn snapshot_serializes_sketch_reference_without_bytes() {
    let engine = PlacementEngine::with_jitter_source(
        Box::new(SpiralSampler::new(SpiralParams::default())),
        Box::new(|| 0.5),
    );
    let mut session = GardenSession::with_engine(small_config(), engine, 0).unwrap();
    let saved = sketch(120, 60);
    session.on_save(saved.clone());
    session.tick(FOCUS_MS);

    let json = serde_json::to_value(session.snapshot(FOCUS_MS + 50)).unwrap();
    assert_eq!(json["timer"]["mode"], "break");
    assert_eq!(json["timer"]["remaining_ms"], 150);
    assert_eq!(json["timer"]["clock"], "00:00");
    let object = &json["placed"][0];
    assert_eq!(object["sketch"]["id"], saved.id().to_string());
    assert_eq!(object["sketch"]["width"], 120);
    assert_eq!(object["sketch"]["height"], 60);
    assert!(object["sketch"].get("data").is_none());
    assert_eq!(object["normal"]["y"], 1.0);
    assert_eq!(object["created_order"], 0);
}

#[test]
fn shared_garden_serializes_cross_component_planting() {
    let session = GardenSession::new(
        GardenConfig {
            placed_gallery_capacity: 40,
            ..small_config()
        },
        0,
    )
    .unwrap();
    let shared = SharedGarden::new(session);
    shared.on_save(sketch(10, 10));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let shared = shared.clone();
            thread::spawn(move || {
                for _ in 0..5 {
                    shared.plant_most_recent().expect("sketch available");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker thread");
    }

    let mut orders: Vec<u64> = shared.with_session(|session| {
        session
            .placed_objects()
            .iter()
            .map(|object| object.created_order)
            .collect()
    });
    orders.sort_unstable();
    assert_eq!(orders, (0..20).collect::<Vec<_>>());
    assert_eq!(shared.snapshot(0).placed.len(), 20);
}
