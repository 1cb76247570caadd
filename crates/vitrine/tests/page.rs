//! Page-level behavior: the showcase and dashboard driven the way the browser
//! runtime drives them, painted into recording canvases.

#![cfg(not(target_arch = "wasm32"))]

use proptest::prelude::*;
use vitrine::config::DashboardConfig;
use vitrine::progression::ProgressEvent;
use vitrine::*;

const FRAME_MS: f64 = 1000.0 / 60.0;

fn frame_times(frames: std::ops::RangeInclusive<u32>) -> impl Iterator<Item = f64> {
    frames.map(|i| f64::from(i) * FRAME_MS)
}

#[test]
fn test_one_page_session() {
    let config = VitrineConfig::default();
    let mut showcase = Showcase::new(config, MemoryStore::new());
    let mut dashboard = Dashboard::new(config.dashboard);

    showcase.start(0.0);
    dashboard.start(0.0);
    for now in frame_times(1..=150) {
        showcase.frame(now);
        dashboard.tick(now);
    }
    showcase.handle_event(&Event::KeyDown { key: Key::Space });
    for now in frame_times(151..=180) {
        showcase.frame(now);
        dashboard.tick(now);
    }

    let mut stage = RecordingCanvas::new(Size::new(800.0, 600.0));
    let mut skills = RecordingCanvas::new(Size::new(300.0, 300.0));
    showcase.paint(&mut stage);
    assert!(dashboard.paint_skills(&mut skills, &showcase.palette()));

    assert!(stage.all_finite());
    assert!(skills.texts().contains(&"27%"));
    assert_eq!(dashboard.counter_displays()[0].1, "1,247");
    assert!(showcase.render_loop().fps().is_some());
    // The 0.5 s burst emitter is long gone; its particles live 2 s.
    assert!(showcase.simulator().active_emitters().is_empty());
    assert!(showcase.simulator().particle_count() > 0);
}

#[test]
fn test_progress_survives_reload() {
    // 2024-10-07, a Monday.
    let first_day: DayIndex = 20_003;
    let store = MemoryStore::new();
    let mut first = Showcase::new(VitrineConfig::default(), store.clone());
    for day in first_day..first_day + 3 {
        first.complete_workshop(85, day).expect("memory store accepts writes");
    }
    // 4 x 150 experience crosses the 500 needed for level 2.
    let events = first.complete_workshop(85, first_day + 3).expect("memory store accepts writes");
    assert!(events
        .iter()
        .any(|e| matches!(e, ProgressEvent::LevelUp { from: 1, to: 2, .. })));
    let events = first.complete_workshop(85, first_day + 4).expect("memory store accepts writes");
    assert!(events
        .iter()
        .any(|e| matches!(e, ProgressEvent::AchievementUnlocked { id, .. } if id == "workshop_streak_5")));
    assert!(events
        .iter()
        .any(|e| matches!(e, ProgressEvent::BadgeEarned { id } if id == "weekly_champion")));

    let mut reloaded = Showcase::new(VitrineConfig::default(), store);
    let profile = reloaded.progression().profile();
    assert_eq!(profile.workshops_completed, 5);
    assert_eq!(profile.level, 2);
    assert_eq!(profile.current_streak, 5);
    assert!(profile.has_achievement("first_workshop"));
    assert!(profile.has_badge("explorer"));

    // Skipping a day restarts the streak but keeps everything earned.
    reloaded.record_visit(first_day + 6).expect("memory store accepts writes");
    let profile = reloaded.progression().profile();
    assert_eq!(profile.current_streak, 1);
    assert_eq!(profile.longest_streak, 5);
}

#[test]
fn test_export_reflects_live_drift() {
    let mut dashboard = Dashboard::new(DashboardConfig {
        realtime_interval_ms: 1000.0,
        ..DashboardConfig::default()
    });
    dashboard.start(0.0);
    for second in 1..=5 {
        dashboard.tick(f64::from(second) * 1000.0);
    }
    let exported: serde_json::Value =
        serde_json::from_str(&dashboard.export_json("now").expect("serializable")).expect("valid JSON");
    assert_eq!(
        exported["metrics"]["certificates_issued"],
        dashboard.metrics().certificates_issued
    );
    assert_eq!(dashboard.feed().count(), 5);
}

proptest! {
    #[test]
    fn prop_feed_is_bounded(seed in any::<u64>(), capacity in 1usize..20, updates in 0u32..60) {
        let mut dashboard = Dashboard::new(DashboardConfig {
            realtime_interval_ms: 100.0,
            feed_capacity: capacity,
            seed,
        });
        dashboard.start(0.0);
        for i in 1..=updates {
            dashboard.tick(f64::from(i) * 100.0);
        }
        prop_assert_eq!(dashboard.feed().count(), (updates as usize).min(capacity));
        let times: Vec<f64> = dashboard.feed().map(|e| e.at_ms).collect();
        prop_assert!(times.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn prop_showcase_paint_is_finite(drags in proptest::collection::vec((-500.0f32..500.0, -500.0f32..500.0), 0..10), wheel in -2000.0f32..2000.0) {
        let mut showcase = Showcase::new(VitrineConfig::default(), MemoryStore::new());
        showcase.start(0.0);
        showcase.trigger_effect("learning-path");
        showcase.handle_event(&Event::MouseDown { position: Point::new(0.0, 0.0), button: MouseButton::Left });
        for (x, y) in drags {
            showcase.handle_event(&Event::MouseMove { position: Point::new(x, y) });
        }
        showcase.handle_event(&Event::Scroll { delta_x: 0.0, delta_y: wheel });
        for now in frame_times(1..=20) {
            showcase.frame(now);
        }
        let mut canvas = RecordingCanvas::new(Size::new(640.0, 480.0));
        showcase.paint(&mut canvas);
        prop_assert!(canvas.all_finite());
        let distance = showcase.camera().camera().distance();
        prop_assert!((1.0..=10.0).contains(&distance));
    }
}
