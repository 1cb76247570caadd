//! The interactive 3-D learning showcase.
//!
//! [`Showcase`] wires the particle simulator, the orbit camera, the render loop
//! and the page state together. The host calls [`Showcase::frame`] once per
//! animation callback and then [`Showcase::paint`] with its drawing surface.

use vitrine_core::particles::EmitterId;
use vitrine_core::scene::{paint_background, paint_knowledge_graph, standard_objects, SceneObject};
use vitrine_core::{
    Canvas, CameraController, Color, DayIndex, EffectTable, Event, FrameInfo, InputHandler, Key,
    KeyValueStore, Palette, ParticleSimulator, ProgressEvent, Progression, QuestAction,
    RenderLoop, TextStyle, ThemeManager, ThemeMode, VitrineConfig,
};
use vitrine_core::{Point, StorageError};

/// Effect fired by the space bar.
pub const KEYBOARD_EFFECT: &str = "skill-burst";

/// Effect fired for level-ups, achievements, quests and badges.
pub const CELEBRATION_EFFECT: &str = "achievement";

/// Smallest particle radius worth painting, in pixels.
const MIN_PARTICLE_RADIUS: f32 = 0.5;

/// Everything the showcase page animates.
#[derive(Debug)]
pub struct Showcase<S: KeyValueStore + Clone> {
    config: VitrineConfig,
    simulator: ParticleSimulator,
    camera: CameraController,
    render_loop: RenderLoop,
    objects: Vec<SceneObject>,
    theme: ThemeManager<S>,
    progression: Progression<S>,
    system_dark: bool,
    time: f64,
}

impl<S: KeyValueStore + Clone> Showcase<S> {
    /// Build a showcase whose theme and profile persist to `store`.
    #[must_use]
    pub fn new(config: VitrineConfig, store: S) -> Self {
        Self {
            simulator: ParticleSimulator::with_config(EffectTable::standard(), &config.particles),
            camera: CameraController::new(config.camera),
            render_loop: RenderLoop::new(config.render.fps_sample_frames),
            objects: standard_objects(),
            theme: ThemeManager::new(store.clone()),
            progression: Progression::load(store),
            system_dark: false,
            time: 0.0,
            config,
        }
    }

    /// Start (or restart) the render loop at `now_ms`.
    pub fn start(&mut self, now_ms: f64) {
        self.render_loop.start(now_ms);
        self.time = 0.0;
    }

    /// Advance one frame: loop bookkeeping, particle tick, object animation.
    ///
    /// Returns `None` until [`Showcase::start`] has been called.
    pub fn frame(&mut self, now_ms: f64) -> Option<FrameInfo> {
        let info = self.render_loop.frame(now_ms)?;
        self.time = info.elapsed;
        self.simulator.tick(self.config.particles.step);
        for object in &mut self.objects {
            object.animate(self.time);
        }
        Some(info)
    }

    /// Paint the current frame.
    pub fn paint(&self, canvas: &mut dyn Canvas) {
        let size = canvas.size();
        canvas.clear();
        paint_background(canvas, self.time);
        paint_knowledge_graph(canvas, self.time);

        let camera = self.camera.camera();
        for particle in self.simulator.particles() {
            let Some(projected) = camera.project(particle.position, size) else {
                continue;
            };
            let radius = particle.size * projected.scale;
            if radius < MIN_PARTICLE_RADIUS {
                continue;
            }
            let [r, g, b, a] = particle.color;
            let color = Color::new(r, g, b, a * particle.life_fraction());
            canvas.fill_circle(projected.point, radius, color);
        }

        if let Some(fps) = self.render_loop.fps() {
            let style = TextStyle::new(12.0, self.palette().primary);
            canvas.draw_text(&format!("FPS: {fps:.0}"), Point::new(10.0, 20.0), &style);
        }
    }

    /// Fire an effect at the origin. Unknown names are ignored.
    pub fn trigger_effect(&mut self, name: &str) -> Option<EmitterId> {
        let id = self.simulator.trigger(name);
        if id.is_none() {
            log::warn!("unknown particle effect '{name}'");
        }
        id
    }

    /// Celebrate everything but plain point awards with a particle effect.
    ///
    /// Returns how many effects were fired.
    pub fn apply_progress(&mut self, events: &[ProgressEvent]) -> usize {
        let mut fired = 0;
        for event in events {
            if matches!(event, ProgressEvent::PointsAwarded { .. }) {
                continue;
            }
            log::info!("celebrating {event:?}");
            if self.simulator.trigger(CELEBRATION_EFFECT).is_some() {
                fired += 1;
            }
        }
        fired
    }

    /// Record a finished workshop and celebrate whatever it earned.
    pub fn complete_workshop(&mut self, score: u8, day: DayIndex) -> Result<Vec<ProgressEvent>, StorageError> {
        let events = self.progression.complete_workshop(score, day)?;
        self.apply_progress(&events);
        Ok(events)
    }

    /// Record a community or practice action and celebrate whatever it earned.
    pub fn record_action(&mut self, action: QuestAction, day: DayIndex) -> Result<Vec<ProgressEvent>, StorageError> {
        let events = self.progression.record_action(action, day)?;
        self.apply_progress(&events);
        Ok(events)
    }

    /// Note a page visit on `day` for the daily streak.
    pub fn record_visit(&mut self, day: DayIndex) -> Result<Vec<ProgressEvent>, StorageError> {
        let events = self.progression.record_visit(day)?;
        self.apply_progress(&events);
        Ok(events)
    }

    /// Advance to the next theme mode and persist it.
    pub fn cycle_theme(&mut self) -> Result<ThemeMode, StorageError> {
        self.theme.cycle()
    }

    /// Record the host's `prefers-color-scheme: dark` answer.
    pub fn set_system_dark(&mut self, dark: bool) {
        self.system_dark = dark;
    }

    /// Active palette.
    #[must_use]
    pub fn palette(&self) -> Palette {
        self.theme.palette(self.system_dark)
    }

    /// Whether the active palette is dark.
    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.theme.is_dark(self.system_dark)
    }

    /// Put the camera back at its initial distance.
    pub fn reset_camera(&mut self) {
        self.camera.reset();
    }

    /// The simulator.
    #[must_use]
    pub fn simulator(&self) -> &ParticleSimulator {
        &self.simulator
    }

    /// The camera controller.
    #[must_use]
    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    /// The render loop.
    #[must_use]
    pub fn render_loop(&self) -> &RenderLoop {
        &self.render_loop
    }

    /// Animated scene objects.
    #[must_use]
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Learner progression.
    #[must_use]
    pub fn progression(&self) -> &Progression<S> {
        &self.progression
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &VitrineConfig {
        &self.config
    }
}

impl<S: KeyValueStore + Clone> InputHandler for Showcase<S> {
    fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::KeyDown { key: Key::Space } => self.trigger_effect(KEYBOARD_EFFECT).is_some(),
            Event::KeyDown { key: Key::R } => {
                self.reset_camera();
                true
            }
            Event::Resize { .. } => true,
            other => self.camera.handle_event(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::{DrawCommand, MemoryStore, MouseButton, RecordingCanvas, Size};

    fn showcase() -> Showcase<MemoryStore> {
        Showcase::new(VitrineConfig::default(), MemoryStore::new())
    }

    fn run_frames(showcase: &mut Showcase<MemoryStore>, frames: u32) -> f64 {
        let mut now = 0.0;
        for _ in 0..frames {
            now += 1000.0 / 60.0;
            showcase.frame(now);
        }
        now
    }

    #[test]
    fn test_idle_until_started() {
        let mut s = showcase();
        s.trigger_effect("skill-burst");
        assert!(s.frame(16.0).is_none());
        assert_eq!(s.simulator().particle_count(), 0);
    }

    #[test]
    fn test_frame_ticks_particles_and_objects() {
        let mut s = showcase();
        s.start(0.0);
        s.trigger_effect("knowledge-flow");
        run_frames(&mut s, 30);
        assert!(s.simulator().particle_count() > 0);
        assert_eq!(s.render_loop().frame_count(), 30);

        let path = s.objects().iter().find(|o| o.name == "learning-path").unwrap();
        assert!((path.flow_offset - 0.6).abs() < 1e-4);
    }

    #[test]
    fn test_unknown_effect_is_ignored() {
        let mut s = showcase();
        assert!(s.trigger_effect("fireworks").is_none());
        assert!(s.simulator().active_emitters().is_empty());
    }

    #[test]
    fn test_keyboard_shortcuts() {
        let mut s = showcase();
        assert!(s.handle_event(&Event::KeyDown { key: Key::Space }));
        assert_eq!(s.simulator().active_emitters().len(), 1);

        s.handle_event(&Event::Scroll {
            delta_x: 0.0,
            delta_y: 200.0,
        });
        assert_eq!(s.camera().camera().distance(), 7.0);
        assert!(s.handle_event(&Event::KeyDown { key: Key::R }));
        assert_eq!(s.camera().camera().distance(), 5.0);

        assert!(!s.handle_event(&Event::KeyDown { key: Key::Escape }));
    }

    #[test]
    fn test_drag_reaches_camera() {
        let mut s = showcase();
        s.handle_event(&Event::MouseDown {
            position: Point::new(100.0, 100.0),
            button: MouseButton::Left,
        });
        assert!(s.handle_event(&Event::MouseMove {
            position: Point::new(150.0, 100.0),
        }));
        assert!((s.camera().camera().rot_y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_paint_layers() {
        let mut s = showcase();
        s.start(0.0);
        s.trigger_effect("achievement");
        run_frames(&mut s, 61);

        let mut canvas = RecordingCanvas::new(Size::new(800.0, 600.0));
        s.paint(&mut canvas);
        assert!(matches!(canvas.commands()[0], DrawCommand::Clear));
        assert!(canvas.all_finite());
        assert!(canvas.texts().contains(&"Python"));
        assert!(canvas.texts().iter().any(|t| t.starts_with("FPS: ")));

        let circles = canvas
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count();
        // Background glow, 5 nodes with halos, 50 dots, then particles.
        assert!(circles > 1 + 10 + 50);
    }

    #[test]
    fn test_workshop_completion_celebrates() {
        let mut s = showcase();
        let events = s.complete_workshop(100, 20_003).unwrap();
        assert!(events
            .iter()
            .any(|e| matches!(e, ProgressEvent::AchievementUnlocked { id, .. } if id == "first_workshop")));
        assert!(s
            .simulator()
            .active_emitters()
            .iter()
            .any(|e| e.effect == CELEBRATION_EFFECT));
        assert_eq!(s.progression().profile().workshops_completed, 1);
        // first_workshop and daily_learner.
        assert_eq!(s.simulator().active_emitters().len(), 2);
    }

    #[test]
    fn test_quest_and_badge_celebrate() {
        let mut s = showcase();
        let fired = s.apply_progress(&[
            ProgressEvent::QuestCompleted {
                id: "skill_explorer".to_string(),
                points: 200,
            },
            ProgressEvent::BadgeEarned {
                id: "explorer".to_string(),
            },
        ]);
        assert_eq!(fired, 2);
    }

    #[test]
    fn test_help_counts_toward_social_quest() {
        let mut s = showcase();
        for _ in 0..10 {
            s.record_action(QuestAction::HelpGiven, 20_003).unwrap();
        }
        assert!(s.progression().profile().has_badge("social_learner"));
    }

    #[test]
    fn test_auto_theme_follows_system_changes() {
        let mut s = showcase();
        assert!(!s.is_dark());
        s.set_system_dark(true);
        assert!(s.is_dark());
        assert_eq!(s.palette(), Palette::dark());
        s.set_system_dark(false);
        assert_eq!(s.palette(), Palette::light());
    }

    #[test]
    fn test_points_alone_do_not_celebrate() {
        let mut s = showcase();
        let fired = s.apply_progress(&[ProgressEvent::PointsAwarded {
            action: vitrine_core::progression::RewardAction::DailyActivity,
            points: 10,
        }]);
        assert_eq!(fired, 0);
    }

    #[test]
    fn test_theme_persists_through_store() {
        let store = MemoryStore::new();
        let mut s = Showcase::new(VitrineConfig::default(), store.clone());
        s.set_system_dark(true);
        assert!(s.is_dark());
        assert_eq!(s.cycle_theme().unwrap(), ThemeMode::Light);
        assert!(!s.is_dark());

        let again = Showcase::new(VitrineConfig::default(), store);
        assert_eq!(again.palette(), Palette::light());
    }
}
