//! Named particle effects and the bounded particle pool.
//!
//! A [`ParticleSimulator`] owns the pool, the live emitters and a seeded RNG.
//! Nothing else holds references into it; the render loop ticks it once per
//! frame and the painter reads [`ParticleSimulator::particles`] afterwards.

use crate::config::ParticleConfig;
use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Nominal simulation step (one 60 Hz frame).
pub const DEFAULT_STEP: f64 = 1.0 / 60.0;

/// Emitter lifetime for burst effects, in seconds.
pub const BURST_DURATION: f64 = 0.5;

/// Emitter lifetime for continuous effects, in seconds.
pub const CONTINUOUS_DURATION: f64 = 3.0;

// Turns, radii and height of the learning-path spiral.
const PATH_TURNS: f32 = 3.0;
const PATH_START_RADIUS: f32 = 2.0;
const PATH_END_RADIUS: f32 = 0.5;
const PATH_HEIGHT: f32 = 3.0;

/// Handle for a triggered emitter.
pub type EmitterId = u64;

// =============================================================================
// Effects
// =============================================================================

/// Static description of how one effect's particles look and move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectDefinition {
    /// Lookup key
    pub name: String,
    /// Most particles one emitter of this effect may spawn
    pub particle_count: usize,
    /// Particles per second
    pub emission_rate: f32,
    /// Particle lifetime in seconds
    pub lifetime: f32,
    /// Base spawn velocity
    pub initial_velocity: Vec3,
    /// Constant acceleration
    pub gravity: Vec3,
    /// RGBA in [0, 1]
    pub color: [f32; 4],
    /// Particle size
    pub size: f32,
    /// Short-lived emitter
    pub burst: bool,
    /// Spawn along the learning spiral
    pub follow_path: bool,
    /// Jitter size and alpha
    pub sparkle: bool,
}

impl EffectDefinition {
    /// Seconds an emitter of this effect stays active.
    #[must_use]
    pub fn emitter_duration(&self) -> f64 {
        if self.burst {
            BURST_DURATION
        } else {
            CONTINUOUS_DURATION
        }
    }
}

/// Read-only table of effects keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectTable {
    effects: Vec<EffectDefinition>,
}

impl EffectTable {
    /// The four showcase effects.
    #[must_use]
    pub fn standard() -> Self {
        let base = |name: &str| EffectDefinition {
            name: name.to_string(),
            particle_count: 0,
            emission_rate: 0.0,
            lifetime: 0.0,
            initial_velocity: Vec3::ZERO,
            gravity: Vec3::ZERO,
            color: [1.0; 4],
            size: 0.0,
            burst: false,
            follow_path: false,
            sparkle: false,
        };
        Self {
            effects: vec![
                EffectDefinition {
                    particle_count: 200,
                    emission_rate: 10.0,
                    lifetime: 3.0,
                    initial_velocity: Vec3::new(0.0, 0.5, 0.0),
                    gravity: Vec3::new(0.0, -0.1, 0.0),
                    color: [0.2, 0.8, 1.0, 1.0],
                    size: 0.05,
                    ..base("knowledge-flow")
                },
                EffectDefinition {
                    particle_count: 500,
                    emission_rate: 50.0,
                    lifetime: 2.0,
                    color: [1.0, 0.6, 0.2, 1.0],
                    size: 0.08,
                    burst: true,
                    ..base("skill-burst")
                },
                EffectDefinition {
                    particle_count: 300,
                    emission_rate: 15.0,
                    lifetime: 4.0,
                    color: [0.6, 1.0, 0.4, 1.0],
                    size: 0.03,
                    follow_path: true,
                    ..base("learning-path")
                },
                EffectDefinition {
                    particle_count: 100,
                    emission_rate: 20.0,
                    lifetime: 2.5,
                    initial_velocity: Vec3::new(0.0, 1.0, 0.0),
                    gravity: Vec3::new(0.0, -0.2, 0.0),
                    color: [1.0, 0.8, 0.2, 1.0],
                    size: 0.1,
                    sparkle: true,
                    ..base("achievement")
                },
            ],
        }
    }

    /// Look up an effect.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&EffectDefinition> {
        self.effects.iter().find(|e| e.name == name)
    }

    /// Add or replace an effect.
    pub fn insert(&mut self, effect: EffectDefinition) {
        match self.effects.iter_mut().find(|e| e.name == effect.name) {
            Some(existing) => *existing = effect,
            None => self.effects.push(effect),
        }
    }

    /// Effect names in table order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.effects.iter().map(|e| e.name.as_str())
    }

    /// Number of effects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

// =============================================================================
// Particles and emitters
// =============================================================================

/// One live particle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// World position
    pub position: Vec3,
    /// World velocity per second
    pub velocity: Vec3,
    /// Remaining life in seconds
    pub life: f32,
    /// Life at spawn
    pub max_life: f32,
    /// Size
    pub size: f32,
    /// RGBA
    pub color: [f32; 4],
    /// Constant acceleration
    pub gravity: Vec3,
}

impl Particle {
    /// Remaining life as a fraction of the spawn life.
    #[must_use]
    pub fn life_fraction(&self) -> f32 {
        if self.max_life > 0.0 {
            (self.life / self.max_life).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    fn advance(&mut self, step: f32) {
        self.life -= step;
        self.velocity += self.gravity * step;
        self.position += self.velocity * step;
    }
}

/// A time-bounded particle source.
#[derive(Debug, Clone, PartialEq)]
pub struct Emitter {
    /// Handle returned by [`ParticleSimulator::trigger`]
    pub id: EmitterId,
    /// Effect key
    pub effect: String,
    /// Spawn origin
    pub position: Vec3,
    /// Simulator time at trigger
    pub start_time: f64,
    /// Active lifetime in seconds
    pub duration: f64,
    spawned: usize,
    carry: f64,
}

impl Emitter {
    /// Seconds since trigger at simulator time `now`.
    #[must_use]
    pub fn age(&self, now: f64) -> f64 {
        now - self.start_time
    }

    /// Particles spawned so far.
    #[must_use]
    pub fn spawned(&self) -> usize {
        self.spawned
    }
}

// =============================================================================
// Simulator
// =============================================================================

/// Bounded particle pool driven by triggered emitters.
#[derive(Debug, Clone)]
pub struct ParticleSimulator {
    effects: EffectTable,
    particles: Vec<Particle>,
    emitters: Vec<Emitter>,
    max_particles: usize,
    time: f64,
    next_id: EmitterId,
    rng: Pcg64Mcg,
}

impl ParticleSimulator {
    /// Create an empty simulator.
    #[must_use]
    pub fn new(effects: EffectTable, max_particles: usize, seed: u64) -> Self {
        Self {
            effects,
            particles: Vec::with_capacity(max_particles.min(4096)),
            emitters: Vec::new(),
            max_particles,
            time: 0.0,
            next_id: 0,
            rng: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// Create from configuration.
    #[must_use]
    pub fn with_config(effects: EffectTable, config: &ParticleConfig) -> Self {
        Self::new(effects, config.max_particles, config.seed)
    }

    /// Start an emitter at the origin. Unknown effects are ignored.
    pub fn trigger(&mut self, effect: &str) -> Option<EmitterId> {
        self.trigger_at(effect, Vec3::ZERO)
    }

    /// Start an emitter at `position`. Unknown effects are ignored.
    pub fn trigger_at(&mut self, effect: &str, position: Vec3) -> Option<EmitterId> {
        let Some(definition) = self.effects.get(effect) else {
            log::debug!("ignoring unknown particle effect '{effect}'");
            return None;
        };
        let id = self.next_id;
        self.next_id += 1;
        self.emitters.push(Emitter {
            id,
            effect: definition.name.clone(),
            position,
            start_time: self.time,
            duration: definition.emitter_duration(),
            spawned: 0,
            carry: 0.0,
        });
        log::debug!("triggered '{effect}' emitter {id} at t={:.3}", self.time);
        Some(id)
    }

    /// Advance the simulation by `step` seconds.
    ///
    /// Existing particles move first, then the clock advances and expired
    /// emitters are dropped, then the remaining emitters spawn.
    pub fn tick(&mut self, step: f64) {
        if step <= 0.0 || !step.is_finite() {
            return;
        }
        let dt = step as f32;
        for particle in &mut self.particles {
            particle.advance(dt);
        }
        self.particles.retain(|p| p.life > 0.0);

        self.time += step;
        let now = self.time;
        self.emitters.retain(|e| e.age(now) + 1e-9 < e.duration);

        let mut emitters = std::mem::take(&mut self.emitters);
        for emitter in &mut emitters {
            self.spawn_from(emitter, step);
        }
        emitters.retain(|e| {
            self.effects
                .get(&e.effect)
                .is_some_and(|def| e.spawned < def.particle_count)
        });
        self.emitters = emitters;
    }

    fn spawn_from(&mut self, emitter: &mut Emitter, step: f64) {
        let Some(def) = self.effects.get(&emitter.effect) else {
            return;
        };
        emitter.carry += f64::from(def.emission_rate) * step;
        let due = emitter.carry.floor();
        emitter.carry -= due;

        let remaining = def.particle_count.saturating_sub(emitter.spawned);
        let count = (due as usize).min(remaining);
        let room = self.max_particles.saturating_sub(self.particles.len());
        if count > room {
            log::trace!("particle pool full, dropping {} spawns", count - room);
        }
        let age = emitter.age(self.time);
        let progress = (age / emitter.duration).clamp(0.0, 1.0) as f32;

        let mut fresh = Vec::with_capacity(count.min(room));
        for _ in 0..count.min(room) {
            fresh.push(spawn_particle(&mut self.rng, def, emitter.position, progress));
        }
        // Dropped spawns still count against the emitter's budget.
        emitter.spawned += count;
        self.particles.extend(fresh);
    }

    /// Live particles.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of live particles.
    #[must_use]
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Emitters still spawning.
    #[must_use]
    pub fn active_emitters(&self) -> &[Emitter] {
        &self.emitters
    }

    /// Whether the emitter with `id` is still spawning.
    #[must_use]
    pub fn is_active(&self, id: EmitterId) -> bool {
        self.emitters.iter().any(|e| e.id == id)
    }

    /// Pool capacity.
    #[must_use]
    pub fn max_particles(&self) -> usize {
        self.max_particles
    }

    /// Simulator clock in seconds.
    #[must_use]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Effect table.
    #[must_use]
    pub fn effects(&self) -> &EffectTable {
        &self.effects
    }

    /// Drop every particle and emitter. The clock keeps running.
    pub fn clear(&mut self) {
        self.particles.clear();
        self.emitters.clear();
    }
}

fn spawn_particle(rng: &mut Pcg64Mcg, def: &EffectDefinition, origin: Vec3, progress: f32) -> Particle {
    let spread = Vec3::new(
        rng.gen_range(-1.0..=1.0),
        rng.gen_range(0.0..=2.0),
        rng.gen_range(-1.0..=1.0),
    );

    let (position, velocity) = if def.follow_path {
        let angle = progress * PATH_TURNS * TAU;
        let radius = PATH_START_RADIUS + (PATH_END_RADIUS - PATH_START_RADIUS) * progress;
        let on_path = Vec3::new(radius * angle.cos(), PATH_HEIGHT * progress, radius * angle.sin());
        (origin + on_path, def.initial_velocity + spread * 0.1)
    } else {
        (origin, def.initial_velocity + spread)
    };

    let mut size = def.size;
    let mut color = def.color;
    if def.sparkle {
        size *= rng.gen_range(0.5..=1.5);
        color[3] *= rng.gen_range(0.4..=1.0);
    }

    Particle {
        position,
        velocity,
        life: def.lifetime,
        max_life: def.lifetime,
        size,
        color,
        gravity: def.gravity,
    }
}
