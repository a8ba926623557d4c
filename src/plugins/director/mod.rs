//! Enemy director: when to spawn what.
//!
//! Owns one pool per tier, a spawn timer per tier, the difficulty ladder and
//! a feedback loop that tightens or loosens every spawn period through a
//! single `base_multiplier`.
//!
//! ```text
//! FixedUpdate (scaled dt)   SimSet::Spawn   tick timers -> spawn squads
//!                           SimSet::Bounds  score -> difficulty (monotonic)
//! Update (real dt)          every check_interval: score delta -> base_multiplier
//! ```

use bevy::prelude::*;

use crate::common::error::PoolError;
use crate::common::kinds::EnemyTier;
use crate::common::rng::SimRng;
use crate::common::schedule::SimSet;
use crate::common::state::GameState;
use crate::common::tunables::{DirectorConfig, EnemyRoster, Tunables};
use crate::plugins::actors::ActorState;
use crate::plugins::core::Score;
use crate::plugins::enemies::{construct_enemy, init_enemy};
use crate::plugins::player::Player;
use crate::plugins::pool::{EntityPool, Issued};
use crate::plugins::time_dilation::simulation_running;
use crate::plugins::world::Playfield;

/// Difficulty ladder. Level `n` unlocks tier `n` of `EnemyTier::ALL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Difficulty {
    #[default]
    Noob,
    Vet,
    Pro,
    Elite,
}

impl Difficulty {
    pub const LADDER: [Self; EnemyTier::COUNT] = [Self::Noob, Self::Vet, Self::Pro, Self::Elite];

    /// Highest level whose unlock score the score is strictly above. The base
    /// tier is always unlocked.
    pub fn for_score(score: u64, roster: &EnemyRoster) -> Self {
        EnemyTier::ALL
            .iter()
            .zip(Self::LADDER)
            .skip(1)
            .filter(|(tier, _)| score > roster.get(**tier).unlock_score)
            .map(|(_, level)| level)
            .max()
            .unwrap_or(Self::Noob)
    }

    #[inline]
    pub fn unlocks(self, tier: EnemyTier) -> bool {
        tier.index() <= self as usize
    }
}

/// Result of one feedback window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Delta above the threshold: spawn periods shrink.
    TooEasy,
    /// Hysteresis counter ran out: spawn periods grow.
    TooHard,
    /// Neither: a small continuous tightening.
    Steady,
}

/// Tiers whose timer expired this tick with room under their cap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnOrders([bool; EnemyTier::COUNT]);

impl SpawnOrders {
    pub fn iter(self) -> impl Iterator<Item = EnemyTier> {
        EnemyTier::ALL.into_iter().filter(move |tier| self.0[tier.index()])
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        !self.0.iter().any(|due| *due)
    }
}

#[derive(Resource, Debug, Clone)]
pub struct Director {
    difficulty: Difficulty,
    spawn_timers: [f32; EnemyTier::COUNT],
    base_timers: [f32; EnemyTier::COUNT],
    caps: [Option<u32>; EnemyTier::COUNT],
    roster: EnemyRoster,
    base_multiplier: f32,
    previous_score: u64,
    check_timer: f32,
    easy_count: u8,
    cfg: DirectorConfig,
    pools: [EntityPool; EnemyTier::COUNT],
}

impl Director {
    pub fn new(tunables: &Tunables) -> Self {
        let roster = tunables.enemies.clone();
        let base_timers = EnemyTier::ALL.map(|tier| roster.get(tier).base_timer.max(f32::EPSILON));
        let caps = EnemyTier::ALL.map(|tier| roster.get(tier).max_concurrent);
        let cfg = tunables.director.clone();
        Self {
            difficulty: Difficulty::Noob,
            spawn_timers: base_timers,
            base_timers,
            caps,
            roster,
            base_multiplier: 1.0,
            previous_score: 0,
            check_timer: cfg.check_interval,
            easy_count: cfg.easy_count_max,
            cfg,
            pools: Default::default(),
        }
    }

    #[inline]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[inline]
    pub fn base_multiplier(&self) -> f32 {
        self.base_multiplier
    }

    #[inline]
    pub fn easy_count(&self) -> u8 {
        self.easy_count
    }

    #[inline]
    pub fn previous_score(&self) -> u64 {
        self.previous_score
    }

    #[inline]
    pub fn spawn_timer(&self, tier: EnemyTier) -> f32 {
        self.spawn_timers[tier.index()]
    }

    /// Live enemies of a tier (checked out of its pool).
    #[inline]
    pub fn live(&self, tier: EnemyTier) -> u32 {
        self.pools[tier.index()].checked_out() as u32
    }

    #[inline]
    pub fn pool(&self, tier: EnemyTier) -> &EntityPool {
        &self.pools[tier.index()]
    }

    pub fn is_at_cap(&self, tier: EnemyTier) -> bool {
        self.caps[tier.index()].is_some_and(|cap| self.live(tier) >= cap)
    }

    /// Count down every unlocked tier by `dt` (already time-dilated).
    ///
    /// An expired timer always resets to `base_timer * base_multiplier`, also
    /// when the tier is at its cap and the spawn is skipped.
    pub fn tick_spawn_timers(&mut self, dt: f32) -> SpawnOrders {
        let mut orders = SpawnOrders::default();
        for tier in EnemyTier::ALL {
            if !self.difficulty.unlocks(tier) {
                continue;
            }
            let i = tier.index();
            self.spawn_timers[i] -= dt;
            if self.spawn_timers[i] > 0.0 {
                continue;
            }
            self.spawn_timers[i] = self.base_timers[i] * self.base_multiplier;
            orders.0[i] = !self.is_at_cap(tier);
        }
        orders
    }

    /// Re-evaluate the ladder. Never steps down. Returns the new level on a change.
    pub fn update_difficulty(&mut self, score: u64) -> Option<Difficulty> {
        let candidate = Difficulty::for_score(score, &self.roster);
        if candidate > self.difficulty {
            self.difficulty = candidate;
            Some(candidate)
        } else {
            None
        }
    }

    /// Feedback loop, fed unscaled seconds. Returns a verdict once per window.
    pub fn tick_feedback(&mut self, dt: f32, score: u64) -> Option<Verdict> {
        self.check_timer -= dt;
        if self.check_timer > 0.0 {
            return None;
        }
        self.check_timer = self.cfg.check_interval;

        let delta = score.saturating_sub(self.previous_score);
        if delta > self.cfg.easy_threshold {
            self.base_multiplier /= self.cfg.tighten_factor;
            self.previous_score = score;
            if self.easy_count < self.cfg.easy_count_max {
                self.easy_count += 1;
            }
            return Some(Verdict::TooEasy);
        }

        let verdict = if self.easy_count == 0 {
            self.base_multiplier *= self.cfg.loosen_factor;
            self.previous_score = score;
            self.easy_count = self.cfg.easy_count_max;
            Verdict::TooHard
        } else {
            // `previous_score` is left alone here, so the next window's delta
            // accumulates across steady windows.
            self.base_multiplier /= self.cfg.drift_factor;
            Verdict::Steady
        };
        self.easy_count = self.easy_count.saturating_sub(1);
        Some(verdict)
    }

    pub fn obtain(&mut self, tier: EnemyTier, construct: impl FnOnce() -> Entity) -> Result<Issued, PoolError> {
        self.pools[tier.index()].obtain(construct)
    }

    /// Return a slot; frees a place under the tier's cap.
    pub fn release(&mut self, tier: EnemyTier, entity: Entity) -> Result<(), PoolError> {
        self.pools[tier.index()].release(entity)
    }
}

impl Default for Director {
    fn default() -> Self {
        Self::new(&Tunables::default())
    }
}

pub fn plugin(app: &mut App) {
    let director = Director::new(app.world().resource::<Tunables>());
    app.insert_resource(director);

    app.add_systems(OnEnter(GameState::InGame), reset_director);
    app.add_systems(
        FixedUpdate,
        (
            spawn_enemies.in_set(SimSet::Spawn).run_if(player_alive),
            update_difficulty.in_set(SimSet::Bounds),
        ),
    );
    app.add_systems(
        Update,
        difficulty_feedback.run_if(in_state(GameState::InGame).and(simulation_running)),
    );
}

pub fn player_alive(q: Query<&ActorState, With<Player>>) -> bool {
    q.iter().any(|state| *state == ActorState::Alive)
}

/// New session: fresh timers, ladder and pools (old slots despawn with the state).
fn reset_director(tunables: Res<Tunables>, mut director: ResMut<Director>) {
    *director = Director::new(&tunables);
}

pub fn spawn_enemies(
    mut commands: Commands,
    time: Res<Time>,
    tunables: Res<Tunables>,
    playfield: Res<Playfield>,
    mut rng: ResMut<SimRng>,
    mut director: ResMut<Director>,
) {
    let orders = director.tick_spawn_timers(time.delta_secs());
    for tier in orders.iter() {
        let cfg = tunables.enemies.get(tier);
        let (lo, hi) = playfield.spawn_span(cfg.half_size);
        let lead = Vec2::new(rng.range(lo, hi), playfield.spawn_y(cfg.half_size));
        let phase = rng.range(0.0, std::f32::consts::TAU);

        for k in 0..cfg.squad_size.max(1) {
            if director.is_at_cap(tier) {
                break;
            }
            // V formation trailing the leader upward, alternating sides.
            let rank = ((k + 1) / 2) as f32;
            let side = if k % 2 == 1 { -1.0 } else { 1.0 };
            let offset = Vec2::new(side * rank * cfg.squad_spacing, rank * cfg.squad_spacing);
            let position = Vec2::new((lead.x + offset.x).clamp(lo, hi), lead.y + offset.y);

            match director.obtain(tier, || construct_enemy(&mut commands, tier, cfg)) {
                Ok(issued) => {
                    init_enemy(&mut commands, issued.entity, tier, cfg, position, phase + k as f32 * 0.6);
                }
                Err(err) => {
                    debug!("{tier:?} spawn skipped: {err}");
                    break;
                }
            }
        }
    }
}

pub fn update_difficulty(score: Res<Score>, mut director: ResMut<Director>) {
    if let Some(level) = director.update_difficulty(score.value()) {
        info!("difficulty raised to {level:?} at score {}", score.value());
    }
}

pub fn difficulty_feedback(
    real: Res<Time<Real>>,
    tunables: Res<Tunables>,
    score: Res<Score>,
    mut director: ResMut<Director>,
) {
    let dt = tunables.clamp_delta(real.delta_secs());
    let delta = score.value().saturating_sub(director.previous_score());
    if let Some(verdict) = director.tick_feedback(dt, score.value()) {
        let what = match verdict {
            Verdict::TooEasy => "increasing difficulty",
            Verdict::TooHard => "lowering difficulty",
            Verdict::Steady => "just right",
        };
        debug!(
            "director: {what} (score delta {delta}), base multiplier {:.3}, easy count {}",
            director.base_multiplier(),
            director.easy_count()
        );
    }
}
