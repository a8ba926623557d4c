//! Tunable gameplay constants.
//!
//! Everything is in pixels and seconds; `pixels_per_meter` is only handed to
//! the physics engine. The stock values live in the `Default` impls and any
//! subset can be overridden from a JSON file (missing fields keep their
//! defaults).

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::common::error::ConfigError;
use crate::common::kinds::EnemyTier;

/// Per-kind numbers copied into `EntityInfo` on init.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActorStats {
    pub max_hp: u32,
    pub dmg: u32,
    /// Nominal velocity magnitude; the sign is the travel direction.
    pub speed: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayfieldConfig {
    pub width: f32,
    pub height: f32,
    /// How far past an edge an actor may travel before it counts as gone.
    pub exit_margin: f32,
}

impl Default for PlayfieldConfig {
    fn default() -> Self {
        Self { width: 432.0, height: 768.0, exit_margin: 32.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub stats: ActorStats,
    pub impact: f32,
    pub fire_delay: f32,
    pub half_size: f32,
    /// Spawn height above the bottom edge.
    pub spawn_height: f32,
    /// Game speed held while the player is down.
    pub death_speed: f32,
    /// Real seconds between player death and `GameOver`.
    pub game_over_delay: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            stats: ActorStats { max_hp: 1000, dmg: 100, speed: 480.0 },
            impact: 1.0,
            fire_delay: 0.1,
            half_size: 16.0,
            spawn_height: 100.0,
            death_speed: 5.0,
            game_over_delay: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    pub stats: ActorStats,
    pub impact: f32,
    pub radius: f32,
    /// Hard cap on live + pooled bullets; `None` grows without bound.
    pub pool_cap: Option<usize>,
    /// Inert bullets constructed on entering the game.
    pub prewarm: usize,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            stats: ActorStats { max_hp: 1, dmg: 10, speed: 1600.0 },
            impact: 0.05,
            radius: 4.0,
            pool_cap: Some(256),
            prewarm: 64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DogfightConfig {
    /// Start firing inside this distance to the player.
    pub engage_range: f32,
    /// Back off when the player is closer than this.
    pub retreat_range: f32,
    pub homing_accel: f32,
    pub max_lateral_speed: f32,
    /// Lateral dead band; no correction inside it.
    pub epsilon: f32,
    pub burst_num: u32,
    pub fire_delay: f32,
    pub reload_duration: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Behaviour {
    /// Drift toward the player's X by `gain / distance` per second.
    Snake { gain: f32 },
    Dogfight(DogfightConfig),
    /// Straight dive with a sinusoidal weave.
    Dive { weave_amplitude: f32, weave_frequency: f32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierConfig {
    pub stats: ActorStats,
    /// Death trauma is `impact_per_hp * max_hp`.
    pub impact_per_hp: f32,
    pub half_size: f32,
    pub base_timer: f32,
    pub max_concurrent: Option<u32>,
    /// Tier unlocks once the score is strictly above this.
    pub unlock_score: u64,
    pub squad_size: u32,
    pub squad_spacing: f32,
    pub behaviour: Behaviour,
}

impl TierConfig {
    #[inline]
    pub fn death_impact(&self) -> f32 {
        self.impact_per_hp * self.stats.max_hp as f32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyRoster {
    pub grunt: TierConfig,
    pub dogfighter: TierConfig,
    pub swarmer: TierConfig,
    pub gunship: TierConfig,
}

impl EnemyRoster {
    #[inline]
    pub fn get(&self, tier: EnemyTier) -> &TierConfig {
        match tier {
            EnemyTier::Grunt => &self.grunt,
            EnemyTier::Dogfighter => &self.dogfighter,
            EnemyTier::Swarmer => &self.swarmer,
            EnemyTier::Gunship => &self.gunship,
        }
    }
}

impl Default for EnemyRoster {
    fn default() -> Self {
        Self {
            grunt: TierConfig {
                stats: ActorStats { max_hp: 50, dmg: 100, speed: -256.0 },
                impact_per_hp: 0.005,
                half_size: 16.0,
                base_timer: 1.0,
                max_concurrent: None,
                unlock_score: 0,
                squad_size: 1,
                squad_spacing: 0.0,
                behaviour: Behaviour::Snake { gain: 40_000.0 },
            },
            dogfighter: TierConfig {
                stats: ActorStats { max_hp: 100, dmg: 10, speed: -256.0 },
                impact_per_hp: 0.005,
                half_size: 18.0,
                base_timer: 5.0,
                max_concurrent: Some(3),
                unlock_score: 2000,
                squad_size: 1,
                squad_spacing: 0.0,
                behaviour: Behaviour::Dogfight(DogfightConfig {
                    engage_range: 420.0,
                    retreat_range: 180.0,
                    homing_accel: 320.0,
                    max_lateral_speed: 220.0,
                    epsilon: 6.0,
                    burst_num: 3,
                    fire_delay: 0.5,
                    reload_duration: 1.5,
                }),
            },
            swarmer: TierConfig {
                stats: ActorStats { max_hp: 20, dmg: 50, speed: -384.0 },
                impact_per_hp: 0.005,
                half_size: 10.0,
                base_timer: 20.0,
                max_concurrent: None,
                unlock_score: 20_000,
                squad_size: 5,
                squad_spacing: 36.0,
                behaviour: Behaviour::Dive { weave_amplitude: 90.0, weave_frequency: 1.5 },
            },
            gunship: TierConfig {
                stats: ActorStats { max_hp: 300, dmg: 50, speed: -128.0 },
                impact_per_hp: 0.005,
                half_size: 28.0,
                base_timer: 15.0,
                max_concurrent: Some(1),
                unlock_score: 30_000,
                squad_size: 1,
                squad_spacing: 0.0,
                behaviour: Behaviour::Dogfight(DogfightConfig {
                    engage_range: 520.0,
                    retreat_range: 240.0,
                    homing_accel: 160.0,
                    max_lateral_speed: 120.0,
                    epsilon: 8.0,
                    burst_num: 6,
                    fire_delay: 0.15,
                    reload_duration: 2.5,
                }),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectorConfig {
    /// Length of the score sampling window (seconds, unscaled).
    pub check_interval: f32,
    /// Score delta above which the game is "too easy".
    pub easy_threshold: u64,
    pub tighten_factor: f32,
    pub loosen_factor: f32,
    pub drift_factor: f32,
    pub easy_count_max: u8,
}

impl Default for DirectorConfig {
    fn default() -> Self {
        Self {
            check_interval: 5.0,
            easy_threshold: 200,
            tighten_factor: 1.5,
            loosen_factor: 1.5,
            drift_factor: 1.2,
            easy_count_max: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    pub min_multiplier: f32,
    pub max_multiplier: f32,
    /// Multiplier units per unscaled second.
    pub normalize_rate: f32,
    pub snap_epsilon: f32,
    /// Slow-mo applied on every kill.
    pub kill_speed: f32,
    /// Applied when leaving pause.
    pub resume_speed: f32,
    /// Debug key step.
    pub step: f32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            min_multiplier: 0.5,
            max_multiplier: 5.0,
            normalize_rate: 3.0,
            snap_epsilon: 0.1,
            kill_speed: 2.0,
            resume_speed: 6.0,
            step: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraumaConfig {
    /// Trauma units removed per unscaled second.
    pub decay_rate: f32,
    /// Radians.
    pub max_angle: f32,
    /// Pixels.
    pub max_offset: f32,
}

impl Default for TraumaConfig {
    fn default() -> Self {
        Self { decay_rate: 2.0, max_angle: 1.0_f32.to_radians(), max_offset: 10.0 }
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tunables {
    pub pixels_per_meter: f32,
    pub substeps: u32,
    /// Largest frame delta fed to timers and physics (seconds).
    pub max_frame_delta: f32,
    pub seed: u64,
    pub debug_keys: bool,
    pub playfield: PlayfieldConfig,
    pub player: PlayerConfig,
    pub bullet: BulletConfig,
    pub enemies: EnemyRoster,
    pub director: DirectorConfig,
    pub time: TimeConfig,
    pub trauma: TraumaConfig,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_meter: 32.0,
            substeps: 6,
            max_frame_delta: 0.1,
            seed: 0x5EED_5EED,
            debug_keys: true,
            playfield: PlayfieldConfig::default(),
            player: PlayerConfig::default(),
            bullet: BulletConfig::default(),
            enemies: EnemyRoster::default(),
            director: DirectorConfig::default(),
            time: TimeConfig::default(),
            trauma: TraumaConfig::default(),
        }
    }
}

impl Tunables {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Clamp a raw frame delta (stalls, zero frames) to something safe to integrate.
    #[inline]
    pub fn clamp_delta(&self, dt: f32) -> f32 {
        if dt.is_finite() { dt.clamp(0.0, self.max_frame_delta) } else { 0.0 }
    }
}
