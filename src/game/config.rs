//! Difficulty and Level Configuration
//!
//! Static tables driving obstacle/enemy/food counts, level goals, and the
//! unlock progression. Progress is exposed as plain serializable values;
//! persisting them is the host's job.

use serde::{Deserialize, Serialize};

/// Difficulty tier selected from the menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// Three gentle levels, starts with the tutorial
    Easy,
    /// Mid-tier levels
    Moderate,
    /// High obstacle and enemy pressure
    Hard,
    /// Boss tier
    Expert,
    /// Autonomous sandbox: the player snake drives itself, obstacles can
    /// be spawned and dragged by hand
    Sandbox,
    /// Boss practice arena: the wyrm spawns pre-coiled, no cinematic
    Practice,
}

/// Entity counts and AI pressure for one difficulty tier.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DifficultySettings {
    /// Obstacles placed at arena generation
    pub obstacles: u32,
    /// Hostile snakes spawned
    pub stalkers: u32,
    /// Pursue weight given to each hostile head, 0..1
    pub pursuit: f64,
    /// Food pickups kept on the field
    pub food: u32,
}

impl Difficulty {
    /// Spawn table for this tier.
    pub fn settings(self) -> DifficultySettings {
        match self {
            Difficulty::Easy => DifficultySettings {
                obstacles: 3,
                stalkers: 1,
                pursuit: 0.30,
                food: 5,
            },
            Difficulty::Moderate => DifficultySettings {
                obstacles: 6,
                stalkers: 3,
                pursuit: 0.45,
                food: 7,
            },
            Difficulty::Hard => DifficultySettings {
                obstacles: 10,
                stalkers: 5,
                pursuit: 0.70,
                food: 10,
            },
            Difficulty::Expert => DifficultySettings {
                obstacles: 15,
                stalkers: 8,
                pursuit: 0.95,
                food: 12,
            },
            Difficulty::Sandbox => DifficultySettings {
                obstacles: 5,
                stalkers: 1,
                pursuit: 0.50,
                food: 7,
            },
            Difficulty::Practice => DifficultySettings {
                obstacles: 0,
                stalkers: 1,
                pursuit: 0.60,
                food: 7,
            },
        }
    }

    /// Tiers that participate in the unlock progression.
    pub const PROGRESSION: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Moderate, Difficulty::Hard];
}

/// Boss encounters a level can host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossKind {
    /// The flame serpent
    EmberWyrm,
}

/// One playable level. (Serialize only: the tables are static data.)
#[derive(Clone, Copy, Debug, Serialize)]
pub struct LevelSpec {
    /// Display name
    pub name: &'static str,
    /// Score required to complete the level
    pub target_score: u32,
    /// Time limit in seconds; 0 means untimed
    pub time_limit_secs: u32,
    /// Whether the tutorial overlay gates the start
    pub tutorial: bool,
    /// Boss encounter, if this is a boss level
    pub boss: Option<BossKind>,
}

/// Level table for a difficulty tier, in play order.
pub fn levels(difficulty: Difficulty) -> &'static [LevelSpec] {
    match difficulty {
        Difficulty::Easy => &[
            LevelSpec {
                name: "Tutorial",
                target_score: 5,
                time_limit_secs: 90,
                tutorial: true,
                boss: None,
            },
            LevelSpec {
                name: "Easy Level 2",
                target_score: 10,
                time_limit_secs: 60,
                tutorial: false,
                boss: None,
            },
            LevelSpec {
                name: "Easy Level 3",
                target_score: 15,
                time_limit_secs: 50,
                tutorial: false,
                boss: None,
            },
        ],
        Difficulty::Moderate => &[
            LevelSpec {
                name: "Moderate 1",
                target_score: 20,
                time_limit_secs: 70,
                tutorial: false,
                boss: None,
            },
            LevelSpec {
                name: "Moderate 2",
                target_score: 30,
                time_limit_secs: 65,
                tutorial: false,
                boss: None,
            },
            LevelSpec {
                name: "Moderate 3",
                target_score: 40,
                time_limit_secs: 60,
                tutorial: false,
                boss: None,
            },
        ],
        Difficulty::Hard => &[
            LevelSpec {
                name: "Hard 1",
                target_score: 40,
                time_limit_secs: 55,
                tutorial: false,
                boss: None,
            },
            LevelSpec {
                name: "Hard 2",
                target_score: 60,
                time_limit_secs: 50,
                tutorial: false,
                boss: None,
            },
            LevelSpec {
                name: "Hard 3",
                target_score: 80,
                time_limit_secs: 45,
                tutorial: false,
                boss: None,
            },
        ],
        Difficulty::Expert => &[LevelSpec {
            name: "The Ember Wyrm",
            target_score: 50,
            time_limit_secs: 0,
            tutorial: false,
            boss: Some(BossKind::EmberWyrm),
        }],
        Difficulty::Sandbox => &[LevelSpec {
            name: "Sandbox Arena",
            target_score: 9999,
            time_limit_secs: 0,
            tutorial: false,
            boss: None,
        }],
        Difficulty::Practice => &[LevelSpec {
            name: "Stun Practice",
            target_score: 9999,
            time_limit_secs: 0,
            tutorial: false,
            boss: Some(BossKind::EmberWyrm),
        }],
    }
}

/// Completion flags and top score, exposed for the persistence layer.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Progress {
    /// Completed levels per progression tier: `[easy, moderate, hard]`,
    /// three levels each.
    pub completed: [[bool; 3]; 3],
    /// Best score across all runs
    pub top_score: u32,
}

impl Progress {
    fn tier_index(difficulty: Difficulty) -> Option<usize> {
        Difficulty::PROGRESSION.iter().position(|d| *d == difficulty)
    }

    /// Whether a level may be started. Level N unlocks after level N-1 of
    /// its tier; the first level of a tier unlocks after the previous tier
    /// is fully complete. Non-progression tiers are always open.
    pub fn is_unlocked(&self, difficulty: Difficulty, level: usize) -> bool {
        let Some(tier) = Self::tier_index(difficulty) else {
            return true;
        };
        if level >= 3 {
            return false;
        }
        if level > 0 {
            return self.completed[tier][level - 1];
        }
        if tier == 0 {
            return true;
        }
        self.completed[tier - 1].iter().all(|c| *c)
    }

    /// Record a level as completed.
    pub fn complete(&mut self, difficulty: Difficulty, level: usize) {
        if let Some(tier) = Self::tier_index(difficulty) {
            if level < 3 {
                self.completed[tier][level] = true;
            }
        }
    }

    /// Record a run's final score.
    pub fn record_score(&mut self, score: u32) {
        self.top_score = self.top_score.max(score);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_tables_nonempty() {
        for d in [
            Difficulty::Easy,
            Difficulty::Moderate,
            Difficulty::Hard,
            Difficulty::Expert,
            Difficulty::Sandbox,
            Difficulty::Practice,
        ] {
            assert!(!levels(d).is_empty());
        }
        assert!(levels(Difficulty::Expert)[0].boss.is_some());
        assert!(levels(Difficulty::Easy)[0].tutorial);
    }

    #[test]
    fn test_unlock_chain() {
        let mut progress = Progress::default();

        assert!(progress.is_unlocked(Difficulty::Easy, 0));
        assert!(!progress.is_unlocked(Difficulty::Easy, 1));
        assert!(!progress.is_unlocked(Difficulty::Moderate, 0));

        progress.complete(Difficulty::Easy, 0);
        assert!(progress.is_unlocked(Difficulty::Easy, 1));

        progress.complete(Difficulty::Easy, 1);
        progress.complete(Difficulty::Easy, 2);
        assert!(progress.is_unlocked(Difficulty::Moderate, 0));
        assert!(!progress.is_unlocked(Difficulty::Hard, 0));
    }

    #[test]
    fn test_sandbox_always_open() {
        let progress = Progress::default();
        assert!(progress.is_unlocked(Difficulty::Sandbox, 0));
        assert!(progress.is_unlocked(Difficulty::Expert, 0));
    }

    #[test]
    fn test_top_score_monotone() {
        let mut progress = Progress::default();
        progress.record_score(12);
        progress.record_score(7);
        assert_eq!(progress.top_score, 12);
    }
}
