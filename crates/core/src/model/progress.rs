use chrono::{DateTime, Utc};

use crate::model::{ACHIEVEMENTS, Achievement, AchievementContext};

pub const XP_PER_LEVEL: u32 = 100;

/// Level for a given experience total: `floor(xp / 100) + 1`.
#[must_use]
pub fn level_for(experience_points: u32) -> u32 {
    experience_points / XP_PER_LEVEL + 1
}

/// Cross-session progress: experience and unlocked achievements.
///
/// The level is never stored here; it is always derived from experience.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Progress {
    experience_points: u32,
    achievements: Vec<Achievement>,
}

impl Progress {
    #[must_use]
    pub fn new(experience_points: u32, achievements: Vec<Achievement>) -> Self {
        Self {
            experience_points,
            achievements,
        }
    }

    #[must_use]
    pub fn experience_points(&self) -> u32 {
        self.experience_points
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        level_for(self.experience_points)
    }

    /// Experience earned inside the current level (0..100).
    #[must_use]
    pub fn level_progress(&self) -> u32 {
        self.experience_points % XP_PER_LEVEL
    }

    #[must_use]
    pub fn achievements(&self) -> &[Achievement] {
        &self.achievements
    }

    #[must_use]
    pub fn is_unlocked(&self, id: &str) -> bool {
        self.achievements
            .iter()
            .any(|achievement| achievement.unlocked && achievement.id == id)
    }

    pub fn award(&mut self, experience_points: u32) {
        self.experience_points = self.experience_points.saturating_add(experience_points);
    }

    /// Unlocks every catalog achievement the context satisfies that is not
    /// already unlocked, returning only the new ones.
    pub fn unlock_earned(
        &mut self,
        ctx: &AchievementContext,
        at: DateTime<Utc>,
    ) -> Vec<Achievement> {
        let mut unlocked = Vec::new();
        for def in &ACHIEVEMENTS {
            if self.is_unlocked(def.id) || !def.is_earned(ctx) {
                continue;
            }
            let record = def.unlock(at);
            match self.achievements.iter_mut().find(|a| a.id == def.id) {
                Some(existing) => *existing = record.clone(),
                None => self.achievements.push(record.clone()),
            }
            unlocked.push(record);
        }
        unlocked
    }
}
