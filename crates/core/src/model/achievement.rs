use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::GameMode;

//
// ─── RECORD ───────────────────────────────────────────────────────────────────
//

/// Persisted achievement record.
///
/// The JSON shape (`unlockedAt` in camelCase) matches the stored list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub unlocked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<DateTime<Utc>>,
}

//
// ─── CATALOG ──────────────────────────────────────────────────────────────────
//

/// Condition that unlocks a built-in achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AchievementRule {
    FirstCorrect,
    Streak(u32),
    BlitzScore(u32),
    ReachLevel(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementDef {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub rule: AchievementRule,
}

pub const ACHIEVEMENTS: [AchievementDef; 5] = [
    AchievementDef {
        id: "first-correct",
        title: "First Steps",
        description: "Answer your first question correctly",
        icon: "star",
        rule: AchievementRule::FirstCorrect,
    },
    AchievementDef {
        id: "streak-5",
        title: "On Fire",
        description: "Answer 5 questions in a row correctly",
        icon: "flame",
        rule: AchievementRule::Streak(5),
    },
    AchievementDef {
        id: "streak-10",
        title: "Unstoppable",
        description: "Answer 10 questions in a row correctly",
        icon: "zap",
        rule: AchievementRule::Streak(10),
    },
    AchievementDef {
        id: "blitz-200",
        title: "Blitz Master",
        description: "Score 200 points in a single blitz session",
        icon: "trophy",
        rule: AchievementRule::BlitzScore(200),
    },
    AchievementDef {
        id: "level-5",
        title: "Rising Star",
        description: "Reach level 5",
        icon: "trending-up",
        rule: AchievementRule::ReachLevel(5),
    },
];

/// Session facts an achievement rule is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementContext {
    pub mode: GameMode,
    pub score: u32,
    pub streak: u32,
    pub correct_answered: u32,
    pub level: u32,
}

impl AchievementDef {
    #[must_use]
    pub fn is_earned(&self, ctx: &AchievementContext) -> bool {
        match self.rule {
            AchievementRule::FirstCorrect => ctx.correct_answered >= 1,
            AchievementRule::Streak(needed) => ctx.streak >= needed,
            AchievementRule::BlitzScore(needed) => {
                ctx.mode == GameMode::Blitz && ctx.score >= needed
            }
            AchievementRule::ReachLevel(needed) => ctx.level >= needed,
        }
    }

    #[must_use]
    pub fn unlock(&self, at: DateTime<Utc>) -> Achievement {
        Achievement {
            id: self.id.to_owned(),
            title: self.title.to_owned(),
            description: self.description.to_owned(),
            icon: self.icon.to_owned(),
            unlocked: true,
            unlocked_at: Some(at),
        }
    }
}
