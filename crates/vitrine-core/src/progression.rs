//! Experience levels, achievements and point rewards.
//!
//! [`Progression`] owns the learner's [`Profile`] and persists it as JSON under
//! [`PROFILE_KEY`] after every change. Mutations report what happened as
//! [`ProgressEvent`]s so the showcase can celebrate them.
//!
//! Calendar days are passed in by the host as a [`DayIndex`] so streaks and
//! quest periods stay deterministic under test.

use crate::color::Color;
use crate::error::{ColorError, StorageError};
use crate::storage::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Storage key for the serialized profile.
pub const PROFILE_KEY: &str = "vitrine-profile";

/// Experience granted for completing a workshop.
pub const WORKSHOP_EXPERIENCE: u64 = 150;

/// Quiz score that earns the perfect-score bonus.
pub const PERFECT_SCORE: u8 = 100;

/// Days since 1970-01-01 in the learner's local calendar.
pub type DayIndex = i64;

/// One rung of the level ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelInfo {
    /// 1-based level
    pub level: u32,
    /// Experience needed to reach it
    pub min_experience: u64,
    /// Display title
    pub title: &'static str,
}

/// The level ladder, ascending.
pub const LEVELS: [LevelInfo; 8] = [
    LevelInfo { level: 1, min_experience: 0, title: "Curious Beginner" },
    LevelInfo { level: 2, min_experience: 500, title: "Eager Learner" },
    LevelInfo { level: 3, min_experience: 1200, title: "Skilled Practitioner" },
    LevelInfo { level: 4, min_experience: 2500, title: "Expert Developer" },
    LevelInfo { level: 5, min_experience: 5000, title: "Knowledge Master" },
    LevelInfo { level: 6, min_experience: 10000, title: "Community Leader" },
    LevelInfo { level: 7, min_experience: 20000, title: "Innovation Pioneer" },
    LevelInfo { level: 8, min_experience: 40000, title: "Vitrine Champion" },
];

/// Highest level reached with `experience`.
#[must_use]
pub fn level_for(experience: u64) -> u32 {
    LEVELS
        .iter()
        .rev()
        .find(|l| experience >= l.min_experience)
        .map_or(1, |l| l.level)
}

/// Level metadata, `None` outside the ladder.
#[must_use]
pub fn level_info(level: u32) -> Option<&'static LevelInfo> {
    LEVELS.iter().find(|l| l.level == level)
}

/// Position within the current level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelProgress {
    /// Percent of the way to the next level, 100 at the top
    pub progress: f64,
    /// Experience still needed, 0 at the top
    pub points_needed: u64,
}

/// Progress from the current level toward the next.
#[must_use]
pub fn progress_to_next(experience: u64) -> LevelProgress {
    let level = level_for(experience);
    match (level_info(level), level_info(level + 1)) {
        (Some(current), Some(next)) => {
            let span = next.min_experience - current.min_experience;
            let into = experience - current.min_experience;
            LevelProgress {
                progress: into as f64 / span as f64 * 100.0,
                points_needed: next.min_experience - experience,
            }
        }
        _ => LevelProgress {
            progress: 100.0,
            points_needed: 0,
        },
    }
}

// =============================================================================
// Achievements and rewards
// =============================================================================

/// A named achievement worth a fixed number of points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Achievement {
    /// Stable identifier
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Points awarded on unlock
    pub points: u64,
}

/// Every known achievement.
pub const ACHIEVEMENTS: [Achievement; 10] = [
    Achievement { id: "first_workshop", name: "Getting Started", points: 100 },
    Achievement { id: "workshop_streak_5", name: "Consistent Learner", points: 250 },
    Achievement { id: "skill_master", name: "Skill Master", points: 500 },
    Achievement { id: "speed_learner", name: "Speed Learner", points: 300 },
    Achievement { id: "helper", name: "Community Helper", points: 400 },
    Achievement { id: "perfectionist", name: "Perfectionist", points: 600 },
    Achievement { id: "night_owl", name: "Night Owl", points: 150 },
    Achievement { id: "early_bird", name: "Early Bird", points: 150 },
    Achievement { id: "social_butterfly", name: "Social Butterfly", points: 200 },
    Achievement { id: "knowledge_seeker", name: "Knowledge Seeker", points: 350 },
];

/// Look up an achievement by id.
#[must_use]
pub fn achievement(id: &str) -> Option<&'static Achievement> {
    ACHIEVEMENTS.iter().find(|a| a.id == id)
}

/// Actions that earn points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RewardAction {
    /// Finished a workshop
    WorkshopCompletion,
    /// Perfect quiz score
    PerfectScore,
    /// Helped another learner
    HelpCommunity,
    /// Active today
    DailyActivity,
    /// Kept a streak going
    StreakBonus,
}

impl RewardAction {
    /// `(base, bonus)` points before multipliers.
    #[must_use]
    pub const fn points(self) -> (u64, u64) {
        match self {
            Self::WorkshopCompletion => (100, 0),
            Self::PerfectScore => (50, 50),
            Self::HelpCommunity => (25, 0),
            Self::DailyActivity => (20, 0),
            Self::StreakBonus => (0, 10),
        }
    }
}

/// Points for `action` after the global multiplier, the streak bonus (10% per
/// day, capped at +200%) and the level bonus (5% per level above 1).
#[must_use]
pub fn reward(action: RewardAction, streak_days: u32, level: u32, multiplier: f64) -> u64 {
    let (base, bonus) = action.points();
    let mut points = (base + bonus) as f64 * multiplier;
    if streak_days > 0 {
        points *= 1.0 + (f64::from(streak_days) * 0.1).min(2.0);
    }
    points *= 1.0 + f64::from(level.saturating_sub(1)) * 0.05;
    points.round().max(0.0) as u64
}

// =============================================================================
// Badges
// =============================================================================

/// A collectible badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    /// Stable identifier
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Emoji shown next to the name
    pub icon: &'static str,
    /// Accent color as `#rrggbb`
    pub hex: &'static str,
}

impl Badge {
    /// Accent color.
    pub fn color(&self) -> Result<Color, ColorError> {
        Color::from_hex(self.hex)
    }
}

/// Every known badge, including the ones quests hand out.
pub const BADGES: [Badge; 11] = [
    Badge { id: "python_beginner", name: "Python Beginner", icon: "🐍", hex: "#3776ab" },
    Badge { id: "javascript_ninja", name: "JavaScript Ninja", icon: "⚔️", hex: "#f7df1e" },
    Badge { id: "data_scientist", name: "Data Scientist", icon: "📊", hex: "#ff6b6b" },
    Badge { id: "web_developer", name: "Web Developer", icon: "🌐", hex: "#4ecdc4" },
    Badge { id: "ai_enthusiast", name: "AI Enthusiast", icon: "🤖", hex: "#45b7d1" },
    Badge { id: "mentor", name: "Mentor", icon: "🎓", hex: "#96ceb4" },
    Badge { id: "innovator", name: "Innovator", icon: "💡", hex: "#feca57" },
    Badge { id: "collaborator", name: "Collaborator", icon: "👥", hex: "#ff9ff3" },
    Badge { id: "weekly_champion", name: "Weekly Champion", icon: "🏆", hex: "#f39c12" },
    Badge { id: "explorer", name: "Explorer", icon: "🧭", hex: "#1abc9c" },
    Badge { id: "social_learner", name: "Social Learner", icon: "💬", hex: "#9b59b6" },
];

/// Look up a badge by id.
#[must_use]
pub fn badge(id: &str) -> Option<&'static Badge> {
    BADGES.iter().find(|b| b.id == id)
}

// =============================================================================
// Quests
// =============================================================================

/// Learner actions that advance quests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestAction {
    /// Finished a workshop
    WorkshopCompletion,
    /// Practiced a skill exercise
    SkillPractice,
    /// Posted in a community discussion
    CommunityParticipation,
    /// Answered another learner
    HelpGiven,
}

impl QuestAction {
    /// Parse the host's action name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "workshop_completion" => Some(Self::WorkshopCompletion),
            "skill_practice" => Some(Self::SkillPractice),
            "community_participation" => Some(Self::CommunityParticipation),
            "help_given" => Some(Self::HelpGiven),
            _ => None,
        }
    }
}

/// How often a quest starts over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestPeriod {
    /// Every calendar day
    Daily,
    /// Every Monday-based week
    Weekly,
    /// Never
    Ongoing,
}

impl QuestPeriod {
    /// Which period `day` falls in, `None` for quests that never reset.
    #[must_use]
    pub fn key(self, day: DayIndex) -> Option<i64> {
        match self {
            Self::Daily => Some(day),
            // 1970-01-01 was a Thursday.
            Self::Weekly => Some((day + 3).div_euclid(7)),
            Self::Ongoing => None,
        }
    }
}

/// A counted goal with a reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quest {
    /// Stable identifier
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Reset cadence
    pub period: QuestPeriod,
    /// Actions needed
    pub target: u32,
    /// Points on completion
    pub points: u64,
    /// Badge on completion
    pub badge: Option<&'static str>,
    /// Actions that count toward it
    pub actions: &'static [QuestAction],
}

/// Every known quest.
pub const QUESTS: [Quest; 4] = [
    Quest {
        id: "daily_learner",
        name: "Daily Learning Challenge",
        period: QuestPeriod::Daily,
        target: 1,
        points: 50,
        badge: None,
        actions: &[
            QuestAction::WorkshopCompletion,
            QuestAction::SkillPractice,
            QuestAction::CommunityParticipation,
        ],
    },
    Quest {
        id: "weekly_warrior",
        name: "Weekly Learning Warrior",
        period: QuestPeriod::Weekly,
        target: 5,
        points: 300,
        badge: Some("weekly_champion"),
        actions: &[QuestAction::WorkshopCompletion],
    },
    Quest {
        id: "skill_explorer",
        name: "Skill Explorer",
        period: QuestPeriod::Ongoing,
        target: 3,
        points: 200,
        badge: Some("explorer"),
        actions: &[QuestAction::WorkshopCompletion],
    },
    Quest {
        id: "social_learner",
        name: "Social Learner",
        period: QuestPeriod::Ongoing,
        target: 10,
        points: 250,
        badge: Some("social_learner"),
        actions: &[QuestAction::CommunityParticipation, QuestAction::HelpGiven],
    },
];

/// Look up a quest by id.
#[must_use]
pub fn quest(id: &str) -> Option<&'static Quest> {
    QUESTS.iter().find(|q| q.id == id)
}

/// Persisted progress on one quest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestState {
    /// Actions counted, capped at the target
    pub progress: u32,
    /// Reward already paid this period
    pub completed: bool,
    /// Period the progress belongs to
    pub period: Option<i64>,
}

// =============================================================================
// Profile
// =============================================================================

/// Persisted learner state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    /// Total points
    pub points: u64,
    /// Total experience
    pub experience: u64,
    /// Level derived from experience
    pub level: u32,
    /// Unlocked achievement ids in unlock order
    pub achievements: Vec<String>,
    /// Earned badge ids in award order
    pub badges: Vec<String>,
    /// Consecutive active days
    pub current_streak: u32,
    /// Longest daily streak seen
    pub longest_streak: u32,
    /// Last day with any recorded activity
    pub last_activity: Option<DayIndex>,
    /// Workshops completed
    pub workshops_completed: u32,
    /// Workshops completed in a row
    pub workshop_streak: u32,
    /// Longest workshop run seen
    pub longest_workshop_streak: u32,
    /// Quest progress by quest id
    pub quests: BTreeMap<String, QuestState>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            points: 0,
            experience: 0,
            level: 1,
            achievements: Vec::new(),
            badges: Vec::new(),
            current_streak: 0,
            longest_streak: 0,
            last_activity: None,
            workshops_completed: 0,
            workshop_streak: 0,
            longest_workshop_streak: 0,
            quests: BTreeMap::new(),
        }
    }
}

impl Profile {
    /// Title for the current level.
    #[must_use]
    pub fn title(&self) -> &'static str {
        level_info(self.level).map_or(LEVELS[0].title, |l| l.title)
    }

    /// Whether `id` is unlocked.
    #[must_use]
    pub fn has_achievement(&self, id: &str) -> bool {
        self.achievements.iter().any(|a| a == id)
    }

    /// Whether badge `id` was earned.
    #[must_use]
    pub fn has_badge(&self, id: &str) -> bool {
        self.badges.iter().any(|b| b == id)
    }

    /// Progress on quest `id`, if it was ever advanced.
    #[must_use]
    pub fn quest(&self, id: &str) -> Option<&QuestState> {
        self.quests.get(id)
    }
}

/// Something worth celebrating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProgressEvent {
    /// Level increased
    LevelUp {
        /// Previous level
        from: u32,
        /// New level
        to: u32,
        /// Points awarded for the level-up
        points: u64,
    },
    /// Achievement unlocked
    AchievementUnlocked {
        /// Achievement id
        id: String,
        /// Points awarded
        points: u64,
    },
    /// Points awarded for an action
    PointsAwarded {
        /// Action
        action: RewardAction,
        /// Points awarded
        points: u64,
    },
    /// Quest target reached
    QuestCompleted {
        /// Quest id
        id: String,
        /// Points awarded
        points: u64,
    },
    /// Badge earned
    BadgeEarned {
        /// Badge id
        id: String,
    },
}

/// Owns the profile and keeps it persisted.
#[derive(Debug)]
pub struct Progression<S: KeyValueStore> {
    store: S,
    profile: Profile,
    multiplier: f64,
}

impl<S: KeyValueStore> Progression<S> {
    /// Load the stored profile. A missing or unreadable profile starts fresh.
    pub fn load(store: S) -> Self {
        let profile = match store.get_json::<Profile>(PROFILE_KEY) {
            Ok(Some(profile)) => profile,
            Ok(None) => Profile::default(),
            Err(e) => {
                log::warn!("discarding unreadable profile: {e}");
                Profile::default()
            }
        };
        Self {
            store,
            profile,
            multiplier: 1.0,
        }
    }

    /// Current profile.
    #[must_use]
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Set the global points multiplier (default 1.0).
    pub fn set_multiplier(&mut self, multiplier: f64) {
        self.multiplier = multiplier.max(0.0);
    }

    /// Persist the profile.
    pub fn save(&self) -> Result<(), StorageError> {
        self.store.set_json(PROFILE_KEY, &self.profile)
    }

    /// Add experience, recomputing the level. A level-up awards
    /// `new_level * 100` points.
    pub fn add_experience(&mut self, experience: u64) -> Result<Vec<ProgressEvent>, StorageError> {
        let events = self.gain_experience(experience);
        self.save()?;
        Ok(events)
    }

    /// Unlock an achievement once. Unknown or already-unlocked ids yield `None`.
    pub fn unlock(&mut self, id: &str) -> Result<Option<ProgressEvent>, StorageError> {
        let event = self.grant(id);
        if event.is_some() {
            self.save()?;
        }
        Ok(event)
    }

    /// Award points for an action with all bonuses applied.
    pub fn award(&mut self, action: RewardAction) -> Result<ProgressEvent, StorageError> {
        let event = self.grant_reward(action);
        self.save()?;
        Ok(event)
    }

    /// Record a finished workshop on `day` with quiz `score` (0-100).
    ///
    /// Rewards use the streak as it stood before this workshop. A score of
    /// [`PERFECT_SCORE`] adds the perfect-score reward.
    pub fn complete_workshop(&mut self, score: u8, day: DayIndex) -> Result<Vec<ProgressEvent>, StorageError> {
        self.profile.workshops_completed += 1;
        let mut events = vec![self.grant_reward(RewardAction::WorkshopCompletion)];
        if score >= PERFECT_SCORE {
            events.push(self.grant_reward(RewardAction::PerfectScore));
        }
        events.extend(self.gain_experience(WORKSHOP_EXPERIENCE));

        let p = &mut self.profile;
        p.workshop_streak += 1;
        p.longest_workshop_streak = p.longest_workshop_streak.max(p.workshop_streak);
        self.touch_day(day);

        events.extend(self.grant("first_workshop"));
        events.extend(self.check_streak());
        events.extend(self.advance_quests(QuestAction::WorkshopCompletion, day));
        self.save()?;
        Ok(events)
    }

    /// Record a non-workshop action on `day`. Helping another learner also
    /// earns the community reward.
    pub fn record_action(&mut self, action: QuestAction, day: DayIndex) -> Result<Vec<ProgressEvent>, StorageError> {
        let mut events = Vec::new();
        if action == QuestAction::HelpGiven {
            events.push(self.grant_reward(RewardAction::HelpCommunity));
        }
        self.touch_day(day);
        events.extend(self.check_streak());
        events.extend(self.advance_quests(action, day));
        self.save()?;
        Ok(events)
    }

    /// Continue or restart the daily streak for a visit on `day`.
    pub fn record_visit(&mut self, day: DayIndex) -> Result<Vec<ProgressEvent>, StorageError> {
        if self.profile.last_activity == Some(day) {
            return Ok(Vec::new());
        }
        self.touch_day(day);
        let events: Vec<_> = self.check_streak().into_iter().collect();
        self.save()?;
        Ok(events)
    }

    /// Award badge `id` once. Unknown or already-earned ids yield `None`.
    pub fn award_badge(&mut self, id: &str) -> Result<Option<ProgressEvent>, StorageError> {
        let event = self.grant_badge(id);
        if event.is_some() {
            self.save()?;
        }
        Ok(event)
    }

    fn touch_day(&mut self, day: DayIndex) {
        let p = &mut self.profile;
        if p.last_activity == Some(day) {
            return;
        }
        p.current_streak = match p.last_activity {
            Some(last) if last + 1 == day => p.current_streak + 1,
            _ => 1,
        };
        p.last_activity = Some(day);
        p.longest_streak = p.longest_streak.max(p.current_streak);
    }

    fn check_streak(&mut self) -> Option<ProgressEvent> {
        if self.profile.current_streak >= 5 {
            self.grant("workshop_streak_5")
        } else {
            None
        }
    }

    fn advance_quests(&mut self, action: QuestAction, day: DayIndex) -> Vec<ProgressEvent> {
        let mut events = Vec::new();
        for quest in QUESTS.iter().filter(|q| q.actions.contains(&action)) {
            let period = quest.period.key(day);
            let state = self.profile.quests.entry(quest.id.to_string()).or_default();
            if state.period != period {
                *state = QuestState {
                    period,
                    ..QuestState::default()
                };
            }
            if state.completed {
                continue;
            }
            state.progress = (state.progress + 1).min(quest.target);
            if state.progress < quest.target {
                continue;
            }
            state.completed = true;
            self.profile.points += quest.points;
            log::info!("quest complete: {}", quest.name);
            events.push(ProgressEvent::QuestCompleted {
                id: quest.id.to_string(),
                points: quest.points,
            });
            if let Some(badge) = quest.badge {
                events.extend(self.grant_badge(badge));
            }
        }
        events
    }

    fn gain_experience(&mut self, experience: u64) -> Vec<ProgressEvent> {
        let from = self.profile.level;
        self.profile.experience = self.profile.experience.saturating_add(experience);
        let to = level_for(self.profile.experience);
        self.profile.level = to;
        if to > from {
            let points = u64::from(to) * 100;
            self.profile.points += points;
            log::info!("level up {from} -> {to}");
            vec![ProgressEvent::LevelUp { from, to, points }]
        } else {
            Vec::new()
        }
    }

    fn grant(&mut self, id: &str) -> Option<ProgressEvent> {
        let achievement = achievement(id)?;
        if self.profile.has_achievement(id) {
            return None;
        }
        self.profile.achievements.push(id.to_string());
        self.profile.points += achievement.points;
        log::info!("achievement unlocked: {}", achievement.name);
        Some(ProgressEvent::AchievementUnlocked {
            id: id.to_string(),
            points: achievement.points,
        })
    }

    fn grant_badge(&mut self, id: &str) -> Option<ProgressEvent> {
        let badge = badge(id)?;
        if self.profile.has_badge(id) {
            return None;
        }
        self.profile.badges.push(id.to_string());
        log::info!("badge earned: {} {}", badge.icon, badge.name);
        Some(ProgressEvent::BadgeEarned { id: id.to_string() })
    }

    fn grant_reward(&mut self, action: RewardAction) -> ProgressEvent {
        let points = reward(action, self.profile.current_streak, self.profile.level, self.multiplier);
        self.profile.points += points;
        ProgressEvent::PointsAwarded { action, points }
    }
}
