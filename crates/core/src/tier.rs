//! Tier names, benefits and progress.

use serde::Serialize;

use crate::points::{MAX_TIER, POINTS_PER_TIER, tier_for_points};

/// The five Brownie Point tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Tier 1.
    DragonEgg,
    /// Tier 2.
    YoungDragon,
    /// Tier 3.
    MountainDragon,
    /// Tier 4.
    ThunderDragon,
    /// Tier 5.
    CelestialDragon,
}

impl Tier {
    /// Maps a stored tier level to a tier. Levels outside 1..=5 are clamped.
    #[must_use]
    pub const fn from_level(level: i32) -> Self {
        match level {
            i32::MIN..=1 => Self::DragonEgg,
            2 => Self::YoungDragon,
            3 => Self::MountainDragon,
            4 => Self::ThunderDragon,
            _ => Self::CelestialDragon,
        }
    }

    /// Numeric level, 1 through 5.
    #[must_use]
    pub const fn level(self) -> i32 {
        match self {
            Self::DragonEgg => 1,
            Self::YoungDragon => 2,
            Self::MountainDragon => 3,
            Self::ThunderDragon => 4,
            Self::CelestialDragon => 5,
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::DragonEgg => "Dragon Egg",
            Self::YoungDragon => "Young Dragon",
            Self::MountainDragon => "Mountain Dragon",
            Self::ThunderDragon => "Thunder Dragon",
            Self::CelestialDragon => "Celestial Dragon",
        }
    }

    /// Benefits unlocked at this tier.
    #[must_use]
    pub const fn benefits(self) -> &'static [&'static str] {
        match self {
            Self::DragonEgg => &["Basic marketplace access", "Cultural quiz participation"],
            Self::YoungDragon => &["Priority job applications", "10% marketplace discount"],
            Self::MountainDragon => &[
                "Government service priority",
                "15% marketplace discount",
                "Exclusive cultural content",
            ],
            Self::ThunderDragon => &[
                "Premium mini-apps access",
                "20% marketplace discount",
                "Business fast-track approval",
            ],
            Self::CelestialDragon => &[
                "VIP support",
                "25% marketplace discount",
                "Early access to new features",
                "Cultural ambassador status",
            ],
        }
    }
}

/// Where a balance sits on the tier ladder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierSummary {
    /// Cumulative points.
    pub brownie_points: i32,
    /// Tier level (1-5).
    pub tier_level: i32,
    /// Tier display name.
    pub tier_name: &'static str,
    /// Benefits of the current tier.
    pub benefits: &'static [&'static str],
    /// Progress through the current tier, 0-100.
    pub progress_percent: i32,
    /// Points still needed to reach the next tier; `None` at the top tier.
    pub points_to_next_tier: Option<i32>,
}

impl TierSummary {
    /// Summarises a balance.
    #[must_use]
    pub fn for_points(brownie_points: i32) -> Self {
        let points = brownie_points.max(0);
        let tier_level = tier_for_points(points);
        let tier = Tier::from_level(tier_level);

        let (progress_percent, points_to_next_tier) = if tier_level >= MAX_TIER {
            (100, None)
        } else {
            (
                (points % POINTS_PER_TIER) / 10,
                Some(tier_level * POINTS_PER_TIER - points),
            )
        };

        Self {
            brownie_points: points,
            tier_level,
            tier_name: tier.name(),
            benefits: tier.benefits(),
            progress_percent,
            points_to_next_tier,
        }
    }
}
