//! Marketplace reward rules.

/// Badge text shown on a product that grants Brownie Points on purchase.
///
/// Products with no reward carry no badge.
#[must_use]
pub fn reward_badge(brownie_points_reward: i32) -> Option<String> {
    (brownie_points_reward > 0).then(|| format!("+{brownie_points_reward} Points"))
}
