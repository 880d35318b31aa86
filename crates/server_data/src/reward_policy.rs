//! Point amounts for reward earning events.

use std::sync::Arc;

use config::file::{CollectRewardMode, RewardPolicyConfig};
use rand::Rng;

pub const LEGACY_COLLECT_POINTS_MIN: i64 = 10;
pub const LEGACY_COLLECT_POINTS_MAX: i64 = 59;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardEvent {
    ReportSubmitted,
    WasteCollected,
}

pub trait RewardPolicy: Send + Sync + 'static {
    fn points(&self, event: RewardEvent) -> i64;
}

#[derive(Debug, Clone, Copy)]
pub struct FixedRewardPolicy {
    pub report_points: i64,
    pub collect_points: i64,
}

impl Default for FixedRewardPolicy {
    fn default() -> Self {
        Self {
            report_points: 10,
            collect_points: 30,
        }
    }
}

impl RewardPolicy for FixedRewardPolicy {
    fn points(&self, event: RewardEvent) -> i64 {
        match event {
            RewardEvent::ReportSubmitted => self.report_points,
            RewardEvent::WasteCollected => self.collect_points,
        }
    }
}

/// Collection reward is a uniformly random value from
/// [LEGACY_COLLECT_POINTS_MIN, LEGACY_COLLECT_POINTS_MAX].
#[derive(Debug, Clone, Copy)]
pub struct LegacyRandomRewardPolicy {
    pub report_points: i64,
}

impl RewardPolicy for LegacyRandomRewardPolicy {
    fn points(&self, event: RewardEvent) -> i64 {
        match event {
            RewardEvent::ReportSubmitted => self.report_points,
            RewardEvent::WasteCollected => rand::thread_rng()
                .gen_range(LEGACY_COLLECT_POINTS_MIN..=LEGACY_COLLECT_POINTS_MAX),
        }
    }
}

pub fn reward_policy_from_config(config: &RewardPolicyConfig) -> Arc<dyn RewardPolicy> {
    match config.collect_mode {
        CollectRewardMode::Fixed => Arc::new(FixedRewardPolicy {
            report_points: config.report_points,
            collect_points: config.collect_points,
        }),
        CollectRewardMode::LegacyRandom => Arc::new(LegacyRandomRewardPolicy {
            report_points: config.report_points,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_policy_from_default_config() {
        let policy = reward_policy_from_config(&RewardPolicyConfig::default());
        assert_eq!(policy.points(RewardEvent::ReportSubmitted), 10);
        assert_eq!(policy.points(RewardEvent::WasteCollected), 30);
    }

    #[test]
    fn legacy_random_policy_stays_in_range() {
        let policy = LegacyRandomRewardPolicy { report_points: 10 };
        assert_eq!(policy.points(RewardEvent::ReportSubmitted), 10);
        for _ in 0..500 {
            let points = policy.points(RewardEvent::WasteCollected);
            assert!((LEGACY_COLLECT_POINTS_MIN..=LEGACY_COLLECT_POINTS_MAX).contains(&points));
        }
    }
}
