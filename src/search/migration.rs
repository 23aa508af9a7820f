//! Versioned upgrades for saved searches
//!
//! Each entry rewrites conditions of one kind saved at `from_version`. They
//! run once, when a spec is loaded, through `SearchSpec::update`.

use super::condition::{ConditionKind, SearchCondition};

/// Version written into saved searches
pub const CURRENT_VERSION: u32 = 1;

/// One upgrade step
pub struct Migration {
    pub from_version: u32,
    pub kind: ConditionKind,
    pub apply: fn(&mut SearchCondition),
}

/// Upgrade steps in version order
pub const MIGRATIONS: &[Migration] = &[Migration {
    from_version: 0,
    kind: ConditionKind::ProbabilityOrder,
    apply: probability_order_became_limit,
}];

/// Version 0 Probability Order meant what Limit by Probability Order means now
fn probability_order_became_limit(condition: &mut SearchCondition) {
    condition.kind = ConditionKind::LimitByProbabilityOrder;
    condition.legacy = true;
}
