//! Effort scoring: a four-category checklist plus a tiered collaboration
//! bonus, producing the point total that is split among assignees.

use serde::{Deserialize, Serialize};

/// Cap on any single category's raw sum.
pub const MAX_PER_CATEGORY: i32 = 3;
/// Highest possible base effort (four capped categories).
pub const MAX_BASE: i32 = 4 * MAX_PER_CATEGORY;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Development {
    pub version_control: bool,
    pub external_service: bool,
    pub internal_integration: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Security {
    pub legal_compliance: bool,
    pub access_control: bool,
    pub personal_data: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataWork {
    pub migration: bool,
    pub data_preparation: bool,
    pub encryption: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Operations {
    pub off_hours: bool,
    pub training: bool,
    pub uat: bool,
}

/// The effort checklist. Absent categories count as unchecked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EffortInput {
    pub development: Development,
    pub security: Security,
    pub data: DataWork,
    pub operations: Operations,
}

fn category(items: [bool; 3]) -> i32 {
    let raw = items.into_iter().filter(|b| *b).count() as i32;
    raw.min(MAX_PER_CATEGORY)
}

/// Base effort in `0..=12`.
pub fn compute_base(input: &EffortInput) -> i32 {
    let d = &input.development;
    let s = &input.security;
    let x = &input.data;
    let o = &input.operations;
    category([d.version_control, d.external_service, d.internal_integration])
        + category([s.legal_compliance, s.access_control, s.personal_data])
        + category([x.migration, x.data_preparation, x.encryption])
        + category([o.off_hours, o.training, o.uat])
}

/// Flat per-head bonus by team size.
///
/// | assignees | bonus |
/// |---|---|
/// | 1 | 0 |
/// | 2 | 2 |
/// | 3-4 | 4 |
/// | 5-6 | 6 |
/// | 7+ | 8 |
///
/// Counts of zero or less are looked up as 1.
pub fn collaboration_extra_per_person(assignee_count: i64) -> i32 {
    match assignee_count.max(1) {
        1 => 0,
        2 => 2,
        3..=4 => 4,
        5..=6 => 6,
        _ => 8,
    }
}

/// `base + bonus * n`, so that an even split yields `base / n + bonus` each.
pub fn total_points_for_distribution(input: &EffortInput, assignee_count: i64) -> f64 {
    let n = assignee_count.max(1);
    let base = compute_base(input);
    let extra = collaboration_extra_per_person(n);
    f64::from(base) + f64::from(extra) * n as f64
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffortBreakdown {
    pub base: i32,
    pub bonus_per_person: i32,
    pub total_for_distribution: f64,
    pub per_person: f64,
}

/// Full breakdown for a checklist and team size.
pub fn assess(input: &EffortInput, assignee_count: i64) -> EffortBreakdown {
    let n = assignee_count.max(1);
    let total = total_points_for_distribution(input, n);
    EffortBreakdown {
        base: compute_base(input),
        bonus_per_person: collaboration_extra_per_person(n),
        total_for_distribution: total,
        per_person: total / n as f64,
    }
}
