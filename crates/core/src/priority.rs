//! Priority scoring: red flags, impact checklist and urgency timeline mapped
//! to a 0..=10 score and a P0..P3 band.
//!
//! Pure and total. Missing fields deserialize to `false` / empty and
//! contribute nothing; unknown urgency strings contribute 0.

use serde::{Deserialize, Serialize};

use crate::ticket::Priority;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Points per checked impact item.
pub const IMPACT_POINTS_PER_ITEM: i32 = 2;
/// Cap on the summed impact checklist.
pub const MAX_IMPACT: i32 = 6;
/// Highest urgency contribution.
pub const MAX_URGENCY: i32 = 4;
/// Cap on the final score; also the score any red flag forces.
pub const MAX_FINAL: i32 = 10;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RedFlags {
    pub outage: bool,
    pub payments_failing: bool,
    pub security_breach: bool,
    pub non_compliance: bool,
}

impl RedFlags {
    pub fn any(&self) -> bool {
        self.outage || self.payments_failing || self.security_breach || self.non_compliance
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImpactChecklist {
    pub lost_revenue: bool,
    pub core_processes: bool,
    pub data_loss: bool,
}

impl ImpactChecklist {
    pub fn score(&self) -> i32 {
        let checked = [self.lost_revenue, self.core_processes, self.data_loss]
            .into_iter()
            .filter(|b| *b)
            .count() as i32;
        (checked * IMPACT_POINTS_PER_ITEM).min(MAX_IMPACT)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PriorityInput {
    pub red_flags: RedFlags,
    pub impact: ImpactChecklist,
    /// One of `≤48h`, `3-7d`, `8-30d`, `≥31d` (ASCII `<=48h` / `>=31d` also
    /// accepted). Anything else scores 0.
    pub urgency: String,
}

/// Urgency contribution for a timeline string.
pub fn urgency_score(timeline: &str) -> i32 {
    match timeline.trim() {
        "≤48h" | "<=48h" => MAX_URGENCY,
        "3-7d" => 3,
        "8-30d" => 2,
        "≥31d" | ">=31d" => 1,
        _ => 0,
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityOutput {
    pub impact: i32,
    pub urgency: i32,
    #[serde(rename = "final")]
    pub final_score: i32,
    pub red_flag: bool,
    pub priority: Priority,
}

/// Band for a final score.
pub fn band(final_score: i32) -> Priority {
    match final_score {
        s if s >= MAX_FINAL => Priority::P0,
        8..=9 => Priority::P1,
        5..=7 => Priority::P2,
        _ => Priority::P3,
    }
}

/// Score a questionnaire.
///
/// Any red flag short-circuits: `final = 10`, `impact = urgency = 0`, `P0`.
pub fn compute(input: &PriorityInput) -> PriorityOutput {
    if input.red_flags.any() {
        return PriorityOutput {
            impact: 0,
            urgency: 0,
            final_score: MAX_FINAL,
            red_flag: true,
            priority: Priority::P0,
        };
    }

    let impact = input.impact.score();
    let urgency = urgency_score(&input.urgency);
    let final_score = (impact + urgency).min(MAX_FINAL);

    PriorityOutput {
        impact,
        urgency,
        final_score,
        red_flag: false,
        priority: band(final_score),
    }
}

/// Rebuild the questionnaire from the three raw blobs persisted on a ticket.
///
/// Blobs that are absent or do not parse are treated as empty, so a
/// recompute never fails. The urgency blob may be a bare string or an object
/// with a `timeline` key.
pub fn input_from_blobs(
    red_flags: Option<&serde_json::Value>,
    impact: Option<&serde_json::Value>,
    urgency: Option<&serde_json::Value>,
) -> PriorityInput {
    let red_flags = red_flags
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .unwrap_or_default();
    let impact = impact
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .unwrap_or_default();
    let urgency = match urgency {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Object(map)) => map
            .get("timeline")
            .and_then(|t| t.as_str())
            .unwrap_or_default()
            .to_string(),
        _ => String::new(),
    };

    PriorityInput {
        red_flags,
        impact,
        urgency,
    }
}
