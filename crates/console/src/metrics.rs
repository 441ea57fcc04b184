//! Derived metric views over the organization collection.
//!
//! Everything here is a pure fold over `&[Organization]`: no I/O, no caching,
//! no mutation of inputs. The views are recomputed from the current store
//! snapshot whenever it changes; they are never written to directly.

use chrono::{DateTime, Duration, Utc};
use console_models::{Organization, PlanTier};
use serde::Serialize;

/// Trailing window used for the "new organizations" count.
const NEW_ORGANIZATION_WINDOW_DAYS: i64 = 30;

/// Fixed, non-overlapping, inclusive membership-size buckets. The last bucket
/// is open-ended; a count below 1 lands in no bucket.
const SIZE_BUCKETS: [(&str, i64, Option<i64>); 5] = [
    ("1-5 members", 1, Some(5)),
    ("6-15 members", 6, Some(15)),
    ("16-30 members", 16, Some(30)),
    ("31-50 members", 31, Some(50)),
    ("51+ members", 51, None),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateMetrics {
    pub total_organizations: u64,
    /// Organizations whose subscription status is ACTIVE or TRIALING. An
    /// organization without a subscription is not active.
    pub active_organizations: u64,
    pub new_last_30_days: u64,
    pub total_members: i64,
    /// Mean membership per organization, rounded to the nearest integer.
    /// Zero when the store is empty.
    pub avg_members_per_org: i64,
    /// Estimated from the static plan price table; not billing truth.
    pub estimated_monthly_revenue_cents: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanBreakdownEntry {
    pub plan: PlanTier,
    pub organizations: u64,
    pub revenue_cents: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeBucket {
    pub label: &'static str,
    pub min_members: i64,
    pub max_members: Option<i64>,
    pub organizations: u64,
}

/// Plan assumed for an organization with no subscription record.
fn effective_plan(org: &Organization) -> PlanTier {
    org.subscription.map(|s| s.plan).unwrap_or(PlanTier::Free)
}

fn tier_index(plan: PlanTier) -> usize {
    match plan {
        PlanTier::Free => 0,
        PlanTier::Starter => 1,
        PlanTier::Professional => 2,
        PlanTier::Business => 3,
        PlanTier::Enterprise => 4,
    }
}

/// Aggregate counts over the current collection. `now` anchors the trailing
/// 30-day window so the fold stays deterministic.
pub fn aggregate(organizations: &[Organization], now: DateTime<Utc>) -> AggregateMetrics {
    let total = organizations.len() as u64;
    let cutoff = now - Duration::days(NEW_ORGANIZATION_WINDOW_DAYS);

    let active = organizations
        .iter()
        .filter(|org| org.subscription.map(|s| s.is_active()).unwrap_or(false))
        .count() as u64;

    let recent = organizations
        .iter()
        .filter(|org| org.created_at >= cutoff)
        .count() as u64;

    let total_members: i64 = organizations.iter().map(|org| org.member_count).sum();

    let avg_members_per_org = if organizations.is_empty() {
        0
    } else {
        (total_members as f64 / organizations.len() as f64).round() as i64
    };

    let estimated_monthly_revenue_cents = organizations
        .iter()
        .map(|org| effective_plan(org).monthly_list_price_cents())
        .sum();

    AggregateMetrics {
        total_organizations: total,
        active_organizations: active,
        new_last_30_days: recent,
        total_members,
        avg_members_per_org,
        estimated_monthly_revenue_cents,
    }
}

/// Count and revenue subtotal per plan observed in the collection, in tier
/// order. Plans with no organizations are omitted.
pub fn plan_breakdown(organizations: &[Organization]) -> Vec<PlanBreakdownEntry> {
    let mut counts = [0u64; PlanTier::ALL.len()];
    for org in organizations {
        counts[tier_index(effective_plan(org))] += 1;
    }

    PlanTier::ALL
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(plan, count)| PlanBreakdownEntry {
            plan: *plan,
            organizations: count,
            revenue_cents: plan.monthly_list_price_cents() * count as i64,
        })
        .collect()
}

/// Histogram of organizations by membership count. Always returns all five
/// buckets, zero-filled when empty.
pub fn size_histogram(organizations: &[Organization]) -> Vec<SizeBucket> {
    SIZE_BUCKETS
        .iter()
        .map(|&(label, min, max)| SizeBucket {
            label,
            min_members: min,
            max_members: max,
            organizations: organizations
                .iter()
                .filter(|org| {
                    org.member_count >= min && max.map_or(true, |m| org.member_count <= m)
                })
                .count() as u64,
        })
        .collect()
}
