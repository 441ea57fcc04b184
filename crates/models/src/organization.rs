use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::member::OrganizationMember;

/// Organization (tenant) as returned by the admin API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub domain: Option<String>,
    pub website: Option<String>,
    pub logo_url: Option<String>,

    pub subscription: Option<Subscription>,

    /// Denormalized member count. Membership mutations do not patch this
    /// field locally; it is stale until the next full fetch.
    #[serde(default)]
    pub member_count: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Subscription sub-object attached to an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub plan: PlanTier,
    pub status: SubscriptionStatus,
}

impl Subscription {
    pub fn is_active(&self) -> bool {
        matches!(
            self.status,
            SubscriptionStatus::Active | SubscriptionStatus::Trialing
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanTier {
    Free,
    Starter,
    Professional,
    Business,
    Enterprise,
}

impl PlanTier {
    /// All tiers in ascending price order.
    pub const ALL: [PlanTier; 5] = [
        PlanTier::Free,
        PlanTier::Starter,
        PlanTier::Professional,
        PlanTier::Business,
        PlanTier::Enterprise,
    ];

    /// Assumed monthly list price in cents, used only for revenue estimates.
    /// Per-organization negotiated pricing is not reflected here, so derived
    /// revenue figures are approximations, not billing truth.
    pub const fn monthly_list_price_cents(self) -> i64 {
        match self {
            PlanTier::Free => 0,
            PlanTier::Starter => 2_900,
            PlanTier::Professional => 9_900,
            PlanTier::Business => 29_900,
            PlanTier::Enterprise => 99_900,
        }
    }
}

impl std::fmt::Display for PlanTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Free => write!(f, "FREE"),
            Self::Starter => write!(f, "STARTER"),
            Self::Professional => write!(f, "PROFESSIONAL"),
            Self::Business => write!(f, "BUSINESS"),
            Self::Enterprise => write!(f, "ENTERPRISE"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionStatus {
    Active,
    Trialing,
    PastDue,
    Cancelled,
    Paused,
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "ACTIVE"),
            Self::Trialing => write!(f, "TRIALING"),
            Self::PastDue => write!(f, "PAST_DUE"),
            Self::Cancelled => write!(f, "CANCELLED"),
            Self::Paused => write!(f, "PAUSED"),
        }
    }
}

/// Create new organization request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrganization {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    pub domain: Option<String>,

    #[validate(url)]
    pub website: Option<String>,
}

/// Partial update request; fields left as `None` are not sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrganization {
    #[validate(length(min = 1, max = 255))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    #[validate(url)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

impl UpdateOrganization {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.domain.is_none()
            && self.website.is_none()
            && self.logo_url.is_none()
    }
}

/// Single organization with its full membership list, fetched on demand for
/// the member-management view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationWithMembers {
    #[serde(flatten)]
    pub organization: Organization,

    #[serde(default)]
    pub members: Vec<OrganizationMember>,
}
