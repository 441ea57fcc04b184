// Domain models shared by the admin console core.

pub mod member;
pub mod organization;
pub mod page;

// Re-export commonly used types
pub use member::{OrgRole, OrganizationMember, UserSummary};
pub use organization::{
    CreateOrganization, Organization, OrganizationWithMembers, PlanTier, Subscription,
    SubscriptionStatus, UpdateOrganization,
};
pub use page::{OrganizationPage, PageRequest, SortOrder};
