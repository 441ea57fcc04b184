//! Entity store and mutation coordinator.
//!
//! [`OrganizationStore`] owns the canonical in-memory organization collection
//! and is the only writer to it. The gateway is constructor-injected and the
//! store's lifetime is tied to its owner; there is no module-level state.
//!
//! Reconciliation contract: a mutation either resolves with the store already
//! patched, or returns an error with the store untouched. Membership
//! mutations deliberately leave the denormalized `member_count` alone (note
//! the `&self` receivers); the count is stale until the next [`fetch_all`]
//! or [`open_members`] call. Rapid independent mutations are not queued or
//! coalesced, so the last successful response wins.
//!
//! [`fetch_all`]: OrganizationStore::fetch_all
//! [`open_members`]: OrganizationStore::open_members

use chrono::Utc;
use console_models::{
    CreateOrganization, OrgRole, Organization, OrganizationWithMembers, PageRequest,
    UpdateOrganization, UserSummary,
};
use tracing::{info, warn};
use validator::Validate;

use crate::error::{ConsoleError, Result};
use crate::gateway::OrganizationGateway;
use crate::metrics::{self, AggregateMetrics, PlanBreakdownEntry, SizeBucket};

/// The dashboard loads up to one page of this size; beyond that the backend
/// total still reflects the real count.
pub const LIST_PAGE_SIZE: i64 = 500;

const USER_SEARCH_LIMIT: i64 = 10;

pub struct OrganizationStore<G> {
    gateway: G,
    organizations: Vec<Organization>,
}

impl<G: OrganizationGateway> OrganizationStore<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            organizations: Vec::new(),
        }
    }

    /// Current collection, newest first after a fetch. Read-only: all writes
    /// go through the coordinator operations below.
    pub fn organizations(&self) -> &[Organization] {
        &self.organizations
    }

    pub fn find(&self, id: &str) -> Option<&Organization> {
        self.organizations.iter().find(|org| org.id == id)
    }

    // ------------------------------------------------------------------
    // Fetch & refresh
    // ------------------------------------------------------------------

    /// Load the organization list, replacing the whole collection atomically.
    /// On failure the existing collection is left untouched. Zero rows is a
    /// valid result, not an error.
    pub async fn fetch_all(&mut self) -> Result<()> {
        let page = self
            .gateway
            .list_organizations(&PageRequest::newest_first(LIST_PAGE_SIZE))
            .await?;

        info!(
            total = page.total_count,
            fetched = page.items.len(),
            "organization list loaded"
        );
        self.organizations = page.items;
        Ok(())
    }

    /// `fetch_all` re-invoked: the only path that can shrink or reorder the
    /// collection.
    pub async fn refresh(&mut self) -> Result<()> {
        self.fetch_all().await
    }

    // ------------------------------------------------------------------
    // Derived views
    // ------------------------------------------------------------------

    pub fn metrics(&self) -> AggregateMetrics {
        metrics::aggregate(&self.organizations, Utc::now())
    }

    pub fn plan_breakdown(&self) -> Vec<PlanBreakdownEntry> {
        metrics::plan_breakdown(&self.organizations)
    }

    pub fn size_histogram(&self) -> Vec<SizeBucket> {
        metrics::size_histogram(&self.organizations)
    }

    // ------------------------------------------------------------------
    // Organization mutations
    // ------------------------------------------------------------------

    /// Create an organization and append the returned record to the store.
    pub async fn create(&mut self, input: CreateOrganization) -> Result<Organization> {
        if input.name.trim().is_empty() {
            return Err(ConsoleError::InvalidInput(
                "Organization name is required".to_string(),
            ));
        }
        input.validate()?;

        let created = self.gateway.create_organization(&input).await?;
        info!(organization_id = %created.id, name = %created.name, "organization created");

        self.organizations.push(created.clone());
        Ok(created)
    }

    /// Update an organization and replace the matching record in place.
    pub async fn update(&mut self, id: &str, input: UpdateOrganization) -> Result<Organization> {
        if id.trim().is_empty() {
            return Err(ConsoleError::InvalidInput(
                "Organization id is required".to_string(),
            ));
        }
        if input.is_empty() {
            return Err(ConsoleError::InvalidInput(
                "Update payload is empty".to_string(),
            ));
        }
        input.validate()?;

        let updated = self.gateway.update_organization(id, &input).await?;

        match self
            .organizations
            .iter_mut()
            .find(|org| org.id == updated.id)
        {
            Some(slot) => *slot = updated.clone(),
            // The record can be absent locally (created after our last
            // fetch); the next refresh picks it up.
            None => warn!(organization_id = %updated.id, "updated organization not in store"),
        }

        info!(organization_id = %updated.id, "organization updated");
        Ok(updated)
    }

    /// Delete an organization and remove it from the store. Intent
    /// confirmation is the caller's concern.
    pub async fn delete(&mut self, id: &str) -> Result<()> {
        if id.trim().is_empty() {
            return Err(ConsoleError::InvalidInput(
                "Organization id is required".to_string(),
            ));
        }

        let deleted = self.gateway.delete_organization(id).await?;
        if !deleted {
            return Err(ConsoleError::NotFound(format!(
                "Organization not found: {id}"
            )));
        }

        self.organizations.retain(|org| org.id != id);
        info!(organization_id = %id, "organization deleted");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Membership mutations
    //
    // None of these patch the cached member_count; the stale count is an
    // explicit contract, resolved by the next fetch_all or open_members.
    // ------------------------------------------------------------------

    /// Add a user to an organization. Returns the new membership id.
    pub async fn add_member(
        &self,
        organization_id: &str,
        user_id: &str,
        role: Option<OrgRole>,
    ) -> Result<String> {
        require_ids(organization_id, user_id)?;

        let role = role.unwrap_or_default();
        let membership_id = self
            .gateway
            .add_member(organization_id, user_id, role)
            .await?;

        info!(organization_id, user_id, role = %role, "member added");
        Ok(membership_id)
    }

    pub async fn remove_member(&self, organization_id: &str, user_id: &str) -> Result<()> {
        require_ids(organization_id, user_id)?;

        let removed = self.gateway.remove_member(organization_id, user_id).await?;
        if !removed {
            return Err(ConsoleError::NotFound("Membership not found".to_string()));
        }

        info!(organization_id, user_id, "member removed");
        Ok(())
    }

    pub async fn update_member_role(
        &self,
        organization_id: &str,
        user_id: &str,
        role: OrgRole,
    ) -> Result<()> {
        require_ids(organization_id, user_id)?;

        let updated = self
            .gateway
            .update_member_role(organization_id, user_id, role)
            .await?;
        if !updated {
            return Err(ConsoleError::NotFound("Membership not found".to_string()));
        }

        info!(organization_id, user_id, role = %role, "member role updated");
        Ok(())
    }

    // ------------------------------------------------------------------
    // On-demand reads
    // ------------------------------------------------------------------

    /// Fresh fetch of one organization with its full member list. Member
    /// state is never cached; every open re-fetches.
    pub async fn open_members(&self, organization_id: &str) -> Result<OrganizationWithMembers> {
        if organization_id.trim().is_empty() {
            return Err(ConsoleError::InvalidInput(
                "Organization id is required".to_string(),
            ));
        }
        self.gateway.organization_with_members(organization_id).await
    }

    /// Free-text user search for the add-member flow. A blank query returns
    /// no candidates without touching the network.
    pub async fn search_users(&self, query: &str) -> Result<Vec<UserSummary>> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }
        self.gateway.search_users(trimmed, USER_SEARCH_LIMIT).await
    }
}

fn require_ids(organization_id: &str, user_id: &str) -> Result<()> {
    if organization_id.trim().is_empty() {
        return Err(ConsoleError::InvalidInput(
            "Organization id is required".to_string(),
        ));
    }
    if user_id.trim().is_empty() {
        return Err(ConsoleError::InvalidInput("User id is required".to_string()));
    }
    Ok(())
}
