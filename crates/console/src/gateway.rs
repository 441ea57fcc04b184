//! Seam between the coordinator and the admin API.
//!
//! [`OrganizationGateway`] is the trait the store is written against;
//! [`GraphqlGateway`] is the production implementation over the GraphQL
//! transport. Tests swap in an in-memory implementation.

use async_trait::async_trait;
use console_models::{
    CreateOrganization, OrgRole, Organization, OrganizationPage, OrganizationWithMembers,
    PageRequest, UpdateOrganization, UserSummary,
};
use console_transport::GraphqlClient;
use serde::Deserialize;
use serde_json::json;

use crate::error::Result;

#[async_trait]
pub trait OrganizationGateway: Send + Sync {
    /// One page of the organization list plus the backend total.
    async fn list_organizations(&self, page: &PageRequest) -> Result<OrganizationPage>;

    /// Single organization with its full membership list.
    async fn organization_with_members(&self, id: &str) -> Result<OrganizationWithMembers>;

    /// Free-text user search (name or email), capped at `limit` candidates.
    async fn search_users(&self, query: &str, limit: i64) -> Result<Vec<UserSummary>>;

    async fn create_organization(&self, input: &CreateOrganization) -> Result<Organization>;

    async fn update_organization(
        &self,
        id: &str,
        input: &UpdateOrganization,
    ) -> Result<Organization>;

    /// Returns whether the backend actually deleted a record.
    async fn delete_organization(&self, id: &str) -> Result<bool>;

    /// Returns the new membership id.
    async fn add_member(&self, organization_id: &str, user_id: &str, role: OrgRole)
        -> Result<String>;

    async fn remove_member(&self, organization_id: &str, user_id: &str) -> Result<bool>;

    async fn update_member_role(
        &self,
        organization_id: &str,
        user_id: &str,
        role: OrgRole,
    ) -> Result<bool>;
}

const ORGANIZATION_FIELDS: &str = r#"
      id
      name
      slug
      domain
      website
      logoUrl
      memberCount
      createdAt
      updatedAt
      subscription {
        plan
        status
      }"#;

const LIST_ORGANIZATIONS: &str = r#"
query ListOrganizations($limit: Int!, $offset: Int!, $sortField: String!, $sortOrder: SortOrder!) {
  organizations(limit: $limit, offset: $offset, sortField: $sortField, sortOrder: $sortOrder) {
    totalCount
    items {
      ...OrganizationFields
    }
  }
}"#;

const ORGANIZATION_WITH_MEMBERS: &str = r#"
query OrganizationWithMembers($id: ID!) {
  organization(id: $id) {
    ...OrganizationFields
    members {
      id
      role
      joinedAt
      user {
        id
        email
        firstName
        lastName
      }
    }
  }
}"#;

const SEARCH_USERS: &str = r#"
query SearchUsers($query: String!, $limit: Int!) {
  searchUsers(query: $query, limit: $limit) {
    id
    email
    firstName
    lastName
  }
}"#;

const CREATE_ORGANIZATION: &str = r#"
mutation CreateOrganization($input: CreateOrganizationInput!) {
  createOrganization(input: $input) {
    ...OrganizationFields
  }
}"#;

const UPDATE_ORGANIZATION: &str = r#"
mutation UpdateOrganization($id: ID!, $input: UpdateOrganizationInput!) {
  updateOrganization(id: $id, input: $input) {
    ...OrganizationFields
  }
}"#;

const DELETE_ORGANIZATION: &str = r#"
mutation DeleteOrganization($id: ID!) {
  deleteOrganization(id: $id)
}"#;

const ADD_MEMBER: &str = r#"
mutation AddOrganizationMember($organizationId: ID!, $userId: ID!, $role: OrgRole!) {
  addOrganizationMember(organizationId: $organizationId, userId: $userId, role: $role)
}"#;

const REMOVE_MEMBER: &str = r#"
mutation RemoveOrganizationMember($organizationId: ID!, $userId: ID!) {
  removeOrganizationMember(organizationId: $organizationId, userId: $userId)
}"#;

const UPDATE_MEMBER_ROLE: &str = r#"
mutation UpdateOrganizationMemberRole($organizationId: ID!, $userId: ID!, $role: OrgRole!) {
  updateOrganizationMemberRole(organizationId: $organizationId, userId: $userId, role: $role)
}"#;

/// Splices the shared organization field selection into a document.
fn with_fragment(document: &str) -> String {
    document.replace("...OrganizationFields", ORGANIZATION_FIELDS.trim_start())
}

// Per-operation response envelopes. GraphQL keys responses by field name, so
// each operation decodes through a one-field struct.

#[derive(Deserialize)]
struct OrganizationsData {
    organizations: OrganizationPage,
}

#[derive(Deserialize)]
struct OrganizationData {
    organization: OrganizationWithMembers,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchUsersData {
    search_users: Vec<UserSummary>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateOrganizationData {
    create_organization: Organization,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateOrganizationData {
    update_organization: Organization,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteOrganizationData {
    delete_organization: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddMemberData {
    add_organization_member: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoveMemberData {
    remove_organization_member: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateMemberRoleData {
    update_organization_member_role: bool,
}

/// Production gateway over the single GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct GraphqlGateway {
    client: GraphqlClient,
}

impl GraphqlGateway {
    pub fn new(client: GraphqlClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OrganizationGateway for GraphqlGateway {
    async fn list_organizations(&self, page: &PageRequest) -> Result<OrganizationPage> {
        let data = self
            .client
            .execute(
                &with_fragment(LIST_ORGANIZATIONS),
                json!({
                    "limit": page.limit,
                    "offset": page.offset,
                    "sortField": page.sort_field,
                    "sortOrder": page.sort_order,
                }),
            )
            .await?;
        let payload: OrganizationsData = serde_json::from_value(data)?;
        Ok(payload.organizations)
    }

    async fn organization_with_members(&self, id: &str) -> Result<OrganizationWithMembers> {
        let data = self
            .client
            .execute(&with_fragment(ORGANIZATION_WITH_MEMBERS), json!({ "id": id }))
            .await?;
        let payload: OrganizationData = serde_json::from_value(data)?;
        Ok(payload.organization)
    }

    async fn search_users(&self, query: &str, limit: i64) -> Result<Vec<UserSummary>> {
        let data = self
            .client
            .execute(SEARCH_USERS, json!({ "query": query, "limit": limit }))
            .await?;
        let payload: SearchUsersData = serde_json::from_value(data)?;
        Ok(payload.search_users)
    }

    async fn create_organization(&self, input: &CreateOrganization) -> Result<Organization> {
        let data = self
            .client
            .execute(&with_fragment(CREATE_ORGANIZATION), json!({ "input": input }))
            .await?;
        let payload: CreateOrganizationData = serde_json::from_value(data)?;
        Ok(payload.create_organization)
    }

    async fn update_organization(
        &self,
        id: &str,
        input: &UpdateOrganization,
    ) -> Result<Organization> {
        let data = self
            .client
            .execute(
                &with_fragment(UPDATE_ORGANIZATION),
                json!({ "id": id, "input": input }),
            )
            .await?;
        let payload: UpdateOrganizationData = serde_json::from_value(data)?;
        Ok(payload.update_organization)
    }

    async fn delete_organization(&self, id: &str) -> Result<bool> {
        let data = self
            .client
            .execute(DELETE_ORGANIZATION, json!({ "id": id }))
            .await?;
        let payload: DeleteOrganizationData = serde_json::from_value(data)?;
        Ok(payload.delete_organization)
    }

    async fn add_member(
        &self,
        organization_id: &str,
        user_id: &str,
        role: OrgRole,
    ) -> Result<String> {
        let data = self
            .client
            .execute(
                ADD_MEMBER,
                json!({
                    "organizationId": organization_id,
                    "userId": user_id,
                    "role": role,
                }),
            )
            .await?;
        let payload: AddMemberData = serde_json::from_value(data)?;
        Ok(payload.add_organization_member)
    }

    async fn remove_member(&self, organization_id: &str, user_id: &str) -> Result<bool> {
        let data = self
            .client
            .execute(
                REMOVE_MEMBER,
                json!({ "organizationId": organization_id, "userId": user_id }),
            )
            .await?;
        let payload: RemoveMemberData = serde_json::from_value(data)?;
        Ok(payload.remove_organization_member)
    }

    async fn update_member_role(
        &self,
        organization_id: &str,
        user_id: &str,
        role: OrgRole,
    ) -> Result<bool> {
        let data = self
            .client
            .execute(
                UPDATE_MEMBER_ROLE,
                json!({
                    "organizationId": organization_id,
                    "userId": user_id,
                    "role": role,
                }),
            )
            .await?;
        let payload: UpdateMemberRoleData = serde_json::from_value(data)?;
        Ok(payload.update_organization_member_role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use console_models::{PlanTier, SubscriptionStatus};

    #[test]
    fn fragment_splice_leaves_no_placeholder() {
        for document in [
            LIST_ORGANIZATIONS,
            ORGANIZATION_WITH_MEMBERS,
            CREATE_ORGANIZATION,
            UPDATE_ORGANIZATION,
        ] {
            let spliced = with_fragment(document);
            assert!(!spliced.contains("...OrganizationFields"));
            assert!(spliced.contains("memberCount"));
        }
    }

    #[test]
    fn list_envelope_decodes() {
        let data = json!({
            "organizations": {
                "totalCount": 2,
                "items": [{
                    "id": "org-1",
                    "name": "Acme",
                    "slug": "acme",
                    "domain": "acme.io",
                    "website": null,
                    "logoUrl": null,
                    "memberCount": 12,
                    "createdAt": "2026-03-01T00:00:00Z",
                    "updatedAt": "2026-03-02T00:00:00Z",
                    "subscription": { "plan": "BUSINESS", "status": "TRIALING" }
                }]
            }
        });
        let payload: OrganizationsData = serde_json::from_value(data).unwrap();
        assert_eq!(payload.organizations.total_count, 2);
        let org = &payload.organizations.items[0];
        assert_eq!(org.subscription.unwrap().plan, PlanTier::Business);
        assert_eq!(
            org.subscription.unwrap().status,
            SubscriptionStatus::Trialing
        );
    }

    #[test]
    fn detail_envelope_decodes_members() {
        let data = json!({
            "organization": {
                "id": "org-1",
                "name": "Acme",
                "slug": "acme",
                "domain": null,
                "website": null,
                "logoUrl": null,
                "memberCount": 1,
                "createdAt": "2026-03-01T00:00:00Z",
                "updatedAt": "2026-03-01T00:00:00Z",
                "subscription": null,
                "members": [{
                    "id": "m-1",
                    "role": "OWNER",
                    "joinedAt": "2026-03-01T00:00:00Z",
                    "user": {
                        "id": "u-1",
                        "email": "owner@acme.io",
                        "firstName": "Ada",
                        "lastName": "Owner"
                    }
                }]
            }
        });
        let payload: OrganizationData = serde_json::from_value(data).unwrap();
        assert_eq!(payload.organization.organization.id, "org-1");
        assert_eq!(payload.organization.members.len(), 1);
        assert_eq!(payload.organization.members[0].role, OrgRole::Owner);
    }

    #[test]
    fn scalar_envelopes_decode() {
        let deleted: DeleteOrganizationData =
            serde_json::from_value(json!({ "deleteOrganization": true })).unwrap();
        assert!(deleted.delete_organization);

        let added: AddMemberData =
            serde_json::from_value(json!({ "addOrganizationMember": "m-42" })).unwrap();
        assert_eq!(added.add_organization_member, "m-42");
    }
}
