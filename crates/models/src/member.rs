use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Organization-scoped role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrgRole {
    Owner,
    Admin,
    #[default]
    Member,
}

impl std::fmt::Display for OrgRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Owner => write!(f, "OWNER"),
            Self::Admin => write!(f, "ADMIN"),
            Self::Member => write!(f, "MEMBER"),
        }
    }
}

/// Minimal user projection used for member rows and user search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl UserSummary {
    /// "First Last" when available, falling back to the email address.
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.clone(),
            (None, Some(last)) => last.clone(),
            (None, None) => self.email.clone(),
        }
    }
}

/// Membership row, scoped to one organization and fetched on demand.
/// Never cached globally; every member view opens with a fresh fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationMember {
    pub id: String,
    pub user: UserSummary,
    pub role: OrgRole,
    pub joined_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_role_is_member() {
        assert_eq!(OrgRole::default(), OrgRole::Member);
    }

    #[test]
    fn role_wire_names() {
        assert_eq!(
            serde_json::to_value(OrgRole::Owner).unwrap(),
            serde_json::Value::String("OWNER".into())
        );
        let role: OrgRole = serde_json::from_str("\"ADMIN\"").unwrap();
        assert_eq!(role, OrgRole::Admin);
    }

    #[test]
    fn display_name_falls_back_to_email() {
        let mut user = UserSummary {
            id: "u-1".into(),
            email: "jo@example.com".into(),
            first_name: None,
            last_name: None,
        };
        assert_eq!(user.display_name(), "jo@example.com");

        user.first_name = Some("Jo".into());
        user.last_name = Some("Diaz".into());
        assert_eq!(user.display_name(), "Jo Diaz");
    }

    #[test]
    fn member_decodes_with_nested_user() {
        let json = serde_json::json!({
            "id": "m-1",
            "user": {
                "id": "u-1",
                "email": "jo@example.com",
                "firstName": "Jo",
                "lastName": null
            },
            "role": "MEMBER",
            "joinedAt": "2026-02-01T09:30:00Z"
        });
        let member: OrganizationMember = serde_json::from_value(json).unwrap();
        assert_eq!(member.user.id, "u-1");
        assert_eq!(member.role, OrgRole::Member);
    }
}
