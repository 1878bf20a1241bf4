use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::language::Language;

/// Account lifecycle state. Accounts are provisioned PENDING and activated
/// out of band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Pending,
    Active,
    Inactive,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "PENDING",
            Status::Active => "ACTIVE",
            Status::Inactive => "INACTIVE",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Some(Status::Pending),
            "ACTIVE" => Some(Status::Active),
            "INACTIVE" => Some(Status::Inactive),
            _ => None,
        }
    }
}

/// Role names known to the platform. GOD is the single super-privileged
/// role; it cannot be granted through the create or role-edit paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleName {
    God,
    Scholar,
    Student,
}

impl RoleName {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::God => "GOD",
            RoleName::Scholar => "SCHOLAR",
            RoleName::Student => "STUDENT",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GOD" => Some(RoleName::God),
            "SCHOLAR" => Some(RoleName::Scholar),
            "STUDENT" => Some(RoleName::Student),
            _ => None,
        }
    }
}

/// Core identity entity, referenced by every authorization decision.
///
/// `salt` and `password_hash` are only ever compared, never serialized;
/// DTO conversion strips them. A user with no salt is mis-provisioned and
/// cannot log in.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub status: Status,
    pub language: Language,
    pub salt: Option<String>,
    pub password_hash: Option<String>,
    pub roles: Vec<RoleName>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn has_role(&self, role: RoleName) -> bool {
        self.roles.contains(&role)
    }

    /// Role names in the string form used by the token `groups` claim.
    pub fn roles_as_strings(&self) -> Vec<String> {
        self.roles.iter().map(|r| r.as_str().to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_name_round_trip() {
        for role in [RoleName::God, RoleName::Scholar, RoleName::Student] {
            assert_eq!(RoleName::from_str(role.as_str()), Some(role));
        }
    }

    #[test]
    fn test_role_name_wire_form() {
        assert_eq!(serde_json::to_string(&RoleName::God).unwrap(), "\"GOD\"");
        let role: RoleName = serde_json::from_str("\"SCHOLAR\"").unwrap();
        assert_eq!(role, RoleName::Scholar);
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        assert_eq!(RoleName::from_str("TITAN"), None);
        assert!(serde_json::from_str::<RoleName>("\"TITAN\"").is_err());
    }

    #[test]
    fn test_roles_as_strings() {
        let user = User {
            id: 1,
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            status: Status::Active,
            language: Language::DEFAULT,
            salt: None,
            password_hash: None,
            roles: vec![RoleName::Scholar, RoleName::Student],
            created_at: Utc::now(),
        };
        assert_eq!(user.roles_as_strings(), vec!["SCHOLAR", "STUDENT"]);
        assert!(user.has_role(RoleName::Scholar));
        assert!(!user.has_role(RoleName::God));
    }
}
