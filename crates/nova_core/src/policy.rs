//! Role-based write gating.
//!
//! The original scattered `rol === 'admin'` checks through UI components;
//! here the capability check is one function consulted by the mutating entry
//! points. Reads are public and never gated.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Captain,
    Visitor,
}

/// An authenticated user as seen by the core. Captains carry the team whose
/// roster they manage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
}

impl User {
    pub fn admin(name: impl Into<String>) -> Self {
        Self { id: "admin".to_string(), name: name.into(), role: Role::Admin, team_id: None }
    }

    pub fn captain(name: impl Into<String>, team_id: impl Into<String>) -> Self {
        let team_id = team_id.into();
        Self {
            id: format!("captain-{team_id}"),
            name: name.into(),
            role: Role::Captain,
            team_id: Some(team_id),
        }
    }

    pub fn visitor(name: impl Into<String>) -> Self {
        Self { id: "visitor".to_string(), name: name.into(), role: Role::Visitor, team_id: None }
    }
}

/// A write target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource<'a> {
    /// Team records themselves.
    Team,
    /// The roster of one specific team.
    Roster(&'a str),
    /// Match scheduling.
    Match,
    /// Result submission for a match.
    MatchResult,
}

pub struct AccessPolicy;

impl AccessPolicy {
    /// Whether `user` may mutate `resource`.
    ///
    /// Admins write everything; captains only their own roster; visitors
    /// nothing.
    pub fn can_write(user: &User, resource: &Resource<'_>) -> bool {
        match user.role {
            Role::Admin => true,
            Role::Captain => match resource {
                Resource::Roster(team_id) => user.team_id.as_deref() == Some(*team_id),
                _ => false,
            },
            Role::Visitor => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_writes_everything() {
        let admin = User::admin("root");
        for resource in
            [Resource::Team, Resource::Roster("t1"), Resource::Match, Resource::MatchResult]
        {
            assert!(AccessPolicy::can_write(&admin, &resource));
        }
    }

    #[test]
    fn captain_only_writes_own_roster() {
        let captain = User::captain("cap", "t1");
        assert!(AccessPolicy::can_write(&captain, &Resource::Roster("t1")));
        assert!(!AccessPolicy::can_write(&captain, &Resource::Roster("t2")));
        assert!(!AccessPolicy::can_write(&captain, &Resource::Team));
        assert!(!AccessPolicy::can_write(&captain, &Resource::MatchResult));
    }

    #[test]
    fn captain_without_team_writes_nothing() {
        let mut captain = User::captain("cap", "t1");
        captain.team_id = None;
        assert!(!AccessPolicy::can_write(&captain, &Resource::Roster("t1")));
    }

    #[test]
    fn visitor_writes_nothing() {
        let visitor = User::visitor("guest");
        assert!(!AccessPolicy::can_write(&visitor, &Resource::Roster("t1")));
        assert!(!AccessPolicy::can_write(&visitor, &Resource::MatchResult));
    }
}
