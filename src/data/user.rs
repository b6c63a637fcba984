//! Demo user records.
//!
//! A small static directory used by the demo binary and the examples. The
//! names deliberately mix cases and some accounts have never signed in, so
//! the case-folded sort and null-first ordering are visible on screen.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Account standing, rendered as a colored badge in the demo grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Away,
    Suspended,
}

impl UserStatus {
    pub fn label(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Away => "away",
            UserStatus::Suspended => "suspended",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the demo directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: UserStatus,
    /// Last sign-in date, `None` for accounts that never signed in.
    pub last_login: Option<String>,
}

impl User {
    /// Case-insensitive substring match on name or email.
    pub fn matches_filter(&self, filter: &str) -> bool {
        if filter.is_empty() {
            return true;
        }
        let filter = filter.to_lowercase();
        self.name.to_lowercase().contains(&filter)
            || self.email.to_lowercase().contains(&filter)
    }
}

/// Clone the subset of `users` matching `filter`, preserving order.
pub fn filter_users(users: &[User], filter: &str) -> Vec<User> {
    users
        .iter()
        .filter(|u| u.matches_filter(filter))
        .cloned()
        .collect()
}

/// The built-in sample directory.
pub fn sample_users() -> Vec<User> {
    fn user(
        id: i64,
        name: &str,
        email: &str,
        role: &str,
        status: UserStatus,
        last_login: Option<&str>,
    ) -> User {
        User {
            id,
            name: name.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            status,
            last_login: last_login.map(str::to_string),
        }
    }

    vec![
        user(1, "Bob", "bob@example.com", "admin", UserStatus::Active, Some("2026-08-20")),
        user(2, "alice", "alice@example.com", "editor", UserStatus::Active, Some("2026-08-21")),
        user(3, "Carol", "carol@example.com", "viewer", UserStatus::Away, None),
        user(4, "dave", "dave@example.com", "editor", UserStatus::Active, Some("2026-07-30")),
        user(5, "Erin", "erin@example.com", "admin", UserStatus::Suspended, Some("2026-05-11")),
        user(6, "frank", "frank@example.com", "viewer", UserStatus::Active, None),
        user(7, "Grace", "grace@example.com", "editor", UserStatus::Away, Some("2026-08-01")),
        user(8, "heidi", "heidi@example.com", "viewer", UserStatus::Active, Some("2026-08-19")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_matches_name_and_email_case_insensitively() {
        let users = sample_users();
        assert!(users[0].matches_filter("BOB"));
        assert!(users[0].matches_filter("bob@example"));
        assert!(!users[0].matches_filter("zelda"));
        assert!(users[0].matches_filter(""));
    }

    #[test]
    fn filter_users_preserves_order() {
        let users = sample_users();
        let hits = filter_users(&users, "a");
        let names: Vec<_> = hits.iter().map(|u| u.name.as_str()).collect();
        // Every hit appears in original relative order.
        let mut last = 0;
        for name in names {
            let pos = users.iter().position(|u| u.name == name).unwrap();
            assert!(pos >= last);
            last = pos;
        }
    }

    #[test]
    fn sample_data_exercises_the_interesting_cases() {
        let users = sample_users();
        // Unique ids: selection identity depends on them.
        let mut ids: Vec<_> = users.iter().map(|u| u.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), users.len());
        // Mixed-case names and never-signed-in accounts are both present.
        assert!(users.iter().any(|u| u.name == "alice"));
        assert!(users.iter().any(|u| u.name == "Bob"));
        assert!(users.iter().any(|u| u.last_login.is_none()));
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&UserStatus::Suspended).unwrap();
        assert_eq!(json, "\"suspended\"");
        assert_eq!(UserStatus::Active.to_string(), "active");
    }
}
