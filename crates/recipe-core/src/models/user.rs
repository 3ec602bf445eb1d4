// ABOUTME: User identifier, registration input, and public profile types
// ABOUTME: Registration input redacts the password from Debug output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

use serde::{Deserialize, Serialize};
use std::fmt;

/// Local user identifier (auto-increment key of the `users` table)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw integer value, used for query binding
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registration input
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    /// Unique login name
    pub username: String,
    /// Given name
    pub firstname: String,
    /// Family name
    pub lastname: String,
    /// Country code
    pub country: String,
    /// Contact email
    pub email: String,
    /// Plain-text password, hashed before storage
    pub password: String,
    /// Profile picture URL
    pub profile_pic: Option<String>,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("firstname", &self.firstname)
            .field("lastname", &self.lastname)
            .field("country", &self.country)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("profile_pic", &self.profile_pic)
            .finish()
    }
}

/// Public profile fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Login name
    pub username: String,
    /// Given name
    pub firstname: String,
    /// Family name
    pub lastname: String,
    /// Contact email
    pub email: String,
    /// Country code
    pub country: String,
    /// Profile picture URL
    pub profile_pic: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_debug_redacts_password() {
        let user = NewUser {
            username: "tomer123".into(),
            password: "pass123".into(),
            ..NewUser::default()
        };
        let debug = format!("{user:?}");
        assert!(debug.contains("tomer123"));
        assert!(!debug.contains("pass123"));
    }
}
