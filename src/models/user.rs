use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role. Anything other than `RIDER` or `DRIVER` is kept as `Unknown`
/// so registration never fails on a malformed role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Rider,
    Driver,
    #[serde(other)]
    Unknown,
}

impl Role {
    pub fn parse(value: &str) -> Self {
        match value {
            "RIDER" => Role::Rider,
            "DRIVER" => Role::Driver,
            _ => Role::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Rider => "RIDER",
            Role::Driver => "DRIVER",
            Role::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug)]
pub struct User {
    /// Unique across every role
    pub username: String,
    /// Stored and compared in the clear
    pub password: String,
    pub role: Role,
}

impl User {
    pub fn new(username: String, password: String, role: Role) -> Self {
        Self {
            username,
            password,
            role,
        }
    }
}
