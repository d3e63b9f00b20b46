use serde::Serialize;

/// Represents a person record held by the user store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub department: String,
}

/// Payload for creating a new user. The store assigns the ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    pub department: String,
}

/// Replacement values for an existing user. All three fields are overwritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPatch {
    pub name: String,
    pub email: String,
    pub department: String,
}

impl UserCreate {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            department: department.into(),
        }
    }
}

impl UserPatch {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            department: department.into(),
        }
    }
}

/// Records present at process start, before any client mutation.
pub fn seed_users() -> Vec<UserCreate> {
    vec![
        UserCreate::new("Vikas Kumar", "vikas@clouddevopshub.com", "DevOps"),
        UserCreate::new("John Doe", "john@example.com", "Engineering"),
    ]
}
