use serde::{Deserialize, Serialize};

/// Administrator identity returned by the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminIdentity {
    id: u64,
    name: String,
    #[serde(default)]
    email: Option<String>,
}

impl AdminIdentity {
    /// Creates an admin identity.
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>, email: Option<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email,
        }
    }

    /// Returns the server-side admin identifier.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the email, if the server returned one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

/// Authenticated admin state persisted between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSession {
    token: String,
    admin: AdminIdentity,
}

impl AdminSession {
    /// Creates a session from a bearer token and identity.
    #[must_use]
    pub fn new(token: impl Into<String>, admin: AdminIdentity) -> Self {
        Self {
            token: token.into(),
            admin,
        }
    }

    /// Returns the bearer token sent with authenticated requests.
    #[must_use]
    pub fn token(&self) -> &str {
        self.token.as_str()
    }

    /// Returns the signed-in admin.
    #[must_use]
    pub fn admin(&self) -> &AdminIdentity {
        &self.admin
    }
}
