//! Admin credential check
//!
//! Client-side gate only; the HTTP API does not require credentials.

/// Decides whether a username/password pair may use admin commands.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// Compares against one configured username/password pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Default for StaticCredentials {
    fn default() -> Self {
        Self::new("admin", "1234")
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

impl<F> CredentialVerifier for F
where
    F: Fn(&str, &str) -> bool + Send + Sync,
{
    fn verify(&self, username: &str, password: &str) -> bool {
        self(username, password)
    }
}
