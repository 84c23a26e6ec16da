use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Approver,
    #[default]
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub department: String,
    pub name: String,
}

impl User {
    /// Stand-in account used until a real identity provider exists.
    pub fn mock(username: impl Into<String>) -> Self {
        Self {
            id: "1".to_string(),
            username: username.into(),
            email: "user@example.com".to_string(),
            role: UserRole::User,
            department: "คณะวิทยาศาสตร์และเทคโนโลยี".to_string(),
            name: "ผู้ใช้ทดสอบ".to_string(),
        }
    }
}

/// Signed-in state. Accepts any credentials.
#[derive(Debug, Default)]
pub struct AuthSession {
    user: Option<User>,
}

impl AuthSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn login(&mut self, username: &str, _password: &str) -> &User {
        tracing::info!("Signing in {}", username);
        self.user.insert(User::mock(username))
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!("Signed out {}", user.username);
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn role(&self) -> Option<UserRole> {
        self.user.as_ref().map(|u| u.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_logout() {
        let mut session = AuthSession::new();
        assert!(!session.is_authenticated());

        let user = session.login("somchai", "secret");
        assert_eq!(user.username, "somchai");
        assert_eq!(user.role, UserRole::User);
        assert!(session.is_authenticated());
        assert_eq!(session.role(), Some(UserRole::User));

        session.logout();
        assert!(session.current_user().is_none());
    }
}
