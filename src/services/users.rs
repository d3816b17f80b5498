use crate::models::{Role, User};

/// Shared password of the demo accounts.
pub const DEMO_PASSWORD: &str = "Passw0rd";

/// Fixed set of known users. Login is a plain lookup with no sessions or
/// hashing.
#[derive(Debug, Clone)]
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    pub fn with_fixtures() -> Self {
        let user = |id: i64, name: &str, email: &str, role: Role| User {
            id,
            name: name.to_string(),
            email: email.to_string(),
            role,
        };

        Self::new(vec![
            user(1, "Alice", "alice@example.com", Role::Admin),
            user(2, "Bob", "bob@example.com", Role::Approver),
            user(3, "Carol", "carol@example.com", Role::User),
            user(4, "Dan", "dan@example.com", Role::Driver),
        ])
    }

    pub fn get(&self, id: i64) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn login(&self, email: &str, password: &str) -> Option<&User> {
        let email = email.trim();
        let user = self
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))?;

        if password != DEMO_PASSWORD {
            tracing::info!(user_id = user.id, "login refused: wrong password");
            return None;
        }
        Some(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_known_user() {
        let dir = UserDirectory::with_fixtures();
        let user = dir.login("bob@example.com", DEMO_PASSWORD).unwrap();
        assert_eq!(user.id, 2);
        assert_eq!(user.role, Role::Approver);
    }

    #[test]
    fn test_login_email_is_case_insensitive() {
        let dir = UserDirectory::with_fixtures();
        assert!(dir.login(" Alice@Example.com ", DEMO_PASSWORD).is_some());
    }

    #[test]
    fn test_login_wrong_password_or_unknown_email() {
        let dir = UserDirectory::with_fixtures();
        assert!(dir.login("alice@example.com", "password").is_none());
        assert!(dir.login("mallory@example.com", DEMO_PASSWORD).is_none());
    }

    #[test]
    fn test_get_by_id() {
        let dir = UserDirectory::with_fixtures();
        assert_eq!(dir.get(4).map(|u| u.role), Some(Role::Driver));
        assert!(dir.get(99).is_none());
    }
}
