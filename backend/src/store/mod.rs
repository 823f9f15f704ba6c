//! User Registry - persistent username/password store
//!
//! Saves one JSON record per user to disk and keeps an in-memory index.
//! Passwords are stored as bcrypt hashes only.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AuthError, AuthResult, StoreResult};

/// Directory where user records are stored (relative to current dir)
const DEFAULT_REGISTRY_DIR: &str = ".tabulax/users";

/// bcrypt work factor, matching the original service.
const BCRYPT_COST: u32 = 10;

/// A stored user record with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredUser {
    /// Unique username
    pub username: String,
    /// bcrypt hash of the password
    pub password_hash: String,
    /// Creation timestamp
    pub created_at: String,
    /// Last successful login
    pub last_login: Option<String>,
}

/// Registry for managing user accounts
pub struct UserRegistry {
    /// Directory where user records are stored
    registry_dir: PathBuf,
    /// Loaded users (username -> record)
    users: HashMap<String, StoredUser>,
}

impl UserRegistry {
    /// Create a new registry, loading existing users from disk
    pub fn new() -> Self {
        Self::with_dir(DEFAULT_REGISTRY_DIR)
    }

    /// Create a registry with a custom directory
    pub fn with_dir(dir: impl AsRef<Path>) -> Self {
        let registry_dir = PathBuf::from(dir.as_ref());
        let mut registry = Self {
            registry_dir,
            users: HashMap::new(),
        };
        registry.load_all();
        registry
    }

    /// Load all user records from the registry directory
    fn load_all(&mut self) {
        if !self.registry_dir.exists() {
            return;
        }

        let entries = match fs::read_dir(&self.registry_dir) {
            Ok(e) => e,
            Err(_) => return,
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|e| e == "json") {
                if let Ok(content) = fs::read_to_string(&path) {
                    if let Ok(user) = serde_json::from_str::<StoredUser>(&content) {
                        self.users.insert(user.username.clone(), user);
                    }
                }
            }
        }
    }

    /// Get all stored users
    pub fn list(&self) -> Vec<&StoredUser> {
        self.users.values().collect()
    }

    /// Get a user by name
    pub fn get(&self, username: &str) -> Option<&StoredUser> {
        self.users.get(username)
    }

    /// Create a new account. Fails with [`AuthError::UsernameTaken`] if
    /// the name is already registered.
    pub fn signup(&mut self, username: &str, password: &str) -> AuthResult<()> {
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }
        if self.users.contains_key(username) {
            return Err(AuthError::UsernameTaken);
        }

        let password_hash = bcrypt::hash(password, BCRYPT_COST)
            .map_err(crate::error::StoreError::from)?;

        let user = StoredUser {
            username: username.to_string(),
            password_hash,
            created_at: chrono::Utc::now().to_rfc3339(),
            last_login: None,
        };

        self.persist(&user).map_err(AuthError::Store)?;
        self.users.insert(username.to_string(), user);
        Ok(())
    }

    /// Verify credentials. Unknown usernames and wrong passwords both
    /// fail with [`AuthError::InvalidCredentials`].
    pub fn login(&mut self, username: &str, password: &str) -> AuthResult<()> {
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let user = self
            .users
            .get(username)
            .ok_or(AuthError::InvalidCredentials)?;

        let valid = bcrypt::verify(password, &user.password_hash)
            .map_err(crate::error::StoreError::from)?;
        if !valid {
            return Err(AuthError::InvalidCredentials);
        }

        // Record the login time; a failed write is not a login failure.
        if let Some(user) = self.users.get_mut(username) {
            user.last_login = Some(chrono::Utc::now().to_rfc3339());
            let path = self.registry_dir.join(format!("{}.json", file_slug(username)));
            if let Ok(content) = serde_json::to_string_pretty(user) {
                let _ = fs::write(&path, content);
            }
        }

        Ok(())
    }

    /// Delete an account
    pub fn delete(&mut self, username: &str) -> Result<(), String> {
        if self.users.remove(username).is_some() {
            let path = self.registry_dir.join(format!("{}.json", file_slug(username)));
            fs::remove_file(&path).map_err(|e| format!("Failed to delete file: {}", e))?;
            Ok(())
        } else {
            Err(format!("User not found: {}", username))
        }
    }

    /// Write a user record to disk
    fn persist(&self, user: &StoredUser) -> StoreResult<()> {
        fs::create_dir_all(&self.registry_dir)?;
        let path = self
            .registry_dir
            .join(format!("{}.json", file_slug(&user.username)));
        let content = serde_json::to_string_pretty(user)?;
        fs::write(&path, content)?;
        Ok(())
    }
}

impl Default for UserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Filesystem-safe slug for a username
fn file_slug(username: &str) -> String {
    username
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_signup_then_login() {
        let dir = tempdir().unwrap();
        let mut registry = UserRegistry::with_dir(dir.path());

        registry.signup("alice", "s3cret").unwrap();
        registry.login("alice", "s3cret").unwrap();
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let dir = tempdir().unwrap();
        let mut registry = UserRegistry::with_dir(dir.path());

        registry.signup("alice", "s3cret").unwrap();
        let err = registry.signup("alice", "other").unwrap_err();
        assert!(matches!(err, AuthError::UsernameTaken));
    }

    #[test]
    fn test_wrong_password_and_unknown_user_same_error() {
        let dir = tempdir().unwrap();
        let mut registry = UserRegistry::with_dir(dir.path());

        registry.signup("alice", "s3cret").unwrap();

        let wrong = registry.login("alice", "nope").unwrap_err();
        let unknown = registry.login("bob", "nope").unwrap_err();
        assert_eq!(wrong.to_string(), unknown.to_string());
    }

    #[test]
    fn test_missing_fields_rejected() {
        let dir = tempdir().unwrap();
        let mut registry = UserRegistry::with_dir(dir.path());

        assert!(matches!(
            registry.signup("", "pw").unwrap_err(),
            AuthError::MissingFields
        ));
        assert!(matches!(
            registry.login("alice", "").unwrap_err(),
            AuthError::MissingFields
        ));
    }

    #[test]
    fn test_records_survive_reload() {
        let dir = tempdir().unwrap();
        {
            let mut registry = UserRegistry::with_dir(dir.path());
            registry.signup("alice", "s3cret").unwrap();
        }

        let mut reloaded = UserRegistry::with_dir(dir.path());
        assert!(reloaded.get("alice").is_some());
        reloaded.login("alice", "s3cret").unwrap();
    }

    #[test]
    fn test_password_never_stored_in_clear() {
        let dir = tempdir().unwrap();
        let mut registry = UserRegistry::with_dir(dir.path());

        registry.signup("alice", "s3cret").unwrap();
        let user = registry.get("alice").unwrap();
        assert!(!user.password_hash.contains("s3cret"));
        assert!(user.password_hash.starts_with("$2"));
    }

    #[test]
    fn test_delete_user() {
        let dir = tempdir().unwrap();
        let mut registry = UserRegistry::with_dir(dir.path());

        registry.signup("alice", "s3cret").unwrap();
        registry.delete("alice").unwrap();
        assert!(registry.get("alice").is_none());
        assert!(registry.delete("alice").is_err());
    }
}
