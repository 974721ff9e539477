//! Read-only credential store built once at startup.

use std::collections::HashMap;

use anyhow::{Context, Result, anyhow, bail};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::config::UserConfig;

/// A login account
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub username: String,
    /// argon2 PHC string
    pub password_hash: String,
}

#[derive(Debug, Default)]
pub struct CredentialStore {
    users: HashMap<String, UserRecord>,
}

impl CredentialStore {
    /// Build the store from config entries, hashing any plaintext passwords.
    pub fn from_config(users: &[UserConfig]) -> Result<Self> {
        let mut store = Self::default();
        for user in users {
            let password_hash = match (&user.password_hash, &user.password) {
                (Some(hash), _) => {
                    PasswordHash::new(hash).map_err(|e| {
                        anyhow!("Invalid password_hash for '{}': {}", user.username, e)
                    })?;
                    hash.clone()
                }
                (None, Some(password)) => hash_password(password)
                    .with_context(|| format!("Failed to hash password for '{}'", user.username))?,
                (None, None) => bail!("user '{}' has no credentials", user.username),
            };
            store.insert(UserRecord {
                username: user.username.clone(),
                password_hash,
            })?;
        }
        Ok(store)
    }

    fn insert(&mut self, record: UserRecord) -> Result<()> {
        if self.users.contains_key(&record.username) {
            bail!("duplicate username '{}'", record.username);
        }
        self.users.insert(record.username.clone(), record);
        Ok(())
    }

    pub fn get(&self, username: &str) -> Option<&UserRecord> {
        self.users.get(username)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Return the user when `password` matches its stored hash.
    pub fn verify(&self, username: &str, password: &str) -> Option<&UserRecord> {
        let user = self.users.get(username)?;
        let parsed = match PasswordHash::new(&user.password_hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::error!("Stored hash for '{}' is unreadable: {}", username, e);
                return None;
            }
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .ok()
            .map(|_| user)
    }
}

/// Hash a password into an argon2 PHC string.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("Hashing failed: {}", e))?
        .to_string();
    Ok(hash)
}
