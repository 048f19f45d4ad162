//! Account registration and login.

use std::sync::Arc;

use crate::domain::User;
use crate::error::DomainError;
use crate::ports::{PasswordService, TokenService, UserRepository};

/// Input for registering a new account.
#[derive(Debug, Clone)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub repeat_password: String,
}

/// Registers accounts and issues bearer tokens.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    /// Register a new account and issue its first token.
    ///
    /// The email conflict is reported before the password mismatch, so a
    /// taken email surfaces even when the passwords disagree too.
    pub async fn register(&self, registration: Registration) -> Result<String, DomainError> {
        if self
            .users
            .find_by_email(&registration.email)
            .await?
            .is_some()
        {
            return Err(DomainError::EmailAlreadyExists);
        }

        if registration.password != registration.repeat_password {
            return Err(DomainError::PasswordMismatch);
        }

        let password_hash = self.passwords.hash(&registration.password)?;
        let user = self
            .users
            .insert(User::new(
                registration.first_name,
                registration.last_name,
                registration.email,
                password_hash,
            ))
            .await?;

        Ok(self.tokens.generate_token(&user.email)?)
    }

    /// Verify credentials and issue a token.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, DomainError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(DomainError::UserNotFound)?;

        if !self.passwords.verify(password, &user.password_hash)? {
            return Err(DomainError::InvalidCredentials);
        }

        Ok(self.tokens.generate_token(&user.email)?)
    }
}
