//! Main authentication service implementation

use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError, ValidationError};
use crate::repositories::UserRepository;
use crate::services::session::SessionService;

use super::mail::{EmailTemplate, Mailer};
use super::password::PasswordHasher;

/// Account use cases built on the session service
pub struct AuthService {
    user_repository: Arc<dyn UserRepository>,
    session_service: Arc<SessionService>,
    password_hasher: Arc<dyn PasswordHasher>,
    mailer: Arc<dyn Mailer>,
}

impl AuthService {
    /// Creates a new authentication service instance
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for user data persistence
    /// * `session_service` - Issues and checks every token
    /// * `password_hasher` - Hashes stored passwords
    /// * `mailer` - Sends verification and reset emails
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        session_service: Arc<SessionService>,
        password_hasher: Arc<dyn PasswordHasher>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            user_repository,
            session_service,
            password_hasher,
            mailer,
        }
    }

    pub fn session_service(&self) -> &Arc<SessionService> {
        &self.session_service
    }

    /// Registers a new, unverified account and emails a verification token
    ///
    /// A failed email is logged and does not undo the registration; the
    /// user can ask for a new token through `resend_verification`.
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The created account
    /// * `Err(AuthError::UserAlreadyExists)` - Email already registered
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(required("name"));
        }
        if password.is_empty() {
            return Err(required("password"));
        }
        let email = normalize_email(email)?;

        if self.user_repository.find_by_email(&email).await?.is_some() {
            debug!(email = %mask_email(&email), "Registration for existing email");
            return Err(AuthError::UserAlreadyExists.into());
        }

        let password_hash = self.password_hasher.hash(password).await?;
        let user = self
            .user_repository
            .create(User::new(name.to_string(), email, password_hash))
            .await?;
        info!(user_id = %user.id, "User registered");

        let token = self.session_service.issue_verification_token(user.id).await?;
        let template = EmailTemplate::AccountVerification {
            name: &user.name,
            token: &token,
        };
        if let Err(e) = self.send(&user.email, template).await {
            warn!(user_id = %user.id, error = %e, "Verification email not delivered");
        }

        Ok(user)
    }

    /// Sends a fresh verification token to an unverified account
    ///
    /// Already verified accounts are left alone.
    pub async fn resend_verification(&self, email: &str) -> Result<(), DomainError> {
        let email = normalize_email(email)?;
        let user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if user.is_verified {
            debug!(user_id = %user.id, "Verification resend for verified account ignored");
            return Ok(());
        }

        let token = self.session_service.issue_verification_token(user.id).await?;
        self.send(
            &user.email,
            EmailTemplate::AccountVerification {
                name: &user.name,
                token: &token,
            },
        )
        .await
    }

    /// Marks the account behind a verification token as verified
    pub async fn verify_account(&self, token: &str) -> Result<User, DomainError> {
        let user_id = self.session_service.consume_verification_token(token).await?;

        let mut user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !user.is_verified {
            user.verify();
            user = self.user_repository.update(user).await?;
            info!(user_id = %user.id, "Account verified");
        }

        Ok(user)
    }

    /// Checks credentials and issues an access/refresh token pair
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Credentials valid and account verified
    /// * `Err(AuthError::InvalidCredentials)` - Unknown email or wrong password
    /// * `Err(AuthError::AccountNotVerified)` - Correct credentials, unverified account
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, DomainError> {
        let email = normalize_email(email)?;

        let Some(user) = self.user_repository.find_by_email(&email).await? else {
            warn!(email = %mask_email(&email), "Login for unknown email");
            return Err(AuthError::InvalidCredentials.into());
        };

        if !self
            .password_hasher
            .verify(password, &user.password_hash)
            .await?
        {
            warn!(user_id = %user.id, "Login with wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        if !user.is_verified {
            return Err(AuthError::AccountNotVerified.into());
        }

        let pair = self.session_service.issue_token_pair(user.id)?;
        info!(user_id = %user.id, "User logged in");
        Ok(pair)
    }

    /// Exchanges a refresh token for a new access token
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, DomainError> {
        self.session_service.validate_and_refresh(refresh_token).await
    }

    /// Revokes both tokens of a session
    pub async fn logout(&self, access_token: &str, refresh_token: &str) -> Result<(), DomainError> {
        self.session_service.revoke(access_token).await?;
        self.session_service.revoke(refresh_token).await?;
        info!("Session revoked");
        Ok(())
    }

    /// Loads the profile of the authenticated user
    pub async fn me(&self, user_id: Uuid) -> Result<User, DomainError> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AuthError::UserNotFound.into())
    }

    /// Emails a password-reset token
    ///
    /// # Returns
    ///
    /// * `Err(AuthError::UserNotFound)` - No account for this email
    /// * `Err(DomainError::Mail)` - The reset email could not be delivered
    pub async fn forgot_password(&self, email: &str) -> Result<(), DomainError> {
        let email = normalize_email(email)?;
        let user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let token = self.session_service.issue_reset_token(user.id).await?;
        self.send(
            &user.email,
            EmailTemplate::PasswordReset {
                name: &user.name,
                token: &token,
            },
        )
        .await?;

        info!(user_id = %user.id, "Password reset requested");
        Ok(())
    }

    /// Replaces the password of the account behind a reset token
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), DomainError> {
        if new_password.is_empty() {
            return Err(required("password"));
        }

        let user_id = self.session_service.consume_reset_token(token).await?;
        let mut user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let password_hash = self.password_hasher.hash(new_password).await?;
        user.set_password_hash(password_hash);
        self.user_repository.update(user).await?;

        info!(user_id = %user_id, "Password reset");
        Ok(())
    }

    async fn send(&self, to: &str, template: EmailTemplate<'_>) -> Result<(), DomainError> {
        self.mailer
            .send(to, template.subject(), &template.render())
            .await
    }
}

fn required(field: &str) -> DomainError {
    ValidationError::RequiredField {
        field: field.to_string(),
    }
    .into()
}

/// Trims and lowercases an email address
fn normalize_email(email: &str) -> Result<String, DomainError> {
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        return Err(required("email"));
    }
    if !email.contains('@') {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
        }
        .into());
    }
    Ok(email)
}

/// First character and domain of an email address, safe to log
fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first: String = local.chars().take(1).collect();
            format!("{}***@{}", first, domain)
        }
        None => "***".to_string(),
    }
}
