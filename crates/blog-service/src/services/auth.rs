//! Authentication service
//!
//! Registration with email confirmation, login, refresh-token rotation,
//! logout, and password recovery. Tokens are always tied to a device
//! session owned by [`SecurityService`].

use chrono::{Duration, Utc};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use blog_core::entities::{DeviceSession, EmailConfirmation, PasswordRecovery, User};

use crate::dto::{
    ConfirmationInput, EmailInput, LoginInput, MeView, NewPasswordInput, SessionTokens, UserInput,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::security::{ClientInfo, SecurityService};
use super::user::UserService;

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn new_code() -> String {
        Uuid::new_v4().to_string()
    }

    fn confirmation_ttl(&self) -> Duration {
        Duration::seconds(self.ctx.auth_config().confirmation_code_ttl_secs)
    }

    /// Issue an access/refresh pair for `session`
    fn issue(&self, session: &DeviceSession) -> ServiceResult<SessionTokens> {
        let pair = self.ctx.jwt_service().generate_token_pair(
            session.user_id,
            session.device_id,
            session.issued_at,
        )?;
        Ok(SessionTokens {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            refresh_expires_in: pair.refresh_expires_in,
        })
    }

    /// Register an unconfirmed user and mail the confirmation code.
    ///
    /// The user is removed again when the mail cannot be sent, so the
    /// login and email stay available for another attempt.
    #[instrument(skip(self, input), fields(login = %input.login))]
    pub async fn register(&self, input: UserInput) -> ServiceResult<()> {
        UserService::new(self.ctx)
            .ensure_unique(&input.login, &input.email)
            .await?;

        let hash = self.ctx.password_service().hash(&input.password)?;
        let code = Self::new_code();
        let user = User::new(
            input.login,
            input.email,
            EmailConfirmation::pending(code.clone(), self.confirmation_ttl()),
        );
        self.ctx.user_repo().create(&user, &hash).await?;

        if let Err(e) = self
            .ctx
            .mailer()
            .send_confirmation_code(&user.email, &code)
            .await
        {
            error!(user_id = %user.id, error = %e, "Confirmation mail failed, rolling back registration");
            self.ctx.user_repo().delete(user.id).await?;
            return Err(ServiceError::internal(e.to_string()));
        }

        info!(user_id = %user.id, "User registered");
        Ok(())
    }

    #[instrument(skip(self, input))]
    pub async fn confirm(&self, input: ConfirmationInput) -> ServiceResult<()> {
        let rejected = || ServiceError::invalid_field("code", "Confirmation code is invalid");

        let user = self
            .ctx
            .user_repo()
            .find_by_confirmation_code(&input.code)
            .await?
            .ok_or_else(rejected)?;
        if !user.email_confirmation.accepts(&input.code, Utc::now()) {
            return Err(rejected());
        }

        self.ctx
            .user_repo()
            .update_confirmation(user.id, &EmailConfirmation::confirmed())
            .await?;
        info!(user_id = %user.id, "Email confirmed");
        Ok(())
    }

    /// Replace the confirmation code of an unconfirmed user and mail it again
    #[instrument(skip(self, input))]
    pub async fn resend_confirmation(&self, input: EmailInput) -> ServiceResult<()> {
        let user = self
            .ctx
            .user_repo()
            .find_by_email(&input.email)
            .await?
            .filter(|u| !u.is_confirmed())
            .ok_or_else(|| {
                ServiceError::invalid_field("email", "Email is unknown or already confirmed")
            })?;

        let code = Self::new_code();
        let confirmation = EmailConfirmation::pending(code.clone(), self.confirmation_ttl());
        self.ctx
            .user_repo()
            .update_confirmation(user.id, &confirmation)
            .await?;

        self.ctx
            .mailer()
            .send_confirmation_code(&user.email, &code)
            .await
            .map_err(|e| ServiceError::internal(e.to_string()))?;
        Ok(())
    }

    /// Check credentials and open a new device session
    #[instrument(skip(self, input, client), fields(login = %input.login_or_email))]
    pub async fn login(&self, input: LoginInput, client: ClientInfo) -> ServiceResult<SessionTokens> {
        let rejected = || ServiceError::unauthorized("Invalid login or password");

        let user = self
            .ctx
            .user_repo()
            .find_by_login_or_email(&input.login_or_email)
            .await?
            .ok_or_else(rejected)?;
        let hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(rejected)?;
        if !self.ctx.password_service().verify(&input.password, &hash)? {
            return Err(rejected());
        }
        if !user.is_confirmed() {
            return Err(ServiceError::unauthorized("Email is not confirmed"));
        }

        let session = SecurityService::new(self.ctx)
            .create_session(user.id, client)
            .await?;
        info!(user_id = %user.id, device_id = %session.device_id, "User logged in");
        self.issue(&session)
    }

    /// Rotate the session behind `refresh_token` and issue a fresh pair
    #[instrument(skip(self, refresh_token))]
    pub async fn refresh(&self, refresh_token: &str) -> ServiceResult<SessionTokens> {
        let security = SecurityService::new(self.ctx);
        let session = security.authenticate(refresh_token).await?;
        let session = security.rotate(session).await?;
        self.issue(&session)
    }

    #[instrument(skip(self, refresh_token))]
    pub async fn logout(&self, refresh_token: &str) -> ServiceResult<()> {
        let session = SecurityService::new(self.ctx)
            .authenticate(refresh_token)
            .await?;
        self.ctx.session_repo().delete(session.device_id).await?;
        info!(device_id = %session.device_id, "User logged out");
        Ok(())
    }

    pub async fn me(&self, user_id: Uuid) -> ServiceResult<MeView> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::unauthorized("User no longer exists"))?;
        Ok(MeView::from(&user))
    }

    /// Start password recovery. Succeeds whether or not the email is known.
    #[instrument(skip(self, input))]
    pub async fn password_recovery(&self, input: EmailInput) -> ServiceResult<()> {
        let Some(user) = self.ctx.user_repo().find_by_email(&input.email).await? else {
            return Ok(());
        };

        let recovery = PasswordRecovery::new(
            Self::new_code(),
            Duration::seconds(self.ctx.auth_config().recovery_code_ttl_secs),
        );
        self.ctx
            .user_repo()
            .update_recovery(user.id, Some(&recovery))
            .await?;

        if let Err(e) = self
            .ctx
            .mailer()
            .send_password_recovery_code(&user.email, &recovery.code)
            .await
        {
            warn!(user_id = %user.id, error = %e, "Recovery mail failed");
        }
        Ok(())
    }

    /// Set a new password from a recovery code and sign out every device
    #[instrument(skip(self, input))]
    pub async fn new_password(&self, input: NewPasswordInput) -> ServiceResult<()> {
        let rejected = || ServiceError::invalid_field("recoveryCode", "Recovery code is invalid");

        let user = self
            .ctx
            .user_repo()
            .find_by_recovery_code(&input.recovery_code)
            .await?
            .ok_or_else(rejected)?;
        let valid = user
            .password_recovery
            .as_ref()
            .is_some_and(|r| r.code == input.recovery_code && !r.is_expired(Utc::now()));
        if !valid {
            return Err(rejected());
        }

        let hash = self.ctx.password_service().hash(&input.new_password)?;
        self.ctx.user_repo().update_password(user.id, &hash).await?;
        SecurityService::new(self.ctx).revoke_all(user.id).await?;

        info!(user_id = %user.id, "Password changed through recovery");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{client, confirmed_user, harness, Harness};
    use super::*;

    fn user_input(login: &str) -> UserInput {
        UserInput {
            login: login.to_string(),
            password: "secret1".to_string(),
            email: format!("{login}@example.com"),
        }
    }

    fn login_input(login: &str, password: &str) -> LoginInput {
        LoginInput {
            login_or_email: login.to_string(),
            password: password.to_string(),
        }
    }

    fn email(value: &str) -> EmailInput {
        EmailInput {
            email: value.to_string(),
        }
    }

    fn mailed_code(h: &Harness, to: &str) -> String {
        h.mailer.last_to(to).unwrap().code().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_register_confirm_login() {
        let h = harness();
        let auth = AuthService::new(&h.ctx);
        auth.register(user_input("neo")).await.unwrap();

        let err = auth
            .login(login_input("neo", "secret1"), client())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 401);

        let code = mailed_code(&h, "neo@example.com");
        auth.confirm(ConfirmationInput { code: code.clone() }).await.unwrap();

        let err = auth.confirm(ConfirmationInput { code }).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidField { field: "code", .. }));

        let tokens = auth
            .login(login_input("neo@example.com", "secret1"), client())
            .await
            .unwrap();
        let claims = h
            .ctx
            .jwt_service()
            .validate_access_token(&tokens.access_token)
            .unwrap();
        let me = auth.me(claims.user_id()).await.unwrap();
        assert_eq!(me.login, "neo");
    }

    #[tokio::test]
    async fn test_register_rolls_back_when_mail_fails() {
        let h = harness();
        let auth = AuthService::new(&h.ctx);
        h.mailer.fail_deliveries(true);

        let err = auth.register(user_input("neo")).await.unwrap_err();
        assert_eq!(err.status_code(), 500);
        assert!(!h.ctx.user_repo().login_exists("neo").await.unwrap());

        h.mailer.fail_deliveries(false);
        auth.register(user_input("neo")).await.unwrap();
    }

    #[tokio::test]
    async fn test_resend_replaces_code() {
        let h = harness();
        let auth = AuthService::new(&h.ctx);
        auth.register(user_input("neo")).await.unwrap();
        let first = mailed_code(&h, "neo@example.com");

        auth.resend_confirmation(email("neo@example.com")).await.unwrap();
        let second = mailed_code(&h, "neo@example.com");
        assert_ne!(first, second);

        assert!(auth.confirm(ConfirmationInput { code: first }).await.is_err());
        auth.confirm(ConfirmationInput { code: second }).await.unwrap();

        let err = auth
            .resend_confirmation(email("neo@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidField { field: "email", .. }));
    }

    #[tokio::test]
    async fn test_wrong_password_is_unauthorized() {
        let h = harness();
        confirmed_user(&h.ctx, "neo").await;

        let err = AuthService::new(&h.ctx)
            .login(login_input("neo", "wrong-pass"), client())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[tokio::test]
    async fn test_refresh_token_is_single_use() {
        let h = harness();
        confirmed_user(&h.ctx, "neo").await;
        let auth = AuthService::new(&h.ctx);
        let first = auth
            .login(login_input("neo", "secret1"), client())
            .await
            .unwrap();

        let second = auth.refresh(&first.refresh_token).await.unwrap();
        assert_ne!(first.refresh_token, second.refresh_token);

        // replaying the old token kills the session, so the new one dies too
        assert_eq!(auth.refresh(&first.refresh_token).await.unwrap_err().status_code(), 401);
        assert_eq!(auth.refresh(&second.refresh_token).await.unwrap_err().status_code(), 401);
    }

    #[tokio::test]
    async fn test_logout_ends_session() {
        let h = harness();
        confirmed_user(&h.ctx, "neo").await;
        let auth = AuthService::new(&h.ctx);
        let tokens = auth
            .login(login_input("neo", "secret1"), client())
            .await
            .unwrap();

        auth.logout(&tokens.refresh_token).await.unwrap();
        assert_eq!(auth.logout(&tokens.refresh_token).await.unwrap_err().status_code(), 401);
    }

    #[tokio::test]
    async fn test_password_recovery_flow() {
        let h = harness();
        let user = confirmed_user(&h.ctx, "neo").await;
        let auth = AuthService::new(&h.ctx);
        let tokens = auth
            .login(login_input("neo", "secret1"), client())
            .await
            .unwrap();

        auth.password_recovery(email("nobody@example.com")).await.unwrap();
        assert!(h.mailer.sent().is_empty());

        auth.password_recovery(email(&user.email)).await.unwrap();
        let code = mailed_code(&h, &user.email);

        let err = auth
            .new_password(NewPasswordInput {
                new_password: "changed1".into(),
                recovery_code: "bogus".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidField { field: "recoveryCode", .. }));

        auth.new_password(NewPasswordInput {
            new_password: "changed1".into(),
            recovery_code: code,
        })
        .await
        .unwrap();

        assert!(auth.refresh(&tokens.refresh_token).await.is_err());
        assert!(auth.login(login_input("neo", "secret1"), client()).await.is_err());
        auth.login(login_input("neo", "changed1"), client()).await.unwrap();
    }
}
