//! Security service
//!
//! Owns the device session registry: sessions are created at login,
//! rotated on refresh, and revoked one by one or in bulk. A refresh token
//! is only honored while its `iat` matches the session's issue time.

use chrono::Utc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use blog_core::entities::DeviceSession;

use crate::dto::DeviceView;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Where a login came from
#[derive(Debug, Clone, Default)]
pub struct ClientInfo {
    pub ip: String,
    pub device_name: String,
}

/// Security service
pub struct SecurityService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SecurityService<'a> {
    /// Create a new SecurityService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Open a session for a freshly issued device id
    #[instrument(skip(self, client), fields(ip = %client.ip))]
    pub async fn create_session(
        &self,
        user_id: Uuid,
        client: ClientInfo,
    ) -> ServiceResult<DeviceSession> {
        let session = DeviceSession::new(
            user_id,
            client.ip,
            client.device_name,
            self.ctx.jwt_service().refresh_token_ttl(),
        );
        self.ctx.session_repo().create(&session).await?;

        info!(device_id = %session.device_id, "Device session created");
        Ok(session)
    }

    /// Resolve the live session a refresh token belongs to.
    ///
    /// A token that is valid but no longer current was reused: the session
    /// is deleted so the whole lineage dies.
    #[instrument(skip(self, refresh_token))]
    pub async fn authenticate(&self, refresh_token: &str) -> ServiceResult<DeviceSession> {
        let claims = self.ctx.jwt_service().validate_refresh_token(refresh_token)?;
        let (user_id, device_id) = (claims.user_id(), claims.device_id);

        let session = self
            .ctx
            .session_repo()
            .find_by_device(device_id)
            .await?
            .filter(|s| s.belongs_to(user_id))
            .ok_or_else(|| ServiceError::unauthorized("Session is not active"))?;

        if session.is_expired(Utc::now()) {
            self.ctx.session_repo().delete(device_id).await?;
            return Err(ServiceError::unauthorized("Session expired"));
        }

        if !session.is_current_token(claims.iat) {
            warn!(%device_id, %user_id, "Refresh token reuse detected, revoking session");
            self.ctx.session_repo().delete(device_id).await?;
            return Err(ServiceError::unauthorized("Refresh token was already used"));
        }

        Ok(session)
    }

    /// Advance the session to a new, strictly later issue time
    #[instrument(skip(self, session), fields(device_id = %session.device_id))]
    pub async fn rotate(&self, mut session: DeviceSession) -> ServiceResult<DeviceSession> {
        let ttl = self.ctx.jwt_service().refresh_token_ttl();
        let expected = session.issued_at;
        let issued_at = session.next_issued_at(Utc::now());
        session.rotate(issued_at, ttl);

        let rotated = self
            .ctx
            .session_repo()
            .rotate(session.device_id, expected, session.issued_at, session.expires_at)
            .await?;
        if !rotated {
            // another refresh of the same token won the race
            return Err(ServiceError::unauthorized("Refresh token was already used"));
        }

        Ok(session)
    }

    /// Active sessions of a user, oldest first
    #[instrument(skip(self))]
    pub async fn list_devices(&self, user_id: Uuid) -> ServiceResult<Vec<DeviceView>> {
        let now = Utc::now();
        let sessions = self.ctx.session_repo().list_by_user(user_id).await?;
        Ok(sessions
            .iter()
            .filter(|s| !s.is_expired(now))
            .map(DeviceView::from)
            .collect())
    }

    /// Revoke one device; only its owner may do so
    #[instrument(skip(self))]
    pub async fn revoke(&self, user_id: Uuid, device_id: Uuid) -> ServiceResult<()> {
        let session = self
            .ctx
            .session_repo()
            .find_by_device(device_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Device", device_id))?;

        if !session.belongs_to(user_id) {
            return Err(ServiceError::permission_denied(
                "Device belongs to another user",
            ));
        }

        if !self.ctx.session_repo().delete(device_id).await? {
            return Err(ServiceError::not_found("Device", device_id));
        }

        info!(%device_id, "Device session revoked");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn revoke_all_except(&self, user_id: Uuid, current: Uuid) -> ServiceResult<u64> {
        let revoked = self
            .ctx
            .session_repo()
            .delete_all_except(user_id, current)
            .await?;
        info!(revoked, "Other device sessions revoked");
        Ok(revoked)
    }

    #[instrument(skip(self))]
    pub async fn revoke_all(&self, user_id: Uuid) -> ServiceResult<u64> {
        let revoked = self.ctx.session_repo().delete_all_for_user(user_id).await?;
        info!(revoked, "All device sessions revoked");
        Ok(revoked)
    }
}
