//! Device session handlers
//!
//! Authenticated by the refresh-token cookie, which also identifies the
//! caller's current device.

use axum::{extract::State, Json};
use blog_service::dto::DeviceView;
use blog_service::services::SecurityService;

use crate::extractors::{IdPath, RefreshToken};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// GET /security/devices
pub async fn list_devices(
    State(state): State<AppState>,
    RefreshToken(token): RefreshToken,
) -> ApiResult<Json<Vec<DeviceView>>> {
    let security = SecurityService::new(state.service_context());
    let session = security.authenticate(&token).await?;
    let devices = security.list_devices(session.user_id).await?;
    Ok(Json(devices))
}

/// DELETE /security/devices
pub async fn terminate_other_devices(
    State(state): State<AppState>,
    RefreshToken(token): RefreshToken,
) -> ApiResult<NoContent> {
    let security = SecurityService::new(state.service_context());
    let session = security.authenticate(&token).await?;
    security
        .revoke_all_except(session.user_id, session.device_id)
        .await?;
    Ok(NoContent)
}

/// DELETE /security/devices/:deviceId
pub async fn terminate_device(
    State(state): State<AppState>,
    RefreshToken(token): RefreshToken,
    IdPath(device_id): IdPath,
) -> ApiResult<NoContent> {
    let security = SecurityService::new(state.service_context());
    let session = security.authenticate(&token).await?;
    security.revoke(session.user_id, device_id).await?;
    Ok(NoContent)
}
