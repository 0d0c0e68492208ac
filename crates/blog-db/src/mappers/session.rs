//! Device session model -> entity mapper

use blog_core::entities::DeviceSession;

use crate::models::DeviceSessionModel;

impl From<DeviceSessionModel> for DeviceSession {
    fn from(model: DeviceSessionModel) -> Self {
        DeviceSession {
            device_id: model.device_id,
            user_id: model.user_id,
            issued_at: model.issued_at,
            expires_at: model.expires_at,
            device_name: model.device_name,
            ip: model.ip,
            last_active_at: model.last_active_at,
        }
    }
}
