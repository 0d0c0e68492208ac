//! User model -> entity mapper

use blog_core::entities::{EmailConfirmation, PasswordRecovery, User};

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        let password_recovery = match (model.recovery_code, model.recovery_expires_at) {
            (Some(code), Some(expires_at)) => Some(PasswordRecovery { code, expires_at }),
            _ => None,
        };

        User {
            id: model.id,
            login: model.login,
            email: model.email,
            created_at: model.created_at,
            email_confirmation: EmailConfirmation {
                code: model.confirmation_code,
                expires_at: model.confirmation_expires_at,
                is_confirmed: model.is_confirmed,
            },
            password_recovery,
        }
    }
}
