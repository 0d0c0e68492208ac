//! User administration service
//!
//! Users created here are confirmed immediately and never receive mail.

use tracing::{info, instrument};
use uuid::Uuid;

use blog_core::entities::{EmailConfirmation, User};

use crate::dto::{ListParams, PageView, UserInput, UserView};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Reject a login or email that is already taken, naming the field
    pub(crate) async fn ensure_unique(&self, login: &str, email: &str) -> ServiceResult<()> {
        if self.ctx.user_repo().login_exists(login).await? {
            return Err(ServiceError::invalid_field("login", "Login already in use"));
        }
        if self.ctx.user_repo().email_exists(email).await? {
            return Err(ServiceError::invalid_field("email", "Email already in use"));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list(&self, params: &ListParams) -> ServiceResult<PageView<UserView>> {
        let mut query = params.to_list_query(User::SORTABLE_FIELDS);
        if let Some(filter) = params.login_or_email_filter() {
            query = query.and_filter(filter);
        }

        let page = self.ctx.user_repo().list(&query).await?;
        let items = page.items.iter().map(UserView::from).collect();
        Ok(PageView::from_page(&page, items))
    }

    #[instrument(skip(self, input), fields(login = %input.login))]
    pub async fn create(&self, input: UserInput) -> ServiceResult<UserView> {
        self.ensure_unique(&input.login, &input.email).await?;

        let hash = self.ctx.password_service().hash(&input.password)?;
        let user = User::new(input.login, input.email, EmailConfirmation::confirmed());
        self.ctx.user_repo().create(&user, &hash).await?;

        info!(user_id = %user.id, "User created by admin");
        Ok(UserView::from(user))
    }

    /// Delete a user; their device sessions go with them
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        if !self.ctx.user_repo().delete(id).await? {
            return Err(ServiceError::not_found("User", id));
        }
        info!(user_id = %id, "User deleted");
        Ok(())
    }
}
