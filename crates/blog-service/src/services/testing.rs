//! Test-environment helpers exposed over HTTP when enabled

use tracing::{instrument, warn};

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct TestingService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TestingService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Remove every blog, post, comment, reaction, user, and session
    #[instrument(skip(self))]
    pub async fn clear_all_data(&self) -> ServiceResult<()> {
        warn!("Clearing all data on request");
        self.ctx.maintenance().clear_all().await?;
        Ok(())
    }
}
