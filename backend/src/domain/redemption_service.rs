//! Redemption domain service.
//!
//! Implements [`RedemptionCommand`] by delegating the locked purchase
//! transaction to a [`RedemptionRepository`] and turning refusals into
//! `unavailable` errors.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{RedemptionCommand, RedemptionRepository, RedemptionRepositoryError};
use crate::domain::{Error, Ownership, ProductId, RedemptionOutcome, UserId};

#[derive(Clone)]
pub struct RedemptionService<R> {
    repository: Arc<R>,
}

impl<R> RedemptionService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

fn map_redemption_error(error: RedemptionRepositoryError) -> Error {
    match error {
        RedemptionRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("redemption repository unavailable: {message}"))
        }
        RedemptionRepositoryError::Query { message } => {
            Error::internal(format!("redemption repository error: {message}"))
        }
    }
}

#[async_trait]
impl<R> RedemptionCommand for RedemptionService<R>
where
    R: RedemptionRepository,
{
    async fn purchase(&self, user_id: UserId, product_id: ProductId) -> Result<Ownership, Error> {
        let outcome = self
            .repository
            .redeem(user_id, product_id)
            .await
            .map_err(map_redemption_error)?;
        match &outcome {
            RedemptionOutcome::Redeemed(ownership) => info!(
                user_id = user_id.get(),
                product_id = product_id.get(),
                ownership_id = ownership.id.get(),
                "product redeemed"
            ),
            RedemptionOutcome::Unavailable(reason) => debug!(
                user_id = user_id.get(),
                product_id = product_id.get(),
                reason = reason.as_str(),
                "redemption refused"
            ),
        }
        outcome.into_result()
    }

    async fn owned_products(&self, user_id: UserId) -> Result<Vec<Ownership>, Error> {
        self.repository
            .owned_by(user_id)
            .await
            .map_err(map_redemption_error)
    }
}
