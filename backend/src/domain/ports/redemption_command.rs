//! Driving port for redeeming score against catalogue products.

use async_trait::async_trait;

use crate::domain::{Error, Ownership, ProductId, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RedemptionCommand: Send + Sync {
    /// Buy one unit of a product.
    ///
    /// Refusals (missing product, no stock, unknown buyer, balance too low)
    /// surface as [`ErrorCode::Unavailable`](crate::domain::ErrorCode::Unavailable)
    /// with the reason in the error details.
    async fn purchase(&self, user_id: UserId, product_id: ProductId) -> Result<Ownership, Error>;

    /// Products the user has bought, oldest first.
    async fn owned_products(&self, user_id: UserId) -> Result<Vec<Ownership>, Error>;
}
