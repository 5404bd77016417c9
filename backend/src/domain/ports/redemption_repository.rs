//! Driven port for the purchase transaction.
//!
//! Implementations run the whole purchase in one transaction, locking the
//! product row before the buyer's row:
//!
//! 1. lock the product and run [`StockLevel::check`];
//! 2. lock the buyer and build a [`PurchasePlan`];
//! 3. apply the plan's debit through the ledger rule, decrement the
//!    quantity and append the ownership record.
//!
//! A refusal at step 1 or 2 must leave every row untouched.
//!
//! [`StockLevel::check`]: crate::domain::StockLevel::check
//! [`PurchasePlan`]: crate::domain::PurchasePlan

use async_trait::async_trait;

use crate::domain::{Ownership, ProductId, RedemptionOutcome, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by redemption storage adapters.
    pub enum RedemptionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "redemption repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "redemption repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RedemptionRepository: Send + Sync {
    /// Attempt to buy one unit of `product_id` for `user_id`.
    async fn redeem(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<RedemptionOutcome, RedemptionRepositoryError>;

    /// Ownership records for a user, oldest first.
    async fn owned_by(&self, user_id: UserId) -> Result<Vec<Ownership>, RedemptionRepositoryError>;
}
