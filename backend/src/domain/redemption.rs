//! Rules for converting score into product ownership.
//!
//! A purchase is decided in two steps that mirror the row locks the
//! persistence adapter takes: first the product (is it there, is it in stock),
//! then the buyer (is there a balance that covers the price). Both checks are
//! pure so the same rules drive the PostgreSQL adapter and in-memory doubles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use utoipa::ToSchema;

use super::{Error, OwnershipId, ProductId, Score, ScoreAdjustment, UserId};

/// Why a purchase was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
    ProductMissing,
    OutOfStock,
    UserMissing,
    InsufficientScore,
}

impl UnavailableReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ProductMissing => "product_missing",
            Self::OutOfStock => "out_of_stock",
            Self::UserMissing => "user_missing",
            Self::InsufficientScore => "insufficient_score",
        }
    }
}

/// Locked view of a product row taken at the start of a purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockLevel {
    pub product_id: ProductId,
    pub price: i64,
    pub quantity: i32,
}

impl StockLevel {
    /// Reject a purchase when the product is absent or sold out.
    pub fn check(stock: Option<Self>) -> Result<Self, UnavailableReason> {
        match stock {
            None => Err(UnavailableReason::ProductMissing),
            Some(level) if level.quantity <= 0 => Err(UnavailableReason::OutOfStock),
            Some(level) => Ok(level),
        }
    }
}

/// Writes a purchase must perform once both rows are locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchasePlan {
    /// Ledger debit for the product price.
    pub debit: ScoreAdjustment,
    /// Buyer balance after the debit.
    pub new_score: Score,
    /// Product quantity after the sale.
    pub remaining_quantity: i32,
}

impl PurchasePlan {
    /// Decide whether `balance` can buy one unit of `stock`.
    ///
    /// # Examples
    /// ```
    /// use idea_platform::domain::{ProductId, PurchasePlan, Score, StockLevel};
    ///
    /// let stock = StockLevel { product_id: ProductId::new(1), price: 30, quantity: 2 };
    /// let plan = PurchasePlan::for_balance(stock, Some(Score::floor(100))).expect("affordable");
    /// assert_eq!(plan.new_score.value(), 70);
    /// assert_eq!(plan.remaining_quantity, 1);
    /// ```
    pub fn for_balance(stock: StockLevel, balance: Option<Score>) -> Result<Self, UnavailableReason> {
        let balance = balance.ok_or(UnavailableReason::UserMissing)?;
        if !balance.covers(stock.price) {
            return Err(UnavailableReason::InsufficientScore);
        }
        let debit = ScoreAdjustment::Subtract(stock.price);
        Ok(Self {
            debit,
            new_score: debit.apply(balance),
            remaining_quantity: stock.quantity - 1,
        })
    }
}

/// Ownership record created by a successful purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ownership {
    pub id: OwnershipId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub purchased_at: DateTime<Utc>,
}

/// Result of a purchase attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedemptionOutcome {
    Redeemed(Ownership),
    Unavailable(UnavailableReason),
}

impl RedemptionOutcome {
    /// Convert a refusal into the domain error surfaced to clients.
    pub fn into_result(self) -> Result<Ownership, Error> {
        match self {
            Self::Redeemed(ownership) => Ok(ownership),
            Self::Unavailable(reason) => Err(unavailable_error(reason)),
        }
    }
}

fn unavailable_error(reason: UnavailableReason) -> Error {
    let details: Value = json!({ "reason": reason.as_str() });
    Error::unavailable("product cannot be redeemed").with_details(details)
}
