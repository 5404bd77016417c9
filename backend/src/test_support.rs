//! In-memory doubles shared by unit and integration tests.
//!
//! Compiled for `cfg(test)` and behind the `test-support` feature so the
//! `tests/` suites can drive the ledger and redemption services without a
//! database.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{
    LedgerRepository, LedgerRepositoryError, RedemptionRepository, RedemptionRepositoryError,
    ScoreEntry,
};
use crate::domain::{
    Ownership, OwnershipId, ProductId, PurchasePlan, RedemptionOutcome, Score, ScoreAdjustment,
    StockLevel, UserId,
};

#[derive(Debug, Clone)]
struct StoredUser {
    name: String,
    score: Score,
}

#[derive(Debug, Clone, Copy)]
struct StoredProduct {
    price: i64,
    quantity: i32,
}

#[derive(Debug, Default)]
struct RewardsState {
    users: BTreeMap<UserId, StoredUser>,
    products: BTreeMap<ProductId, StoredProduct>,
    ownerships: Vec<Ownership>,
    next_id: i32,
}

impl RewardsState {
    fn allocate_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

/// Ledger and redemption store guarded by one mutex.
///
/// Holding the mutex for a whole purchase gives the same guarantees the
/// PostgreSQL adapter gets from row locks: no overselling, no overspending.
#[derive(Debug, Default)]
pub struct InMemoryRewardsStore {
    state: Mutex<RewardsState>,
}

impl InMemoryRewardsStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, RewardsState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a user with the given balance and return its id.
    pub fn add_user(&self, name: &str, score: i64) -> UserId {
        let mut state = self.lock();
        let id = UserId::new(state.allocate_id());
        state.users.insert(
            id,
            StoredUser {
                name: name.to_owned(),
                score: Score::floor(score),
            },
        );
        id
    }

    /// Stock a product and return its id.
    pub fn add_product(&self, price: i64, quantity: i32) -> ProductId {
        let mut state = self.lock();
        let id = ProductId::new(state.allocate_id());
        state
            .products
            .insert(id, StoredProduct { price, quantity });
        id
    }

    pub fn score_of(&self, user_id: UserId) -> Option<Score> {
        self.lock().users.get(&user_id).map(|user| user.score)
    }

    pub fn quantity_of(&self, product_id: ProductId) -> Option<i32> {
        self.lock()
            .products
            .get(&product_id)
            .map(|product| product.quantity)
    }

    pub fn ownership_count(&self, user_id: UserId) -> usize {
        self.lock()
            .ownerships
            .iter()
            .filter(|ownership| ownership.user_id == user_id)
            .count()
    }
}

#[async_trait]
impl LedgerRepository for InMemoryRewardsStore {
    async fn find_score(&self, user_id: UserId) -> Result<Option<Score>, LedgerRepositoryError> {
        Ok(self.score_of(user_id))
    }

    async fn adjust(
        &self,
        user_id: UserId,
        adjustment: ScoreAdjustment,
    ) -> Result<Option<Score>, LedgerRepositoryError> {
        let mut state = self.lock();
        Ok(state.users.get_mut(&user_id).map(|user| {
            user.score = adjustment.apply(user.score);
            user.score
        }))
    }

    async fn list_scores(&self) -> Result<Vec<ScoreEntry>, LedgerRepositoryError> {
        Ok(self
            .lock()
            .users
            .iter()
            .map(|(id, user)| ScoreEntry {
                user_id: *id,
                name: user.name.clone(),
                score: user.score,
            })
            .collect())
    }
}

#[async_trait]
impl RedemptionRepository for InMemoryRewardsStore {
    async fn redeem(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<RedemptionOutcome, RedemptionRepositoryError> {
        let mut state = self.lock();

        let stock = state.products.get(&product_id).map(|product| StockLevel {
            product_id,
            price: product.price,
            quantity: product.quantity,
        });
        let stock = match StockLevel::check(stock) {
            Ok(stock) => stock,
            Err(reason) => return Ok(RedemptionOutcome::Unavailable(reason)),
        };
        let balance = state.users.get(&user_id).map(|user| user.score);
        let plan = match PurchasePlan::for_balance(stock, balance) {
            Ok(plan) => plan,
            Err(reason) => return Ok(RedemptionOutcome::Unavailable(reason)),
        };

        let id = OwnershipId::new(state.allocate_id());
        if let Some(user) = state.users.get_mut(&user_id) {
            user.score = plan.debit.apply(user.score);
        }
        if let Some(product) = state.products.get_mut(&product_id) {
            product.quantity = plan.remaining_quantity;
        }
        let ownership = Ownership {
            id,
            user_id,
            product_id,
            purchased_at: Utc::now(),
        };
        state.ownerships.push(ownership.clone());
        Ok(RedemptionOutcome::Redeemed(ownership))
    }

    async fn owned_by(&self, user_id: UserId) -> Result<Vec<Ownership>, RedemptionRepositoryError> {
        Ok(self
            .lock()
            .ownerships
            .iter()
            .filter(|ownership| ownership.user_id == user_id)
            .cloned()
            .collect())
    }
}
