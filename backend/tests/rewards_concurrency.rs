//! Concurrent purchases must never oversell stock or overspend a balance.

use std::sync::Arc;

use idea_platform::domain::ports::{RedemptionCommand, ScoreLedger};
use idea_platform::domain::{ErrorCode, LedgerService, RedemptionService};
use idea_platform::test_support::InMemoryRewardsStore;
use rstest::rstest;

fn services(
    store: &Arc<InMemoryRewardsStore>,
) -> (
    Arc<LedgerService<InMemoryRewardsStore>>,
    Arc<RedemptionService<InMemoryRewardsStore>>,
) {
    (
        Arc::new(LedgerService::new(store.clone())),
        Arc::new(RedemptionService::new(store.clone())),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn last_unit_is_sold_once() {
    let store = Arc::new(InMemoryRewardsStore::new());
    let (_, redemption) = services(&store);
    let first = store.add_user("Ada Lovelace", 100);
    let second = store.add_user("Grace Hopper", 100);
    let product = store.add_product(30, 1);

    let handles = [first, second].map(|buyer| {
        let redemption = redemption.clone();
        tokio::spawn(async move { redemption.purchase(buyer, product).await })
    });
    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await.expect("purchase task"));
    }

    let successes = results.iter().filter(|result| result.is_ok()).count();
    assert_eq!(successes, 1);
    let refusal = results
        .iter()
        .find_map(|result| result.as_ref().err())
        .expect("one refusal");
    assert_eq!(refusal.code(), ErrorCode::Unavailable);
    assert_eq!(store.quantity_of(product), Some(0));

    let remaining: i64 = [first, second]
        .iter()
        .filter_map(|user| store.score_of(*user))
        .map(|score| score.value())
        .sum();
    assert_eq!(remaining, 170);
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn balance_covers_only_one_of_two_purchases() {
    let store = Arc::new(InMemoryRewardsStore::new());
    let (ledger, redemption) = services(&store);
    let buyer = store.add_user("Ada Lovelace", 10);
    let products = [store.add_product(6, 5), store.add_product(6, 5)];

    let handles = products.map(|product| {
        let redemption = redemption.clone();
        tokio::spawn(async move { redemption.purchase(buyer, product).await })
    });
    let mut successes = 0;
    for handle in handles {
        if handle.await.expect("purchase task").is_ok() {
            successes += 1;
        }
    }

    assert_eq!(successes, 1);
    let score = ledger.get_score(buyer).await.expect("score lookup");
    assert_eq!(score.value(), 4);
    assert_eq!(store.ownership_count(buyer), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_credits_are_not_lost() {
    let store = Arc::new(InMemoryRewardsStore::new());
    let (ledger, _) = services(&store);
    let user = store.add_user("Ada Lovelace", 0);

    let handles: Vec<_> = (0..20)
        .map(|_| {
            let ledger = ledger.clone();
            tokio::spawn(async move { ledger.add_score(user, 5).await })
        })
        .collect();
    for handle in handles {
        handle.await.expect("credit task").expect("credit succeeds");
    }

    assert_eq!(store.score_of(user).map(|score| score.value()), Some(100));
}
