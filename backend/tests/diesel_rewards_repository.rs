//! Integration tests for the Diesel ledger, redemption and user adapters
//! against embedded PostgreSQL.
//!
//! Each test gets its own database cloned from a migrated template. Set
//! `SKIP_TEST_CLUSTER=1` to skip when the cluster cannot start.

use idea_platform::domain::ports::{
    LedgerRepository, RedemptionRepository, UserPersistenceError, UserRepository,
};
use idea_platform::domain::{
    Mail, NewUser, ProductId, RedemptionOutcome, ScoreAdjustment, UnavailableReason, UserId,
};
use idea_platform::outbound::persistence::{
    DbPool, DieselLedgerRepository, DieselRedemptionRepository, DieselUserRepository, PoolConfig,
};
use pg_embedded_setup_unpriv::TemporaryDatabase;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

mod support;

use support::embedded_postgres::{ownership_count, quantity_of, seed_product, seed_user};
use support::{handle_cluster_setup_failure, provision_database, shared_cluster};

struct TestContext {
    runtime: Runtime,
    pool: DbPool,
    database_url: String,
    _database: TemporaryDatabase,
}

impl TestContext {
    fn ledger(&self) -> DieselLedgerRepository {
        DieselLedgerRepository::new(self.pool.clone())
    }

    fn redemption(&self) -> DieselRedemptionRepository {
        DieselRedemptionRepository::new(self.pool.clone())
    }

    fn users(&self) -> DieselUserRepository {
        DieselUserRepository::new(self.pool.clone())
    }

    fn score_of(&self, user_id: i32) -> i64 {
        self.runtime
            .block_on(self.ledger().find_score(UserId::new(user_id)))
            .expect("score lookup")
            .expect("user exists")
            .value()
    }
}

fn setup_test_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = shared_cluster()?;
    let database = provision_database(cluster)?;
    let database_url = database.url().to_string();

    let config = PoolConfig::new(&database_url)
        .with_max_size(4)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        pool,
        database_url,
        _database: database,
    })
}

#[fixture]
fn context() -> Option<TestContext> {
    match setup_test_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

#[rstest]
fn ledger_adjustments_never_go_below_zero(context: Option<TestContext>) {
    let Some(ctx) = context else { return };
    let user = seed_user(&ctx.database_url, "ada@example.org", 10);
    let ledger = ctx.ledger();

    let after_subtract = ctx
        .runtime
        .block_on(ledger.adjust(UserId::new(user), ScoreAdjustment::Subtract(999)))
        .expect("subtract");
    assert_eq!(after_subtract.map(|score| score.value()), Some(0));

    let after_add = ctx
        .runtime
        .block_on(ledger.adjust(UserId::new(user), ScoreAdjustment::Add(25)))
        .expect("add");
    assert_eq!(after_add.map(|score| score.value()), Some(25));
    assert_eq!(ctx.score_of(user), 25);
}

#[rstest]
fn ledger_adjusting_unknown_user_writes_nothing(context: Option<TestContext>) {
    let Some(ctx) = context else { return };

    let result = ctx
        .runtime
        .block_on(ctx.ledger().adjust(UserId::new(4242), ScoreAdjustment::Add(5)))
        .expect("adjust");
    assert_eq!(result, None);
}

#[rstest]
fn scoreboard_lists_full_names(context: Option<TestContext>) {
    let Some(ctx) = context else { return };
    let user = seed_user(&ctx.database_url, "ada@example.org", 40);

    let entries = ctx
        .runtime
        .block_on(ctx.ledger().list_scores())
        .expect("list scores");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].user_id, UserId::new(user));
    assert_eq!(entries[0].name, "Ada Lovelace");
    assert_eq!(entries[0].score.value(), 40);
}

#[rstest]
fn redemption_debits_and_decrements_together(context: Option<TestContext>) {
    let Some(ctx) = context else { return };
    let user = seed_user(&ctx.database_url, "ada@example.org", 100);
    let product = seed_product(&ctx.database_url, "Mug", 30, 2);

    let outcome = ctx
        .runtime
        .block_on(
            ctx.redemption()
                .redeem(UserId::new(user), ProductId::new(product)),
        )
        .expect("redeem");

    let RedemptionOutcome::Redeemed(ownership) = outcome else {
        panic!("expected a redemption, got {outcome:?}");
    };
    assert_eq!(ownership.product_id, ProductId::new(product));
    assert_eq!(ctx.score_of(user), 70);
    assert_eq!(quantity_of(&ctx.database_url, product), 1);
    assert_eq!(ownership_count(&ctx.database_url, user), 1);

    let owned = ctx
        .runtime
        .block_on(ctx.redemption().owned_by(UserId::new(user)))
        .expect("owned products");
    assert_eq!(owned, vec![ownership]);
}

#[rstest]
#[case(20, 30, 2, UnavailableReason::InsufficientScore)]
#[case(100, 30, 0, UnavailableReason::OutOfStock)]
fn refused_redemptions_leave_state_untouched(
    context: Option<TestContext>,
    #[case] score: i64,
    #[case] price: i64,
    #[case] quantity: i32,
    #[case] expected: UnavailableReason,
) {
    let Some(ctx) = context else { return };
    let user = seed_user(&ctx.database_url, "ada@example.org", score);
    let product = seed_product(&ctx.database_url, "Mug", price, quantity);

    let outcome = ctx
        .runtime
        .block_on(
            ctx.redemption()
                .redeem(UserId::new(user), ProductId::new(product)),
        )
        .expect("redeem");

    assert_eq!(outcome, RedemptionOutcome::Unavailable(expected));
    assert_eq!(ctx.score_of(user), score);
    assert_eq!(quantity_of(&ctx.database_url, product), quantity);
    assert_eq!(ownership_count(&ctx.database_url, user), 0);
}

#[rstest]
fn concurrent_buyers_cannot_share_the_last_unit(context: Option<TestContext>) {
    let Some(ctx) = context else { return };
    let first = seed_user(&ctx.database_url, "ada@example.org", 100);
    let second = seed_user(&ctx.database_url, "grace@example.org", 100);
    let product_id = seed_product(&ctx.database_url, "Mug", 30, 1);
    let product = ProductId::new(product_id);
    let (left, right) = (ctx.redemption(), ctx.redemption());

    let (a, b) = ctx.runtime.block_on(async {
        tokio::join!(
            left.redeem(UserId::new(first), product),
            right.redeem(UserId::new(second), product),
        )
    });

    let outcomes = [a.expect("first redeem"), b.expect("second redeem")];
    let redeemed = outcomes
        .iter()
        .filter(|outcome| matches!(outcome, RedemptionOutcome::Redeemed(_)))
        .count();
    assert_eq!(redeemed, 1);
    assert!(outcomes.contains(&RedemptionOutcome::Unavailable(
        UnavailableReason::OutOfStock
    )));
    assert_eq!(quantity_of(&ctx.database_url, product_id), 0);
    assert_eq!(ctx.score_of(first) + ctx.score_of(second), 170);
}

#[rstest]
fn concurrent_purchases_cannot_overspend_one_balance(context: Option<TestContext>) {
    let Some(ctx) = context else { return };
    let buyer = UserId::new(seed_user(&ctx.database_url, "ada@example.org", 10));
    let mug = seed_product(&ctx.database_url, "Mug", 6, 5);
    let pen = seed_product(&ctx.database_url, "Pen", 6, 5);
    let (left, right) = (ctx.redemption(), ctx.redemption());

    let (a, b) = ctx.runtime.block_on(async {
        tokio::join!(
            left.redeem(buyer, ProductId::new(mug)),
            right.redeem(buyer, ProductId::new(pen)),
        )
    });

    let outcomes = [a.expect("first redeem"), b.expect("second redeem")];
    let redeemed = outcomes
        .iter()
        .filter(|outcome| matches!(outcome, RedemptionOutcome::Redeemed(_)))
        .count();
    assert_eq!(redeemed, 1);
    assert!(outcomes.contains(&RedemptionOutcome::Unavailable(
        UnavailableReason::InsufficientScore
    )));
    assert_eq!(ctx.score_of(buyer.get()), 4);
    assert_eq!(
        quantity_of(&ctx.database_url, mug) + quantity_of(&ctx.database_url, pen),
        9
    );
    assert_eq!(ownership_count(&ctx.database_url, buyer.get()), 1);
}

#[rstest]
fn duplicate_mail_is_reported(context: Option<TestContext>) {
    let Some(ctx) = context else { return };
    let users = ctx.users();
    let new_user = NewUser {
        last_name: "Lovelace".to_owned(),
        first_name: "Ada".to_owned(),
        middle_name: None,
        mail: "ada@example.org".to_owned(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHRzYWx0$aGFzaA".to_owned(),
        expert: false,
    };

    let created = ctx
        .runtime
        .block_on(users.insert(&new_user))
        .expect("first insert");
    assert_eq!(created.score.value(), 0);

    let err = ctx
        .runtime
        .block_on(users.insert(&new_user))
        .expect_err("duplicate mail");
    assert_eq!(err, UserPersistenceError::duplicate_mail("ada@example.org"));

    let mail = Mail::parse("ada@example.org").expect("valid mail");
    let credentials = ctx
        .runtime
        .block_on(users.find_credentials(&mail))
        .expect("credential lookup")
        .expect("credentials stored");
    assert_eq!(credentials.user_id, created.id);
}
