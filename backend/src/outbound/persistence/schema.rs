//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts and their score balance (`score >= 0`).
    users (id) {
        id -> Int4,
        #[max_length = 100]
        last_name -> Varchar,
        #[max_length = 100]
        first_name -> Varchar,
        #[max_length = 100]
        middle_name -> Nullable<Varchar>,
        #[max_length = 255]
        mail -> Varchar,
        password_hash -> Text,
        expert -> Bool,
        score -> Int8,
    }
}

diesel::table! {
    /// Redeemable catalogue; `quantity >= 0` is enforced by a CHECK.
    products (id) {
        id -> Int4,
        #[max_length = 255]
        title -> Varchar,
        description -> Text,
        price -> Int8,
        quantity -> Int4,
        #[max_length = 255]
        image -> Varchar,
    }
}

diesel::table! {
    /// Append-only ownership log written by redemption.
    user_products (id) {
        id -> Int4,
        user_id -> Int4,
        product_id -> Int4,
        purchased_at -> Timestamptz,
    }
}

diesel::table! {
    statuses (id) {
        id -> Int4,
        #[max_length = 50]
        title -> Varchar,
    }
}

diesel::table! {
    ideas (id) {
        id -> Int4,
        #[max_length = 255]
        title -> Varchar,
        description -> Text,
        author_id -> Int4,
        status_id -> Int4,
        moderator_id -> Nullable<Int4>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    comments (id) {
        id -> Int4,
        content -> Text,
        created_at -> Timestamptz,
        idea_id -> Int4,
        user_id -> Int4,
    }
}

diesel::table! {
    achievements (id) {
        id -> Int4,
        #[max_length = 255]
        title -> Varchar,
        #[max_length = 255]
        image_file -> Varchar,
    }
}

diesel::table! {
    user_achievements (id) {
        id -> Int4,
        user_id -> Int4,
        achievement_id -> Int4,
    }
}

diesel::joinable!(user_products -> users (user_id));
diesel::joinable!(user_products -> products (product_id));
diesel::joinable!(ideas -> statuses (status_id));
diesel::joinable!(comments -> ideas (idea_id));
diesel::joinable!(user_achievements -> achievements (achievement_id));
diesel::joinable!(user_achievements -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    products,
    user_products,
    statuses,
    ideas,
    comments,
    achievements,
    user_achievements,
);
