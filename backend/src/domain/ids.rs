//! Integer identifiers for persisted entities.
//!
//! Each table gets its own newtype so a product id can never be passed where a
//! user id is expected. Identifiers are assigned by the database.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

macro_rules! integer_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            pub const fn new(raw: i32) -> Self {
                Self(raw)
            }

            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl From<i32> for $name {
            fn from(raw: i32) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

integer_id! {
    /// Registered account.
    UserId
}
integer_id! {
    /// Catalogue entry that can be redeemed for score.
    ProductId
}
integer_id! {
    /// Row in the append-only ownership log.
    OwnershipId
}
integer_id! {
    IdeaId
}
integer_id! {
    /// Moderation status; `1` is the status assigned to new ideas.
    StatusId
}
integer_id! {
    CommentId
}
integer_id! {
    AchievementId
}
integer_id! {
    /// Row linking a user to an unlocked achievement.
    AwardId
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn identifiers_serialise_as_bare_integers() {
        let value = serde_json::to_value(ProductId::new(7)).expect("id serialises");
        assert_eq!(value, json!(7));
        let back: UserId = serde_json::from_value(json!(42)).expect("id deserialises");
        assert_eq!(back.get(), 42);
    }
}
