//! Product catalogue entities.

use serde::{Deserialize, Serialize};

use super::ProductId;

/// Validation errors for new catalogue entries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProductValidationError {
    #[error("product title must not be empty")]
    EmptyTitle,
    #[error("product price must not be negative (got {0})")]
    NegativePrice(i64),
    #[error("product quantity must not be negative (got {0})")]
    NegativeQuantity(i32),
    #[error("product image must be a bare file name")]
    InvalidImage,
}

impl ProductValidationError {
    /// Request field the failure refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "title",
            Self::NegativePrice(_) => "price",
            Self::NegativeQuantity(_) => "quantity",
            Self::InvalidImage => "image",
        }
    }
}

/// Redeemable catalogue entry.
///
/// ## Invariants
/// - `price >= 0` and `quantity >= 0`; quantity only shrinks through redemption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub quantity: i32,
    /// File name under the product image directory.
    pub image: String,
}

impl Product {
    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }
}

/// Validated input for a new catalogue entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    title: String,
    description: String,
    price: i64,
    quantity: i32,
    image: String,
}

impl ProductDraft {
    pub fn try_new(
        title: impl Into<String>,
        description: impl Into<String>,
        price: i64,
        quantity: i32,
        image: impl Into<String>,
    ) -> Result<Self, ProductValidationError> {
        let title = title.into().trim().to_owned();
        if title.is_empty() {
            return Err(ProductValidationError::EmptyTitle);
        }
        if price < 0 {
            return Err(ProductValidationError::NegativePrice(price));
        }
        if quantity < 0 {
            return Err(ProductValidationError::NegativeQuantity(quantity));
        }
        let image = image.into();
        if image.contains('/') || image.contains('\\') || image.starts_with('.') {
            return Err(ProductValidationError::InvalidImage);
        }
        Ok(Self {
            title,
            description: description.into(),
            price,
            quantity,
            image,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> i64 {
        self.price
    }

    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    pub fn image(&self) -> &str {
        &self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn trims_title() {
        let draft = ProductDraft::try_new("  Mug ", "", 30, 2, "mug.png").expect("valid draft");
        assert_eq!(draft.title(), "Mug");
    }

    #[rstest]
    #[case("", 1, 1, "a.png", "title")]
    #[case("Mug", -1, 1, "a.png", "price")]
    #[case("Mug", 1, -1, "a.png", "quantity")]
    #[case("Mug", 1, 1, "../etc/passwd", "image")]
    fn rejects_invalid_drafts(
        #[case] title: &str,
        #[case] price: i64,
        #[case] quantity: i32,
        #[case] image: &str,
        #[case] field: &str,
    ) {
        let err = ProductDraft::try_new(title, "", price, quantity, image)
            .expect_err("draft must be rejected");
        assert_eq!(err.field(), field);
    }

    #[rstest]
    fn zero_price_and_quantity_are_allowed() {
        assert!(ProductDraft::try_new("Sticker", "free", 0, 0, "s.png").is_ok());
    }
}
