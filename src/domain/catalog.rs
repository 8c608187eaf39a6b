use std::collections::BTreeMap;
use std::str::FromStr;

use bigdecimal::{BigDecimal, RoundingMode};

use super::errors::DomainError;

/// Money values are compared and stored at two decimal places throughout the
/// checkout flow.
pub const MONEY_SCALE: i64 = 2;

/// Normalize a money amount to the two-decimal scale used for price
/// comparison and for every amount sent to the payment processor.
pub fn to_money(value: &BigDecimal) -> BigDecimal {
    value.with_scale_round(MONEY_SCALE, RoundingMode::HalfUp)
}

/// A purchasable service. The catalog price is the only trusted price;
/// client-submitted prices are validated against it and never used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub price: BigDecimal,
}

impl Product {
    pub fn new(id: i32, name: &str, price: &str) -> Result<Self, DomainError> {
        let price = BigDecimal::from_str(price)
            .map_err(|e| DomainError::Internal(format!("invalid catalog price for {name}: {e}")))?;
        Ok(Self {
            id,
            name: name.to_string(),
            price,
        })
    }
}

/// Fixed in-memory product catalog, keyed by product id. Built once at
/// startup; construction fails on duplicate ids, empty names, or prices that
/// are not positive two-decimal amounts.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: BTreeMap<i32, Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Result<Self, DomainError> {
        let mut by_id = BTreeMap::new();
        for product in products {
            if product.name.trim().is_empty() {
                return Err(DomainError::Internal(format!(
                    "catalog product {} has an empty name",
                    product.id
                )));
            }
            if product.price <= BigDecimal::from(0) {
                return Err(DomainError::Internal(format!(
                    "catalog product {} has a non-positive price",
                    product.id
                )));
            }
            if to_money(&product.price) != product.price {
                return Err(DomainError::Internal(format!(
                    "catalog product {} has a price with more than two decimals",
                    product.id
                )));
            }
            if by_id.insert(product.id, product).is_some() {
                return Err(DomainError::Internal(
                    "catalog contains duplicate product ids".to_string(),
                ));
            }
        }
        Ok(Self { products: by_id })
    }

    /// The deployed consultation offering.
    pub fn standard() -> Result<Self, DomainError> {
        Self::new(vec![
            Product::new(1, "Consulta Nutricional Clinica", "20.00")?,
            Product::new(2, "Consulta Nutricional Deportiva", "20.00")?,
            Product::new(3, "Consulta On-Line", "20.00")?,
        ])
    }

    pub fn get(&self, id: i32) -> Option<&Product> {
        self.products.get(&id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
