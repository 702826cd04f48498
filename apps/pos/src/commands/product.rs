//! # Product Commands
//!
//! Inventory listing, search and CRUD.
//!
//! Every successful mutation writes the products snapshot to the cache
//! (best effort, see `StoreState`).

use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{SessionState, StoreState};
use tripus_core::Product;

/// Returns the whole inventory in insertion order.
pub fn list_products(session: &SessionState) -> Vec<Product> {
    debug!("list_products command");
    session.with_session(|s| s.products().to_vec())
}

/// Case-insensitive substring search over name or code.
///
/// An empty query returns every product.
pub fn search_products(session: &SessionState, query: &str) -> Result<Vec<Product>, ApiError> {
    debug!(query = %query, "search_products command");
    let products = session.with_session(|s| s.search_products(query))?;
    debug!(query = %query, count = products.len(), "Search completed");
    Ok(products)
}

pub fn get_product(session: &SessionState, code: &str) -> Result<Product, ApiError> {
    session
        .with_session(|s| s.product(code).cloned())
        .ok_or_else(|| ApiError::not_found("Product", code))
}

/// Adds a product.
///
/// ## Errors
/// - `INVALID_INPUT` for empty code/name, price ≤ 0 or stock < 0
/// - `CONFLICT` if the code is taken
pub async fn add_product(
    session: &SessionState,
    store: &StoreState,
    product: Product,
) -> Result<Product, ApiError> {
    debug!(code = %product.code, "add_product command");

    let products = session.apply(|s| {
        let next = s.add_product(product.clone())?;
        let products = next.products().to_vec();
        Ok((next, products))
    })?;
    store.persist_products(&products).await;

    info!(code = %product.code, name = %product.name, "Product added");
    Ok(product)
}

/// Replaces the product stored under `code` with the edited product.
pub async fn update_product(
    session: &SessionState,
    store: &StoreState,
    code: &str,
    product: Product,
) -> Result<Product, ApiError> {
    debug!(code = %code, new_code = %product.code, "update_product command");

    let products = session.apply(|s| {
        let next = s.update_product(code, product.clone())?;
        let products = next.products().to_vec();
        Ok((next, products))
    })?;
    store.persist_products(&products).await;

    info!(code = %product.code, "Product updated");
    Ok(product)
}

pub async fn delete_product(
    session: &SessionState,
    store: &StoreState,
    code: &str,
) -> Result<(), ApiError> {
    debug!(code = %code, "delete_product command");

    let products = session.apply(|s| {
        let next = s.delete_product(code)?;
        let products = next.products().to_vec();
        Ok((next, products))
    })?;
    store.persist_products(&products).await;

    info!(code = %code, "Product deleted");
    Ok(())
}

/// Restores the default inventory and caches it.
pub async fn reset_products(
    session: &SessionState,
    store: &StoreState,
) -> Result<Vec<Product>, ApiError> {
    let defaults = tripus_core::generator::default_products();
    let products = session.apply(|s| {
        let mut next = s.clone();
        for product in s.products() {
            next = next.delete_product(&product.code)?;
        }
        for product in &defaults {
            next = next.add_product(product.clone())?;
        }
        Ok((next, defaults.clone()))
    })?;

    store.inner().snapshots().save_products(&products).await?;
    info!(count = products.len(), "Inventory reset to defaults");
    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::testing;

    fn sugar() -> Product {
        Product {
            code: "P006".to_string(),
            name: "Sugar (1kg)".to_string(),
            price_cents: 4500,
            stock: 40,
        }
    }

    #[tokio::test]
    async fn test_add_product_persists() {
        let (ctx, _) = testing::context().await;

        add_product(&ctx.session, &ctx.store, sugar()).await.unwrap();

        assert_eq!(list_products(&ctx.session).len(), 6);
        let cached = ctx.store.inner().snapshots().load_products().await;
        assert!(cached.iter().any(|p| p.code == "P006"));
    }

    #[tokio::test]
    async fn test_add_duplicate_is_conflict() {
        let (ctx, _) = testing::context().await;
        let mut product = sugar();
        product.code = "P001".to_string();

        let err = add_product(&ctx.session, &ctx.store, product)
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(list_products(&ctx.session).len(), 5);
    }

    #[tokio::test]
    async fn test_invalid_price_rejected_without_change() {
        let (ctx, _) = testing::context().await;
        let mut product = get_product(&ctx.session, "P002").unwrap();
        product.price_cents = 0;

        let err = update_product(&ctx.session, &ctx.store, "P002", product)
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert_eq!(get_product(&ctx.session, "P002").unwrap().price_cents, 6000);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let (ctx, _) = testing::context().await;
        let mut bread = get_product(&ctx.session, "P003").unwrap();
        bread.stock = 99;

        update_product(&ctx.session, &ctx.store, "P003", bread)
            .await
            .unwrap();
        assert_eq!(get_product(&ctx.session, "P003").unwrap().stock, 99);

        delete_product(&ctx.session, &ctx.store, "P003").await.unwrap();
        let err = get_product(&ctx.session, "P003").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_search_matches_name_and_code() {
        let (ctx, _) = testing::context().await;

        let by_name = search_products(&ctx.session, "MILK").unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].code, "P002");

        let by_code = search_products(&ctx.session, "p00").unwrap();
        assert_eq!(by_code.len(), 5);
    }

    #[tokio::test]
    async fn test_reset_restores_defaults() {
        let (ctx, _) = testing::context().await;
        delete_product(&ctx.session, &ctx.store, "P001").await.unwrap();
        add_product(&ctx.session, &ctx.store, sugar()).await.unwrap();

        let products = reset_products(&ctx.session, &ctx.store).await.unwrap();

        assert_eq!(products, tripus_core::generator::default_products());
        assert_eq!(list_products(&ctx.session), products);
    }
}
