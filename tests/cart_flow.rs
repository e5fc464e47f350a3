mod common;

use storefront_api::{
    dto::cart::AddToCartRequest, error::AppError, services::cart_service,
};
use uuid::Uuid;

use common::{create_product, new_user, setup_state};

fn request(product_id: Uuid, qty: i32) -> AddToCartRequest {
    AddToCartRequest {
        product_id,
        qty,
        size_id: None,
    }
}

#[tokio::test]
async fn adding_the_same_product_twice_keeps_one_line() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let user = new_user();
    let product = create_product(&state, 1_000, 800).await?;

    let first = cart_service::add_to_cart(&state, &user, request(product.id, 2))
        .await?
        .data
        .unwrap();
    let second = cart_service::add_to_cart(&state, &user, request(product.id, 3))
        .await?
        .data
        .unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(second.quantity, 5);

    let cart = cart_service::list_cart(&state, &user).await?;
    assert_eq!(cart.meta.and_then(|m| m.total), Some(1));
    let cart = cart.data.unwrap();
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].line_total, 4_000);
    assert_eq!(cart.total, 4_000);
    Ok(())
}

#[tokio::test]
async fn unknown_product_is_not_found() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let user = new_user();

    let err = cart_service::add_to_cart(&state, &user, request(Uuid::new_v4(), 1))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound("product")));

    let err = cart_service::list_cart(&state, &user).await.unwrap_err();
    assert!(matches!(err, AppError::Empty(_)));
    Ok(())
}

#[tokio::test]
async fn size_of_another_product_is_rejected() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let user = new_user();
    let product = create_product(&state, 500, 500).await?;

    let err = cart_service::add_to_cart(
        &state,
        &user,
        AddToCartRequest {
            product_id: product.id,
            qty: 1,
            size_id: Some(Uuid::new_v4()),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound("size")));
    Ok(())
}

#[tokio::test]
async fn decrease_to_zero_deletes_the_line() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let user = new_user();
    let product = create_product(&state, 300, 300).await?;
    let item = cart_service::add_to_cart(&state, &user, request(product.id, 1))
        .await?
        .data
        .unwrap();

    let up = cart_service::change_quantity(&state, &user, item.id, 1).await?;
    assert_eq!(up.message, "Item quantity updated");
    assert_eq!(up.data.unwrap().quantity, Some(2));

    cart_service::change_quantity(&state, &user, item.id, -1).await?;
    let gone = cart_service::change_quantity(&state, &user, item.id, -1).await?;
    assert_eq!(gone.message, "Item deleted!");
    assert!(gone.data.unwrap().removed);

    let err = cart_service::list_cart(&state, &user).await.unwrap_err();
    assert!(matches!(err, AppError::Empty(_)));
    Ok(())
}

#[tokio::test]
async fn other_users_lines_cannot_be_touched() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let owner = new_user();
    let stranger = new_user();
    let product = create_product(&state, 300, 300).await?;
    let item = cart_service::add_to_cart(&state, &owner, request(product.id, 1))
        .await?
        .data
        .unwrap();

    let err = cart_service::change_quantity(&state, &stranger, item.id, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound("item")));

    let err = cart_service::remove_from_cart(&state, &stranger, item.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound("item")));

    cart_service::remove_from_cart(&state, &owner, item.id).await?;
    let err = cart_service::list_cart(&state, &owner).await.unwrap_err();
    assert!(matches!(err, AppError::Empty(_)));
    Ok(())
}
