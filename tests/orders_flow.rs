mod common;

use sea_orm::{ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter};
use storefront_api::{
    domain::OrderStatusTitle,
    dto::cart::AddToCartRequest,
    entity::{
        items::{Column as ItemCol, Entity as Items},
        orders::{Column as OrderCol, Entity as Orders},
    },
    error::AppError,
    middleware::auth::AuthUser,
    services::{cart_service, order_service},
    state::AppState,
};
use uuid::Uuid;

use common::{create_product, is_internal, new_user, setup_state};

async fn add(state: &AppState, user: &AuthUser, product_id: Uuid, qty: i32) {
    cart_service::add_to_cart(
        state,
        user,
        AddToCartRequest {
            product_id,
            qty,
            size_id: None,
        },
    )
    .await
    .expect("add to cart");
}

async fn open_orders(state: &AppState, user: &AuthUser) -> u64 {
    Orders::find()
        .filter(
            Condition::all()
                .add(OrderCol::UserId.eq(user.user_id))
                .add(OrderCol::Ordered.eq(false)),
        )
        .count(&state.orm)
        .await
        .unwrap()
}

#[tokio::test]
async fn empty_cart_does_not_open_an_order() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let user = new_user();

    let err = order_service::create_order(&state, &user).await.unwrap_err();
    assert!(matches!(err, AppError::EmptyCart));

    let orders = Orders::find()
        .filter(OrderCol::UserId.eq(user.user_id))
        .count(&state.orm)
        .await?;
    assert_eq!(orders, 0);
    Ok(())
}

#[tokio::test]
async fn create_order_moves_cart_into_open_order() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let user = new_user();
    let product = create_product(&state, 2_000, 1_500).await?;

    add(&state, &user, product.id, 3).await;
    let resp = order_service::create_order(&state, &user).await?;
    assert_eq!(resp.message, "order created successfully");

    let data = resp.data.expect("order data");
    assert!(!data.order.ordered);
    assert_eq!(data.order.status, OrderStatusTitle::New);
    assert_eq!(data.order.ref_code.len(), 6);
    assert_eq!(data.order.total, 4_500);
    assert_eq!(data.items.len(), 1);
    assert!(data.items.iter().all(|line| line.ordered));

    // The cart is now empty.
    let err = cart_service::list_cart(&state, &user).await.unwrap_err();
    assert!(matches!(err, AppError::Empty(_)));
    Ok(())
}

#[tokio::test]
async fn repeat_order_folds_quantity_into_existing_line() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let user = new_user();
    let product = create_product(&state, 1_000, 1_000).await?;

    add(&state, &user, product.id, 3).await;
    let first = order_service::create_order(&state, &user).await?.data.unwrap();

    add(&state, &user, product.id, 2).await;
    let resp = order_service::create_order(&state, &user).await?;
    assert_eq!(resp.message, "order updated successfully");

    let second = resp.data.unwrap();
    assert_eq!(second.order.id, first.order.id);
    assert_eq!(second.order.ref_code, first.order.ref_code);
    assert_eq!(second.items.len(), 1);
    assert_eq!(second.items[0].id, first.items[0].id);
    assert_eq!(second.items[0].quantity, 5);
    assert_eq!(second.order.total, 5_000);

    // The folded cart line is gone, only the order line remains.
    let items = Items::find()
        .filter(ItemCol::UserId.eq(user.user_id))
        .count(&state.orm)
        .await?;
    assert_eq!(items, 1);
    assert_eq!(open_orders(&state, &user).await, 1);
    Ok(())
}

#[tokio::test]
async fn repeated_adds_accumulate_on_one_order_line() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let user = new_user();
    let product = create_product(&state, 700, 500).await?;

    add(&state, &user, product.id, 1).await;
    order_service::create_order(&state, &user).await?;

    for _ in 0..2 {
        add(&state, &user, product.id, 2).await;
        order_service::create_order(&state, &user).await?;
    }

    let order = order_service::list_orders(&state, &user).await?.data.unwrap();
    assert_eq!(order.items.len(), 1);

    let detail = order_service::get_order(&state, &user, order.items[0].id)
        .await?
        .data
        .unwrap();
    assert_eq!(detail.items.len(), 1);
    assert_eq!(detail.items[0].quantity, 5);
    assert_eq!(detail.order.total, 2_500);
    Ok(())
}

#[tokio::test]
async fn new_products_are_attached_next_to_existing_lines() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let user = new_user();
    let shirt = create_product(&state, 1_200, 1_000).await?;
    let mug = create_product(&state, 400, 300).await?;

    add(&state, &user, shirt.id, 1).await;
    order_service::create_order(&state, &user).await?;

    add(&state, &user, shirt.id, 1).await;
    add(&state, &user, mug.id, 4).await;
    let data = order_service::create_order(&state, &user).await?.data.unwrap();

    assert_eq!(data.items.len(), 2);
    let shirt_line = data.items.iter().find(|l| l.product.id == shirt.id).unwrap();
    let mug_line = data.items.iter().find(|l| l.product.id == mug.id).unwrap();
    assert_eq!(shirt_line.quantity, 2);
    assert_eq!(mug_line.quantity, 4);
    assert_eq!(data.order.total, 2 * 1_000 + 4 * 300);
    Ok(())
}

#[tokio::test]
async fn concurrent_submits_open_a_single_order() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let user = new_user();
    let product = create_product(&state, 900, 900).await?;
    add(&state, &user, product.id, 2).await;

    let (a, b) = tokio::join!(
        order_service::create_order(&state, &user),
        order_service::create_order(&state, &user),
    );

    let oks = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
    assert_eq!(oks, 1);
    let err = a.err().or(b.err()).unwrap();
    assert!(matches!(err, AppError::EmptyCart));

    assert_eq!(open_orders(&state, &user).await, 1);
    let order = order_service::list_orders(&state, &user).await?.data.unwrap();
    assert_eq!(order.items[0].total, 1_800);
    Ok(())
}

#[tokio::test]
async fn orders_of_other_users_are_not_found() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let owner = new_user();
    let stranger = new_user();
    let product = create_product(&state, 100, 100).await?;

    add(&state, &owner, product.id, 1).await;
    let order = order_service::create_order(&state, &owner).await?.data.unwrap();

    let err = order_service::get_order(&state, &stranger, order.order.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound("order")));

    let err = order_service::list_orders(&state, &stranger).await.unwrap_err();
    assert!(matches!(err, AppError::Empty(_)));
    Ok(())
}

#[tokio::test]
async fn removing_a_line_while_ordering_never_fails_internally() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let product = create_product(&state, 600, 600).await?;

    for _ in 0..25 {
        let user = new_user();
        let item = cart_service::add_to_cart(
            &state,
            &user,
            AddToCartRequest {
                product_id: product.id,
                qty: 1,
                size_id: None,
            },
        )
        .await?
        .data
        .unwrap();

        let (created, removed) = tokio::join!(
            order_service::create_order(&state, &user),
            cart_service::remove_from_cart(&state, &user, item.id),
        );

        if let Err(err) = &created {
            assert!(!is_internal(err), "create_order failed: {err:?}");
        }
        if let Err(err) = &removed {
            assert!(!is_internal(err), "remove_from_cart failed: {err:?}");
        }

        // Whichever runs second sees the other's result.
        match (created, removed) {
            (Ok(order), Err(AppError::NotFound("item"))) => {
                let order = order.data.unwrap();
                assert_eq!(order.items.len(), 1);
                assert_eq!(order.order.total, 600);
            }
            (Err(AppError::EmptyCart), Ok(())) => {
                assert_eq!(open_orders(&state, &user).await, 0);
            }
            (created, removed) => panic!("unexpected outcome: {created:?} / {removed:?}"),
        }
    }
    Ok(())
}
