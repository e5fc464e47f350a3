use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    db::lock_user,
    domain::{
        cart::{QuantityChange, apply_delta, increment, validate_quantity},
        order::{line_total, order_total},
    },
    dto::cart::{AddToCartRequest, CartItemChange, CartList},
    entity::{
        items::{ActiveModel as ItemActive, Column as ItemCol, Entity as Items, Model as ItemModel},
        product_sizes::Entity as ProductSizes,
        products::{Entity as Products, Model as ProductModel},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Item, ItemLine},
    response::{ApiResponse, Meta},
    services::product_service::product_from_entity,
    state::AppState,
};

fn cart_of(user_id: Uuid) -> Condition {
    Condition::all()
        .add(ItemCol::UserId.eq(user_id))
        .add(ItemCol::Ordered.eq(false))
}

pub async fn list_cart(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<CartList>> {
    let rows = Items::find()
        .filter(cart_of(user.user_id))
        .find_also_related(Products)
        .order_by_asc(ItemCol::CreatedAt)
        .all(&state.orm)
        .await?;

    if rows.is_empty() {
        return Err(AppError::Empty("cart empty"));
    }

    let items = item_lines(rows)?;
    let total = order_total(items.iter().map(|l| (l.quantity, l.product.discounted_price)))?;
    let meta = Meta::count(items.len());
    Ok(ApiResponse::success("OK", CartList { items, total }, Some(meta)))
}

/// Add `qty` of a product to the cart, growing the existing line if there is one.
pub async fn add_to_cart(
    state: &AppState,
    user: &AuthUser,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<Item>> {
    validate_quantity(payload.qty)?;

    let txn = state.orm.begin().await?;
    lock_user(&txn, user.user_id).await?;

    let product = Products::find_by_id(payload.product_id)
        .one(&txn)
        .await?
        .filter(|p| p.is_active)
        .ok_or(AppError::NotFound("product"))?;

    if let Some(size_id) = payload.size_id {
        let size = ProductSizes::find_by_id(size_id).one(&txn).await?;
        if !size.is_some_and(|s| s.product_id == product.id) {
            return Err(AppError::NotFound("size"));
        }
    }

    let existing = Items::find()
        .filter(cart_of(user.user_id).add(ItemCol::ProductId.eq(product.id)))
        .one(&txn)
        .await?;

    let item = match existing {
        Some(item) => {
            let quantity = increment(item.quantity, payload.qty)?;
            let mut active: ItemActive = item.into();
            active.quantity = Set(quantity);
            active.update(&txn).await?
        }
        None => {
            ItemActive {
                id: Set(Uuid::new_v4()),
                user_id: Set(user.user_id),
                product_id: Set(product.id),
                quantity: Set(payload.qty),
                size_id: Set(payload.size_id),
                ordered: Set(false),
                created_at: NotSet,
            }
            .insert(&txn)
            .await?
        }
    };

    txn.commit().await?;

    tracing::info!(
        user_id = %user.user_id,
        item_id = %item.id,
        quantity = item.quantity,
        "cart line saved"
    );

    Ok(ApiResponse::success(
        "Added to cart successfully",
        item_from_entity(item),
        Some(Meta::empty()),
    ))
}

/// Move a cart line's quantity by `delta`; lines that reach zero are deleted.
pub async fn change_quantity(
    state: &AppState,
    user: &AuthUser,
    item_id: Uuid,
    delta: i32,
) -> AppResult<ApiResponse<CartItemChange>> {
    let txn = state.orm.begin().await?;
    lock_user(&txn, user.user_id).await?;

    let item = find_cart_item(&txn, user, item_id).await?;

    let (message, change) = match apply_delta(item.quantity, delta)? {
        QuantityChange::Removed => {
            Items::delete_by_id(item.id).exec(&txn).await?;
            (
                "Item deleted!",
                CartItemChange {
                    id: item.id,
                    quantity: None,
                    removed: true,
                },
            )
        }
        QuantityChange::Updated(quantity) => {
            let mut active: ItemActive = item.into();
            active.quantity = Set(quantity);
            let item = active.update(&txn).await?;
            (
                "Item quantity updated",
                CartItemChange {
                    id: item.id,
                    quantity: Some(item.quantity),
                    removed: false,
                },
            )
        }
    };

    txn.commit().await?;

    Ok(ApiResponse::success(message, change, Some(Meta::empty())))
}

pub async fn remove_from_cart(state: &AppState, user: &AuthUser, item_id: Uuid) -> AppResult<()> {
    let txn = state.orm.begin().await?;
    lock_user(&txn, user.user_id).await?;

    let result = Items::delete_many()
        .filter(cart_of(user.user_id).add(ItemCol::Id.eq(item_id)))
        .exec(&txn)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("item"));
    }

    txn.commit().await?;

    tracing::info!(user_id = %user.user_id, item_id = %item_id, "cart line removed");
    Ok(())
}

/// Cart line owned by the caller. Someone else's item reads as missing.
async fn find_cart_item<C: ConnectionTrait>(
    conn: &C,
    user: &AuthUser,
    item_id: Uuid,
) -> AppResult<ItemModel> {
    Items::find()
        .filter(cart_of(user.user_id).add(ItemCol::Id.eq(item_id)))
        .one(conn)
        .await?
        .ok_or(AppError::NotFound("item"))
}

pub(crate) fn item_lines(rows: Vec<(ItemModel, Option<ProductModel>)>) -> AppResult<Vec<ItemLine>> {
    rows.into_iter()
        .map(|(item, product)| -> AppResult<ItemLine> {
            let product = product
                .ok_or_else(|| anyhow::anyhow!("item {} has no product", item.id))?;
            Ok(ItemLine {
                id: item.id,
                line_total: line_total(item.quantity, product.discounted_price)?,
                product: product_from_entity(product),
                quantity: item.quantity,
                size_id: item.size_id,
                ordered: item.ordered,
            })
        })
        .collect()
}

fn item_from_entity(model: ItemModel) -> Item {
    Item {
        id: model.id,
        product_id: model.product_id,
        quantity: model.quantity,
        size_id: model.size_id,
        ordered: model.ordered,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
