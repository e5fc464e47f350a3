use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::{Expr, LockType};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    db::lock_user,
    domain::{
        OrderStatusTitle,
        order::{Line, MergeStep, generate_ref_code, order_total, plan_merge, validate_note},
    },
    dto::orders::{CheckoutRequest, OrderList, OrderWithItems},
    entity::{
        addresses::Entity as Addresses,
        items::{Column as ItemCol, Entity as Items, Model as ItemModel},
        order_items::{
            ActiveModel as OrderItemActive, Column as OrderItemCol, Entity as OrderItems,
        },
        order_statuses::{Column as StatusCol, Entity as OrderStatuses, Model as StatusModel},
        orders::{
            ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel,
        },
        products::Entity as Products,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_owner},
    models::{ItemLine, Order},
    response::{ApiResponse, Meta},
    services::cart_service::item_lines,
    state::AppState,
};

/// Move the caller's cart into their open order, opening one if needed.
///
/// Runs under the caller's user lock, so a double submit cannot open two
/// orders or consume the same cart lines twice: the second request finds an
/// empty cart.
pub async fn create_order(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let txn = state.orm.begin().await?;
    lock_user(&txn, user.user_id).await?;

    let cart = Items::find()
        .filter(
            Condition::all()
                .add(ItemCol::UserId.eq(user.user_id))
                .add(ItemCol::Ordered.eq(false)),
        )
        .order_by_asc(ItemCol::CreatedAt)
        .all(&txn)
        .await?;

    if cart.is_empty() {
        return Err(AppError::EmptyCart);
    }

    let (order, merged) = match find_open_order(&txn, user.user_id).await? {
        Some(order) => (order, true),
        None => (open_order(&txn, user.user_id).await?, false),
    };

    let existing = order_items(&txn, order.id).await?;
    let steps = plan_merge(&lines_of(&existing), &lines_of(&cart))?;

    let mut attached = Vec::new();
    for step in steps {
        match step {
            MergeStep::Fold {
                target,
                source,
                quantity,
            } => {
                Items::delete_by_id(source).exec(&txn).await?;
                Items::update_many()
                    .col_expr(ItemCol::Quantity, Expr::value(quantity))
                    .filter(ItemCol::Id.eq(target))
                    .exec(&txn)
                    .await?;
            }
            MergeStep::Attach { item_id } => {
                OrderItemActive {
                    order_id: Set(order.id),
                    item_id: Set(item_id),
                }
                .insert(&txn)
                .await?;
                attached.push(item_id);
            }
        }
    }

    if !attached.is_empty() {
        Items::update_many()
            .col_expr(ItemCol::Ordered, Expr::value(true))
            .filter(ItemCol::Id.is_in(attached))
            .exec(&txn)
            .await?;
    }

    let items = order_lines(&txn, order.id).await?;
    let total = order_total(items.iter().map(|l| (l.quantity, l.product.discounted_price)))?;

    let mut active: OrderActive = order.into();
    active.total = Set(total);
    active.updated_at = Set(Utc::now().into());
    let order = active.update(&txn).await?;
    let status = status_title(&txn, order.status_id).await?;

    txn.commit().await?;

    tracing::info!(
        user_id = %user.user_id,
        order_id = %order.id,
        ref_code = %order.ref_code,
        total = order.total,
        merged,
        "cart moved into order"
    );

    let message = if merged {
        "order updated successfully"
    } else {
        "order created successfully"
    };
    Ok(ApiResponse::success(
        message,
        OrderWithItems {
            order: order_from_entity(order, status),
            items,
        },
        Some(Meta::empty()),
    ))
}

/// Finalize the caller's open order: address, note, PROCESSING status and
/// `ordered` are written together or not at all.
pub async fn checkout(
    state: &AppState,
    user: &AuthUser,
    payload: CheckoutRequest,
) -> AppResult<ApiResponse<OrderWithItems>> {
    validate_note(payload.note.as_deref())?;

    let txn = state.orm.begin().await?;
    lock_user(&txn, user.user_id).await?;

    let order = Orders::find()
        .filter(
            Condition::all()
                .add(OrderCol::UserId.eq(user.user_id))
                .add(OrderCol::Ordered.eq(false)),
        )
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or(AppError::NoActiveOrder)?;

    let address = Addresses::find_by_id(payload.address_id)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound("address"))?;
    ensure_owner(user, address.user_id)?;

    let status = find_status(&txn, OrderStatusTitle::CHECKOUT).await?;

    let mut active: OrderActive = order.into();
    active.address_id = Set(Some(address.id));
    active.note = Set(payload.note);
    active.status_id = Set(status.id);
    active.ordered = Set(true);
    active.updated_at = Set(Utc::now().into());
    let order = active.update(&txn).await?;

    let items = order_lines(&txn, order.id).await?;

    txn.commit().await?;

    tracing::info!(
        user_id = %user.user_id,
        order_id = %order.id,
        ref_code = %order.ref_code,
        "order checked out"
    );

    Ok(ApiResponse::success(
        "Checkout success",
        OrderWithItems {
            order: order_from_entity(order, OrderStatusTitle::CHECKOUT),
            items,
        },
        Some(Meta::empty()),
    ))
}

pub async fn list_orders(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<OrderList>> {
    let rows = Orders::find()
        .filter(OrderCol::UserId.eq(user.user_id))
        .find_also_related(OrderStatuses)
        .order_by_desc(OrderCol::CreatedAt)
        .all(&state.orm)
        .await?;

    if rows.is_empty() {
        return Err(AppError::Empty("no orders yet"));
    }

    let items = rows
        .into_iter()
        .map(|(order, status)| -> AppResult<Order> {
            let status = parse_status(status, order.status_id)?;
            Ok(order_from_entity(order, status))
        })
        .collect::<AppResult<Vec<Order>>>()?;

    let meta = Meta::count(items.len());
    Ok(ApiResponse::success("Ok", OrderList { items }, Some(meta)))
}

pub async fn get_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let order = Orders::find()
        .filter(
            Condition::all()
                .add(OrderCol::UserId.eq(user.user_id))
                .add(OrderCol::Id.eq(id)),
        )
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("order"))?;

    let status = status_title(&state.orm, order.status_id).await?;
    let items = order_lines(&state.orm, order.id).await?;

    Ok(ApiResponse::success(
        "OK",
        OrderWithItems {
            order: order_from_entity(order, status),
            items,
        },
        Some(Meta::empty()),
    ))
}

async fn find_open_order<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
) -> AppResult<Option<OrderModel>> {
    let order = Orders::find()
        .filter(
            Condition::all()
                .add(OrderCol::UserId.eq(user_id))
                .add(OrderCol::Ordered.eq(false)),
        )
        .one(conn)
        .await?;
    Ok(order)
}

async fn open_order<C: ConnectionTrait>(conn: &C, user_id: Uuid) -> AppResult<OrderModel> {
    let status = OrderStatuses::find()
        .filter(StatusCol::IsDefault.eq(true))
        .one(conn)
        .await?
        .ok_or_else(|| anyhow::anyhow!("no default order status is seeded"))?;

    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        address_id: Set(None),
        status_id: Set(status.id),
        note: Set(None),
        ref_code: Set(generate_ref_code()),
        total: Set(0),
        ordered: Set(false),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(conn)
    .await?;
    Ok(order)
}

async fn find_status<C: ConnectionTrait>(
    conn: &C,
    title: OrderStatusTitle,
) -> AppResult<StatusModel> {
    let status = OrderStatuses::find()
        .filter(StatusCol::Title.eq(title.as_str()))
        .one(conn)
        .await?
        .ok_or_else(|| anyhow::anyhow!("order status {title} is not seeded"))?;
    Ok(status)
}

async fn status_title<C: ConnectionTrait>(
    conn: &C,
    status_id: Uuid,
) -> AppResult<OrderStatusTitle> {
    let status = OrderStatuses::find_by_id(status_id).one(conn).await?;
    parse_status(status, status_id)
}

fn parse_status(status: Option<StatusModel>, status_id: Uuid) -> AppResult<OrderStatusTitle> {
    let status = status.ok_or_else(|| anyhow::anyhow!("order status {status_id} is missing"))?;
    Ok(status.title.parse()?)
}

/// Items attached to an order, oldest first.
async fn order_items<C: ConnectionTrait>(conn: &C, order_id: Uuid) -> AppResult<Vec<ItemModel>> {
    let item_ids = attached_item_ids(conn, order_id).await?;
    if item_ids.is_empty() {
        return Ok(Vec::new());
    }
    let items = Items::find()
        .filter(ItemCol::Id.is_in(item_ids))
        .order_by_asc(ItemCol::CreatedAt)
        .all(conn)
        .await?;
    Ok(items)
}

async fn order_lines<C: ConnectionTrait>(conn: &C, order_id: Uuid) -> AppResult<Vec<ItemLine>> {
    let item_ids = attached_item_ids(conn, order_id).await?;
    if item_ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows = Items::find()
        .filter(ItemCol::Id.is_in(item_ids))
        .find_also_related(Products)
        .order_by_asc(ItemCol::CreatedAt)
        .all(conn)
        .await?;
    item_lines(rows)
}

async fn attached_item_ids<C: ConnectionTrait>(conn: &C, order_id: Uuid) -> AppResult<Vec<Uuid>> {
    let ids = OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(order_id))
        .all(conn)
        .await?
        .into_iter()
        .map(|link| link.item_id)
        .collect();
    Ok(ids)
}

fn lines_of(items: &[ItemModel]) -> Vec<Line> {
    items
        .iter()
        .map(|item| Line {
            item_id: item.id,
            product_id: item.product_id,
            quantity: item.quantity,
        })
        .collect()
}

fn order_from_entity(model: OrderModel, status: OrderStatusTitle) -> Order {
    Order {
        id: model.id,
        user_id: model.user_id,
        address_id: model.address_id,
        status,
        note: model.note,
        ref_code: model.ref_code,
        total: model.total,
        ordered: model.ordered,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
