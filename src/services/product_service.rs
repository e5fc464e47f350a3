use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::{
    dto::products::{CategoryList, ProductList, VendorList},
    entity::{
        categories::{Column as CategoryCol, Entity as Categories},
        products::{Column, Entity as Products, Model as ProductModel},
        vendors::{Column as VendorCol, Entity as Vendors},
    },
    error::{AppError, AppResult},
    models::{Category, Product, Vendor},
    response::{ApiResponse, Meta},
    routes::params::ProductQuery,
    state::AppState,
};

pub async fn list_products(
    state: &AppState,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    search_products(&state.orm, query).await
}

/// Active products narrowed by the query. Only an empty catalog counts as
/// "not found"; filters that match nothing give an empty list.
pub async fn search_products<C: ConnectionTrait>(
    conn: &C,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let active = Condition::all().add(Column::IsActive.eq(true));
    let available = Products::find().filter(active.clone()).count(conn).await?;
    if available == 0 {
        return Err(AppError::Empty("No products found"));
    }

    let condition = product_filter(active, &query)?;
    let items: Vec<Product> = Products::find()
        .filter(condition)
        .order_by_asc(Column::Name)
        .all(conn)
        .await?
        .into_iter()
        .map(product_from_entity)
        .collect();

    let meta = Meta::count(items.len());
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

fn product_filter(mut condition: Condition, query: &ProductQuery) -> AppResult<Condition> {
    if let (Some(from), Some(to)) = (query.price_from, query.price_to) {
        if from > to {
            return Err(AppError::Validation(
                "price_from must not exceed price_to".into(),
            ));
        }
    }

    if let Some(search) = query.q.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", escape_like(search));
        condition = condition.add(
            Condition::any()
                .add(Expr::col(Column::Name).ilike(pattern.clone()))
                .add(Expr::col(Column::Description).ilike(pattern)),
        );
    }

    if let Some(price_from) = query.price_from {
        condition = condition.add(Column::DiscountedPrice.gte(price_from));
    }

    if let Some(price_to) = query.price_to {
        condition = condition.add(Column::DiscountedPrice.lte(price_to));
    }

    if let Some(vendor_id) = query.vendor_id {
        condition = condition.add(Column::VendorId.eq(vendor_id));
    }

    if let Some(category_id) = query.category_id {
        condition = condition.add(Column::CategoryId.eq(category_id));
    }

    Ok(condition)
}

/// `%` and `_` in user text match literally.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

pub async fn get_product(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Product>> {
    let product = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .filter(|p| p.is_active)
        .map(product_from_entity)
        .ok_or(AppError::NotFound("product"))?;
    Ok(ApiResponse::success("Product", product, None))
}

pub async fn list_vendors(state: &AppState) -> AppResult<ApiResponse<VendorList>> {
    let items: Vec<Vendor> = Vendors::find()
        .order_by_asc(VendorCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|v| Vendor {
            id: v.id,
            name: v.name,
        })
        .collect();
    let meta = Meta::count(items.len());
    Ok(ApiResponse::success("Vendors", VendorList { items }, Some(meta)))
}

pub async fn list_categories(state: &AppState) -> AppResult<ApiResponse<CategoryList>> {
    let items: Vec<Category> = Categories::find()
        .filter(CategoryCol::IsActive.eq(true))
        .order_by_asc(CategoryCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|c| Category {
            id: c.id,
            name: c.name,
            description: c.description,
            is_active: c.is_active,
        })
        .collect();
    let meta = Meta::count(items.len());
    Ok(ApiResponse::success("Categories", CategoryList { items }, Some(meta)))
}

pub(crate) fn product_from_entity(model: ProductModel) -> Product {
    Product {
        id: model.id,
        name: model.name,
        description: model.description,
        price: model.price,
        discounted_price: model.discounted_price,
        vendor_id: model.vendor_id,
        category_id: model.category_id,
        is_active: model.is_active,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query() -> ProductQuery {
        ProductQuery {
            q: None,
            price_from: None,
            price_to: None,
            vendor_id: None,
            category_id: None,
        }
    }

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("mug"), "mug");
    }

    #[test]
    fn inverted_price_bounds_are_rejected() {
        let query = ProductQuery {
            price_from: Some(500),
            price_to: Some(100),
            ..query()
        };
        let result = product_filter(Condition::all(), &query);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn equal_price_bounds_are_allowed() {
        let query = ProductQuery {
            price_from: Some(100),
            price_to: Some(100),
            ..query()
        };
        assert!(product_filter(Condition::all(), &query).is_ok());
    }
}
