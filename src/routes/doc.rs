use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    domain::OrderStatusTitle,
    dto::{
        addresses::{AddressList, AddressRequest},
        cart::{AddToCartRequest, CartItemChange, CartList},
        cities::{CityList, CityRequest},
        orders::{CheckoutRequest, OrderList, OrderWithItems},
        products::{CategoryList, ProductList, VendorList},
    },
    error::ErrorData,
    models::{Address, Category, City, Item, ItemLine, Order, Product, Vendor},
    response::{ApiResponse, Meta},
    routes::{addresses, cart, checkout, cities, health, orders, params, products},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        health::readiness,
        products::list_products,
        products::get_product,
        products::list_vendors,
        products::list_categories,
        cart::cart_list,
        cart::add_to_cart,
        cart::increase_quantity,
        cart::decrease_quantity,
        cart::remove_from_cart,
        orders::create_order,
        orders::list_orders,
        orders::get_order,
        checkout::checkout,
        cities::list_cities,
        cities::get_city,
        cities::create_city,
        cities::update_city,
        cities::delete_city,
        addresses::list_addresses,
        addresses::get_address,
        addresses::create_address,
        addresses::update_address,
        addresses::delete_address
    ),
    components(
        schemas(
            Product,
            Vendor,
            Category,
            City,
            Address,
            Item,
            ItemLine,
            Order,
            OrderStatusTitle,
            AddToCartRequest,
            CartItemChange,
            CartList,
            CheckoutRequest,
            OrderWithItems,
            OrderList,
            ProductList,
            VendorList,
            CategoryList,
            CityRequest,
            CityList,
            AddressRequest,
            AddressList,
            params::ProductQuery,
            ErrorData,
            Meta,
            ApiResponse<CartList>,
            ApiResponse<OrderWithItems>,
            ApiResponse<OrderList>,
            ApiResponse<ProductList>,
            ApiResponse<ErrorData>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Products", description = "Catalog endpoints"),
        (name = "Cart", description = "Cart endpoints"),
        (name = "Orders", description = "Order and checkout endpoints"),
        (name = "Cities", description = "City endpoints"),
        (name = "Addresses", description = "Address endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
