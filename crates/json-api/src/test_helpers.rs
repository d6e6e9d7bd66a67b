//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use storefront::session::{DeliveryInfo, PaymentMethod};
use storefront_app::{
    auth::{AuthenticatedUser, MockAuthService},
    context::AppContext,
    domain::{
        orders::{MockOrdersService, models::Order, models::OrderItem},
        products::{MockProductsService, models::Product},
        users::{MockUsersService, models::User},
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: Uuid = Uuid::nil();
pub(crate) const TEST_ADMIN_UUID: Uuid = Uuid::from_u128(0xad);

pub(crate) fn test_user() -> AuthenticatedUser {
    AuthenticatedUser {
        uuid: TEST_USER_UUID,
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        admin: false,
    }
}

pub(crate) fn test_admin() -> AuthenticatedUser {
    AuthenticatedUser {
        uuid: TEST_ADMIN_UUID,
        name: "Root".to_string(),
        email: "root@example.com".to_string(),
        admin: true,
    }
}

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_current_user(test_user());
    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
pub(crate) async fn inject_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_current_user(test_admin());
    ctrl.call_next(req, depot, res).await;
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();

    auth
}

fn strict_users_mock() -> MockUsersService {
    let mut users = MockUsersService::new();

    users.expect_register().never();
    users.expect_login().never();
    users.expect_update_account().never();
    users.expect_list_users().never();
    users.expect_set_admin().never();
    users.expect_delete_user().never();

    users
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_by_slug().never();
    products.expect_get_product().never();
    products.expect_stock_status().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();

    products
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_place_order().never();
    orders.expect_get_order().never();
    orders.expect_capture_payment().never();
    orders.expect_confirm_delivery().never();
    orders.expect_order_history().never();
    orders.expect_list_orders().never();
    orders.expect_sales_summary().never();

    orders
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    Arc::new(State::new(AppContext {
        auth: Arc::new(auth),
        users: Arc::new(strict_users_mock()),
        products: Arc::new(strict_products_mock()),
        orders: Arc::new(strict_orders_mock()),
    }))
}

pub(crate) fn state_with_users(users: MockUsersService) -> Arc<State> {
    Arc::new(State::new(AppContext {
        auth: Arc::new(strict_auth_mock()),
        users: Arc::new(users),
        products: Arc::new(strict_products_mock()),
        orders: Arc::new(strict_orders_mock()),
    }))
}

pub(crate) fn state_with_products(products: MockProductsService) -> Arc<State> {
    Arc::new(State::new(AppContext {
        auth: Arc::new(strict_auth_mock()),
        users: Arc::new(strict_users_mock()),
        products: Arc::new(products),
        orders: Arc::new(strict_orders_mock()),
    }))
}

pub(crate) fn state_with_orders(orders: MockOrdersService) -> Arc<State> {
    Arc::new(State::new(AppContext {
        auth: Arc::new(strict_auth_mock()),
        users: Arc::new(strict_users_mock()),
        products: Arc::new(strict_products_mock()),
        orders: Arc::new(orders),
    }))
}

/// A service with injected state and no authenticated user.
pub(crate) fn service(state: Arc<State>, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state)).push(route))
}

/// A service with the plain test user signed in.
pub(crate) fn authed_service(state: Arc<State>, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_user)
            .push(route),
    )
}

/// A service with the test administrator signed in.
pub(crate) fn admin_service(state: Arc<State>, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_admin)
            .push(route),
    )
}

pub(crate) fn make_user(uuid: Uuid) -> User {
    User {
        uuid,
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        admin: false,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_product(uuid: Uuid) -> Product {
    Product {
        uuid,
        slug: "widget".to_string(),
        name: "Widget".to_string(),
        image: "/images/widget.jpg".to_string(),
        brand: "Acme".to_string(),
        category: "Widgets".to_string(),
        description: "A widget.".to_string(),
        price: 19_99,
        stock: 5,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_order(uuid: Uuid, user_uuid: Uuid) -> Order {
    Order {
        uuid,
        user_uuid,
        items: vec![OrderItem {
            name: "Widget".to_string(),
            image: "/images/widget.jpg".to_string(),
            price: 20_00,
            quantity: 2,
        }],
        delivery_info: DeliveryInfo {
            full_name: "Ada Lovelace".to_string(),
            address: "1 Analytical Row".to_string(),
            city: "London".to_string(),
            postcode: "N1 9GU".to_string(),
            country: "United Kingdom".to_string(),
        },
        payment_method: PaymentMethod::PayPal,
        payment_result: None,
        subtotal: 40_00,
        delivery_fee: 9_99,
        tax: 8_00,
        total: 57_99,
        paid: false,
        paid_at: None,
        delivered: false,
        delivered_at: None,
        created_at: Timestamp::UNIX_EPOCH,
    }
}
