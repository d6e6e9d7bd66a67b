//! Order wire types shared by the order and back-office handlers.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront::session::{DeliveryInfo, PaymentMethod};
use storefront_app::domain::orders::models::{Order, OrderItem, PaymentResult};

use crate::money::format_minor;

/// Delivery address wire form.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct DeliveryInfoDto {
    pub full_name: String,
    pub address: String,
    pub city: String,
    pub postcode: String,
    pub country: String,
}

impl From<DeliveryInfoDto> for DeliveryInfo {
    fn from(dto: DeliveryInfoDto) -> Self {
        DeliveryInfo {
            full_name: dto.full_name,
            address: dto.address,
            city: dto.city,
            postcode: dto.postcode,
            country: dto.country,
        }
    }
}

impl From<DeliveryInfo> for DeliveryInfoDto {
    fn from(info: DeliveryInfo) -> Self {
        Self {
            full_name: info.full_name,
            address: info.address,
            city: info.city,
            postcode: info.postcode,
            country: info.country,
        }
    }
}

/// Payment provider wire form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub(crate) enum PaymentMethodDto {
    PayPal,
    Stripe,
}

impl From<PaymentMethodDto> for PaymentMethod {
    fn from(dto: PaymentMethodDto) -> Self {
        match dto {
            PaymentMethodDto::PayPal => PaymentMethod::PayPal,
            PaymentMethodDto::Stripe => PaymentMethod::Stripe,
        }
    }
}

impl From<PaymentMethod> for PaymentMethodDto {
    fn from(method: PaymentMethod) -> Self {
        match method {
            PaymentMethod::PayPal => Self::PayPal,
            PaymentMethod::Stripe => Self::Stripe,
        }
    }
}

/// Payment Result Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaymentResultResponse {
    pub id: String,
    pub status: String,
    pub email: String,
}

impl From<PaymentResult> for PaymentResultResponse {
    fn from(result: PaymentResult) -> Self {
        Self {
            id: result.id,
            status: result.status,
            email: result.email,
        }
    }
}

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    /// Product name at the time of ordering
    pub name: String,

    /// Product image at the time of ordering
    pub image: String,

    /// Unit price, two-decimal string
    pub price: String,

    /// Ordered quantity
    pub quantity: u32,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            name: item.name,
            image: item.image,
            price: format_minor(item.price),
            quantity: item.quantity,
        }
    }
}

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// The unique identifier of the order
    pub uuid: Uuid,

    /// The owning user
    pub user_uuid: Uuid,

    /// The frozen item snapshot
    pub items: Vec<OrderItemResponse>,

    /// Delivery address
    pub delivery_info: DeliveryInfoDto,

    /// Payment provider
    pub payment_method: PaymentMethodDto,

    /// Payment capture, once recorded
    pub payment_result: Option<PaymentResultResponse>,

    /// Subtotal, two-decimal string
    pub subtotal: String,

    /// Delivery fee, two-decimal string
    pub delivery: String,

    /// VAT, two-decimal string
    pub tax: String,

    /// Grand total, two-decimal string
    pub total: String,

    /// Whether the order has been paid
    pub paid: bool,

    /// When the order was paid
    pub paid_at: Option<String>,

    /// Whether the order has been delivered
    pub delivered: bool,

    /// When the order was delivered
    pub delivered_at: Option<String>,

    /// When the order was placed
    pub created_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            uuid: order.uuid,
            user_uuid: order.user_uuid,
            items: order.items.into_iter().map(OrderItemResponse::from).collect(),
            delivery_info: order.delivery_info.into(),
            payment_method: order.payment_method.into(),
            payment_result: order.payment_result.map(PaymentResultResponse::from),
            subtotal: format_minor(order.subtotal),
            delivery: format_minor(order.delivery_fee),
            tax: format_minor(order.tax),
            total: format_minor(order.total),
            paid: order.paid,
            paid_at: order.paid_at.as_ref().map(ToString::to_string),
            delivered: order.delivered,
            delivered_at: order.delivered_at.as_ref().map(ToString::to_string),
            created_at: order.created_at.to_string(),
        }
    }
}
