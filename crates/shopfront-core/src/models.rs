//! Passthrough DTOs for the backend's REST resources.
//!
//! Each resource comes in two shapes: the read shape carrying the backend's
//! `id`, and a `*Draft` shape used as the body of create and update calls.
//! Drafts expose `validate()` for pre-submit checks; the backend remains the
//! authority on every invariant.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::lookup::{DeliveryMethod, OrderStatus, PaymentType};
use crate::validate::{
    require_email, require_non_empty, require_non_negative, require_positive, require_rating,
    ValidationError,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub lastname: String,
    pub email: String,
    #[serde(default)]
    pub telephone: Option<String>,
}

impl Client {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.lastname)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientDraft {
    pub name: String,
    pub lastname: String,
    pub email: String,
    pub telephone: Option<String>,
}

impl ClientDraft {
    /// # Errors
    ///
    /// Returns [`ValidationError`] for blank names or a malformed email.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("name", &self.name)?;
        require_non_empty("lastname", &self.lastname)?;
        require_email("email", &self.email)
    }
}

impl From<&Client> for ClientDraft {
    fn from(client: &Client) -> Self {
        Self {
            name: client.name.clone(),
            lastname: client.lastname.clone(),
            email: client.email.clone(),
            telephone: client.telephone.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub id: i64,
    pub street: String,
    #[serde(default)]
    pub number: Option<String>,
    pub city: String,
    pub client_id: i64,
}

impl Address {
    /// One-line rendering used in address pickers.
    #[must_use]
    pub fn one_line(&self) -> String {
        match &self.number {
            Some(n) => format!("{} {}, {}", self.street, n, self.city),
            None => format!("{}, {}", self.street, self.city),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressDraft {
    pub street: String,
    pub number: Option<String>,
    pub city: String,
    pub client_id: i64,
}

impl AddressDraft {
    /// # Errors
    ///
    /// Returns [`ValidationError`] when street or city is blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("street", &self.street)?;
        require_non_empty("city", &self.city)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDraft {
    pub name: String,
}

impl CategoryDraft {
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the name is blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("name", &self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub stock: i32,
    pub category_id: i64,
}

impl Product {
    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub stock: i32,
    pub category_id: i64,
}

impl ProductDraft {
    /// # Errors
    ///
    /// Returns [`ValidationError`] for a blank name, a non-positive price or
    /// negative stock.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("name", &self.name)?;
        require_positive("price", self.price)?;
        require_non_negative("stock", i64::from(self.stock))
    }
}

impl From<&Product> for ProductDraft {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price,
            stock: product.stock,
            category_id: product.category_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    #[serde(deserialize_with = "utc_timestamp::deserialize")]
    pub date: DateTime<Utc>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub delivery_method: DeliveryMethod,
    pub status: OrderStatus,
    pub client_id: i64,
    pub bill_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub date: DateTime<Utc>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub delivery_method: DeliveryMethod,
    pub status: OrderStatus,
    pub client_id: i64,
    pub bill_id: i64,
}

impl From<&Order> for OrderDraft {
    fn from(order: &Order) -> Self {
        Self {
            date: order.date,
            total: order.total,
            delivery_method: order.delivery_method,
            status: order.status,
            client_id: order.client_id,
            bill_id: order.bill_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetail {
    pub id: i64,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub order_id: i64,
    pub product_id: i64,
}

impl OrderDetail {
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetailDraft {
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub order_id: i64,
    pub product_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub id: i64,
    pub bill_number: String,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub discount: Option<Decimal>,
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub payment_type: PaymentType,
    pub client_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillDraft {
    pub bill_number: String,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub discount: Option<Decimal>,
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub payment_type: PaymentType,
    pub client_id: i64,
}

impl BillDraft {
    /// # Errors
    ///
    /// Returns [`ValidationError`] for a blank bill number or a non-positive
    /// total.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("bill_number", &self.bill_number)?;
        require_positive("total", self.total)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub rating: f32,
    #[serde(default)]
    pub comment: Option<String>,
    pub product_id: i64,
    #[serde(default)]
    pub client_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewDraft {
    pub rating: f32,
    pub comment: Option<String>,
    pub product_id: i64,
    pub client_id: Option<i64>,
}

impl ReviewDraft {
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the rating is outside 1–5.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_rating("rating", self.rating)
    }
}

/// Mean rating across `reviews`, `None` when there are none.
#[must_use]
pub fn average_rating(reviews: &[Review]) -> Option<f32> {
    if reviews.is_empty() {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let count = reviews.len() as f32;
    Some(reviews.iter().map(|r| r.rating).sum::<f32>() / count)
}

/// Timestamps from the backend, with or without an offset.
///
/// A timestamp without one is read as UTC.
mod utc_timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{de::Error as _, Deserialize, Deserializer};

    const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(D::Error::custom)
    }

    pub(super) fn parse(raw: &str) -> Result<DateTime<Utc>, String> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Ok(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, NAIVE_FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(|e| format!("invalid timestamp '{raw}': {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn review(rating: f32) -> Review {
        Review {
            id: 1,
            rating,
            comment: None,
            product_id: 7,
            client_id: None,
        }
    }

    #[test]
    fn product_deserializes_numeric_price() {
        let json = r#"{"id": 3, "name": "Mate", "price": 12.5, "stock": 4, "category_id": 1}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.price, Decimal::new(125, 1));
        assert!(product.in_stock());
    }

    #[test]
    fn product_draft_serializes_price_as_number() {
        let draft = ProductDraft {
            name: "Mate".to_string(),
            price: Decimal::new(10, 0),
            stock: 2,
            category_id: 1,
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert!(value["price"].is_number(), "price should be a JSON number");
    }

    #[test]
    fn order_rejects_unknown_status_code() {
        let json = r#"{
            "id": 1, "date": "2026-01-02T10:00:00Z", "total": 25.0,
            "delivery_method": 3, "status": 42, "client_id": 5, "bill_id": 9
        }"#;
        assert!(serde_json::from_str::<Order>(json).is_err());
    }

    fn order_json(date: &str) -> String {
        format!(
            r#"{{
            "id": 1, "date": "{date}", "total": 25.0,
            "delivery_method": 3, "status": 1, "client_id": 5, "bill_id": 9
        }}"#
        )
    }

    #[test]
    fn order_date_with_offset() {
        let order: Order = serde_json::from_str(&order_json("2024-05-01T10:00:00Z")).unwrap();
        assert_eq!(order.date, Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap());

        let order: Order =
            serde_json::from_str(&order_json("2024-05-01T12:00:00+02:00")).unwrap();
        assert_eq!(order.date, Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn order_date_without_offset_is_utc() {
        let order: Order = serde_json::from_str(&order_json("2024-05-01T10:00:00")).unwrap();
        assert_eq!(order.date, Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap());

        let order: Order =
            serde_json::from_str(&order_json("2024-05-01T10:00:00.250")).unwrap();
        assert_eq!(order.date.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn order_date_rejects_garbage() {
        assert!(serde_json::from_str::<Order>(&order_json("yesterday")).is_err());
        assert!(utc_timestamp::parse("2024-05-01").is_err());
    }

    #[test]
    fn bill_discount_is_optional() {
        let json = r#"{
            "id": 9, "bill_number": "B-1", "date": "2026-01-02",
            "total": 25.0, "payment_type": 1, "client_id": 5
        }"#;
        let bill: Bill = serde_json::from_str(json).unwrap();
        assert!(bill.discount.is_none());
        assert_eq!(bill.payment_type, PaymentType::Cash);
    }

    #[test]
    fn client_draft_requires_valid_email() {
        let draft = ClientDraft {
            name: "Ada".to_string(),
            lastname: "Lovelace".to_string(),
            email: "ada-at-example.com".to_string(),
            telephone: None,
        };
        let err = draft.validate().unwrap_err();
        assert_eq!(err.field, "email");
    }

    #[test]
    fn product_draft_rejects_zero_price() {
        let draft = ProductDraft {
            name: "Free".to_string(),
            price: Decimal::ZERO,
            stock: 1,
            category_id: 1,
        };
        assert_eq!(draft.validate().unwrap_err().field, "price");
    }

    #[test]
    fn address_one_line_without_number() {
        let address = Address {
            id: 1,
            street: "Main St".to_string(),
            number: None,
            city: "Springfield".to_string(),
            client_id: 5,
        };
        assert_eq!(address.one_line(), "Main St, Springfield");
    }

    #[test]
    fn average_rating_of_reviews() {
        assert!(average_rating(&[]).is_none());
        let avg = average_rating(&[review(4.0), review(5.0), review(3.0)]).unwrap();
        assert!((avg - 4.0).abs() < f32::EPSILON);
    }

    #[test]
    fn order_detail_line_total() {
        let detail = OrderDetail {
            id: 1,
            quantity: 3,
            price: Decimal::new(250, 2),
            order_id: 1,
            product_id: 1,
        };
        assert_eq!(detail.line_total(), Decimal::new(750, 2));
    }
}
