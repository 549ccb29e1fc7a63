//! Binding between DTOs and their REST collection paths.

use serde::de::DeserializeOwned;
use serde::Serialize;
use shopfront_core::{
    Address, AddressDraft, Bill, BillDraft, Category, CategoryDraft, Client, ClientDraft, Order,
    OrderDetail, OrderDetailDraft, OrderDraft, Product, ProductDraft, Review, ReviewDraft,
};

/// A backend collection reachable at `/{PATH}` with the usual
/// list/get/create/update/delete verbs.
pub trait Resource: DeserializeOwned + Send + 'static {
    /// Collection path segment, e.g. `"order_details"`.
    const PATH: &'static str;
    /// Singular noun for log lines and messages.
    const NAME: &'static str;
    /// Body sent on create and update.
    type Draft: Serialize + Sync;
}

macro_rules! resource {
    ($ty:ty, $draft:ty, $path:literal, $name:literal) => {
        impl Resource for $ty {
            const PATH: &'static str = $path;
            const NAME: &'static str = $name;
            type Draft = $draft;
        }
    };
}

resource!(Client, ClientDraft, "clients", "client");
resource!(Address, AddressDraft, "addresses", "address");
resource!(Category, CategoryDraft, "categories", "category");
resource!(Product, ProductDraft, "products", "product");
resource!(Order, OrderDraft, "orders", "order");
resource!(OrderDetail, OrderDetailDraft, "order_details", "order detail");
resource!(Bill, BillDraft, "bills", "bill");
resource!(Review, ReviewDraft, "reviews", "review");
