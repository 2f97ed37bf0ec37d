use crate::{
    db_types::{NewOrder, NewReceipt, Order, OrderStatusType, Receipt},
    traits::StoreError,
};

/// Storage for orders and their receipts.
#[allow(async_fn_in_trait)]
pub trait OrderManagement {
    /// Stores the receipt and a new `pending` order that refers to it in a single atomic transaction.
    ///
    /// Either both records are written, or neither is.
    async fn insert_order(&self, order: NewOrder, receipt: NewReceipt) -> Result<Order, StoreError>;

    /// All orders, newest first.
    async fn fetch_orders(&self) -> Result<Vec<Order>, StoreError>;

    async fn fetch_order(&self, id: i64) -> Result<Option<Order>, StoreError>;

    /// Overwrites the status of the order and stamps `updated_at`. Transition rules are enforced by the caller.
    async fn update_order_status(&self, id: i64, status: OrderStatusType) -> Result<Order, StoreError>;

    async fn fetch_receipt(&self, id: i64) -> Result<Option<Receipt>, StoreError>;
}
