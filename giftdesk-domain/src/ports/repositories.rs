use async_trait::async_trait;

use crate::entities::{
    CheckinRecord, Event, Guest, InventoryAdjustment, InventoryItem,
};
use crate::value_objects::{ActorId, CheckinId, EventId, GuestId, InventoryId};

#[async_trait]
pub trait EventDirectory: Send + Sync {
    async fn find_by_id(&self, id: &EventId) -> anyhow::Result<Option<Event>>;
    async fn find_children(&self, parent_event_id: &EventId) -> anyhow::Result<Vec<Event>>;
}

#[async_trait]
pub trait GuestRepository: Send + Sync {
    async fn find_by_id(&self, id: &GuestId) -> anyhow::Result<Option<Guest>>;
    async fn save(&self, guest: &Guest) -> anyhow::Result<()>;
}

/// Outcome of a store-side recount.
#[derive(Debug, Clone)]
pub struct Recount {
    pub item: InventoryItem,
    pub distributed: i64,
    pub drift: Option<i64>,
}

#[async_trait]
pub trait InventoryRepository: Send + Sync {
    async fn find_by_id(&self, id: &InventoryId) -> anyhow::Result<Option<InventoryItem>>;
    async fn find_many(&self, ids: &[InventoryId]) -> anyhow::Result<Vec<InventoryItem>>;
    async fn list_pool(&self, pool_id: &EventId) -> anyhow::Result<Vec<InventoryItem>>;
    /// Fails when another item already holds the same variant key.
    async fn insert(&self, item: InventoryItem) -> anyhow::Result<()>;
    /// Read-modify-write of one item in a single critical section.
    /// Returns `None` when the item does not exist.
    async fn adjust(
        &self,
        id: &InventoryId,
        adjustment: InventoryAdjustment,
    ) -> anyhow::Result<Option<InventoryItem>>;
    /// Sets the counter from the check-in records held by the same store,
    /// reading them and writing the counter without interleaving writers.
    async fn recount(
        &self,
        id: &InventoryId,
        performed_by: &ActorId,
        reason: Option<String>,
    ) -> anyhow::Result<Option<Recount>>;
    async fn set_post_event_count(
        &self,
        id: &InventoryId,
        count: i64,
    ) -> anyhow::Result<Option<InventoryItem>>;
}

#[async_trait]
pub trait CheckinRepository: Send + Sync {
    async fn find_by_id(&self, id: &CheckinId) -> anyhow::Result<Option<CheckinRecord>>;
    async fn find_by_guest_event(
        &self,
        guest_id: &GuestId,
        event_id: &EventId,
    ) -> anyhow::Result<Option<CheckinRecord>>;
    async fn list_for_guest(&self, guest_id: &GuestId) -> anyhow::Result<Vec<CheckinRecord>>;
    /// Insert or replace by record id.
    async fn save(&self, record: &CheckinRecord) -> anyhow::Result<()>;
    async fn delete(&self, id: &CheckinId) -> anyhow::Result<bool>;
    /// Sum of quantities over all records referencing `inventory_id`.
    async fn distributed_quantity(&self, inventory_id: &InventoryId) -> anyhow::Result<i64>;
}
