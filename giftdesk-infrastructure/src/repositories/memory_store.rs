use std::collections::HashMap;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use giftdesk_domain::{
    ActivityLogEntry, ActorId, CheckinId, CheckinRecord, CheckinRepository, Event, EventDirectory,
    EventId, Guest, GuestId, GuestRepository, InventoryAdjustment, InventoryId, InventoryItem,
    InventoryRepository, Recount, VariantKey,
};

/// Serializable image of the whole store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub guests: Vec<Guest>,
    #[serde(default)]
    pub inventory: Vec<InventoryItem>,
    #[serde(default)]
    pub checkins: Vec<CheckinRecord>,
    #[serde(default)]
    pub activity: Vec<ActivityLogEntry>,
}

// Items and check-in records share one lock: a recount reads the records and
// writes the counter with no writer in between.
#[derive(Default)]
struct LedgerTables {
    items: HashMap<InventoryId, InventoryItem>,
    variants: HashMap<VariantKey, InventoryId>,
    checkins: HashMap<CheckinId, CheckinRecord>,
}

impl LedgerTables {
    fn insert_item(&mut self, item: InventoryItem) -> Result<()> {
        if item.id.is_blank() {
            return Err(anyhow!("inventory item id is empty"));
        }
        if self.items.contains_key(&item.id) {
            return Err(anyhow!("inventory item '{}' already exists", item.id));
        }
        let key = item.variant_key();
        if let Some(existing) = self.variants.get(&key) {
            return Err(anyhow!(
                "variant '{}' already exists as item '{}'",
                item.display_name(),
                existing
            ));
        }
        self.variants.insert(key, item.id.clone());
        self.items.insert(item.id.clone(), item);
        Ok(())
    }

    fn distributed(&self, inventory_id: &InventoryId) -> i64 {
        self.checkins
            .values()
            .map(|record| record.quantity_of(inventory_id))
            .sum()
    }
}

#[derive(Default)]
pub struct MemoryStore {
    events: RwLock<HashMap<EventId, Event>>,
    guests: RwLock<HashMap<GuestId, Guest>>,
    ledger: RwLock<LedgerTables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a snapshot. Activity entries are left to the feed.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Result<Self> {
        let mut tables = LedgerTables::default();
        for item in snapshot.inventory {
            tables.insert_item(item)?;
        }
        tables.checkins = snapshot
            .checkins
            .into_iter()
            .map(|record| (record.id.clone(), record))
            .collect();
        Ok(Self {
            events: RwLock::new(
                snapshot
                    .events
                    .into_iter()
                    .map(|event| (event.id.clone(), event))
                    .collect(),
            ),
            guests: RwLock::new(
                snapshot
                    .guests
                    .into_iter()
                    .map(|guest| (guest.id.clone(), guest))
                    .collect(),
            ),
            ledger: RwLock::new(tables),
        })
    }

    pub async fn snapshot(&self) -> StoreSnapshot {
        let mut events = self.events.read().await.values().cloned().collect::<Vec<_>>();
        events.sort_by(|a, b| a.id.cmp(&b.id));
        let mut guests = self.guests.read().await.values().cloned().collect::<Vec<_>>();
        guests.sort_by(|a, b| a.id.cmp(&b.id));
        let ledger = self.ledger.read().await;
        let mut inventory = ledger.items.values().cloned().collect::<Vec<_>>();
        inventory.sort_by(|a, b| a.id.cmp(&b.id));
        let mut checkins = ledger.checkins.values().cloned().collect::<Vec<_>>();
        checkins.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        StoreSnapshot {
            events,
            guests,
            inventory,
            checkins,
            activity: Vec::new(),
        }
    }

    pub async fn upsert_event(&self, event: Event) {
        self.events.write().await.insert(event.id.clone(), event);
    }

    pub async fn list_events(&self) -> Vec<Event> {
        let mut events = self.events.read().await.values().cloned().collect::<Vec<_>>();
        events.sort_by(|a, b| a.id.cmp(&b.id));
        events
    }
}

#[async_trait]
impl EventDirectory for MemoryStore {
    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>> {
        Ok(self.events.read().await.get(id).cloned())
    }

    async fn find_children(&self, parent_event_id: &EventId) -> Result<Vec<Event>> {
        Ok(self
            .events
            .read()
            .await
            .values()
            .filter(|event| event.parent_event_id.as_ref() == Some(parent_event_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl GuestRepository for MemoryStore {
    async fn find_by_id(&self, id: &GuestId) -> Result<Option<Guest>> {
        Ok(self.guests.read().await.get(id).cloned())
    }

    async fn save(&self, guest: &Guest) -> Result<()> {
        if guest.id.is_blank() {
            return Err(anyhow!("guest id is empty"));
        }
        self.guests.write().await.insert(guest.id.clone(), guest.clone());
        Ok(())
    }
}

#[async_trait]
impl InventoryRepository for MemoryStore {
    async fn find_by_id(&self, id: &InventoryId) -> Result<Option<InventoryItem>> {
        Ok(self.ledger.read().await.items.get(id).cloned())
    }

    async fn find_many(&self, ids: &[InventoryId]) -> Result<Vec<InventoryItem>> {
        let ledger = self.ledger.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| ledger.items.get(id).cloned())
            .collect())
    }

    async fn list_pool(&self, pool_id: &EventId) -> Result<Vec<InventoryItem>> {
        let ledger = self.ledger.read().await;
        let mut items = ledger
            .items
            .values()
            .filter(|item| &item.event_id == pool_id)
            .cloned()
            .collect::<Vec<_>>();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(items)
    }

    async fn insert(&self, item: InventoryItem) -> Result<()> {
        self.ledger.write().await.insert_item(item)
    }

    async fn adjust(
        &self,
        id: &InventoryId,
        adjustment: InventoryAdjustment,
    ) -> Result<Option<InventoryItem>> {
        let mut ledger = self.ledger.write().await;
        let Some(item) = ledger.items.get_mut(id) else {
            return Ok(None);
        };
        item.apply_adjustment(&adjustment);
        Ok(Some(item.clone()))
    }

    async fn recount(
        &self,
        id: &InventoryId,
        performed_by: &ActorId,
        reason: Option<String>,
    ) -> Result<Option<Recount>> {
        let mut ledger = self.ledger.write().await;
        let distributed = ledger.distributed(id);
        let Some(item) = ledger.items.get_mut(id) else {
            return Ok(None);
        };
        let drift = item.recount_to(distributed, performed_by, reason, Utc::now());
        Ok(Some(Recount {
            item: item.clone(),
            distributed,
            drift,
        }))
    }

    async fn set_post_event_count(&self, id: &InventoryId, count: i64) -> Result<Option<InventoryItem>> {
        let mut ledger = self.ledger.write().await;
        let Some(item) = ledger.items.get_mut(id) else {
            return Ok(None);
        };
        item.post_event_count = Some(count);
        item.updated_at = Utc::now();
        Ok(Some(item.clone()))
    }
}

#[async_trait]
impl CheckinRepository for MemoryStore {
    async fn find_by_id(&self, id: &CheckinId) -> Result<Option<CheckinRecord>> {
        Ok(self.ledger.read().await.checkins.get(id).cloned())
    }

    async fn find_by_guest_event(
        &self,
        guest_id: &GuestId,
        event_id: &EventId,
    ) -> Result<Option<CheckinRecord>> {
        Ok(self
            .ledger
            .read()
            .await
            .checkins
            .values()
            .filter(|record| &record.guest_id == guest_id && &record.event_id == event_id)
            .max_by_key(|record| record.created_at)
            .cloned())
    }

    async fn list_for_guest(&self, guest_id: &GuestId) -> Result<Vec<CheckinRecord>> {
        Ok(self
            .ledger
            .read()
            .await
            .checkins
            .values()
            .filter(|record| &record.guest_id == guest_id)
            .cloned()
            .collect())
    }

    async fn save(&self, record: &CheckinRecord) -> Result<()> {
        if record.id.is_blank() {
            return Err(anyhow!("check-in id is empty"));
        }
        self.ledger
            .write()
            .await
            .checkins
            .insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn delete(&self, id: &CheckinId) -> Result<bool> {
        Ok(self.ledger.write().await.checkins.remove(id).is_some())
    }

    async fn distributed_quantity(&self, inventory_id: &InventoryId) -> Result<i64> {
        Ok(self.ledger.read().await.distributed(inventory_id))
    }
}
