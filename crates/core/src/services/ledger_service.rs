use std::collections::HashSet;

use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::ledger::{value_of, Ledger};
use crate::models::line_item::{
    ItemCollection, LineItem, LineItemPatch, CASH_FROM_FINANCING_ID, OTHER_DEBT_ID,
};
use crate::models::settings::ItemDefaults;

/// Manages the three line-item collections: add, update, remove, and the
/// derived cash-from-financing asset.
///
/// Pure business logic with no I/O. Every operation hands back the updated
/// collection so the caller can re-render it and request a recompute.
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    /// Append a new item built from `defaults` with a freshly generated id.
    pub fn add_item<'a>(
        &self,
        ledger: &'a mut Ledger,
        kind: ItemCollection,
        defaults: &ItemDefaults,
    ) -> &'a [LineItem] {
        let id = Self::generate_id(ledger.collection(kind), kind);
        tracing::trace!(collection = %kind, id = %id, "adding line item");
        let items = ledger.collection_mut(kind);
        items.push(LineItem::new(
            id,
            defaults.name.clone(),
            defaults.value,
            defaults.max,
            defaults.color.clone(),
        ));
        items
    }

    /// Apply `patch` to the item with `id`. Absent ids are a no-op.
    ///
    /// The cash-from-financing asset is read-only: edits to it are ignored,
    /// its value is owned by [`LedgerService::sync_derived_asset`].
    pub fn update_item<'a>(
        &self,
        ledger: &'a mut Ledger,
        kind: ItemCollection,
        id: &str,
        patch: &LineItemPatch,
    ) -> &'a [LineItem] {
        if kind == ItemCollection::Assets && id == CASH_FROM_FINANCING_ID {
            tracing::warn!(id, "ignoring edit of the derived cash-from-financing asset");
            return ledger.collection(kind);
        }
        let items = ledger.collection_mut(kind);
        match items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                patch.apply_to(item);
                tracing::trace!(collection = %kind, id, value = item.value, "updated line item");
            }
            None => tracing::trace!(collection = %kind, id, "update of unknown line item ignored"),
        }
        items
    }

    /// Remove the item with `id`, keeping the order of the rest. Absent ids
    /// are a no-op, and so is removing the derived asset.
    pub fn remove_item<'a>(
        &self,
        ledger: &'a mut Ledger,
        kind: ItemCollection,
        id: &str,
    ) -> &'a [LineItem] {
        if kind == ItemCollection::Assets && id == CASH_FROM_FINANCING_ID {
            tracing::warn!(id, "ignoring removal of the derived cash-from-financing asset");
            return ledger.collection(kind);
        }
        let items = ledger.collection_mut(kind);
        let before = items.len();
        items.retain(|item| item.id != id);
        tracing::trace!(collection = %kind, id, removed = before - items.len(), "removed line item");
        items
    }

    /// Force the derived asset's value to the other-debt liability's value.
    ///
    /// Runs unconditionally at the start of every recompute. A missing
    /// liability counts as 0; a missing asset leaves nothing to sync.
    /// Returns `true` when the stored value changed.
    pub fn sync_derived_asset(&self, ledger: &mut Ledger) -> bool {
        let mirrored = Self::derived_asset_value(&ledger.liabilities);
        match ledger
            .assets
            .iter_mut()
            .find(|item| item.id == CASH_FROM_FINANCING_ID)
        {
            Some(asset) if asset.value != mirrored => {
                asset.value = mirrored;
                true
            }
            _ => false,
        }
    }

    /// The value the derived asset must carry, given the current liabilities.
    pub fn derived_asset_value(liabilities: &[LineItem]) -> u64 {
        value_of(liabilities, OTHER_DEBT_ID)
    }

    /// Check that ids are non-empty and unique within each collection.
    pub fn validate(&self, ledger: &Ledger) -> Result<(), CoreError> {
        for kind in [
            ItemCollection::Assets,
            ItemCollection::Liabilities,
            ItemCollection::Income,
        ] {
            let mut seen = HashSet::new();
            for item in ledger.collection(kind) {
                if item.id.trim().is_empty() {
                    return Err(CoreError::ValidationError(format!(
                        "{kind} contain an item with an empty id"
                    )));
                }
                if !seen.insert(item.id.as_str()) {
                    return Err(CoreError::ValidationError(format!(
                        "Duplicate id '{}' in {kind}",
                        item.id
                    )));
                }
            }
        }
        Ok(())
    }

    /// Generate an id like `asset-3f2c…` that is not yet used in `items`.
    fn generate_id(items: &[LineItem], kind: ItemCollection) -> String {
        loop {
            let id = format!("{}-{}", kind.id_prefix(), Uuid::new_v4().simple());
            if !items.iter().any(|item| item.id == id) {
                return id;
            }
        }
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}
