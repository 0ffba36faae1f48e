use serde::{Deserialize, Serialize};

use super::line_item::{
    ItemCollection, LineItem, CASH_FROM_FINANCING_ID, OTHER_DEBT_ID, PRIMARY_MORTGAGE_ID,
};

/// The three ordered line-item collections of one dashboard session.
///
/// Insertion order is display order. Ids are unique per collection, but the
/// same id may appear in two different collections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    pub assets: Vec<LineItem>,

    #[serde(default)]
    pub liabilities: Vec<LineItem>,

    #[serde(default)]
    pub income: Vec<LineItem>,
}

impl Ledger {
    /// An empty ledger with no items at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// The starting state of a fresh dashboard.
    pub fn with_defaults() -> Self {
        Self {
            assets: vec![
                LineItem::new("asset-1", "Cash", 2_000_000, 10_000_000, "#002359"),
                LineItem::new("asset-2", "Real estate", 15_000_000, 50_000_000, "#12337E"),
                LineItem::new("asset-3", "Investments", 8_000_000, 30_000_000, "#1E4B8B"),
                LineItem::new(CASH_FROM_FINANCING_ID, "Cash from debt", 0, 5_000_000, "#447DF7"),
            ],
            liabilities: vec![
                LineItem::new(PRIMARY_MORTGAGE_ID, "Mortgage", 10_000_000, 20_000_000, "#D9576F"),
                LineItem::new(OTHER_DEBT_ID, "Other debt", 1_000_000, 5_000_000, "#F66380"),
            ],
            income: vec![
                LineItem::new("income-1", "Salary", 1_500_000, 5_000_000, "#52CC7B"),
                LineItem::new("income-2", "Dividends", 0, 1_000_000, "#83C48E"),
                LineItem::new("income-3", "Other income", 0, 1_000_000, "#A5D6A7"),
            ],
        }
    }

    pub fn collection(&self, kind: ItemCollection) -> &[LineItem] {
        match kind {
            ItemCollection::Assets => &self.assets,
            ItemCollection::Liabilities => &self.liabilities,
            ItemCollection::Income => &self.income,
        }
    }

    pub fn collection_mut(&mut self, kind: ItemCollection) -> &mut Vec<LineItem> {
        match kind {
            ItemCollection::Assets => &mut self.assets,
            ItemCollection::Liabilities => &mut self.liabilities,
            ItemCollection::Income => &mut self.income,
        }
    }

    pub fn find(&self, kind: ItemCollection, id: &str) -> Option<&LineItem> {
        self.collection(kind).iter().find(|item| item.id == id)
    }

    /// Value of the item with `id`, or 0 when it is absent.
    pub fn value_of(&self, kind: ItemCollection, id: &str) -> u64 {
        value_of(self.collection(kind), id)
    }

    /// Total number of items across all three collections.
    pub fn item_count(&self) -> usize {
        self.assets.len() + self.liabilities.len() + self.income.len()
    }
}

/// Value of the item with `id` in `items`, or 0 when it is absent.
pub fn value_of(items: &[LineItem], id: &str) -> u64 {
    items
        .iter()
        .find(|item| item.id == id)
        .map(|item| item.value)
        .unwrap_or(0)
}
