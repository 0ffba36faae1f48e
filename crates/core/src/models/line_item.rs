use serde::{Deserialize, Serialize};

use crate::format::{coerce_value, parse_value};

/// Id of the liability that is fully amortized (the primary mortgage).
pub const PRIMARY_MORTGAGE_ID: &str = "liability-1";

/// Id of the liability mirrored into the cash-from-financing asset.
pub const OTHER_DEBT_ID: &str = "liability-2";

/// Id of the derived asset whose value always equals the other-debt liability.
pub const CASH_FROM_FINANCING_ID: &str = "asset-fin-cash";

/// Which of the three independent collections a line item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCollection {
    Assets,
    Liabilities,
    Income,
}

impl ItemCollection {
    /// Prefix used when generating fresh ids, e.g. `asset-…`.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            ItemCollection::Assets => "asset",
            ItemCollection::Liabilities => "liability",
            ItemCollection::Income => "income",
        }
    }
}

impl std::fmt::Display for ItemCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemCollection::Assets => write!(f, "Assets"),
            ItemCollection::Liabilities => write!(f, "Liabilities"),
            ItemCollection::Income => write!(f, "Income"),
        }
    }
}

/// One named, valued entry in the assets, liabilities or income collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Stable identifier, unique within its collection
    pub id: String,

    /// User-editable label (may be empty)
    pub name: String,

    /// Whole kroner, never negative
    pub value: u64,

    /// Slider upper bound. Informational only, `value` is never clamped to it.
    pub max: u64,

    /// Display colour hint (e.g. "#002359")
    pub color: String,
}

impl LineItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        value: u64,
        max: u64,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            value,
            max,
            color: color.into(),
        }
    }

    /// Whether this is the derived cash-from-financing asset.
    pub fn is_derived(&self) -> bool {
        self.id == CASH_FROM_FINANCING_ID
    }
}

/// A partial edit of a line item. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItemPatch {
    #[serde(default)]
    pub name: Option<String>,

    /// Raw control value; coerced with [`coerce_value`] when applied.
    #[serde(default)]
    pub value: Option<f64>,
}

impl LineItemPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    /// Set the value from free-text input (parsed like a slider's string value).
    pub fn value_text(mut self, text: &str) -> Self {
        self.value = Some(parse_value(text) as f64);
        self
    }

    /// Apply this patch to an item in place.
    pub fn apply_to(&self, item: &mut LineItem) {
        if let Some(name) = &self.name {
            item.name = name.clone();
        }
        if let Some(raw) = self.value {
            item.value = coerce_value(raw);
        }
    }
}
