// ═══════════════════════════════════════════════════════════════════
// Ledger Tests: add / update / remove and the derived asset
// ═══════════════════════════════════════════════════════════════════

use balance_dashboard_core::errors::CoreError;
use balance_dashboard_core::models::ledger::Ledger;
use balance_dashboard_core::models::line_item::{
    ItemCollection, LineItem, LineItemPatch, CASH_FROM_FINANCING_ID, OTHER_DEBT_ID,
    PRIMARY_MORTGAGE_ID,
};
use balance_dashboard_core::models::settings::ItemDefaults;
use balance_dashboard_core::services::ledger_service::LedgerService;

fn ids(items: &[LineItem]) -> Vec<&str> {
    items.iter().map(|i| i.id.as_str()).collect()
}

fn defaults() -> ItemDefaults {
    ItemDefaults::new("New debt", 100_000, 1_000_000, "#F66380")
}

// ── Add ─────────────────────────────────────────────────────────────

mod add {
    use super::*;

    #[test]
    fn appends_with_defaults() {
        let svc = LedgerService::new();
        let mut ledger = Ledger::with_defaults();
        let items = svc.add_item(&mut ledger, ItemCollection::Liabilities, &defaults());
        assert_eq!(items.len(), 3);
        let added = items.last().unwrap();
        assert_eq!(added.name, "New debt");
        assert_eq!(added.value, 100_000);
        assert_eq!(added.max, 1_000_000);
        assert_eq!(added.color, "#F66380");
    }

    #[test]
    fn generated_id_carries_collection_prefix() {
        let svc = LedgerService::new();
        let mut ledger = Ledger::new();
        let items = svc.add_item(&mut ledger, ItemCollection::Income, &defaults());
        assert!(items[0].id.starts_with("income-"));
    }

    #[test]
    fn generated_ids_are_unique() {
        let svc = LedgerService::new();
        let mut ledger = Ledger::new();
        for _ in 0..50 {
            svc.add_item(&mut ledger, ItemCollection::Assets, &defaults());
        }
        let mut all = ids(&ledger.assets);
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 50);
    }

    #[test]
    fn preserves_existing_order() {
        let svc = LedgerService::new();
        let mut ledger = Ledger::with_defaults();
        let before: Vec<String> = ledger.assets.iter().map(|a| a.id.clone()).collect();
        svc.add_item(&mut ledger, ItemCollection::Assets, &defaults());
        let after: Vec<&str> = ids(&ledger.assets);
        assert_eq!(&after[..before.len()], before.iter().map(String::as_str).collect::<Vec<_>>().as_slice());
    }
}

// ── Update ──────────────────────────────────────────────────────────

mod update {
    use super::*;

    #[test]
    fn changes_name_and_value() {
        let svc = LedgerService::new();
        let mut ledger = Ledger::with_defaults();
        let patch = LineItemPatch::new().name("Cabin").value(3_500_000.0);
        svc.update_item(&mut ledger, ItemCollection::Assets, "asset-2", &patch);
        let item = ledger.find(ItemCollection::Assets, "asset-2").unwrap();
        assert_eq!(item.name, "Cabin");
        assert_eq!(item.value, 3_500_000);
    }

    #[test]
    fn name_only_leaves_value() {
        let svc = LedgerService::new();
        let mut ledger = Ledger::with_defaults();
        svc.update_item(
            &mut ledger,
            ItemCollection::Income,
            "income-1",
            &LineItemPatch::new().name(""),
        );
        let item = ledger.find(ItemCollection::Income, "income-1").unwrap();
        assert_eq!(item.name, "");
        assert_eq!(item.value, 1_500_000);
    }

    #[test]
    fn nan_value_becomes_zero() {
        let svc = LedgerService::new();
        let mut ledger = Ledger::with_defaults();
        svc.update_item(
            &mut ledger,
            ItemCollection::Assets,
            "asset-1",
            &LineItemPatch::new().value(f64::NAN),
        );
        assert_eq!(ledger.value_of(ItemCollection::Assets, "asset-1"), 0);
    }

    #[test]
    fn negative_value_becomes_zero() {
        let svc = LedgerService::new();
        let mut ledger = Ledger::with_defaults();
        svc.update_item(
            &mut ledger,
            ItemCollection::Assets,
            "asset-1",
            &LineItemPatch::new().value(-5.0),
        );
        assert_eq!(ledger.value_of(ItemCollection::Assets, "asset-1"), 0);
    }

    #[test]
    fn text_value_is_parsed() {
        let svc = LedgerService::new();
        let mut ledger = Ledger::with_defaults();
        svc.update_item(
            &mut ledger,
            ItemCollection::Assets,
            "asset-1",
            &LineItemPatch::new().value_text("2500000abc"),
        );
        assert_eq!(ledger.value_of(ItemCollection::Assets, "asset-1"), 2_500_000);
    }

    #[test]
    fn value_above_max_is_not_clamped() {
        let svc = LedgerService::new();
        let mut ledger = Ledger::with_defaults();
        svc.update_item(
            &mut ledger,
            ItemCollection::Income,
            "income-2",
            &LineItemPatch::new().value(9_000_000.0),
        );
        assert_eq!(ledger.value_of(ItemCollection::Income, "income-2"), 9_000_000);
    }

    #[test]
    fn unknown_id_is_noop() {
        let svc = LedgerService::new();
        let mut ledger = Ledger::with_defaults();
        let before = ledger.clone();
        svc.update_item(
            &mut ledger,
            ItemCollection::Assets,
            "asset-404",
            &LineItemPatch::new().value(1.0),
        );
        assert_eq!(ledger, before);
    }

    #[test]
    fn derived_asset_is_read_only() {
        let svc = LedgerService::new();
        let mut ledger = Ledger::with_defaults();
        svc.sync_derived_asset(&mut ledger);
        svc.update_item(
            &mut ledger,
            ItemCollection::Assets,
            CASH_FROM_FINANCING_ID,
            &LineItemPatch::new().name("Hacked").value(42.0),
        );
        let asset = ledger.find(ItemCollection::Assets, CASH_FROM_FINANCING_ID).unwrap();
        assert_eq!(asset.value, 1_000_000);
        assert_eq!(asset.name, "Cash from debt");
    }

    #[test]
    fn same_id_in_other_collection_is_untouched() {
        let svc = LedgerService::new();
        let mut ledger = Ledger::new();
        ledger.assets.push(LineItem::new("x", "A", 1, 10, "#000"));
        ledger.income.push(LineItem::new("x", "I", 2, 10, "#000"));
        svc.update_item(&mut ledger, ItemCollection::Income, "x", &LineItemPatch::new().value(7.0));
        assert_eq!(ledger.value_of(ItemCollection::Assets, "x"), 1);
        assert_eq!(ledger.value_of(ItemCollection::Income, "x"), 7);
    }
}

// ── Remove ──────────────────────────────────────────────────────────

mod remove {
    use super::*;

    #[test]
    fn removes_exactly_one_and_keeps_order() {
        let svc = LedgerService::new();
        let mut ledger = Ledger::with_defaults();
        svc.add_item(&mut ledger, ItemCollection::Liabilities, &defaults());
        let extra_id = ledger.liabilities[2].id.clone();
        let before = ledger.liabilities.clone();

        let after = svc.remove_item(&mut ledger, ItemCollection::Liabilities, OTHER_DEBT_ID);

        assert_eq!(after.len(), before.len() - 1);
        assert_eq!(ids(after), vec![PRIMARY_MORTGAGE_ID, extra_id.as_str()]);
        assert_eq!(after[0], before[0]);
        assert_eq!(after[1], before[2]);
    }

    #[test]
    fn unknown_id_is_noop() {
        let svc = LedgerService::new();
        let mut ledger = Ledger::with_defaults();
        let before = ledger.clone();
        svc.remove_item(&mut ledger, ItemCollection::Liabilities, "liability-404");
        assert_eq!(ledger, before);
    }

    #[test]
    fn derived_asset_cannot_be_removed() {
        let svc = LedgerService::new();
        let mut ledger = Ledger::with_defaults();
        svc.remove_item(&mut ledger, ItemCollection::Assets, CASH_FROM_FINANCING_ID);
        assert!(ledger.find(ItemCollection::Assets, CASH_FROM_FINANCING_ID).is_some());
    }

    #[test]
    fn primary_mortgage_can_be_removed() {
        let svc = LedgerService::new();
        let mut ledger = Ledger::with_defaults();
        svc.remove_item(&mut ledger, ItemCollection::Liabilities, PRIMARY_MORTGAGE_ID);
        assert_eq!(ledger.value_of(ItemCollection::Liabilities, PRIMARY_MORTGAGE_ID), 0);
    }
}

// ── Derived asset sync ──────────────────────────────────────────────

mod sync {
    use super::*;

    #[test]
    fn mirrors_other_debt_value() {
        let svc = LedgerService::new();
        let mut ledger = Ledger::with_defaults();
        svc.update_item(
            &mut ledger,
            ItemCollection::Liabilities,
            OTHER_DEBT_ID,
            &LineItemPatch::new().value(750_000.0),
        );
        assert!(svc.sync_derived_asset(&mut ledger));
        assert_eq!(ledger.value_of(ItemCollection::Assets, CASH_FROM_FINANCING_ID), 750_000);
    }

    #[test]
    fn ignores_own_max() {
        let svc = LedgerService::new();
        let mut ledger = Ledger::with_defaults();
        ledger.liabilities[1].value = 9_000_000; // derived max is 5 000 000
        svc.sync_derived_asset(&mut ledger);
        assert_eq!(ledger.value_of(ItemCollection::Assets, CASH_FROM_FINANCING_ID), 9_000_000);
    }

    #[test]
    fn missing_liability_counts_as_zero() {
        let svc = LedgerService::new();
        let mut ledger = Ledger::with_defaults();
        svc.sync_derived_asset(&mut ledger);
        svc.remove_item(&mut ledger, ItemCollection::Liabilities, OTHER_DEBT_ID);
        svc.sync_derived_asset(&mut ledger);
        assert_eq!(ledger.value_of(ItemCollection::Assets, CASH_FROM_FINANCING_ID), 0);
    }

    #[test]
    fn missing_asset_is_tolerated() {
        let svc = LedgerService::new();
        let mut ledger = Ledger::with_defaults();
        ledger.assets.retain(|a| a.id != CASH_FROM_FINANCING_ID);
        assert!(!svc.sync_derived_asset(&mut ledger));
    }

    #[test]
    fn second_sync_reports_no_change() {
        let svc = LedgerService::new();
        let mut ledger = Ledger::with_defaults();
        svc.sync_derived_asset(&mut ledger);
        assert!(!svc.sync_derived_asset(&mut ledger));
    }
}

// ── Validation ──────────────────────────────────────────────────────

mod validation {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(LedgerService::new().validate(&Ledger::with_defaults()).is_ok());
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let mut ledger = Ledger::with_defaults();
        ledger.assets.push(LineItem::new("asset-1", "Dup", 0, 1, "#000"));
        let err = LedgerService::new().validate(&ledger).unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(ref m) if m.contains("asset-1")));
    }

    #[test]
    fn empty_id_is_rejected() {
        let mut ledger = Ledger::new();
        ledger.income.push(LineItem::new("  ", "Blank", 0, 1, "#000"));
        assert!(matches!(
            LedgerService::new().validate(&ledger),
            Err(CoreError::ValidationError(_))
        ));
    }

    #[test]
    fn same_id_across_collections_is_allowed() {
        let mut ledger = Ledger::new();
        ledger.assets.push(LineItem::new("x", "A", 0, 1, "#000"));
        ledger.liabilities.push(LineItem::new("x", "L", 0, 1, "#000"));
        assert!(LedgerService::new().validate(&ledger).is_ok());
    }
}
