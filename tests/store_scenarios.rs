mod common;

use std::collections::HashSet;

use wish_matrix::{
    core::{
        services::{BudgetService, BudgetStatus, ViewService},
        Command, CommandOutcome, DragEvent, DropIgnored, DropOutcome, Session,
    },
    domain::{ItemDraft, ItemId, Quadrant},
    errors::{StoreError, ValidationError},
    init,
};

use common::{month, open_store, temp_base};

const KEY: &str = "wish_matrix_v2";

#[test]
fn added_items_get_unique_ids_and_start_unselected() {
    init();
    let base = temp_base();
    let mut store = open_store(&base, KEY);
    let feb = month("2026-02");

    let mut seen = HashSet::new();
    for (n, quad) in Quadrant::ALL.iter().cycle().take(20).enumerate() {
        let before = store.get_items(&feb).len();
        let item = store
            .add_item(&feb, &format!("Wish {n}"), (n as i64) * 1_000, *quad)
            .unwrap();
        assert!(seen.insert(item.id.clone()), "duplicate id {}", item.id);
        assert!(!item.selected);

        let items = store.get_items(&feb);
        assert_eq!(items.len(), before + 1);
        let stored: Vec<_> = items.iter().filter(|i| i.id == item.id).collect();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].name, format!("Wish {n}"));
        assert_eq!(stored[0].price, (n as u64) * 1_000);
        assert_eq!(stored[0].quad, *quad);
    }
}

#[test]
fn reassigning_to_unknown_tags_changes_nothing() {
    let base = temp_base();
    let mut store = open_store(&base, KEY);
    let feb = month("2026-02");
    let item = store.add_item(&feb, "Kettle", 6_000, Quadrant::Urgent).unwrap();

    for tag in ["", "iu", "X", "IUN", " I", "N "] {
        assert!(!store.reassign_quadrant(&feb, &item.id, tag));
        assert_eq!(store.item(&feb, &item.id), Some(&item));
    }
}

#[test]
fn clear_selected_is_idempotent() {
    let base = temp_base();
    let mut store = open_store(&base, KEY);
    let feb = month("2026-02");
    for name in ["A", "B", "C"] {
        let item = store.add_item(&feb, name, 100, Quadrant::Neither).unwrap();
        store.toggle_selected(&feb, &item.id, true);
    }

    store.clear_selected(&feb);
    let once = store.snapshot(&feb);
    store.clear_selected(&feb);
    assert_eq!(store.snapshot(&feb), once);
    assert!(once.items.iter().all(|item| !item.selected));
}

#[test]
fn reload_returns_identical_months_and_budgets() {
    let base = temp_base();
    let jan = month("2026-01");
    let feb = month("2026-02");
    let mar = month("2026-03");
    {
        let mut store = open_store(&base, KEY);
        let bike = store.add_item(&jan, "Bike", 30_000, Quadrant::Important).unwrap();
        store.toggle_selected(&jan, &bike.id, true);
        store.add_item(&feb, "Desk", 15_000, Quadrant::ImportantUrgent).unwrap();
        store.set_budget(&jan, Some(45_000));
        store.set_budget(&mar, Some(0));
    }

    let original = open_store(&base, KEY);
    let mut reloaded = open_store(&base, KEY);
    assert_eq!(reloaded.month_keys(), original.month_keys());
    for key in original.month_keys() {
        assert_eq!(reloaded.get_items(&key), original.items(&key));
        assert_eq!(reloaded.get_budget(&key), original.get_budget(&key));
    }
    assert_eq!(reloaded.get_budget(&mar), Some(0));
    assert_eq!(reloaded.get_budget(&feb), None);
    assert!(reloaded.get_items(&jan)[0].selected);
}

#[test]
fn zero_and_clamped_budget_ratios() {
    let base = temp_base();
    let mut store = open_store(&base, KEY);
    let feb = month("2026-02");

    let empty = BudgetService::progress(store.get_items(&feb), Some(0));
    assert_eq!(empty.ratio, 0.0);

    let item = store.add_item(&feb, "Book", 500, Quadrant::Neither).unwrap();
    store.toggle_selected(&feb, &item.id, true);
    let zero_budget = BudgetService::progress(store.get_items(&feb), Some(0));
    assert_eq!(zero_budget.ratio, 1.0);
    assert_eq!(zero_budget.percent, 100.0);

    store.clear_month(&feb);
    let item = store.add_item(&feb, "Chair", 2_000, Quadrant::Neither).unwrap();
    store.toggle_selected(&feb, &item.id, true);
    let over = BudgetService::progress(store.get_items(&feb), Some(1_000));
    assert_eq!(over.percent, 125.0);
    assert!(over.over);
    assert_eq!(over.status, BudgetStatus::Over { overage: 1_000 });
}

#[test]
fn deleting_down_to_empty_keeps_the_month() {
    let base = temp_base();
    let feb = month("2026-02");
    {
        let mut store = open_store(&base, KEY);
        let a = store.add_item(&feb, "A", 1, Quadrant::Neither).unwrap();
        let b = store.add_item(&feb, "B", 2, Quadrant::Neither).unwrap();
        store.delete_item(&feb, &a.id).unwrap();
        store.delete_item(&feb, &b.id).unwrap();
        assert!(store.get_items(&feb).is_empty());
        assert_eq!(store.get_budget(&feb), None);
    }

    let mut reopened = open_store(&base, KEY);
    assert_eq!(reopened.month_keys(), vec![feb.clone()]);
    assert!(reopened.get_items(&feb).is_empty());
    assert_eq!(reopened.get_budget(&feb), None);
}

#[test]
fn explicit_commands_on_missing_ids_fail_without_mutation() {
    let base = temp_base();
    let mut store = open_store(&base, KEY);
    let feb = month("2026-02");
    store.add_item(&feb, "Mug", 1_200, Quadrant::Neither).unwrap();
    let before = store.snapshot(&feb);
    let ghost = ItemId::new("ghost");

    let err = store
        .edit_item(&feb, &ghost, &ItemDraft::new("Mug", 1_000, "I"))
        .unwrap_err();
    assert_eq!(err, StoreError::NotFound(ghost.clone()));
    assert!(store.delete_item(&feb, &ghost).unwrap_err().is_not_found());
    assert!(!store.toggle_selected(&feb, &ghost, true));
    assert_eq!(store.snapshot(&feb), before);
}

#[test]
fn edits_validate_all_fields_before_writing() {
    let base = temp_base();
    let mut store = open_store(&base, KEY);
    let feb = month("2026-02");
    let item = store.add_item(&feb, "Phone", 80_000, Quadrant::Urgent).unwrap();

    let cases = [
        (ItemDraft::new("  ", 10, "I"), ValidationError::EmptyName),
        (ItemDraft::new("Phone", -1, "I"), ValidationError::InvalidPrice),
        (ItemDraft::new("Phone", 10, "Z"), ValidationError::InvalidQuadrant),
    ];
    for (draft, expected) in cases {
        assert_eq!(
            store.edit_item(&feb, &item.id, &draft).unwrap_err(),
            StoreError::Validation(expected)
        );
        assert_eq!(store.item(&feb, &item.id), Some(&item));
    }

    let edited = store
        .edit_item(&feb, &item.id, &ItemDraft::new(" Phone 2 ", 75_000, " iu "))
        .unwrap();
    assert_eq!(edited.name, "Phone 2");
    assert_eq!(edited.quad, Quadrant::ImportantUrgent);
}

#[test]
fn drop_falls_back_to_the_dragged_item() {
    let base = temp_base();
    let feb = month("2026-02");
    let mut session = Session::new(open_store(&base, KEY), feb.clone());
    let Ok(CommandOutcome::Added(x)) = session.dispatch(Command::AddItem {
        name: "Speaker".into(),
        price: 12_000,
        quad: Quadrant::Neither,
    }) else {
        panic!("add failed");
    };

    session
        .dispatch(Command::Drag(DragEvent::Start { item: x.id.clone() }))
        .unwrap();
    session
        .dispatch(Command::Drag(DragEvent::Over {
            target: "U".into(),
        }))
        .unwrap();
    let moved = session
        .dispatch(Command::Drag(DragEvent::Drop {
            target: "U".into(),
            payload: None,
        }))
        .unwrap();
    assert_eq!(
        moved,
        CommandOutcome::Drag(Some(DropOutcome::Moved {
            item: x.id.clone(),
            quad: Quadrant::Urgent
        }))
    );

    let before = session.snapshot();
    let ignored = session
        .dispatch(Command::Drag(DragEvent::Drop {
            target: "IU".into(),
            payload: None,
        }))
        .unwrap();
    assert_eq!(
        ignored,
        CommandOutcome::Drag(Some(DropOutcome::Ignored(DropIgnored::NoItem)))
    );
    assert_eq!(session.snapshot(), before);
    assert_eq!(session.view().bucket(Quadrant::Urgent)[0].id, x.id);
}

#[test]
fn camera_scenario_through_a_reloaded_store() {
    let base = temp_base();
    let feb = month("2026-02");
    {
        let mut store = open_store(&base, KEY);
        let camera = store.add_item(&feb, "Camera", 50_000, Quadrant::Important).unwrap();
        store.set_budget_text(&feb, "40,000");
        store.toggle_selected(&feb, &camera.id, true);
    }

    let store = open_store(&base, KEY);
    let snapshot = store.snapshot(&feb);
    let progress = BudgetService::progress_for(&snapshot);
    assert_eq!(progress.selected_sum, 50_000);
    assert_eq!(progress.remain, Some(-10_000));
    assert_eq!(progress.status, BudgetStatus::Over { overage: 10_000 });
    assert_eq!(progress.percent_display(), 125);

    let view = ViewService::build_for(&snapshot);
    assert_eq!(view.bucket(Quadrant::Important).len(), 1);
    assert_eq!(view.len(), 1);
}
