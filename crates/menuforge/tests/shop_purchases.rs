//! Shop purchases driven through real clicks: conditions gate, transactions
//! apply in order, and a transaction failing after its conditions passed is
//! fatal.

use std::sync::Arc;

use menuforge::{
    shop_item, GrantItemsTransaction, MaterialCondition, MenuBuilder, MenuRegistry,
    ShopTransaction, TakeItemsTransaction, TakeMaterialTransaction,
};
use menuforge_host::{
    ClickEvent, ItemStack, MenuHost, MockHost, MockScheduler, PlayerInventory, ViewerId,
};

const EMERALD: u32 = 388;
const SWORD: u32 = 276;

fn shop_menu(conditions: Vec<Arc<dyn menuforge::ShopCondition>>, transactions: Vec<Arc<dyn ShopTransaction>>) -> Arc<menuforge::AnyMenu> {
    MenuBuilder::new("Blacksmith")
        .size(9)
        .unwrap()
        .item(4, shop_item(ItemStack::of(SWORD), conditions, transactions))
        .unwrap()
        .build()
        .unwrap()
        .into_shared()
}

fn setup(emeralds: u32) -> (MenuRegistry, MockHost, MockScheduler, ViewerId) {
    let mut host = MockHost::new();
    let viewer = ViewerId::new(1);
    let mut inventory = PlayerInventory::new(36);
    if emeralds > 0 {
        inventory.add(ItemStack::new(EMERALD, emeralds));
    }
    host.insert_inventory(viewer, inventory);
    (MenuRegistry::new(), host, MockScheduler::new(), viewer)
}

fn click_shop_slot(
    registry: &mut MenuRegistry,
    host: &mut MockHost,
    scheduler: &mut MockScheduler,
    viewer: ViewerId,
) -> ClickEvent {
    let mut event = ClickEvent::new(viewer, 4, Some(ItemStack::of(SWORD)));
    registry.handle_click(&mut event, host, scheduler);
    event
}

#[test]
fn purchase_takes_payment_and_grants_goods() {
    let menu = shop_menu(
        vec![Arc::new(MaterialCondition::new(EMERALD, 10))],
        vec![
            Arc::new(TakeMaterialTransaction::new(EMERALD, 10)),
            Arc::new(GrantItemsTransaction::new(vec![ItemStack::of(SWORD)], true)),
        ],
    );
    let (mut registry, mut host, mut scheduler, viewer) = setup(25);
    registry.open(viewer, menu, &mut host, &mut scheduler).unwrap();

    let event = click_shop_slot(&mut registry, &mut host, &mut scheduler, viewer);

    // Shop icons are never movable.
    assert!(event.is_cancelled());
    let inventory = host.inventory(viewer).unwrap();
    assert_eq!(inventory.count_material(EMERALD), 15);
    assert_eq!(inventory.count_material(SWORD), 1);
}

#[test]
fn failed_condition_aborts_with_no_side_effects() {
    let menu = shop_menu(
        vec![Arc::new(MaterialCondition::new(EMERALD, 10))],
        vec![
            Arc::new(TakeMaterialTransaction::new(EMERALD, 10)),
            Arc::new(GrantItemsTransaction::new(vec![ItemStack::of(SWORD)], true)),
        ],
    );
    let (mut registry, mut host, mut scheduler, viewer) = setup(9);
    registry.open(viewer, menu, &mut host, &mut scheduler).unwrap();

    let event = click_shop_slot(&mut registry, &mut host, &mut scheduler, viewer);

    assert!(event.is_cancelled());
    let inventory = host.inventory(viewer).unwrap();
    assert_eq!(inventory.count_material(EMERALD), 9);
    assert_eq!(inventory.count_material(SWORD), 0);
    assert!(host.dropped().is_empty());
}

#[test]
fn later_condition_failing_prevents_all_transactions() {
    let menu = shop_menu(
        vec![
            Arc::new(MaterialCondition::new(EMERALD, 5)),
            Arc::new(MaterialCondition::new(SWORD, 1)),
        ],
        vec![Arc::new(TakeMaterialTransaction::new(EMERALD, 5))],
    );
    let (mut registry, mut host, mut scheduler, viewer) = setup(20);
    registry.open(viewer, menu, &mut host, &mut scheduler).unwrap();

    click_shop_slot(&mut registry, &mut host, &mut scheduler, viewer);

    assert_eq!(host.inventory(viewer).unwrap().count_material(EMERALD), 20);
}

#[test]
fn grant_overflow_lands_at_the_viewers_feet() {
    let menu = shop_menu(
        Vec::new(),
        vec![Arc::new(GrantItemsTransaction::new(
            vec![ItemStack::new(EMERALD, 64); 40],
            true,
        ))],
    );
    let (mut registry, mut host, mut scheduler, viewer) = setup(0);
    registry.open(viewer, menu, &mut host, &mut scheduler).unwrap();

    click_shop_slot(&mut registry, &mut host, &mut scheduler, viewer);

    // 36 slots hold 36 stacks; the remaining 4 are dropped.
    assert_eq!(host.dropped().len(), 4);
    assert_eq!(host.inventory(viewer).unwrap().count_material(EMERALD), 36 * 64);
}

#[test]
#[should_panic(expected = "shop transaction failed after conditions passed")]
fn transaction_failure_after_conditions_is_fatal() {
    // The condition vouches for emeralds, then the transaction demands a
    // material the viewer does not hold.
    let menu = shop_menu(
        vec![Arc::new(MaterialCondition::new(EMERALD, 5))],
        vec![Arc::new(TakeItemsTransaction::new(ItemStack::of(SWORD), 1))],
    );
    let (mut registry, mut host, mut scheduler, viewer) = setup(20);
    registry.open(viewer, menu, &mut host, &mut scheduler).unwrap();

    click_shop_slot(&mut registry, &mut host, &mut scheduler, viewer);
}
