//! Shop items: gated, transactional menu clicks.
//!
//! A shop item runs its conditions in order; any failure silently aborts
//! the purchase. Once every condition has passed the transactions run, and
//! from that point on a failure is a consistency violation: conditions
//! vouched for the viewer's state, some transactions may already have
//! applied, and there is no rollback. That failure panics.

use std::sync::Arc;

use menuforge_host::{ClickEvent, ItemStack, MenuHost, ViewerId};
use tracing::debug;

use crate::action::{Action, Directive};
use crate::item::{InteractionPolicy, MenuItem};
use crate::menu::AnyMenu;

/// A purchase precondition, checked before any transaction runs.
///
/// Conditions only read state. Returning `false` aborts the purchase
/// without side effects.
pub trait ShopCondition: Send + Sync {
    /// Returns true when the viewer satisfies this condition.
    fn check(&self, viewer: ViewerId, menu: &AnyMenu, host: &dyn MenuHost) -> bool;
}

/// One step of a purchase, run only after every condition passed.
///
/// Returning `false` signals the transaction could not apply; the shop
/// treats that as a fatal consistency violation.
pub trait ShopTransaction: Send + Sync {
    /// Applies this step of the purchase to the viewer.
    fn apply(&self, viewer: ViewerId, menu: &AnyMenu, host: &mut dyn MenuHost) -> bool;
}

struct ShopAction {
    material: u32,
    conditions: Vec<Arc<dyn ShopCondition>>,
    transactions: Vec<Arc<dyn ShopTransaction>>,
}

impl Action for ShopAction {
    fn execute(
        &self,
        event: &mut ClickEvent,
        menu: &AnyMenu,
        host: &mut dyn MenuHost,
    ) -> Directive {
        let viewer = event.viewer;
        for condition in &self.conditions {
            if !condition.check(viewer, menu, &*host) {
                debug!(%viewer, material = self.material, "purchase condition failed");
                return Directive::Continue;
            }
        }
        for transaction in &self.transactions {
            assert!(
                transaction.apply(viewer, menu, host),
                "shop transaction failed after conditions passed \
                 (material {}, {viewer}, menu {:?})",
                self.material,
                menu.title()
            );
        }
        debug!(%viewer, material = self.material, "purchase completed");
        Directive::Continue
    }
}

/// Builds a shop [`MenuItem`]: interactions blocked, with a single action
/// running `conditions` then `transactions` on every click.
#[must_use]
pub fn shop_item(
    icon: ItemStack,
    conditions: Vec<Arc<dyn ShopCondition>>,
    transactions: Vec<Arc<dyn ShopTransaction>>,
) -> MenuItem {
    let material = icon.material;
    let mut item = MenuItem::with_policy(icon, InteractionPolicy::Blocked);
    item.add_action(Arc::new(ShopAction {
        material,
        conditions,
        transactions,
    }));
    item
}

/// Requires the viewer to hold at least `count` items similar to a probe
/// stack (same material and display name).
#[derive(Debug, Clone)]
pub struct ItemCondition {
    probe: ItemStack,
    count: u32,
}

impl ItemCondition {
    /// Creates the condition.
    #[must_use]
    pub fn new(probe: ItemStack, count: u32) -> Self {
        Self { probe, count }
    }
}

impl ShopCondition for ItemCondition {
    fn check(&self, viewer: ViewerId, _menu: &AnyMenu, host: &dyn MenuHost) -> bool {
        host.inventory(viewer)
            .is_some_and(|inv| inv.count_similar(&self.probe) >= self.count)
    }
}

/// Requires the viewer to hold at least `count` items of a material,
/// regardless of display name.
#[derive(Debug, Clone, Copy)]
pub struct MaterialCondition {
    material: u32,
    count: u32,
}

impl MaterialCondition {
    /// Creates the condition.
    #[must_use]
    pub const fn new(material: u32, count: u32) -> Self {
        Self { material, count }
    }
}

impl ShopCondition for MaterialCondition {
    fn check(&self, viewer: ViewerId, _menu: &AnyMenu, host: &dyn MenuHost) -> bool {
        host.inventory(viewer)
            .is_some_and(|inv| inv.count_material(self.material) >= self.count)
    }
}

/// Gives the viewer a set of stacks.
///
/// Whatever does not fit is dropped at the viewer's feet when
/// `drop_on_fail` is set; otherwise leftover makes the transaction fail.
#[derive(Debug, Clone)]
pub struct GrantItemsTransaction {
    items: Vec<ItemStack>,
    drop_on_fail: bool,
}

impl GrantItemsTransaction {
    /// Creates the transaction.
    #[must_use]
    pub fn new(items: Vec<ItemStack>, drop_on_fail: bool) -> Self {
        Self { items, drop_on_fail }
    }
}

impl ShopTransaction for GrantItemsTransaction {
    fn apply(&self, viewer: ViewerId, _menu: &AnyMenu, host: &mut dyn MenuHost) -> bool {
        let Some(inventory) = host.inventory_mut(viewer) else {
            return false;
        };
        let mut leftover = Vec::new();
        for stack in &self.items {
            leftover.extend(inventory.add(stack.clone()));
        }
        if leftover.is_empty() {
            return true;
        }
        if !self.drop_on_fail {
            return false;
        }
        for stack in leftover {
            host.drop_at_feet(viewer, stack);
        }
        true
    }
}

/// Takes a number of items similar to a probe stack from the viewer.
///
/// If the viewer turns out to hold fewer than requested, whatever was
/// removed is put back and the transaction fails.
#[derive(Debug, Clone)]
pub struct TakeItemsTransaction {
    probe: ItemStack,
    count: u32,
}

impl TakeItemsTransaction {
    /// Creates the transaction.
    #[must_use]
    pub fn new(probe: ItemStack, count: u32) -> Self {
        Self { probe, count }
    }
}

impl ShopTransaction for TakeItemsTransaction {
    fn apply(&self, viewer: ViewerId, _menu: &AnyMenu, host: &mut dyn MenuHost) -> bool {
        let Some(inventory) = host.inventory_mut(viewer) else {
            return false;
        };
        let removed = inventory.remove_similar(&self.probe, self.count);
        if removed == self.count {
            return true;
        }
        if removed > 0 {
            inventory.add(self.probe.clone().with_count(removed));
        }
        false
    }
}

/// Takes a number of items of a material from the viewer.
///
/// Carries its own precondition: holding fewer than requested makes the
/// transaction fail cleanly before anything is removed. Removing less than
/// the verified count after that check passed is a consistency violation
/// and panics.
#[derive(Debug, Clone, Copy)]
pub struct TakeMaterialTransaction {
    material: u32,
    count: u32,
}

impl TakeMaterialTransaction {
    /// Creates the transaction.
    #[must_use]
    pub const fn new(material: u32, count: u32) -> Self {
        Self { material, count }
    }
}

impl ShopTransaction for TakeMaterialTransaction {
    fn apply(&self, viewer: ViewerId, _menu: &AnyMenu, host: &mut dyn MenuHost) -> bool {
        let Some(inventory) = host.inventory_mut(viewer) else {
            return false;
        };
        if inventory.count_material(self.material) < self.count {
            return false;
        }
        let removed = inventory.remove_material(self.material, self.count);
        assert!(
            removed >= self.count,
            "inventory removed {removed} of material {} after verifying {} were held",
            self.material,
            self.count
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menuforge_host::{MockHost, PlayerInventory};
    use std::collections::HashMap;

    fn empty_menu() -> Arc<AnyMenu> {
        crate::menu::Menu::new("Shop", Some(9), HashMap::new(), Vec::new(), true, None, None)
            .unwrap()
            .into_shared()
    }

    fn host_with(viewer: ViewerId, stacks: &[ItemStack]) -> MockHost {
        let mut inventory = PlayerInventory::new(36);
        for stack in stacks {
            inventory.add(stack.clone());
        }
        let mut host = MockHost::new();
        host.insert_inventory(viewer, inventory);
        host
    }

    #[test]
    fn test_material_condition_threshold() {
        let viewer = ViewerId::new(1);
        let host = host_with(viewer, &[ItemStack::new(5, 10)]);
        let menu = empty_menu();
        assert!(MaterialCondition::new(5, 10).check(viewer, &menu, &host));
        assert!(!MaterialCondition::new(5, 11).check(viewer, &menu, &host));
    }

    #[test]
    fn test_item_condition_matches_display_name() {
        let viewer = ViewerId::new(1);
        let host = host_with(viewer, &[ItemStack::new(5, 4).named("Ruby")]);
        let menu = empty_menu();
        assert!(
            ItemCondition::new(ItemStack::new(5, 1).named("Ruby"), 4).check(viewer, &menu, &host)
        );
        assert!(!ItemCondition::new(ItemStack::of(5), 1).check(viewer, &menu, &host));
    }

    #[test]
    fn test_grant_drops_leftover_when_allowed() {
        let viewer = ViewerId::new(1);
        let mut host = MockHost::new();
        let mut inventory = PlayerInventory::new(1);
        inventory.set(0, Some(ItemStack::new(1, 64)));
        host.insert_inventory(viewer, inventory);
        let menu = empty_menu();

        let grant = GrantItemsTransaction::new(vec![ItemStack::new(2, 5)], true);
        assert!(grant.apply(viewer, &menu, &mut host));
        assert_eq!(host.dropped().len(), 1);
        assert_eq!(host.dropped()[0].1, ItemStack::new(2, 5));

        let strict = GrantItemsTransaction::new(vec![ItemStack::new(3, 5)], false);
        assert!(!strict.apply(viewer, &menu, &mut host));
    }

    #[test]
    fn test_take_items_refunds_on_shortfall() {
        let viewer = ViewerId::new(1);
        let mut host = host_with(viewer, &[ItemStack::new(5, 3)]);
        let menu = empty_menu();

        let take = TakeItemsTransaction::new(ItemStack::of(5), 10);
        assert!(!take.apply(viewer, &menu, &mut host));
        // The partial removal was put back.
        assert_eq!(host.inventory(viewer).unwrap().count_material(5), 3);
    }

    #[test]
    fn test_take_material_checks_before_removing() {
        let viewer = ViewerId::new(1);
        let mut host = host_with(viewer, &[ItemStack::new(5, 3)]);
        let menu = empty_menu();

        let take = TakeMaterialTransaction::new(5, 10);
        assert!(!take.apply(viewer, &menu, &mut host));
        assert_eq!(host.inventory(viewer).unwrap().count_material(5), 3);

        let take = TakeMaterialTransaction::new(5, 3);
        assert!(take.apply(viewer, &menu, &mut host));
        assert_eq!(host.inventory(viewer).unwrap().count_material(5), 0);
    }
}
