//! Player inventory - the viewer-owned item holdings that shop conditions
//! check and shop transactions mutate.
//!
//! Slots keep their order; removal consumes partial stacks across multiple
//! slots in slot order, which is the order the host runtime exposes them in.

use crate::item::{ItemStack, MaterialId};

/// A player's item holdings, keyed by slot index.
///
/// Unlike a menu surface, a player inventory has no size-granularity rule:
/// the host decides the capacity and this type just mirrors it.
#[derive(Clone, Debug)]
pub struct PlayerInventory {
    slots: Vec<Option<ItemStack>>,
}

impl PlayerInventory {
    /// Default capacity the host runtime gives every player.
    pub const DEFAULT_CAPACITY: usize = 36;

    /// Creates an empty inventory with the given number of slots.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    /// Returns the total number of slots.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Gets the stack at a slot, if the slot exists and is occupied.
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&ItemStack> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Overwrites a slot. Out-of-range slots are ignored.
    pub fn set(&mut self, slot: usize, stack: Option<ItemStack>) {
        if let Some(entry) = self.slots.get_mut(slot) {
            *entry = stack.filter(|s| !s.is_empty());
        }
    }

    /// Iterates occupied slots in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &ItemStack)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|stack| (i, stack)))
    }

    /// Counts the total number of items of a specific material.
    #[must_use]
    pub fn count_material(&self, material: MaterialId) -> u32 {
        self.iter()
            .filter(|(_, s)| s.material == material)
            .map(|(_, s)| s.count)
            .sum()
    }

    /// Counts the total number of items similar to `probe` (count ignored).
    #[must_use]
    pub fn count_similar(&self, probe: &ItemStack) -> u32 {
        self.iter()
            .filter(|(_, s)| s.is_similar(probe))
            .map(|(_, s)| s.count)
            .sum()
    }

    /// Adds a stack, first topping up similar stacks, then filling empty
    /// slots with chunks of at most `max_stack`.
    ///
    /// Returns whatever did not fit, chunked into stacks. An empty vec
    /// means everything was stored.
    #[must_use]
    pub fn add(&mut self, stack: ItemStack) -> Vec<ItemStack> {
        if stack.is_empty() {
            return Vec::new();
        }
        let max_stack = stack.max_stack.max(1);
        let mut remaining = stack.count;

        // Top up existing similar stacks first
        for slot in self.slots.iter_mut().flatten() {
            if remaining == 0 {
                break;
            }
            if slot.is_similar(&stack) && slot.count < max_stack {
                let can_add = (max_stack - slot.count).min(remaining);
                slot.count += can_add;
                remaining -= can_add;
            }
        }

        // Then fill empty slots
        for slot in &mut self.slots {
            if remaining == 0 {
                break;
            }
            if slot.is_none() {
                let chunk = remaining.min(max_stack);
                *slot = Some(stack.with_count(chunk));
                remaining -= chunk;
            }
        }

        let mut leftover = Vec::new();
        while remaining > 0 {
            let chunk = remaining.min(max_stack);
            leftover.push(stack.with_count(chunk));
            remaining -= chunk;
        }
        leftover
    }

    /// Removes up to `count` items of a material, consuming partial stacks
    /// across slots in slot order. Returns how many items were removed.
    pub fn remove_material(&mut self, material: MaterialId, count: u32) -> u32 {
        self.remove_where(count, |s| s.material == material)
    }

    /// Removes up to `count` items similar to `probe`, consuming partial
    /// stacks across slots in slot order. Returns how many items were removed.
    pub fn remove_similar(&mut self, probe: &ItemStack, count: u32) -> u32 {
        self.remove_where(count, |s| s.is_similar(probe))
    }

    fn remove_where(&mut self, count: u32, matches: impl Fn(&ItemStack) -> bool) -> u32 {
        let mut left = count;
        for slot in &mut self.slots {
            if left == 0 {
                break;
            }
            let Some(stack) = slot else { continue };
            if !matches(stack) {
                continue;
            }
            if stack.count > left {
                stack.count -= left;
                left = 0;
            } else {
                left -= stack.count;
                *slot = None;
            }
        }
        count - left
    }
}

impl Default for PlayerInventory {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_stacks_then_fills_empty() {
        let mut inv = PlayerInventory::new(4);
        inv.set(0, Some(ItemStack::new(1, 60)));
        let leftover = inv.add(ItemStack::new(1, 10));
        assert!(leftover.is_empty());
        // 4 topped up slot 0, 6 spilled into the first empty slot
        assert_eq!(inv.get(0).unwrap().count, 64);
        assert_eq!(inv.get(1).unwrap().count, 6);
    }

    #[test]
    fn test_add_overflow_returned() {
        let mut inv = PlayerInventory::new(1);
        let leftover = inv.add(ItemStack::new(1, 100));
        assert_eq!(inv.count_material(1), 64);
        assert_eq!(leftover.len(), 1);
        assert_eq!(leftover[0].count, 36);
    }

    #[test]
    fn test_remove_material_across_slots() {
        let mut inv = PlayerInventory::new(3);
        inv.set(0, Some(ItemStack::new(2, 10)));
        inv.set(2, Some(ItemStack::new(2, 10)));
        let removed = inv.remove_material(2, 15);
        assert_eq!(removed, 15);
        assert!(inv.get(0).is_none());
        assert_eq!(inv.get(2).unwrap().count, 5);
    }

    #[test]
    fn test_remove_shortfall_reports_partial() {
        let mut inv = PlayerInventory::new(2);
        inv.set(0, Some(ItemStack::new(2, 4)));
        let removed = inv.remove_material(2, 10);
        assert_eq!(removed, 4);
        assert_eq!(inv.count_material(2), 0);
    }

    #[test]
    fn test_remove_similar_leaves_dissimilar() {
        let mut inv = PlayerInventory::new(2);
        inv.set(0, Some(ItemStack::new(3, 5).named("Rare")));
        inv.set(1, Some(ItemStack::new(3, 5)));
        let removed = inv.remove_similar(&ItemStack::of(3).named("Rare"), 8);
        assert_eq!(removed, 5);
        assert_eq!(inv.get(1).unwrap().count, 5);
    }
}
