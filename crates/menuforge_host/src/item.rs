//! Item stacks - the visual payload displayed in menu slots and held in
//! player inventories.

use serde::{Deserialize, Serialize};

/// Unique identifier for an item material.
pub type MaterialId = u32;

/// The empty material. Slots holding it count as empty.
pub const MATERIAL_AIR: MaterialId = 0;

/// A stack of items: what a menu slot displays and a player inventory holds.
///
/// Two stacks are *similar* when they agree on everything except count.
/// Shop conditions and transactions match on similarity or on raw material.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// The material this stack is made of.
    pub material: MaterialId,
    /// Number of items in the stack.
    pub count: u32,
    /// Display name override, if any.
    pub display_name: Option<String>,
    /// Maximum stack size for this material.
    pub max_stack: u32,
}

impl ItemStack {
    /// Default maximum stack size.
    pub const DEFAULT_MAX_STACK: u32 = 64;

    /// Creates a stack of `count` items of a material.
    #[must_use]
    pub fn new(material: MaterialId, count: u32) -> Self {
        Self {
            material,
            count,
            display_name: None,
            max_stack: Self::DEFAULT_MAX_STACK,
        }
    }

    /// Creates a single-item stack of a material.
    #[must_use]
    pub fn of(material: MaterialId) -> Self {
        Self::new(material, 1)
    }

    /// Sets the display name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Sets the maximum stack size.
    #[must_use]
    pub fn with_max_stack(mut self, max_stack: u32) -> Self {
        self.max_stack = max_stack;
        self
    }

    /// Returns a copy of this stack with a different count.
    #[must_use]
    pub fn with_count(&self, count: u32) -> Self {
        let mut stack = self.clone();
        stack.count = count;
        stack
    }

    /// Returns true if this stack holds nothing.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0 || self.material == MATERIAL_AIR
    }

    /// Returns true if `other` is the same kind of item, ignoring count.
    #[inline]
    #[must_use]
    pub fn is_similar(&self, other: &Self) -> bool {
        self.material == other.material && self.display_name == other.display_name
    }
}
