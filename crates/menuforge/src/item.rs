//! Menu items: an icon, an ordered action chain, and an interaction policy.

use std::sync::Arc;

use menuforge_host::ItemStack;

use crate::action::Action;

/// Whether a viewer may pick up or move an item's icon.
///
/// Items start `Unset` and inherit their owning menu's default when the menu
/// is constructed. Reading an unresolved policy is a programming error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionPolicy {
    /// Not decided yet; resolved to the menu default at menu construction.
    #[default]
    Unset,
    /// The viewer cannot move the icon (the click event is cancelled).
    Blocked,
    /// The viewer may move the icon.
    Allowed,
}

impl InteractionPolicy {
    /// Returns true once the policy has collapsed to a concrete value.
    #[must_use]
    pub const fn is_resolved(self) -> bool {
        !matches!(self, Self::Unset)
    }

    /// The concrete value, if resolved.
    #[must_use]
    pub const fn as_bool(self) -> Option<bool> {
        match self {
            Self::Unset => None,
            Self::Blocked => Some(true),
            Self::Allowed => Some(false),
        }
    }

    /// Builds a resolved policy from a boolean.
    #[must_use]
    pub const fn from_blocked(blocked: bool) -> Self {
        if blocked {
            Self::Blocked
        } else {
            Self::Allowed
        }
    }
}

/// One slot's worth of menu content: an icon plus the actions that run when
/// the slot is clicked, in registration order.
#[derive(Clone)]
pub struct MenuItem {
    icon: ItemStack,
    actions: Vec<Arc<dyn Action>>,
    interactions: InteractionPolicy,
}

impl std::fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuItem")
            .field("icon", &self.icon)
            .field("actions", &self.actions.len())
            .field("interactions", &self.interactions)
            .finish()
    }
}

impl MenuItem {
    /// Creates an item with an unset interaction policy; the owning menu's
    /// default applies when the menu is built.
    #[must_use]
    pub fn new(icon: ItemStack) -> Self {
        Self {
            icon,
            actions: Vec::new(),
            interactions: InteractionPolicy::Unset,
        }
    }

    /// Creates an item with an explicit interaction policy.
    #[must_use]
    pub fn with_policy(icon: ItemStack, interactions: InteractionPolicy) -> Self {
        Self {
            icon,
            actions: Vec::new(),
            interactions,
        }
    }

    /// The icon displayed at this item's slot.
    #[must_use]
    pub fn icon(&self) -> &ItemStack {
        &self.icon
    }

    /// Appends an action to the click chain.
    pub fn add_action(&mut self, action: Arc<dyn Action>) {
        self.actions.push(action);
    }

    /// The click chain, in registration order.
    #[must_use]
    pub fn actions(&self) -> &[Arc<dyn Action>] {
        &self.actions
    }

    /// The raw, possibly unresolved policy.
    #[must_use]
    pub fn interactions(&self) -> InteractionPolicy {
        self.interactions
    }

    /// The resolved interactions-blocked flag.
    ///
    /// # Panics
    ///
    /// Panics if the policy was never resolved by an owning menu. That means
    /// the item is being consulted before it was attached to a built menu,
    /// which is a bug in the calling code.
    #[must_use]
    pub fn interactions_blocked(&self) -> bool {
        self.interactions
            .as_bool()
            .expect("MenuItem interaction policy read before the owning menu resolved it")
    }

    /// Collapses `Unset` to the owning menu's default. Explicit policies are
    /// left alone.
    pub(crate) fn resolve_interactions(&mut self, default_blocked: bool) {
        if !self.interactions.is_resolved() {
            self.interactions = InteractionPolicy::from_blocked(default_blocked);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_applies_default_only_when_unset() {
        let mut unset = MenuItem::new(ItemStack::of(1));
        let mut explicit = MenuItem::with_policy(ItemStack::of(1), InteractionPolicy::Allowed);
        unset.resolve_interactions(true);
        explicit.resolve_interactions(true);
        assert!(unset.interactions_blocked());
        assert!(!explicit.interactions_blocked());
    }

    #[test]
    #[should_panic(expected = "read before the owning menu resolved it")]
    fn test_unresolved_read_panics() {
        let item = MenuItem::new(ItemStack::of(1));
        let _ = item.interactions_blocked();
    }
}
