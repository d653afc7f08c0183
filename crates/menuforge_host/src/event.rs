//! Host input events and viewer identity.
//!
//! Events are plain data the host runtime constructs and hands to the menu
//! dispatch layer. The click event carries a mutable cancellation flag; the
//! menu layer sets it and the host reads it back to decide whether to let
//! the viewer actually move the clicked item.

use std::fmt;

use crate::item::ItemStack;

/// Stable, comparable identity of one viewer session.
///
/// All per-viewer state (animations, page tracking) is keyed by this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewerId(pub u64);

impl ViewerId {
    /// Creates a viewer id from its raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw id value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ViewerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "viewer#{}", self.0)
    }
}

/// A click on a slot of an open menu surface.
#[derive(Debug, Clone)]
pub struct ClickEvent {
    /// Who clicked.
    pub viewer: ViewerId,
    /// The clicked slot index.
    pub slot: u32,
    /// The item currently displayed at the clicked slot, if any.
    pub clicked: Option<ItemStack>,
    cancelled: bool,
}

impl ClickEvent {
    /// Creates a click event for a slot.
    #[must_use]
    pub fn new(viewer: ViewerId, slot: u32, clicked: Option<ItemStack>) -> Self {
        Self {
            viewer,
            slot,
            clicked,
            cancelled: false,
        }
    }

    /// Returns true if default host behavior (moving the clicked item) is
    /// suppressed.
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Sets the cancellation flag.
    #[inline]
    pub fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }

    /// Suppresses default host behavior for this click.
    #[inline]
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }
}

/// A menu surface was closed for a viewer.
#[derive(Debug, Clone, Copy)]
pub struct CloseEvent {
    /// Whose surface closed.
    pub viewer: ViewerId,
}

impl CloseEvent {
    /// Creates a close event.
    #[must_use]
    pub const fn new(viewer: ViewerId) -> Self {
        Self { viewer }
    }
}

/// A viewer disconnected from the server without closing their menu.
#[derive(Debug, Clone, Copy)]
pub struct DisconnectEvent {
    /// Who disconnected.
    pub viewer: ViewerId,
}

impl DisconnectEvent {
    /// Creates a disconnect event.
    #[must_use]
    pub const fn new(viewer: ViewerId) -> Self {
        Self { viewer }
    }
}
