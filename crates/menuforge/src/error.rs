//! # Menu Error Types
//!
//! Configuration errors raised at construction or mutation time. Usage
//! protocol violations (double-starting an animation runner, turning a page
//! for an untracked viewer) are programmer errors and panic instead.

use thiserror::Error;

/// Errors that can occur while declaring or loading a menu.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MenuError {
    /// Menu surface sizes must be a multiple of 9 between 9 and 54.
    #[error("invalid menu size {size}: must be a multiple of 9 between 9 and 54")]
    InvalidSize {
        /// The rejected size.
        size: u32,
    },

    /// A slot index does not fit the declared surface size.
    #[error("slot {slot} out of range for menu of size {size}")]
    SlotOutOfRange {
        /// The rejected slot.
        slot: u32,
        /// The surface size it was checked against.
        size: u32,
    },

    /// No empty slot left to place an item into.
    #[error("menu is full: no empty slot below size {size}")]
    MenuFull {
        /// The surface size that is fully occupied.
        size: u32,
    },

    /// A paged menu was declared without any page.
    #[error("paged menu must have at least one page")]
    NoPages,

    /// A page index beyond the declared page list.
    #[error("page {page} does not exist: menu has {pages} pages")]
    PageOutOfRange {
        /// The rejected page index.
        page: usize,
        /// Number of pages the menu has.
        pages: usize,
    },

    /// Animation intervals are positive tick counts.
    #[error("animation interval must be a positive number of ticks")]
    ZeroInterval,

    /// An operation needed an explicit size before the menu had one.
    #[error("menu size must be set before slot layout operations")]
    SizeNotSet,

    /// A declarative menu layout failed to parse or validate.
    #[error("invalid menu layout: {0}")]
    InvalidConfig(String),
}

/// Result type for menu declaration operations.
pub type MenuResult<T> = Result<T, MenuError>;
