//! # MENUFORGE
//!
//! Inventory-backed GUI menus for a game server: declarative layouts,
//! clickable items with action chains, multi-page menus, animations on a
//! shared reduced timer, and transactional shop items.
//!
//! The library never talks to the server directly. The host runtime
//! implements the [`menuforge_host`] traits, forwards its click, close, and
//! disconnect events to a [`MenuRegistry`], and everything else is plain
//! data declared through the builders:
//!
//! ```
//! use menuforge::{MenuBuilder, MenuItemBuilder, MenuRegistry, CloseMenuAction};
//! use menuforge_host::{MockHost, MockScheduler, ViewerId};
//! use std::sync::Arc;
//!
//! let menu = MenuBuilder::new("Warp Hub")
//!     .size(27)?
//!     .item(
//!         13,
//!         MenuItemBuilder::new(345)
//!             .name("Close")
//!             .action(Arc::new(CloseMenuAction))
//!             .build(),
//!     )?
//!     .build()?
//!     .into_shared();
//!
//! let mut registry = MenuRegistry::new();
//! let mut host = MockHost::new();
//! let mut scheduler = MockScheduler::new();
//! registry.open(ViewerId::new(1), menu, &mut host, &mut scheduler)?;
//! # Ok::<(), menuforge::MenuError>(())
//! ```
//!
//! All dispatch happens on the host's single dispatch thread; menus
//! themselves are immutable after construction and shared freely.

#![deny(unsafe_code)]
#![deny(missing_docs)]

pub mod action;
pub mod animation;
pub mod builder;
pub mod config;
pub mod error;
pub mod interval;
pub mod item;
pub mod menu;
pub mod page;
pub mod registry;
pub mod shop;
pub mod template;

pub use action::{
    Action, CloseMenuAction, CustomAction, Directive, OpenMenuAction, PageTurn, TurnPageAction,
};
pub use animation::{FnAnimation, MenuAnimation, MultiAnimation, RunningAnimations};
pub use builder::{Border, MenuBuild, MenuBuilder, MenuItemBuilder, PagedMenuBuilder};
pub use config::{ItemLayout, MenuLayout};
pub use error::{MenuError, MenuResult};
pub use item::{InteractionPolicy, MenuItem};
pub use menu::{is_valid_size, min_slots, AnyMenu, Menu, MAX_MENU_SIZE, MIN_MENU_SIZE, ROW_WIDTH};
pub use page::{Page, PagedMenu};
pub use registry::MenuRegistry;
pub use shop::{
    shop_item, GrantItemsTransaction, ItemCondition, MaterialCondition, ShopCondition,
    ShopTransaction, TakeItemsTransaction, TakeMaterialTransaction,
};
pub use template::MenuTemplate;
