//! # Menuforge Host Seam
//!
//! The primitives a voxel-game server runtime supplies to the menu library:
//!
//! - [`ItemStack`] - the opaque visual/stack payload shown in menu slots
//! - [`PlayerInventory`] - a viewer's own item holdings, consumed by shop flows
//! - [`ClickEvent`] / [`CloseEvent`] / [`DisconnectEvent`] - host input events
//! - [`MenuHost`] - the display and inventory surface the host implements
//! - [`Scheduler`] - the host's single-threaded repeating timer
//!
//! ## Threading Model
//!
//! The host dispatches all events and timer callbacks on one logical thread,
//! one at a time, to completion. Nothing in this crate locks because nothing
//! here is ever touched concurrently.
//!
//! Mock implementations ([`MockHost`], [`MockScheduler`]) live beside the
//! traits so downstream crates can drive full open/click/close cycles in
//! tests without a running server.

#![deny(unsafe_code)]
#![deny(missing_docs)]

pub mod event;
pub mod host;
pub mod inventory;
pub mod item;

pub use event::{ClickEvent, CloseEvent, DisconnectEvent, ViewerId};
pub use host::{MenuHost, MockHost, MockScheduler, RepeatingTask, Scheduler, ShownView, TaskHandle};
pub use inventory::PlayerInventory;
pub use item::{ItemStack, MaterialId, MATERIAL_AIR};
