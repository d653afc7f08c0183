//! Integration traits the host runtime implements.
//!
//! The menu library DOES NOT reach into the server. Instead it calls the
//! traits defined here, and the server implements them:
//!
//! ```text
//! menuforge calls:      the server implements:
//! ┌──────────────┐      ┌──────────────┐
//! │ trait        │ ←──  │ impl         │
//! │ MenuHost     │      │ MenuHost     │
//! │ Scheduler    │      │ Scheduler    │
//! └──────────────┘      └──────────────┘
//! ```
//!
//! Mock implementations for testing live at the bottom of this file.

use std::collections::HashMap;

use crate::event::ViewerId;
use crate::inventory::PlayerInventory;
use crate::item::ItemStack;

/// Display and inventory surface supplied by the host runtime.
///
/// All methods are infallible from the library's point of view: the host is
/// expected to ignore calls for viewers it no longer knows about.
pub trait MenuHost {
    /// Displays an inventory snapshot to a viewer, replacing whatever
    /// surface they currently have open.
    ///
    /// `contents` is keyed by slot index `0..contents.len()`; the host
    /// requires the length to be one of its valid surface sizes.
    fn show_inventory(&mut self, viewer: ViewerId, title: &str, contents: &[Option<ItemStack>]);

    /// Updates one slot of the surface a viewer currently has open.
    /// Animations use this to mutate the viewer's view per tick.
    fn set_slot(&mut self, viewer: ViewerId, slot: u32, item: Option<ItemStack>);

    /// Closes whatever surface the viewer has open. The host is expected to
    /// emit a close event back to the dispatch layer in response.
    fn close_inventory(&mut self, viewer: ViewerId);

    /// Read access to a viewer's own item holdings.
    fn inventory(&self, viewer: ViewerId) -> Option<&PlayerInventory>;

    /// Write access to a viewer's own item holdings.
    fn inventory_mut(&mut self, viewer: ViewerId) -> Option<&mut PlayerInventory>;

    /// Drops a stack on the ground at the viewer's position. Used when a
    /// granted purchase does not fit into the viewer's inventory.
    fn drop_at_feet(&mut self, viewer: ViewerId, stack: ItemStack);
}

/// A repeating task driven by the host scheduler.
pub type RepeatingTask = Box<dyn FnMut(&mut dyn MenuHost) + Send>;

/// Handle to a scheduled repeating task, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(pub u64);

impl TaskHandle {
    /// Creates a handle from its raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw handle value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// The host's repeating timer.
///
/// Tasks fire on the host's single dispatch thread, never concurrently with
/// event handling or with each other.
pub trait Scheduler {
    /// Schedules `task` to first fire after `delay` ticks and then every
    /// `period` ticks until cancelled.
    fn run_repeating(&mut self, delay: u64, period: u64, task: RepeatingTask) -> TaskHandle;

    /// Cancels a scheduled task. Cancelling an unknown or already-cancelled
    /// handle is a no-op.
    fn cancel(&mut self, handle: TaskHandle);
}

// ============================================================================
// MOCK IMPLEMENTATIONS (For Testing)
// ============================================================================

/// The surface a [`MockHost`] viewer currently has open.
#[derive(Debug, Clone)]
pub struct ShownView {
    /// Title the surface was opened with.
    pub title: String,
    /// Current slot contents, including any animation writes since opening.
    pub contents: Vec<Option<ItemStack>>,
}

/// Mock implementation of [`MenuHost`] recording everything it is told.
#[derive(Debug, Default)]
pub struct MockHost {
    inventories: HashMap<ViewerId, PlayerInventory>,
    shown: HashMap<ViewerId, ShownView>,
    dropped: Vec<(ViewerId, ItemStack)>,
    closed: Vec<ViewerId>,
    show_count: usize,
}

impl MockHost {
    /// Creates an empty mock host.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a player inventory for a viewer.
    pub fn insert_inventory(&mut self, viewer: ViewerId, inventory: PlayerInventory) {
        self.inventories.insert(viewer, inventory);
    }

    /// Returns the surface a viewer currently has open, if any.
    #[must_use]
    pub fn shown(&self, viewer: ViewerId) -> Option<&ShownView> {
        self.shown.get(&viewer)
    }

    /// Returns every stack dropped at viewers' feet, in drop order.
    #[must_use]
    pub fn dropped(&self) -> &[(ViewerId, ItemStack)] {
        &self.dropped
    }

    /// Returns the viewers whose surfaces were closed, in close order.
    #[must_use]
    pub fn closed(&self) -> &[ViewerId] {
        &self.closed
    }

    /// Returns how many times a surface snapshot was shown to any viewer.
    #[must_use]
    pub fn show_count(&self) -> usize {
        self.show_count
    }
}

impl MenuHost for MockHost {
    fn show_inventory(&mut self, viewer: ViewerId, title: &str, contents: &[Option<ItemStack>]) {
        self.show_count += 1;
        self.shown.insert(
            viewer,
            ShownView {
                title: title.to_string(),
                contents: contents.to_vec(),
            },
        );
    }

    fn set_slot(&mut self, viewer: ViewerId, slot: u32, item: Option<ItemStack>) {
        if let Some(view) = self.shown.get_mut(&viewer) {
            if let Some(entry) = view.contents.get_mut(slot as usize) {
                *entry = item;
            }
        }
    }

    fn close_inventory(&mut self, viewer: ViewerId) {
        self.shown.remove(&viewer);
        self.closed.push(viewer);
    }

    fn inventory(&self, viewer: ViewerId) -> Option<&PlayerInventory> {
        self.inventories.get(&viewer)
    }

    fn inventory_mut(&mut self, viewer: ViewerId) -> Option<&mut PlayerInventory> {
        self.inventories.get_mut(&viewer)
    }

    fn drop_at_feet(&mut self, viewer: ViewerId, stack: ItemStack) {
        self.dropped.push((viewer, stack));
    }
}

struct MockTask {
    handle: TaskHandle,
    period: u64,
    next_due: u64,
    cancelled: bool,
    task: RepeatingTask,
}

/// Mock implementation of [`Scheduler`] with a manually advanced clock.
#[derive(Default)]
pub struct MockScheduler {
    tasks: Vec<MockTask>,
    now: u64,
    next_handle: u64,
}

impl std::fmt::Debug for MockScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockScheduler")
            .field("tasks", &self.tasks.len())
            .field("now", &self.now)
            .finish()
    }
}

impl MockScheduler {
    /// Creates a scheduler with an empty task list at tick zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mock time in ticks.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Returns true if the handle refers to no live task.
    #[must_use]
    pub fn is_cancelled(&self, handle: TaskHandle) -> bool {
        self.tasks
            .iter()
            .find(|t| t.handle == handle)
            .map_or(true, |t| t.cancelled)
    }

    /// Number of tasks that are scheduled and not cancelled.
    #[must_use]
    pub fn active_tasks(&self) -> usize {
        self.tasks.iter().filter(|t| !t.cancelled).count()
    }

    /// Advances the clock by `ticks`, firing every due task in scheduling
    /// order, exactly the way the host's serial dispatch thread would.
    pub fn advance(&mut self, ticks: u64, host: &mut dyn MenuHost) {
        for _ in 0..ticks {
            self.now += 1;
            for entry in &mut self.tasks {
                if !entry.cancelled && self.now >= entry.next_due {
                    (entry.task)(host);
                    entry.next_due = self.now + entry.period;
                }
            }
        }
    }
}

impl Scheduler for MockScheduler {
    fn run_repeating(&mut self, delay: u64, period: u64, task: RepeatingTask) -> TaskHandle {
        let handle = TaskHandle::new(self.next_handle);
        self.next_handle += 1;
        self.tasks.push(MockTask {
            handle,
            period: period.max(1),
            next_due: self.now + delay,
            cancelled: false,
            task,
        });
        handle
    }

    fn cancel(&mut self, handle: TaskHandle) {
        if let Some(entry) = self.tasks.iter_mut().find(|t| t.handle == handle) {
            entry.cancelled = true;
        }
    }
}
