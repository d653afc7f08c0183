//! The single-page menu data model and the size rules every surface obeys.

use std::collections::HashMap;
use std::num::NonZeroU64;
use std::sync::Arc;

use menuforge_host::{ClickEvent, CloseEvent, ItemStack};

use crate::animation::MenuAnimation;
use crate::error::{MenuError, MenuResult};
use crate::item::MenuItem;
use crate::page::PagedMenu;

/// Smallest valid surface size.
pub const MIN_MENU_SIZE: u32 = 9;
/// Largest valid surface size.
pub const MAX_MENU_SIZE: u32 = 54;
/// Surface row width; valid sizes are whole rows.
pub const ROW_WIDTH: u32 = 9;

/// Menu-wide click handler, run before any per-item action.
pub type ClickHandler = Arc<dyn Fn(&mut ClickEvent) + Send + Sync>;
/// Menu-wide close handler.
pub type CloseHandler = Arc<dyn Fn(&CloseEvent) + Send + Sync>;

/// Returns true for sizes the host accepts: whole rows, 9 through 54.
#[must_use]
pub const fn is_valid_size(size: u32) -> bool {
    size >= MIN_MENU_SIZE && size <= MAX_MENU_SIZE && size % ROW_WIDTH == 0
}

/// The smallest valid surface size covering a set of occupied slots.
///
/// An empty set resolves to the minimum size. A last slot that closes out
/// its row gets a spare row, so the surface never ends flush against an
/// occupied slot (capped at the maximum size).
///
/// # Errors
///
/// [`MenuError::SlotOutOfRange`] if any slot exceeds the largest surface.
pub fn min_slots<I: IntoIterator<Item = u32>>(slots: I) -> MenuResult<u32> {
    let Some(last) = slots.into_iter().max() else {
        return Ok(MIN_MENU_SIZE);
    };
    if last >= MAX_MENU_SIZE {
        return Err(MenuError::SlotOutOfRange {
            slot: last,
            size: MAX_MENU_SIZE,
        });
    }
    let mut rows = last / ROW_WIDTH + 1;
    if last % ROW_WIDTH == ROW_WIDTH - 1 {
        rows += 1;
    }
    Ok((rows * ROW_WIDTH).clamp(MIN_MENU_SIZE, MAX_MENU_SIZE))
}

/// A single-page clickable menu.
///
/// Static after construction: the slot map, animations, and handlers are
/// fixed, and the same menu value is safely shared across every viewer that
/// has it open. All validation happens in [`Menu::new`]; a constructed menu
/// is always internally consistent.
#[derive(Clone)]
pub struct Menu {
    title: String,
    size: u32,
    items: HashMap<u32, MenuItem>,
    animations: Vec<Arc<dyn MenuAnimation>>,
    animation_interval: Option<NonZeroU64>,
    default_blocked: bool,
    on_click: Option<ClickHandler>,
    on_close: Option<CloseHandler>,
}

impl std::fmt::Debug for Menu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Menu")
            .field("title", &self.title)
            .field("size", &self.size)
            .field("items", &self.items.len())
            .field("animations", &self.animations.len())
            .field("default_blocked", &self.default_blocked)
            .finish()
    }
}

impl Menu {
    /// Builds a menu, validating the configuration and resolving every
    /// item's interaction policy against `default_blocked`.
    ///
    /// `size: None` auto-resolves to the smallest valid surface covering
    /// the occupied slots.
    ///
    /// # Errors
    ///
    /// - [`MenuError::InvalidSize`] for an explicit size that is not a
    ///   whole number of rows between 9 and 54
    /// - [`MenuError::SlotOutOfRange`] when an item slot does not fit the
    ///   resolved size
    /// - [`MenuError::ZeroInterval`] when any animation declares interval 0
    pub fn new(
        title: impl Into<String>,
        size: Option<u32>,
        mut items: HashMap<u32, MenuItem>,
        animations: Vec<Arc<dyn MenuAnimation>>,
        default_blocked: bool,
        on_click: Option<ClickHandler>,
        on_close: Option<CloseHandler>,
    ) -> MenuResult<Self> {
        let size = match size {
            Some(s) if !is_valid_size(s) => return Err(MenuError::InvalidSize { size: s }),
            Some(s) => s,
            None => min_slots(items.keys().copied())?,
        };
        if let Some(&slot) = items.keys().find(|&&slot| slot >= size) {
            return Err(MenuError::SlotOutOfRange { slot, size });
        }
        if animations.iter().any(|a| a.interval() == 0) {
            return Err(MenuError::ZeroInterval);
        }
        let animation_interval =
            crate::interval::reduced_interval(animations.iter().map(|a| a.interval()));

        for item in items.values_mut() {
            item.resolve_interactions(default_blocked);
        }

        Ok(Self {
            title: title.into(),
            size,
            items,
            animations,
            animation_interval,
            default_blocked,
            on_click,
            on_close,
        })
    }

    /// The menu title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Declared surface size in slots.
    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// The item at a slot, if any.
    #[must_use]
    pub fn item(&self, slot: u32) -> Option<&MenuItem> {
        self.items.get(&slot)
    }

    /// Returns true if a slot holds an item.
    #[must_use]
    pub fn contains_item(&self, slot: u32) -> bool {
        self.items.contains_key(&slot)
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Animations in declaration order.
    #[must_use]
    pub fn animations(&self) -> &[Arc<dyn MenuAnimation>] {
        &self.animations
    }

    /// The reduced host-timer period for this menu's animations, or `None`
    /// when there is nothing to animate.
    #[must_use]
    pub fn animation_interval(&self) -> Option<NonZeroU64> {
        self.animation_interval
    }

    /// The default interactions-blocked flag applied to items that did not
    /// set their own.
    #[must_use]
    pub fn default_blocked(&self) -> bool {
        self.default_blocked
    }

    /// Menu-wide click handler, if set.
    #[must_use]
    pub fn on_click(&self) -> Option<&ClickHandler> {
        self.on_click.as_ref()
    }

    /// Menu-wide close handler, if set.
    #[must_use]
    pub fn on_close(&self) -> Option<&CloseHandler> {
        self.on_close.as_ref()
    }

    /// The display snapshot for this menu: one entry per slot.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Option<ItemStack>> {
        let mut contents = vec![None; self.size as usize];
        for (&slot, item) in &self.items {
            contents[slot as usize] = Some(item.icon().clone());
        }
        contents
    }

    /// Wraps this menu for use with the dispatch registry.
    #[must_use]
    pub fn into_shared(self) -> Arc<AnyMenu> {
        Arc::new(AnyMenu::Single(self))
    }
}

/// Either menu shape, as the dispatch registry sees it.
#[derive(Clone)]
pub enum AnyMenu {
    /// A one-page menu.
    Single(Menu),
    /// A multi-page menu.
    Paged(PagedMenu),
}

impl std::fmt::Debug for AnyMenu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single(menu) => f.debug_tuple("Single").field(menu).finish(),
            Self::Paged(menu) => f.debug_tuple("Paged").field(menu).finish(),
        }
    }
}

impl AnyMenu {
    /// The menu title.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Single(m) => m.title(),
            Self::Paged(m) => m.title(),
        }
    }

    /// True for the paged shape.
    #[must_use]
    pub fn is_paged(&self) -> bool {
        matches!(self, Self::Paged(_))
    }

    /// Number of pages; a single menu counts as one.
    #[must_use]
    pub fn page_count(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Paged(m) => m.page_count(),
        }
    }

    /// Animations in declaration order.
    #[must_use]
    pub fn animations(&self) -> &[Arc<dyn MenuAnimation>] {
        match self {
            Self::Single(m) => m.animations(),
            Self::Paged(m) => m.animations(),
        }
    }

    /// The reduced host-timer period covering all animations.
    #[must_use]
    pub fn animation_interval(&self) -> Option<NonZeroU64> {
        match self {
            Self::Single(m) => m.animation_interval(),
            Self::Paged(m) => m.animation_interval(),
        }
    }

    /// Default interactions-blocked flag.
    #[must_use]
    pub fn default_blocked(&self) -> bool {
        match self {
            Self::Single(m) => m.default_blocked(),
            Self::Paged(m) => m.default_blocked(),
        }
    }

    /// The item at a slot, scoped to `page` for the paged shape. A single
    /// menu only has page 0.
    #[must_use]
    pub fn item_at(&self, page: usize, slot: u32) -> Option<&MenuItem> {
        match self {
            Self::Single(m) => (page == 0).then(|| m.item(slot)).flatten(),
            Self::Paged(m) => m.page(page).and_then(|p| p.item(slot)),
        }
    }

    /// The (title, contents) pair to display for a page.
    ///
    /// # Errors
    ///
    /// [`MenuError::PageOutOfRange`] for a page the menu does not have.
    pub fn view(&self, page: usize) -> MenuResult<(&str, Vec<Option<ItemStack>>)> {
        match self {
            Self::Single(m) => {
                if page != 0 {
                    return Err(MenuError::PageOutOfRange { page, pages: 1 });
                }
                Ok((m.title(), m.snapshot()))
            }
            Self::Paged(m) => {
                let p = m.page(page).ok_or(MenuError::PageOutOfRange {
                    page,
                    pages: m.page_count(),
                })?;
                Ok((p.title().unwrap_or_else(|| m.title()), p.snapshot()))
            }
        }
    }

    /// Menu-wide click handler, if set.
    #[must_use]
    pub fn on_click(&self) -> Option<&ClickHandler> {
        match self {
            Self::Single(m) => m.on_click(),
            Self::Paged(m) => m.on_click(),
        }
    }

    /// Menu-wide close handler, if set.
    #[must_use]
    pub fn on_close(&self) -> Option<&CloseHandler> {
        match self {
            Self::Single(m) => m.on_close(),
            Self::Paged(m) => m.on_close(),
        }
    }
}
