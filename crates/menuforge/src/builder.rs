//! Fluent builders for items, menus, and paged menus.
//!
//! Builders are consumed-and-returned so declarations chain; anything that
//! can be validated early is, so a bad slot or size fails at the call that
//! introduced it rather than at `build`.

use std::collections::HashMap;
use std::sync::Arc;

use menuforge_host::{ClickEvent, CloseEvent, ItemStack};

use crate::action::Action;
use crate::animation::MenuAnimation;
use crate::error::{MenuError, MenuResult};
use crate::item::{InteractionPolicy, MenuItem};
use crate::menu::{
    is_valid_size, AnyMenu, ClickHandler, CloseHandler, Menu, MAX_MENU_SIZE, ROW_WIDTH,
};
use crate::page::{Page, PagedMenu};

/// Builds a [`MenuItem`] from an icon description.
#[derive(Clone)]
pub struct MenuItemBuilder {
    material: u32,
    count: u32,
    name: Option<String>,
    policy: InteractionPolicy,
    actions: Vec<Arc<dyn Action>>,
}

impl std::fmt::Debug for MenuItemBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuItemBuilder")
            .field("material", &self.material)
            .field("count", &self.count)
            .field("name", &self.name)
            .field("policy", &self.policy)
            .field("actions", &self.actions.len())
            .finish()
    }
}

impl MenuItemBuilder {
    /// Starts an item showing one unit of `material`.
    #[must_use]
    pub fn new(material: u32) -> Self {
        Self {
            material,
            count: 1,
            name: None,
            policy: InteractionPolicy::Unset,
            actions: Vec::new(),
        }
    }

    /// Icon stack count.
    #[must_use]
    pub fn count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// Icon display name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Explicit interaction policy, overriding the owning menu's default.
    #[must_use]
    pub fn blocked(mut self, blocked: bool) -> Self {
        self.policy = InteractionPolicy::from_blocked(blocked);
        self
    }

    /// Appends an action to the click chain.
    #[must_use]
    pub fn action(mut self, action: Arc<dyn Action>) -> Self {
        self.actions.push(action);
        self
    }

    /// Builds the item. Infallible; every field has a valid default.
    #[must_use]
    pub fn build(self) -> MenuItem {
        let mut icon = ItemStack::new(self.material, self.count);
        if let Some(name) = self.name {
            icon = icon.named(name);
        }
        let mut item = MenuItem::with_policy(icon, self.policy);
        for action in self.actions {
            item.add_action(action);
        }
        item
    }
}

/// Which edge of the surface a border fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Border {
    /// The first row.
    Top,
    /// The last row.
    Bottom,
    /// The first column.
    Left,
    /// The last column.
    Right,
}

impl Border {
    /// Every edge, for a full frame around the surface.
    pub const ALL: [Self; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];
}

/// Builders that finish into a menu the registry can open.
pub trait MenuBuild {
    /// Builds, validates, and wraps the menu for shared use.
    ///
    /// # Errors
    ///
    /// The builder's usual construction errors.
    fn build_shared(self) -> MenuResult<Arc<AnyMenu>>;
}

impl MenuBuild for MenuBuilder {
    fn build_shared(self) -> MenuResult<Arc<AnyMenu>> {
        Ok(self.build()?.into_shared())
    }
}

impl MenuBuild for PagedMenuBuilder {
    fn build_shared(self) -> MenuResult<Arc<AnyMenu>> {
        Ok(self.build()?.into_shared())
    }
}

/// Builds a single-page [`Menu`].
#[derive(Clone)]
pub struct MenuBuilder {
    title: String,
    size: Option<u32>,
    items: HashMap<u32, MenuItem>,
    animations: Vec<Arc<dyn MenuAnimation>>,
    default_blocked: bool,
    on_click: Option<ClickHandler>,
    on_close: Option<CloseHandler>,
}

impl std::fmt::Debug for MenuBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuBuilder")
            .field("title", &self.title)
            .field("size", &self.size)
            .field("items", &self.items.len())
            .field("animations", &self.animations.len())
            .field("default_blocked", &self.default_blocked)
            .finish()
    }
}

impl MenuBuilder {
    /// Starts a menu with unset size and interactions blocked by default.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            size: None,
            items: HashMap::new(),
            animations: Vec::new(),
            default_blocked: true,
            on_click: None,
            on_close: None,
        }
    }

    /// Fixes the surface size. Without this call the built menu auto-sizes
    /// to its occupied slots.
    ///
    /// # Errors
    ///
    /// [`MenuError::InvalidSize`] for a size that is not a whole number of
    /// rows between 9 and 54.
    pub fn size(mut self, size: u32) -> MenuResult<Self> {
        if !is_valid_size(size) {
            return Err(MenuError::InvalidSize { size });
        }
        self.size = Some(size);
        Ok(self)
    }

    /// Places an item at a slot, replacing anything already there.
    ///
    /// # Errors
    ///
    /// [`MenuError::SlotOutOfRange`] against the fixed size, or against the
    /// largest surface when the size is still unset.
    pub fn item(mut self, slot: u32, item: MenuItem) -> MenuResult<Self> {
        let limit = self.size.unwrap_or(MAX_MENU_SIZE);
        if slot >= limit {
            return Err(MenuError::SlotOutOfRange { slot, size: limit });
        }
        self.items.insert(slot, item);
        Ok(self)
    }

    /// Places an item at the first empty slot.
    ///
    /// # Errors
    ///
    /// [`MenuError::MenuFull`] when every slot of the (fixed or maximum)
    /// surface is occupied.
    pub fn add_item(mut self, item: MenuItem) -> MenuResult<Self> {
        let limit = self.size.unwrap_or(MAX_MENU_SIZE);
        let Some(slot) = (0..limit).find(|slot| !self.items.contains_key(slot)) else {
            return Err(MenuError::MenuFull { size: limit });
        };
        self.items.insert(slot, item);
        Ok(self)
    }

    /// Fills the named edges of the surface with copies of `item`,
    /// replacing anything already on them.
    ///
    /// # Errors
    ///
    /// [`MenuError::SizeNotSet`] when the surface size is still unset;
    /// borders need to know where the edges are.
    pub fn border(mut self, item: &MenuItem, edges: &[Border]) -> MenuResult<Self> {
        let Some(size) = self.size else {
            return Err(MenuError::SizeNotSet);
        };
        let rows = size / ROW_WIDTH;
        for edge in edges {
            let slots: Vec<u32> = match edge {
                Border::Top => (0..ROW_WIDTH).collect(),
                Border::Bottom => (size - ROW_WIDTH..size).collect(),
                Border::Left => (0..rows).map(|r| r * ROW_WIDTH).collect(),
                Border::Right => (0..rows).map(|r| r * ROW_WIDTH + ROW_WIDTH - 1).collect(),
            };
            for slot in slots {
                self.items.insert(slot, item.clone());
            }
        }
        Ok(self)
    }

    /// Attaches an animation.
    #[must_use]
    pub fn animation(mut self, animation: Arc<dyn MenuAnimation>) -> Self {
        self.animations.push(animation);
        self
    }

    /// Sets the default interaction policy for items that do not carry
    /// their own.
    #[must_use]
    pub fn interactions_blocked(mut self, blocked: bool) -> Self {
        self.default_blocked = blocked;
        self
    }

    /// Menu-wide click handler, run before any per-item action.
    #[must_use]
    pub fn on_click(mut self, handler: impl Fn(&mut ClickEvent) + Send + Sync + 'static) -> Self {
        self.on_click = Some(Arc::new(handler));
        self
    }

    /// Menu-wide close handler.
    #[must_use]
    pub fn on_close(mut self, handler: impl Fn(&CloseEvent) + Send + Sync + 'static) -> Self {
        self.on_close = Some(Arc::new(handler));
        self
    }

    /// Builds and validates the menu.
    ///
    /// # Errors
    ///
    /// See [`Menu::new`].
    pub fn build(self) -> MenuResult<Menu> {
        Menu::new(
            self.title,
            self.size,
            self.items,
            self.animations,
            self.default_blocked,
            self.on_click,
            self.on_close,
        )
    }
}

#[derive(Clone)]
struct PageDraft {
    title: Option<String>,
    size: u32,
    items: HashMap<u32, MenuItem>,
}

impl PageDraft {
    fn new(size: u32) -> Self {
        Self {
            title: None,
            size,
            items: HashMap::new(),
        }
    }

    fn first_empty_slot(&self) -> Option<u32> {
        (0..self.size).find(|slot| !self.items.contains_key(slot))
    }
}

/// Builds a [`PagedMenu`]. Slot placement always targets the page most
/// recently started with [`add_page`]; the builder starts on page 0.
///
/// [`add_page`]: PagedMenuBuilder::add_page
#[derive(Clone)]
pub struct PagedMenuBuilder {
    title: String,
    default_size: u32,
    pages: Vec<PageDraft>,
    animations: Vec<Arc<dyn MenuAnimation>>,
    default_blocked: bool,
    on_click: Option<ClickHandler>,
    on_close: Option<CloseHandler>,
}

impl std::fmt::Debug for PagedMenuBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagedMenuBuilder")
            .field("title", &self.title)
            .field("default_size", &self.default_size)
            .field("pages", &self.pages.len())
            .field("animations", &self.animations.len())
            .finish()
    }
}

impl PagedMenuBuilder {
    /// Starts a paged menu whose pages default to `page_size` slots, with
    /// an empty first page already in place.
    ///
    /// # Errors
    ///
    /// [`MenuError::InvalidSize`] for an invalid page size.
    pub fn new(title: impl Into<String>, page_size: u32) -> MenuResult<Self> {
        if !is_valid_size(page_size) {
            return Err(MenuError::InvalidSize { size: page_size });
        }
        Ok(Self {
            title: title.into(),
            default_size: page_size,
            pages: vec![PageDraft::new(page_size)],
            animations: Vec::new(),
            default_blocked: true,
            on_click: None,
            on_close: None,
        })
    }

    fn current(&mut self) -> &mut PageDraft {
        // new() seeds one page and nothing removes pages.
        let index = self.pages.len() - 1;
        &mut self.pages[index]
    }

    /// Starts a fresh page at the default page size; subsequent placements
    /// target it.
    #[must_use]
    pub fn add_page(mut self) -> Self {
        self.pages.push(PageDraft::new(self.default_size));
        self
    }

    /// Title override for the current page.
    #[must_use]
    pub fn page_title(mut self, title: impl Into<String>) -> Self {
        self.current().title = Some(title.into());
        self
    }

    /// Resizes the current page.
    ///
    /// # Errors
    ///
    /// - [`MenuError::InvalidSize`] for an invalid size
    /// - [`MenuError::SlotOutOfRange`] when an already-placed item would no
    ///   longer fit
    pub fn page_size(mut self, size: u32) -> MenuResult<Self> {
        if !is_valid_size(size) {
            return Err(MenuError::InvalidSize { size });
        }
        let page = self.current();
        if let Some(&slot) = page.items.keys().find(|&&slot| slot >= size) {
            return Err(MenuError::SlotOutOfRange { slot, size });
        }
        page.size = size;
        Ok(self)
    }

    /// Places an item at a slot of the current page.
    ///
    /// # Errors
    ///
    /// [`MenuError::SlotOutOfRange`] against the current page's size.
    pub fn item(mut self, slot: u32, item: MenuItem) -> MenuResult<Self> {
        let page = self.current();
        if slot >= page.size {
            return Err(MenuError::SlotOutOfRange {
                slot,
                size: page.size,
            });
        }
        page.items.insert(slot, item);
        Ok(self)
    }

    /// Places an item at the first empty slot across all pages, appending
    /// a fresh page when every existing page is full.
    #[must_use]
    pub fn add_item(mut self, item: MenuItem) -> Self {
        for page in &mut self.pages {
            if let Some(slot) = page.first_empty_slot() {
                page.items.insert(slot, item);
                return self;
            }
        }
        let mut page = PageDraft::new(self.default_size);
        page.items.insert(0, item);
        self.pages.push(page);
        self
    }

    /// Attaches an animation shared by all pages.
    #[must_use]
    pub fn animation(mut self, animation: Arc<dyn MenuAnimation>) -> Self {
        self.animations.push(animation);
        self
    }

    /// Sets the default interaction policy for items that do not carry
    /// their own.
    #[must_use]
    pub fn interactions_blocked(mut self, blocked: bool) -> Self {
        self.default_blocked = blocked;
        self
    }

    /// Menu-wide click handler, run before any per-item action.
    #[must_use]
    pub fn on_click(mut self, handler: impl Fn(&mut ClickEvent) + Send + Sync + 'static) -> Self {
        self.on_click = Some(Arc::new(handler));
        self
    }

    /// Menu-wide close handler.
    #[must_use]
    pub fn on_close(mut self, handler: impl Fn(&CloseEvent) + Send + Sync + 'static) -> Self {
        self.on_close = Some(Arc::new(handler));
        self
    }

    /// Builds and validates the paged menu.
    ///
    /// # Errors
    ///
    /// See [`PagedMenu::new`].
    pub fn build(self) -> MenuResult<PagedMenu> {
        let pages = self
            .pages
            .into_iter()
            .map(|draft| Page::new(draft.title, draft.size, draft.items))
            .collect::<MenuResult<Vec<_>>>()?;
        PagedMenu::new(
            self.title,
            pages,
            self.animations,
            self.default_blocked,
            self.on_click,
            self.on_close,
        )
    }
}
