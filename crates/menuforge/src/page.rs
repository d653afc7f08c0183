//! Multi-page menus: an ordered list of pages behind one title.

use std::collections::HashMap;
use std::num::NonZeroU64;
use std::sync::Arc;

use menuforge_host::ItemStack;

use crate::animation::MenuAnimation;
use crate::error::{MenuError, MenuResult};
use crate::item::MenuItem;
use crate::menu::{is_valid_size, AnyMenu, ClickHandler, CloseHandler};

/// One page of a [`PagedMenu`].
///
/// Pages carry their own size and slot map; the title is optional and falls
/// back to the owning menu's title when unset.
#[derive(Clone)]
pub struct Page {
    title: Option<String>,
    size: u32,
    items: HashMap<u32, MenuItem>,
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("title", &self.title)
            .field("size", &self.size)
            .field("items", &self.items.len())
            .finish()
    }
}

impl Page {
    /// Builds one page with an explicit size.
    ///
    /// # Errors
    ///
    /// - [`MenuError::InvalidSize`] for a size that is not a whole number
    ///   of rows between 9 and 54
    /// - [`MenuError::SlotOutOfRange`] when an item slot does not fit
    pub fn new(
        title: Option<String>,
        size: u32,
        items: HashMap<u32, MenuItem>,
    ) -> MenuResult<Self> {
        if !is_valid_size(size) {
            return Err(MenuError::InvalidSize { size });
        }
        if let Some(&slot) = items.keys().find(|&&slot| slot >= size) {
            return Err(MenuError::SlotOutOfRange { slot, size });
        }
        Ok(Self { title, size, items })
    }

    /// Title override for this page, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Page size in slots.
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

    /// First empty slot below `size`, if the page has room.
    #[must_use]
    pub fn first_empty_slot(&self) -> Option<u32> {
        (0..self.size).find(|slot| !self.items.contains_key(slot))
    }

    /// True once every slot holds an item.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.items.len() as u32 >= self.size
    }

    /// The display snapshot for this page: one entry per slot.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Option<ItemStack>> {
        let mut contents = vec![None; self.size as usize];
        for (&slot, item) in &self.items {
            contents[slot as usize] = Some(item.icon().clone());
        }
        contents
    }

    fn resolve_interactions(&mut self, default_blocked: bool) {
        for item in self.items.values_mut() {
            item.resolve_interactions(default_blocked);
        }
    }
}

/// A menu whose contents span an ordered, non-empty list of pages.
///
/// Animations and handlers are shared across all pages; page turns change
/// what is shown, never which session is live.
#[derive(Clone)]
pub struct PagedMenu {
    title: String,
    pages: Vec<Page>,
    animations: Vec<Arc<dyn MenuAnimation>>,
    animation_interval: Option<NonZeroU64>,
    default_blocked: bool,
    on_click: Option<ClickHandler>,
    on_close: Option<CloseHandler>,
}

impl std::fmt::Debug for PagedMenu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagedMenu")
            .field("title", &self.title)
            .field("pages", &self.pages.len())
            .field("animations", &self.animations.len())
            .field("default_blocked", &self.default_blocked)
            .finish()
    }
}

impl PagedMenu {
    /// Builds a paged menu, resolving item interaction policies on every
    /// page against `default_blocked`.
    ///
    /// # Errors
    ///
    /// - [`MenuError::NoPages`] when `pages` is empty
    /// - [`MenuError::ZeroInterval`] when any animation declares interval 0
    pub fn new(
        title: impl Into<String>,
        mut pages: Vec<Page>,
        animations: Vec<Arc<dyn MenuAnimation>>,
        default_blocked: bool,
        on_click: Option<ClickHandler>,
        on_close: Option<CloseHandler>,
    ) -> MenuResult<Self> {
        if pages.is_empty() {
            return Err(MenuError::NoPages);
        }
        if animations.iter().any(|a| a.interval() == 0) {
            return Err(MenuError::ZeroInterval);
        }
        let animation_interval =
            crate::interval::reduced_interval(animations.iter().map(|a| a.interval()));

        for page in &mut pages {
            page.resolve_interactions(default_blocked);
        }

        Ok(Self {
            title: title.into(),
            pages,
            animations,
            animation_interval,
            default_blocked,
            on_click,
            on_close,
        })
    }

    /// The menu title; pages may override it for display.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Number of pages, always at least one.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// A page by index, if it exists.
    #[must_use]
    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// Animations in declaration order.
    #[must_use]
    pub fn animations(&self) -> &[Arc<dyn MenuAnimation>] {
        &self.animations
    }

    /// The reduced host-timer period for this menu's animations.
    #[must_use]
    pub fn animation_interval(&self) -> Option<NonZeroU64> {
        self.animation_interval
    }

    /// Default interactions-blocked flag.
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

    /// Wraps this menu for use with the dispatch registry.
    #[must_use]
    pub fn into_shared(self) -> Arc<AnyMenu> {
        Arc::new(AnyMenu::Paged(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menuforge_host::ItemStack;

    fn item(material: u32) -> MenuItem {
        MenuItem::new(ItemStack::of(material))
    }

    fn page(size: u32, slots: &[(u32, u32)]) -> Page {
        let items = slots
            .iter()
            .map(|&(slot, material)| (slot, item(material)))
            .collect();
        Page::new(None, size, items).unwrap()
    }

    #[test]
    fn test_empty_pages_rejected() {
        let result = PagedMenu::new("Empty", Vec::new(), Vec::new(), true, None, None);
        assert_eq!(result.unwrap_err(), MenuError::NoPages);
    }

    #[test]
    fn test_page_title_fallback() {
        let pages = vec![
            page(9, &[(0, 1)]),
            Page::new(Some("Second".into()), 9, HashMap::new()).unwrap(),
        ];
        let menu = PagedMenu::new("Main", pages, Vec::new(), true, None, None).unwrap();
        let shared = AnyMenu::Paged(menu);
        assert_eq!(shared.view(0).unwrap().0, "Main");
        assert_eq!(shared.view(1).unwrap().0, "Second");
        assert_eq!(
            shared.view(2).unwrap_err(),
            MenuError::PageOutOfRange { page: 2, pages: 2 }
        );
    }

    #[test]
    fn test_item_lookup_is_page_scoped() {
        let pages = vec![page(9, &[(0, 1)]), page(9, &[(3, 2)])];
        let menu = PagedMenu::new("Main", pages, Vec::new(), true, None, None).unwrap();
        let shared = AnyMenu::Paged(menu);
        assert!(shared.item_at(0, 0).is_some());
        assert!(shared.item_at(1, 0).is_none());
        assert_eq!(shared.item_at(1, 3).unwrap().icon().material, 2);
    }

    #[test]
    fn test_first_empty_slot() {
        let p = page(9, &[(0, 1), (1, 2)]);
        assert_eq!(p.first_empty_slot(), Some(2));
        let full: HashMap<u32, MenuItem> = (0..9).map(|s| (s, item(1))).collect();
        let p = Page::new(None, 9, full).unwrap();
        assert_eq!(p.first_empty_slot(), None);
    }
}
