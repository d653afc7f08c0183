//! Session bookkeeping and event dispatch for open menus.
//!
//! The registry owns the association between viewers and the menus they
//! have open. The host runtime calls into it on every click, close, and
//! disconnect; the registry runs menu callbacks and item action chains and
//! applies the directives those actions return. All calls happen on the
//! host's single dispatch thread.

use std::collections::HashMap;
use std::sync::Arc;

use menuforge_host::{
    ClickEvent, CloseEvent, DisconnectEvent, MenuHost, Scheduler, ViewerId,
};
use tracing::{debug, warn};

use crate::action::{Directive, PageTurn};
use crate::animation::RunningAnimations;
use crate::error::MenuResult;
use crate::menu::AnyMenu;

struct Session {
    menu: Arc<AnyMenu>,
    runner: RunningAnimations,
    page: usize,
}

/// Tracks every open menu and dispatches host events to it.
///
/// One registry instance serves the whole host; each viewer has at most one
/// live session, and opening a menu for a viewer replaces whatever they had
/// open before.
#[derive(Default)]
pub struct MenuRegistry {
    sessions: HashMap<ViewerId, Session>,
}

impl std::fmt::Debug for MenuRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuRegistry")
            .field("sessions", &self.sessions.len())
            .finish()
    }
}

impl MenuRegistry {
    /// Creates a registry with no open sessions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of viewers with an open menu.
    #[must_use]
    pub fn open_sessions(&self) -> usize {
        self.sessions.len()
    }

    /// True if the viewer currently has a menu open through this registry.
    #[must_use]
    pub fn is_open(&self, viewer: ViewerId) -> bool {
        self.sessions.contains_key(&viewer)
    }

    /// The menu a viewer has open, if any.
    #[must_use]
    pub fn menu_for(&self, viewer: ViewerId) -> Option<&Arc<AnyMenu>> {
        self.sessions.get(&viewer).map(|s| &s.menu)
    }

    /// The page a viewer is on, if they have a menu open. Single menus are
    /// always on page 0.
    #[must_use]
    pub fn current_page(&self, viewer: ViewerId) -> Option<usize> {
        self.sessions.get(&viewer).map(|s| s.page)
    }

    /// Opens a menu for a viewer at its first page.
    ///
    /// # Errors
    ///
    /// See [`MenuRegistry::open_page`].
    pub fn open(
        &mut self,
        viewer: ViewerId,
        menu: Arc<AnyMenu>,
        host: &mut dyn MenuHost,
        scheduler: &mut dyn Scheduler,
    ) -> MenuResult<()> {
        self.open_page(viewer, menu, 0, host, scheduler)
    }

    /// Opens a menu for a viewer at a specific page, replacing any session
    /// the viewer already has. The replaced session's animations are
    /// stopped before the new view is shown.
    ///
    /// # Errors
    ///
    /// [`MenuError::PageOutOfRange`](crate::MenuError::PageOutOfRange) if
    /// `page` is not a page of `menu`; the
    /// viewer's existing session is left untouched in that case.
    pub fn open_page(
        &mut self,
        viewer: ViewerId,
        menu: Arc<AnyMenu>,
        page: usize,
        host: &mut dyn MenuHost,
        scheduler: &mut dyn Scheduler,
    ) -> MenuResult<()> {
        let (title, contents) = menu.view(page)?;

        if let Some(mut previous) = self.sessions.remove(&viewer) {
            debug!(%viewer, menu = previous.menu.title(), "replacing open menu");
            if previous.runner.is_running() {
                previous.runner.stop(scheduler);
            }
        }

        host.show_inventory(viewer, title, &contents);

        let mut runner = RunningAnimations::new(Arc::clone(&menu), viewer);
        runner.start(scheduler);
        debug!(%viewer, menu = menu.title(), page, "menu opened");
        self.sessions.insert(viewer, Session { menu, runner, page });
        Ok(())
    }

    /// Dispatches a click on a viewer's open menu surface.
    ///
    /// No session means the click is not ours and the event is left alone.
    /// Otherwise the menu-wide click handler runs first, the menu's default
    /// cancellation applies to the event, and if the clicked slot holds an
    /// item its resolved policy overrides the default and its action chain
    /// runs. Directives the actions return are applied after the whole
    /// chain has finished.
    pub fn handle_click(
        &mut self,
        event: &mut ClickEvent,
        host: &mut dyn MenuHost,
        scheduler: &mut dyn Scheduler,
    ) {
        let Some(session) = self.sessions.get(&event.viewer) else {
            return;
        };
        let menu = Arc::clone(&session.menu);
        let page = session.page;

        if let Some(handler) = menu.on_click() {
            handler(event);
        }
        event.set_cancelled(menu.default_blocked());

        let Some(item) = menu.item_at(page, event.slot) else {
            return;
        };
        event.set_cancelled(item.interactions_blocked());

        let mut directives = Vec::new();
        for action in item.actions() {
            directives.push(action.execute(event, &menu, host));
        }
        for directive in directives {
            self.apply(event.viewer, directive, host, scheduler);
        }
    }

    fn apply(
        &mut self,
        viewer: ViewerId,
        directive: Directive,
        host: &mut dyn MenuHost,
        scheduler: &mut dyn Scheduler,
    ) {
        match directive {
            Directive::Continue => {}
            Directive::TurnPage(turn) => {
                let paged = self
                    .sessions
                    .get(&viewer)
                    .is_some_and(|s| s.menu.is_paged());
                if paged {
                    self.turn_page(viewer, turn, host);
                } else {
                    warn!(%viewer, ?turn, "page turn on unpaged menu ignored");
                }
            }
            Directive::OpenMenu(menu) => {
                if let Err(error) = self.open(viewer, menu, host, scheduler) {
                    warn!(%viewer, %error, "menu open requested by action failed");
                }
            }
            Directive::CloseMenu => {
                // Cleanup happens when the host delivers the close event.
                host.close_inventory(viewer);
            }
        }
    }

    /// Turns the page shown to a viewer, clamping at the ends. The view is
    /// only re-shown when the page actually changed; animations keep
    /// running across the turn.
    ///
    /// # Panics
    ///
    /// Panics if the viewer has no open session or their menu is unpaged.
    /// Both are usage-protocol errors in the calling code.
    pub fn turn_page(&mut self, viewer: ViewerId, turn: PageTurn, host: &mut dyn MenuHost) {
        let Some(session) = self.sessions.get_mut(&viewer) else {
            panic!("page turn for {viewer} with no open menu");
        };
        let pages = session.menu.page_count();
        assert!(
            session.menu.is_paged(),
            "page turn for {viewer} on unpaged menu"
        );
        let target = match turn {
            PageTurn::Next => (session.page + 1).min(pages - 1),
            PageTurn::Previous => session.page.saturating_sub(1),
            PageTurn::First => 0,
            PageTurn::Last => pages - 1,
        };
        if target == session.page {
            return;
        }
        session.page = target;
        let menu = Arc::clone(&session.menu);
        if let Ok((title, contents)) = menu.view(target) {
            host.show_inventory(viewer, title, &contents);
        }
    }

    /// Handles the host closing a viewer's menu surface: tears down the
    /// session, stops its animations, then runs the menu's close handler.
    /// A close for a viewer without a session is a no-op.
    pub fn handle_close(&mut self, event: &CloseEvent, scheduler: &mut dyn Scheduler) {
        let Some(mut session) = self.sessions.remove(&event.viewer) else {
            return;
        };
        if session.runner.is_running() {
            session.runner.stop(scheduler);
        }
        debug!(viewer = %event.viewer, menu = session.menu.title(), "menu closed");
        if let Some(handler) = session.menu.on_close() {
            handler(event);
        }
    }

    /// Handles a viewer disconnecting: tears down their session without
    /// running the close handler. Safe for viewers with nothing open.
    pub fn handle_disconnect(&mut self, event: &DisconnectEvent, scheduler: &mut dyn Scheduler) {
        let Some(mut session) = self.sessions.remove(&event.viewer) else {
            return;
        };
        if session.runner.is_running() {
            session.runner.stop(scheduler);
        }
        debug!(viewer = %event.viewer, menu = session.menu.title(), "session dropped on disconnect");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MenuError;
    use crate::item::{InteractionPolicy, MenuItem};
    use crate::menu::Menu;
    use crate::page::{Page, PagedMenu};
    use menuforge_host::{ItemStack, MockHost, MockScheduler};
    use std::collections::HashMap;

    fn single(default_blocked: bool, items: &[(u32, MenuItem)]) -> Arc<AnyMenu> {
        let items = items.iter().cloned().collect::<HashMap<_, _>>();
        Menu::new("Test", Some(9), items, Vec::new(), default_blocked, None, None)
            .unwrap()
            .into_shared()
    }

    fn paged(pages: usize) -> Arc<AnyMenu> {
        let pages = (0..pages)
            .map(|_| Page::new(None, 9, HashMap::new()).unwrap())
            .collect();
        PagedMenu::new("Paged", pages, Vec::new(), true, None, None)
            .unwrap()
            .into_shared()
    }

    #[test]
    fn test_open_shows_view_and_tracks_session() {
        let mut registry = MenuRegistry::new();
        let mut host = MockHost::new();
        let mut scheduler = MockScheduler::new();
        let viewer = ViewerId::new(1);

        registry
            .open(viewer, single(true, &[]), &mut host, &mut scheduler)
            .unwrap();
        assert!(registry.is_open(viewer));
        assert_eq!(host.shown(viewer).unwrap().title, "Test");
        assert_eq!(registry.current_page(viewer), Some(0));
    }

    #[test]
    fn test_open_invalid_page_leaves_existing_session() {
        let mut registry = MenuRegistry::new();
        let mut host = MockHost::new();
        let mut scheduler = MockScheduler::new();
        let viewer = ViewerId::new(1);

        registry
            .open(viewer, single(true, &[]), &mut host, &mut scheduler)
            .unwrap();
        let result = registry.open_page(viewer, paged(2), 5, &mut host, &mut scheduler);
        assert_eq!(
            result.unwrap_err(),
            MenuError::PageOutOfRange { page: 5, pages: 2 }
        );
        assert_eq!(registry.menu_for(viewer).unwrap().title(), "Test");
    }

    #[test]
    fn test_default_cancellation_applies_to_empty_slots() {
        let mut registry = MenuRegistry::new();
        let mut host = MockHost::new();
        let mut scheduler = MockScheduler::new();
        let viewer = ViewerId::new(1);

        registry
            .open(viewer, single(true, &[]), &mut host, &mut scheduler)
            .unwrap();
        let mut event = ClickEvent::new(viewer, 4, None);
        registry.handle_click(&mut event, &mut host, &mut scheduler);
        assert!(event.is_cancelled());
    }

    #[test]
    fn test_item_policy_overrides_menu_default() {
        let mut registry = MenuRegistry::new();
        let mut host = MockHost::new();
        let mut scheduler = MockScheduler::new();
        let viewer = ViewerId::new(1);

        let item = MenuItem::with_policy(ItemStack::of(1), InteractionPolicy::Allowed);
        registry
            .open(viewer, single(true, &[(0, item)]), &mut host, &mut scheduler)
            .unwrap();
        let mut event = ClickEvent::new(viewer, 0, Some(ItemStack::of(1)));
        registry.handle_click(&mut event, &mut host, &mut scheduler);
        assert!(!event.is_cancelled());
    }

    #[test]
    fn test_click_without_session_is_ignored() {
        let mut registry = MenuRegistry::new();
        let mut host = MockHost::new();
        let mut scheduler = MockScheduler::new();

        let mut event = ClickEvent::new(ViewerId::new(9), 0, None);
        registry.handle_click(&mut event, &mut host, &mut scheduler);
        assert!(!event.is_cancelled());
    }

    #[test]
    fn test_turn_page_clamps_at_both_ends() {
        let mut registry = MenuRegistry::new();
        let mut host = MockHost::new();
        let mut scheduler = MockScheduler::new();
        let viewer = ViewerId::new(1);

        registry
            .open(viewer, paged(3), &mut host, &mut scheduler)
            .unwrap();
        registry.turn_page(viewer, PageTurn::Previous, &mut host);
        assert_eq!(registry.current_page(viewer), Some(0));
        registry.turn_page(viewer, PageTurn::Last, &mut host);
        assert_eq!(registry.current_page(viewer), Some(2));
        registry.turn_page(viewer, PageTurn::Next, &mut host);
        assert_eq!(registry.current_page(viewer), Some(2));
        registry.turn_page(viewer, PageTurn::First, &mut host);
        assert_eq!(registry.current_page(viewer), Some(0));
    }

    #[test]
    #[should_panic(expected = "no open menu")]
    fn test_turn_page_without_session_panics() {
        let mut registry = MenuRegistry::new();
        let mut host = MockHost::new();
        registry.turn_page(ViewerId::new(1), PageTurn::Next, &mut host);
    }

    #[test]
    #[should_panic(expected = "unpaged menu")]
    fn test_turn_page_on_single_menu_panics() {
        let mut registry = MenuRegistry::new();
        let mut host = MockHost::new();
        let mut scheduler = MockScheduler::new();
        let viewer = ViewerId::new(1);

        registry
            .open(viewer, single(true, &[]), &mut host, &mut scheduler)
            .unwrap();
        registry.turn_page(viewer, PageTurn::Next, &mut host);
    }

    #[test]
    fn test_close_and_disconnect_drop_sessions() {
        let mut registry = MenuRegistry::new();
        let mut host = MockHost::new();
        let mut scheduler = MockScheduler::new();
        let a = ViewerId::new(1);
        let b = ViewerId::new(2);

        registry.open(a, single(true, &[]), &mut host, &mut scheduler).unwrap();
        registry.open(b, single(true, &[]), &mut host, &mut scheduler).unwrap();

        registry.handle_close(&CloseEvent::new(a), &mut scheduler);
        registry.handle_disconnect(&DisconnectEvent::new(b), &mut scheduler);
        assert_eq!(registry.open_sessions(), 0);

        // Both are no-ops the second time.
        registry.handle_close(&CloseEvent::new(a), &mut scheduler);
        registry.handle_disconnect(&DisconnectEvent::new(b), &mut scheduler);
    }
}
