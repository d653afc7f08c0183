//! Click actions attached to menu items.
//!
//! Actions run synchronously inside the host's dispatch thread. An action
//! may touch the host directly (custom handlers do), but anything that
//! changes the registry's own bookkeeping - turning pages, opening another
//! menu, closing - is returned as a [`Directive`] and applied by the
//! registry after the whole chain has run. This keeps actions free of any
//! reference back into the registry that is currently dispatching them.

use std::sync::Arc;

use menuforge_host::{ClickEvent, MenuHost};

use crate::menu::AnyMenu;

/// Which way a page turn moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTurn {
    /// The next page, clamped at the last page.
    Next,
    /// The previous page, clamped at the first page.
    Previous,
    /// The first page.
    First,
    /// The last page.
    Last,
}

/// Registry work requested by an action, applied after the action chain.
#[derive(Clone)]
pub enum Directive {
    /// Nothing further.
    Continue,
    /// Turn the clicking viewer's page. Ignored on unpaged menus.
    TurnPage(PageTurn),
    /// Open another menu for the clicking viewer.
    OpenMenu(Arc<AnyMenu>),
    /// Ask the host to close the viewer's surface. Registry cleanup happens
    /// when the host delivers the resulting close event.
    CloseMenu,
}

impl std::fmt::Debug for Directive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Continue => f.write_str("Continue"),
            Self::TurnPage(turn) => f.debug_tuple("TurnPage").field(turn).finish(),
            Self::OpenMenu(menu) => f.debug_tuple("OpenMenu").field(&menu.title()).finish(),
            Self::CloseMenu => f.write_str("CloseMenu"),
        }
    }
}

/// Action performed when a menu item's icon is clicked.
///
/// Actions are stateless and reusable: the same action instance can sit on
/// many items across many menus.
pub trait Action: Send + Sync {
    /// Executes against the originating click. Changes made to `event`
    /// (cancellation) are reflected back to the host.
    fn execute(&self, event: &mut ClickEvent, menu: &AnyMenu, host: &mut dyn MenuHost)
        -> Directive;
}

/// Closes the menu the clicking viewer has open.
#[derive(Debug, Clone, Copy, Default)]
pub struct CloseMenuAction;

impl Action for CloseMenuAction {
    fn execute(
        &self,
        _event: &mut ClickEvent,
        _menu: &AnyMenu,
        _host: &mut dyn MenuHost,
    ) -> Directive {
        Directive::CloseMenu
    }
}

/// Turns the clicking viewer's current page of a paged menu.
#[derive(Debug, Clone, Copy)]
pub struct TurnPageAction {
    turn: PageTurn,
}

impl TurnPageAction {
    /// Creates a page-turn action.
    #[must_use]
    pub const fn new(turn: PageTurn) -> Self {
        Self { turn }
    }
}

impl Action for TurnPageAction {
    fn execute(
        &self,
        _event: &mut ClickEvent,
        _menu: &AnyMenu,
        _host: &mut dyn MenuHost,
    ) -> Directive {
        Directive::TurnPage(self.turn)
    }
}

type MenuSupplier = Box<dyn Fn(&ClickEvent) -> Arc<AnyMenu> + Send + Sync>;

/// Opens another menu for the clicking viewer, either a fixed menu or one
/// produced per click.
pub struct OpenMenuAction {
    supplier: MenuSupplier,
}

impl std::fmt::Debug for OpenMenuAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("OpenMenuAction")
    }
}

impl OpenMenuAction {
    /// Always opens the same menu.
    #[must_use]
    pub fn new(menu: Arc<AnyMenu>) -> Self {
        Self {
            supplier: Box::new(move |_event| Arc::clone(&menu)),
        }
    }

    /// Produces the menu to open from the originating click, letting the
    /// target vary per viewer.
    #[must_use]
    pub fn from_fn(supplier: impl Fn(&ClickEvent) -> Arc<AnyMenu> + Send + Sync + 'static) -> Self {
        Self {
            supplier: Box::new(supplier),
        }
    }
}

impl Action for OpenMenuAction {
    fn execute(
        &self,
        event: &mut ClickEvent,
        _menu: &AnyMenu,
        _host: &mut dyn MenuHost,
    ) -> Directive {
        Directive::OpenMenu((self.supplier)(event))
    }
}

type CustomHandler = Box<dyn Fn(&mut ClickEvent, &AnyMenu, &mut dyn MenuHost) + Send + Sync>;

/// Runs an arbitrary handler against the click.
pub struct CustomAction {
    handler: CustomHandler,
}

impl std::fmt::Debug for CustomAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CustomAction")
    }
}

impl CustomAction {
    /// Wraps a handler closure into an action.
    #[must_use]
    pub fn new(
        handler: impl Fn(&mut ClickEvent, &AnyMenu, &mut dyn MenuHost) + Send + Sync + 'static,
    ) -> Self {
        Self {
            handler: Box::new(handler),
        }
    }
}

impl Action for CustomAction {
    fn execute(
        &self,
        event: &mut ClickEvent,
        menu: &AnyMenu,
        host: &mut dyn MenuHost,
    ) -> Directive {
        (self.handler)(event, menu, host);
        Directive::Continue
    }
}
