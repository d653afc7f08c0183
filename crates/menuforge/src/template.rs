//! Menu templates: a shared static layout plus a per-viewer pass.
//!
//! A template splits menu construction in two. The static pass shapes the
//! parts every viewer sees the same way and runs at most once, lazily, with
//! its result cached; the dynamic pass runs per viewer on a clone of the
//! cached builder. Hosts that want the static cost paid up front call
//! [`MenuTemplate::preload`] during startup.

use std::sync::Arc;

use parking_lot::Mutex;

use menuforge_host::ViewerId;

use crate::builder::MenuBuild;
use crate::error::MenuResult;
use crate::menu::AnyMenu;

type StaticPass<B> = Box<dyn Fn(B) -> MenuResult<B> + Send + Sync>;
type DynamicPass<B> = Box<dyn Fn(B, ViewerId) -> MenuResult<B> + Send + Sync>;

/// A reusable recipe producing one menu builder per viewer.
///
/// `B` is any cloneable builder, typically [`MenuBuilder`] or
/// [`PagedMenuBuilder`].
///
/// [`MenuBuilder`]: crate::builder::MenuBuilder
/// [`PagedMenuBuilder`]: crate::builder::PagedMenuBuilder
pub struct MenuTemplate<B> {
    base: B,
    static_pass: StaticPass<B>,
    dynamic_pass: DynamicPass<B>,
    prepared: Mutex<Option<B>>,
}

impl<B> std::fmt::Debug for MenuTemplate<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuTemplate")
            .field("prepared", &self.prepared.lock().is_some())
            .finish()
    }
}

impl<B: Clone + 'static> MenuTemplate<B> {
    /// Starts a template from a base builder with identity passes.
    #[must_use]
    pub fn new(base: B) -> Self {
        Self {
            base,
            static_pass: Box::new(Ok),
            dynamic_pass: Box::new(|builder, _viewer| Ok(builder)),
            prepared: Mutex::new(None),
        }
    }

    /// Sets the static pass, the viewer-independent part of the layout.
    /// Replacing the pass discards any cached result.
    #[must_use]
    pub fn static_pass(mut self, pass: impl Fn(B) -> MenuResult<B> + Send + Sync + 'static) -> Self {
        self.static_pass = Box::new(pass);
        *self.prepared.get_mut() = None;
        self
    }

    /// Sets the dynamic pass, run per viewer on a clone of the static
    /// result.
    #[must_use]
    pub fn dynamic_pass(
        mut self,
        pass: impl Fn(B, ViewerId) -> MenuResult<B> + Send + Sync + 'static,
    ) -> Self {
        self.dynamic_pass = Box::new(pass);
        self
    }

    /// Runs the static pass now instead of on first use.
    ///
    /// # Errors
    ///
    /// Whatever the static pass returns. A failed preload caches nothing;
    /// the next call retries.
    pub fn preload(&self) -> MenuResult<()> {
        let mut prepared = self.prepared.lock();
        if prepared.is_none() {
            *prepared = Some((self.static_pass)(self.base.clone())?);
        }
        Ok(())
    }

    /// The builder for one viewer: the cached static result (computed on
    /// first use) run through the dynamic pass.
    ///
    /// # Errors
    ///
    /// Whatever either pass returns.
    pub fn builder_for(&self, viewer: ViewerId) -> MenuResult<B> {
        let snapshot = {
            let mut prepared = self.prepared.lock();
            if prepared.is_none() {
                *prepared = Some((self.static_pass)(self.base.clone())?);
            }
            prepared.clone()
        };
        // The lock scope above guarantees the cache is filled.
        let Some(builder) = snapshot else {
            unreachable!("template cache filled under the lock");
        };
        (self.dynamic_pass)(builder, viewer)
    }
}

impl<B: Clone + MenuBuild + 'static> MenuTemplate<B> {
    /// Produces the finished menu for one viewer, ready to open.
    ///
    /// # Errors
    ///
    /// Whatever either pass or the final build returns.
    pub fn generate(&self, viewer: ViewerId) -> MenuResult<Arc<AnyMenu>> {
        self.builder_for(viewer)?.build_shared()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{MenuBuilder, MenuItemBuilder};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting_template(counter: Arc<AtomicUsize>) -> MenuTemplate<MenuBuilder> {
        MenuTemplate::new(MenuBuilder::new("Profile"))
            .static_pass(move |builder| {
                counter.fetch_add(1, Ordering::Relaxed);
                builder.size(27)?.item(0, MenuItemBuilder::new(160).build())
            })
            .dynamic_pass(|builder, viewer| {
                builder.item(
                    13,
                    MenuItemBuilder::new(397).name(viewer.to_string()).build(),
                )
            })
    }

    #[test]
    fn test_static_pass_runs_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let template = counting_template(Arc::clone(&calls));

        template.builder_for(ViewerId::new(1)).unwrap();
        template.builder_for(ViewerId::new(2)).unwrap();
        assert_eq!(calls.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_preload_fills_the_cache() {
        let calls = Arc::new(AtomicUsize::new(0));
        let template = counting_template(Arc::clone(&calls));

        template.preload().unwrap();
        assert_eq!(calls.load(Ordering::Relaxed), 1);
        template.builder_for(ViewerId::new(1)).unwrap();
        assert_eq!(calls.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_dynamic_pass_sees_the_viewer() {
        let template = counting_template(Arc::new(AtomicUsize::new(0)));
        let menu = template.builder_for(ViewerId::new(7)).unwrap().build().unwrap();
        assert_eq!(
            menu.item(13).unwrap().icon().display_name.as_deref(),
            Some("viewer#7")
        );
    }

    #[test]
    fn test_generate_finishes_the_menu() {
        let template = counting_template(Arc::new(AtomicUsize::new(0)));
        let menu = template.generate(ViewerId::new(3)).unwrap();
        assert_eq!(menu.title(), "Profile");
        assert!(menu.item_at(0, 13).is_some());
    }

    #[test]
    fn test_failed_static_pass_is_retried() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let template = MenuTemplate::new(MenuBuilder::new("Bad")).static_pass(move |builder| {
            counter.fetch_add(1, Ordering::Relaxed);
            builder.size(10)?;
            unreachable!("size 10 is invalid")
        });

        assert!(template.preload().is_err());
        assert!(template.builder_for(ViewerId::new(1)).is_err());
        assert_eq!(calls.load(Ordering::Relaxed), 2);
    }
}
