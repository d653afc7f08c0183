//! Declarative menu layouts loaded from TOML.
//!
//! Layouts cover the data side of a menu: title, size, default policy, and
//! the icons on it. Actions, animations, and handlers are code; callers
//! attach those to the builder a layout produces.
//!
//! ```toml
//! title = "Warp Hub"
//! size = 27
//! blocked = true
//!
//! [[item]]
//! slot = 11
//! material = 345
//! name = "Spawn"
//!
//! [[item]]
//! slot = 15
//! material = 345
//! count = 2
//! blocked = false
//! ```

use serde::{Deserialize, Serialize};

use menuforge_host::ItemStack;

use crate::builder::MenuBuilder;
use crate::error::{MenuError, MenuResult};
use crate::item::{InteractionPolicy, MenuItem};

/// One icon placement in a layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemLayout {
    /// Slot the icon sits at.
    pub slot: u32,
    /// Material id of the icon.
    pub material: u32,
    /// Icon stack count.
    #[serde(default = "default_count")]
    pub count: u32,
    /// Icon display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Per-item interaction override; unset items inherit the menu
    /// default.
    #[serde(default)]
    pub blocked: Option<bool>,
}

fn default_count() -> u32 {
    1
}

/// A declarative single-page menu layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuLayout {
    /// Menu title.
    pub title: String,
    /// Fixed surface size; omitted layouts auto-size to their items.
    #[serde(default)]
    pub size: Option<u32>,
    /// Default interaction policy; omitted layouts block interactions.
    #[serde(default)]
    pub blocked: Option<bool>,
    /// Icon placements.
    #[serde(default, rename = "item")]
    pub items: Vec<ItemLayout>,
}

impl MenuLayout {
    /// Parses a layout from TOML text.
    ///
    /// # Errors
    ///
    /// [`MenuError::InvalidConfig`] describing the parse failure.
    pub fn from_toml_str(input: &str) -> MenuResult<Self> {
        toml::from_str(input).map_err(|e| MenuError::InvalidConfig(e.to_string()))
    }

    /// Converts the layout into a menu builder, ready for actions and
    /// animations to be attached.
    ///
    /// # Errors
    ///
    /// The usual builder errors: an invalid size or an out-of-range slot.
    pub fn into_builder(self) -> MenuResult<MenuBuilder> {
        let mut builder = MenuBuilder::new(self.title);
        if let Some(size) = self.size {
            builder = builder.size(size)?;
        }
        if let Some(blocked) = self.blocked {
            builder = builder.interactions_blocked(blocked);
        }
        for layout in self.items {
            let mut icon = ItemStack::new(layout.material, layout.count);
            if let Some(name) = layout.name {
                icon = icon.named(name);
            }
            let item = match layout.blocked {
                Some(blocked) => {
                    MenuItem::with_policy(icon, InteractionPolicy::from_blocked(blocked))
                }
                None => MenuItem::new(icon),
            };
            builder = builder.item(layout.slot, item)?;
        }
        Ok(builder)
    }
}
