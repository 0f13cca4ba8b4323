//! BEM class-name builder.
//!
//! ```
//! use bem_class_names::{block, Mods};
//!
//! let classes = block("menu")
//!     .elem("item")
//!     .mods(Mods::new().set("theme", "dark"))
//!     .mix(["extra"])
//!     .state([("open", true)]);
//! assert_eq!(classes.to_string(), "menu__item menu__item_theme_dark extra is-open");
//! ```
pub mod block;
pub mod context;
pub mod errors;
pub mod settings;
mod render;

pub use block::{block, Arg, Block, Mix};
pub use context::{Context, ModValue, Mods, States};
pub use errors::{BemError, Result};
pub use settings::{reset, setup, Settings, Setup};
