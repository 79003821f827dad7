//! Domain model types (pure).

pub mod error;
pub mod identifiers;
pub mod key_action;

pub use error::AppError;
pub use identifiers::{InvalidPanelName, InvalidRegionName, PanelName, RegionName};
pub use key_action::{KeyAction, MenuItem};
