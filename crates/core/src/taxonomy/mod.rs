//! Universal category taxonomy and per-adapter category maps.

mod map;
mod types;

pub use map::{CategoryMap, CategoryMapError, CategoryMapping};
pub use types::UniversalCategory;
