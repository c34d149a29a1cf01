//! Normalized release entries and the helpers adapters use to build them.
//!
//! A site record describes one logical release; each of its downloadable
//! variants becomes one [`ResultEntry`]. The item-level fields are captured
//! once in a [`ReleaseBase`] and every variant is built from it by
//! [`ReleaseBase::variant`].

mod base;
mod compose;
mod context;
mod entry;

pub use base::{Expansion, ReleaseBase, ValidationDrop, Variant};
pub use compose::{
    compose_title, first_poster, quality_suffix, reconcile_publish_date, variant_title,
    TITLE_SEPARATOR,
};
pub use context::ExpandContext;
pub use entry::ResultEntry;
