//! Universal queries and the site requests they translate to.

mod request;
mod types;

pub use request::{HttpMethod, SiteRequest};
pub use types::{QueryField, UniversalQuery};
