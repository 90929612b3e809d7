//! Domain entities - the core business objects.

mod category;
mod page;
mod post;

pub use category::{Category, CategoryChanges, CategorySummary, NewCategory};
pub use page::{MAX_OFFSET, Page, PageRequest};
pub use post::{NewPost, Post, PostChanges};
