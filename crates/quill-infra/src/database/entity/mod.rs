//! SeaORM entities. Each maps one table and knows how to become a domain value.

pub mod category;
pub mod post;

pub use category::Entity as Category;
pub use post::Entity as Post;
