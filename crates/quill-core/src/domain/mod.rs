//! Domain entities - the core business objects.

mod input;
mod page;
mod patch;
mod post;

pub use input::PostInput;
pub use page::{MAX_PAGE, MAX_PER_PAGE, Page, PageRequest, PostQuery, TrashScope};
pub use patch::Patch;
pub use post::{NewPost, Post, PostChanges, PostState};
