//! Ports - traits the core expects infrastructure to implement.

mod repository;

pub use repository::{BaseRepository, PostRepository};
