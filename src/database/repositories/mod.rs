pub mod comments;
pub mod texts;

pub use comments::{CommentRepository, NewComment};
pub use texts::{NewText, TextChanges, TextRepository};
