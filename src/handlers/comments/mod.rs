mod create;
mod delete;
mod list;

pub use create::create_comment;
pub use delete::delete_comment;
pub use list::get_comments;

use crate::error::ApiError;

pub(crate) const MAX_CONTENT_CHARS: usize = 500;
pub(crate) const MAX_AUTHOR_CHARS: usize = 100;

/// Business bounds on comment fields, checked after field presence and
/// workspace authorization. Limits are in characters, not bytes.
pub(crate) fn validate_comment_bounds(content: &str, author: &str) -> Result<(), ApiError> {
    if content.chars().count() > MAX_CONTENT_CHARS {
        return Err(ApiError::invalid_input(format!(
            "Comment cannot exceed {} characters",
            MAX_CONTENT_CHARS
        )));
    }

    if author.chars().count() > MAX_AUTHOR_CHARS {
        return Err(ApiError::invalid_input(format!(
            "Author name cannot exceed {} characters",
            MAX_AUTHOR_CHARS
        )));
    }

    Ok(())
}
