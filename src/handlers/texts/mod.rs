mod create;
mod delete;
mod list;
mod update;

pub use create::create_text;
pub use delete::delete_text;
pub use list::get_texts;
pub use update::update_text;
