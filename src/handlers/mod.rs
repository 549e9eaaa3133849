// Callable handlers, one module per entity, one file per operation.
//
// Every handler runs the same short-circuiting pipeline: identity (via
// middleware) -> required fields -> workspace token -> business rules ->
// repository -> envelope with refreshed tokens.
pub mod comments;
pub mod texts;
