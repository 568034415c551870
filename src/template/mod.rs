//! Template store - tag-to-handler bindings loaded from template documents

pub mod conflict;
pub mod document;
pub mod store;

pub use conflict::find_duplicates;
pub use document::TemplateDocument;
pub use store::{HandlerRef, TemplateEntry, TemplateStore};
