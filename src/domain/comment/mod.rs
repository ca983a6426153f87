//! Comment lifecycle: entity, initial-state screening and visibility rules.

mod comment;
mod errors;
mod events;
mod screening;
mod state;
mod visibility;

pub use comment::{Comment, Deletion, TOMBSTONE};
pub use errors::CommentError;
pub use events::CommentCreated;
pub use screening::Screening;
pub use state::{CommentState, ParentRef, ROOT_PARENT};
pub use visibility::{is_listed, CommentView};
