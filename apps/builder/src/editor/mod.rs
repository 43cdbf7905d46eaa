// Editable section controllers: drafts, validation and commits into the
// resume store. HTTP handlers live in `handlers`.

pub mod duration;
pub mod entries;
pub mod handlers;
pub mod lists;
pub mod profile;
pub mod section;
pub mod session;
pub mod validation;

pub use session::EditorSession;
