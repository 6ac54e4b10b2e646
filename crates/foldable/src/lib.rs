pub mod animation;
pub mod compositor;
pub mod content;
pub mod error;
pub mod frame;
pub mod input;
pub mod listener;
pub mod panel;
pub mod shadow;
pub mod slice;
pub mod snapshot;


pub use animation::{FoldDirection, RunOutcome};
pub use content::{Content, ContentView, EmptyContent};
pub use error::FoldError;
pub use listener::{FoldListener, NoopListener};
pub use panel::FoldablePanel;
pub use snapshot::Snapshot;
