//! Region migration progress watcher.
//!
//! Two loops share one mutex-guarded snapshot: the poll loop fetches the
//! migration every `poll_interval` and replaces the snapshot wholesale; the
//! paint loop redraws the summary in place every `repaint_interval`, so the
//! spinner keeps moving between polls. Both are joined before `watch`
//! returns, and the paint loop only exits after painting a frame taken
//! together with the stop flag, which makes the last visible frame the final
//! state.

mod frame;
mod messages;
mod types;
mod watcher;

pub use frame::{FrameView, FrameWriter, RetryBanner, SPINNER};
pub use messages::{finished_message, hint_for};
pub use types::{MigrationStatus, RegionMigration, Step, StepStatus};
pub use watcher::{WatchError, WatchOptions, Watcher};
