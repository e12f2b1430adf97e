//! Daily schedule: planning, persistence and dispatch.

mod dispatcher;
mod planner;
pub mod poster;
mod store;

use std::path::PathBuf;

use thiserror::Error;

pub use dispatcher::{DispatchError, DispatchReport, Dispatcher};
pub use planner::{parse_date, plan_schedule, Schedule, ScheduleEntry, DATE_FORMAT};
pub use poster::{ConsolePoster, MastodonPoster, PostError, PostReceipt, StatusPoster};
pub use store::ScheduleStore;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("failed to access schedule {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("schedule {} is malformed: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("schedule date overflows the calendar at offset {offset}")]
    DateOverflow { offset: usize },
}
