use chrono::NaiveDate;
use thiserror::Error;
use tracing::{info, warn};

use super::planner::Schedule;
use super::poster::{PostError, PostReceipt, StatusPoster};

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("failed to post headline scheduled for {date}: {source}")]
    Post {
        date: NaiveDate,
        #[source]
        source: PostError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    pub date: NaiveDate,
    pub posted: Vec<PostReceipt>,
    pub oversized: usize,
}

/// Posts whatever the schedule maps to a given day.
///
/// The schedule is only read. Entries are not marked as posted, so running
/// twice on the same day posts the same headlines twice.
pub struct Dispatcher<P> {
    poster: P,
    char_limit: usize,
}

impl<P: StatusPoster> Dispatcher<P> {
    pub fn new(poster: P, char_limit: usize) -> Self {
        Self { poster, char_limit }
    }

    pub fn poster(&self) -> &P {
        &self.poster
    }

    pub async fn dispatch(
        &self,
        schedule: &Schedule,
        today: NaiveDate,
    ) -> Result<DispatchReport, DispatchError> {
        let mut report = DispatchReport {
            date: today,
            posted: Vec::new(),
            oversized: 0,
        };

        for entry in schedule.entries_on(today) {
            let length = entry.text.chars().count();
            if length > self.char_limit {
                warn!(
                    %today,
                    length,
                    limit = self.char_limit,
                    "headline exceeds platform limit, not posting"
                );
                report.oversized += 1;
                continue;
            }

            let receipt = self
                .poster
                .publish(&entry.text)
                .await
                .map_err(|source| DispatchError::Post {
                    date: today,
                    source,
                })?;
            report.posted.push(receipt);
        }

        if report.posted.is_empty() && report.oversized == 0 {
            info!(%today, "nothing scheduled for today");
        } else {
            info!(
                %today,
                posted = report.posted.len(),
                oversized = report.oversized,
                "dispatch finished"
            );
        }
        Ok(report)
    }
}
