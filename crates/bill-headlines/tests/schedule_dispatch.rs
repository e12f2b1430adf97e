use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use bill_headlines::workflows::congress::BillId;
use bill_headlines::workflows::headlines::Headline;
use bill_headlines::workflows::schedule::{
    plan_schedule, Dispatcher, PostError, PostReceipt, ScheduleStore, StatusPoster,
};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Default)]
struct RecordingPoster {
    statuses: Mutex<Vec<String>>,
}

impl RecordingPoster {
    fn statuses(&self) -> Vec<String> {
        self.statuses.lock().expect("poster mutex").clone()
    }
}

#[async_trait]
impl StatusPoster for RecordingPoster {
    async fn publish(&self, status: &str) -> Result<PostReceipt, PostError> {
        let mut guard = self.statuses.lock().expect("poster mutex");
        guard.push(status.to_string());
        Ok(PostReceipt {
            id: format!("status-{}", guard.len()),
            url: None,
        })
    }
}

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2017, 3, 9).expect("valid date")
}

fn headlines(count: u32) -> Vec<Headline> {
    (1..=count)
        .map(|number| Headline {
            bill_id: BillId::new("hr", number),
            text: format!("HR.{number} The world's finest bill https://example.gov/hr{number}"),
        })
        .collect()
}

#[test]
fn ten_headlines_fill_ten_consecutive_days() {
    let schedule =
        plan_schedule(headlines(10), epoch(), &mut StdRng::seed_from_u64(7)).expect("plans");

    assert_eq!(schedule.len(), 10);
    let dates: HashSet<NaiveDate> = schedule.entries().iter().map(|entry| entry.date).collect();
    assert_eq!(dates.len(), 10);
    assert_eq!(schedule.first_date(), Some(epoch()));
    assert_eq!(
        schedule.last_date(),
        NaiveDate::from_ymd_opt(2017, 3, 18)
    );

    let texts: HashSet<&str> = schedule.entries().iter().map(|entry| entry.text.as_str()).collect();
    assert_eq!(texts.len(), 10);
}

#[test]
fn stored_schedule_reloads_identically() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = ScheduleStore::new(dir.path().join("schedule.json"));
    assert!(!store.exists());

    let schedule =
        plan_schedule(headlines(4), epoch(), &mut StdRng::seed_from_u64(3)).expect("plans");
    store.save(&schedule).expect("saves");

    assert!(store.exists());
    assert_eq!(store.load().expect("loads"), schedule);
}

#[tokio::test]
async fn dispatching_twice_posts_twice() {
    let schedule =
        plan_schedule(headlines(3), epoch(), &mut StdRng::seed_from_u64(5)).expect("plans");
    let expected = schedule
        .entries_on(epoch())
        .map(|entry| entry.text.clone())
        .collect::<Vec<_>>();
    assert_eq!(expected.len(), 1);

    let dispatcher = Dispatcher::new(RecordingPoster::default(), 280);
    let first = dispatcher.dispatch(&schedule, epoch()).await.expect("first run");
    let second = dispatcher.dispatch(&schedule, epoch()).await.expect("second run");

    assert_eq!(first.posted.len(), 1);
    assert_eq!(second.posted.len(), 1);
    assert_eq!(
        dispatcher.poster().statuses(),
        vec![expected[0].clone(), expected[0].clone()]
    );
}

#[tokio::test]
async fn days_outside_the_schedule_post_nothing() {
    let schedule =
        plan_schedule(headlines(2), epoch(), &mut StdRng::seed_from_u64(5)).expect("plans");
    let dispatcher = Dispatcher::new(RecordingPoster::default(), 280);
    let before = epoch().pred_opt().expect("valid date");

    let report = dispatcher.dispatch(&schedule, before).await.expect("dispatch");
    assert!(report.posted.is_empty());
    assert!(dispatcher.poster().statuses().is_empty());
}
