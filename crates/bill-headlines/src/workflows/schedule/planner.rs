use std::collections::HashSet;

use chrono::{Duration, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ScheduleError;
use crate::workflows::headlines::Headline;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Persisted as a two-element array: `["2017-03-09", "HR.1 ..."]`.
#[derive(Serialize, Deserialize)]
struct EntryRow(String, String);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "EntryRow", try_from = "EntryRow")]
pub struct ScheduleEntry {
    pub date: NaiveDate,
    pub text: String,
}

impl From<ScheduleEntry> for EntryRow {
    fn from(entry: ScheduleEntry) -> Self {
        EntryRow(entry.date.format(DATE_FORMAT).to_string(), entry.text)
    }
}

impl TryFrom<EntryRow> for ScheduleEntry {
    type Error = String;

    fn try_from(row: EntryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            date: parse_date(&row.0)?,
            text: row.1,
        })
    }
}

/// Headlines mapped onto consecutive calendar days.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    entries: Vec<ScheduleEntry>,
}

impl Schedule {
    pub fn new(entries: Vec<ScheduleEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries_on(&self, date: NaiveDate) -> impl Iterator<Item = &ScheduleEntry> {
        self.entries.iter().filter(move |entry| entry.date == date)
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.entries.iter().map(|entry| entry.date).min()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.entries.iter().map(|entry| entry.date).max()
    }
}

/// Drops repeated headline texts, shuffles the rest uniformly and assigns
/// `epoch + i` to the i-th headline.
pub fn plan_schedule<R: Rng + ?Sized>(
    headlines: Vec<Headline>,
    epoch: NaiveDate,
    rng: &mut R,
) -> Result<Schedule, ScheduleError> {
    let mut seen = HashSet::new();
    let mut texts: Vec<String> = headlines
        .into_iter()
        .map(|headline| headline.text)
        .filter(|text| seen.insert(text.clone()))
        .collect();

    texts.shuffle(rng);

    let entries = texts
        .into_iter()
        .enumerate()
        .map(|(offset, text)| {
            let date = i64::try_from(offset)
                .ok()
                .and_then(|days| epoch.checked_add_signed(Duration::days(days)))
                .ok_or(ScheduleError::DateOverflow { offset })?;
            Ok(ScheduleEntry { date, text })
        })
        .collect::<Result<Vec<_>, ScheduleError>>()?;

    Ok(Schedule::new(entries))
}
