use crate::config::ConfigError;
use crate::grammar::GrammarError;
use crate::sentence::conllu::ConlluError;
use crate::telemetry::TelemetryError;
use crate::workflows::congress::{ArchiveError, FetchError};
use crate::workflows::schedule::{DispatchError, ScheduleError};
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Grammar(GrammarError),
    Archive(ArchiveError),
    Fetch(FetchError),
    Conllu(ConlluError),
    Schedule(ScheduleError),
    Dispatch(DispatchError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {err}"),
            AppError::Telemetry(err) => write!(f, "telemetry error: {err}"),
            AppError::Io(err) => write!(f, "io error: {err}"),
            AppError::Grammar(err) => write!(f, "grammar error: {err}"),
            AppError::Archive(err) => write!(f, "bill archive error: {err}"),
            AppError::Fetch(err) => write!(f, "bill download error: {err}"),
            AppError::Conllu(err) => write!(f, "parse corpus error: {err}"),
            AppError::Schedule(err) => write!(f, "schedule error: {err}"),
            AppError::Dispatch(err) => write!(f, "dispatch error: {err}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Grammar(err) => Some(err),
            AppError::Archive(err) => Some(err),
            AppError::Fetch(err) => Some(err),
            AppError::Conllu(err) => Some(err),
            AppError::Schedule(err) => Some(err),
            AppError::Dispatch(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<GrammarError> for AppError {
    fn from(value: GrammarError) -> Self {
        Self::Grammar(value)
    }
}

impl From<ArchiveError> for AppError {
    fn from(value: ArchiveError) -> Self {
        Self::Archive(value)
    }
}

impl From<FetchError> for AppError {
    fn from(value: FetchError) -> Self {
        Self::Fetch(value)
    }
}

impl From<ConlluError> for AppError {
    fn from(value: ConlluError) -> Self {
        Self::Conllu(value)
    }
}

impl From<ScheduleError> for AppError {
    fn from(value: ScheduleError) -> Self {
        Self::Schedule(value)
    }
}

impl From<DispatchError> for AppError {
    fn from(value: DispatchError) -> Self {
        Self::Dispatch(value)
    }
}
