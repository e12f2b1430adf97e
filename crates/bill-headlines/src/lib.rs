pub mod config;
pub mod error;
pub mod grammar;
pub mod sentence;
pub mod storage;
pub mod telemetry;
pub mod workflows;
