pub mod congress;
pub mod headlines;
pub mod schedule;
