//! Per-province prayer-time calendars rebuilt from the tables extracted out of
//! the monthly ministry documents.

pub mod calendar;
pub mod config;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod prayer;
pub mod process;
