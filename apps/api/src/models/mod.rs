pub mod dashboard;
pub mod job;
