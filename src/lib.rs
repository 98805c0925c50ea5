pub mod config;
pub mod email;
pub mod linkedin;
pub mod report;
pub mod storage;
pub mod sync;
pub mod telemetry;
