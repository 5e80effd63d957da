//! Background Tasks Module
//!
//! Contains background tasks that run during daemon operation.
//!
//! # Tasks
//! - Maintenance: persists the block hash cache once enough new entries
//!   have accumulated, checked once per accepted block

mod maintenance;

pub use maintenance::{maintenance_channel, spawn_maintenance_task, BlockAccepted, BlockNotifier};
