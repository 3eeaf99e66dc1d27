//! Export orchestration
//!
//! This module provides the export run for Harvest:
//! - Stage-by-stage coordination of retrieval and reshaping
//! - The per-run operation log
//! - Summary and reporting

pub mod coordinator;
pub mod oplog;
pub mod summary;

pub use coordinator::{ExportCoordinator, NO_DATA_REASONS};
pub use oplog::{LogEntry, LogLevel, OperationLog};
pub use summary::{ExportFailure, ExportSummary, ExportWarning};
