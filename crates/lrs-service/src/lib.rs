//! Learning-experience orchestration for the LRS connector.
//!
//! [`LearningExperienceService`] is the single entry point the hosting layer
//! calls for every inbound request. Each operation is an independent,
//! short-lived transaction:
//!
//! ```text
//! Received -> Built -> Submitted -> Completed
//!               |          |
//!               v          v
//!           Rejected     Failed
//! ```
//!
//! Validation rejections and remote failures are contained inside the
//! operation and logged. The only caller-visible failure signal is the `-1`
//! sentinel returned by [`LearningExperienceService::count_matching_statements`].

pub mod config;
pub mod error;
pub mod outcome;
pub mod service;

pub use config::{ServiceConfig, StatementsConfig};
pub use error::ServiceError;
pub use outcome::{StoreOutcome, VoidSummary};
pub use service::{count_visible, LearningExperienceService, COUNT_FAILED};
