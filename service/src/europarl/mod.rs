//! European Parliament open-data API module.
//!
//! # Architecture
//!
//! - [`EuroparlApiClient`] - Trait defining the four read operations the
//!   pipeline needs (roster, member details, plenary sittings, event details)
//! - [`HttpEuroparlClient`] - Real HTTP implementation using reqwest
//! - [`mock::MockEuroparlClient`] - Mock for unit tests (behind `test-utils` feature)
//!
//! Detail endpoints take an [`IdBatch`](crate::batch::IdBatch) rather than a
//! raw id list so callers cannot exceed the per-endpoint id limit.

mod client;
mod types;

pub use client::{
    EuroparlApiClient, EuroparlApiError, HttpEuroparlClient, LD_JSON, PLENARY_SITTING,
};
pub use types::{
    DataEnvelope, EventDetail, EventStub, MemberDetail, MemberSummary, Membership, Period,
};

#[cfg(any(test, feature = "test-utils"))]
pub use client::mock;
