//! European Parliament open-data API client.
//!
//! Trait-based so the pipeline can run against the real HTTP API, a
//! `wiremock` server in integration tests, or the in-memory
//! [`mock::MockEuroparlClient`] in unit tests.
//!
//! # Example
//!
//! ```ignore
//! use europarl_attendance::europarl::{EuroparlApiClient, HttpEuroparlClient};
//!
//! let client = HttpEuroparlClient::new("https://data.europarl.europa.eu/api/v1");
//! let roster = client.current_members().await?;
//! println!("{} current members", roster.len());
//! ```

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::types::{DataEnvelope, EventDetail, EventStub, MemberDetail, MemberSummary};
use crate::batch::IdBatch;

/// Content negotiation value sent as the `format` query parameter.
pub const LD_JSON: &str = "application/ld+json";

/// Activity type of plenary sittings in the `/events` listing.
pub const PLENARY_SITTING: &str = "EP_PLENARY_SITTING";

/// Errors that can occur when calling the open-data API.
#[derive(Debug, Error)]
pub enum EuroparlApiError {
    /// Network, DNS, or connection failure
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// API answered with a non-success status
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Body was not JSON or did not match the `{"data": [...]}` envelope
    #[error("malformed response from {url}: {source}")]
    Malformed {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Read operations against the open-data API.
#[async_trait]
pub trait EuroparlApiClient: Send + Sync {
    /// Roster of currently serving members.
    async fn current_members(&self) -> Result<Vec<MemberSummary>, EuroparlApiError>;

    /// Detail records, including membership history, for one batch of identifiers.
    async fn member_details(
        &self,
        batch: IdBatch<'_>,
    ) -> Result<Vec<MemberDetail>, EuroparlApiError>;

    /// All plenary-sitting events.
    async fn plenary_sittings(&self) -> Result<Vec<EventStub>, EuroparlApiError>;

    /// Framed detail records for one batch of activity ids.
    async fn event_details(&self, batch: IdBatch<'_>)
        -> Result<Vec<EventDetail>, EuroparlApiError>;
}

/// HTTP-based implementation of [`EuroparlApiClient`].
pub struct HttpEuroparlClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpEuroparlClient {
    /// Create a client for the given base URL (e.g. `https://data.europarl.europa.eu/api/v1`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client with a custom `reqwest::Client`.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_data<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, EuroparlApiError> {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(%url, ?query, "GET");

        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EuroparlApiError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let envelope: DataEnvelope<T> = serde_json::from_str(&body)
            .map_err(|source| EuroparlApiError::Malformed { url, source })?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl EuroparlApiClient for HttpEuroparlClient {
    async fn current_members(&self) -> Result<Vec<MemberSummary>, EuroparlApiError> {
        self.get_data("/meps/show-current", &[("format", LD_JSON), ("offset", "0")])
            .await
    }

    async fn member_details(
        &self,
        batch: IdBatch<'_>,
    ) -> Result<Vec<MemberDetail>, EuroparlApiError> {
        let path = format!("/meps/{}", batch.path_segment());
        self.get_data(&path, &[("format", LD_JSON)]).await
    }

    async fn plenary_sittings(&self) -> Result<Vec<EventStub>, EuroparlApiError> {
        self.get_data(
            "/events",
            &[
                ("activity-type", PLENARY_SITTING),
                ("format", LD_JSON),
                ("offset", "0"),
            ],
        )
        .await
    }

    async fn event_details(
        &self,
        batch: IdBatch<'_>,
    ) -> Result<Vec<EventDetail>, EuroparlApiError> {
        let path = format!("/events/{}", batch.path_segment());
        self.get_data(&path, &[("format", LD_JSON), ("json-layout", "framed")])
            .await
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::missing_const_for_fn,
    clippy::must_use_candidate
)]
pub mod mock {
    //! Mock implementation for unit testing.

    use super::{
        EuroparlApiClient, EuroparlApiError, EventDetail, EventStub, IdBatch, MemberDetail,
        MemberSummary,
    };
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// In-memory stand-in for the open-data API.
    ///
    /// Detail endpoints answer each batch with the stored records whose
    /// identifier (members) or `activity_id` (events) is in the batch, in
    /// storage order. Batches are recorded for inspection.
    #[derive(Default)]
    pub struct MockEuroparlClient {
        members: Mutex<Vec<MemberSummary>>,
        member_details: Mutex<Vec<MemberDetail>>,
        sittings: Mutex<Vec<EventStub>>,
        event_details: Mutex<Vec<EventDetail>>,
        member_detail_calls: Mutex<Vec<Vec<String>>>,
        event_detail_calls: Mutex<Vec<Vec<String>>>,
        event_details_failure: Mutex<Option<EuroparlApiError>>,
    }

    impl MockEuroparlClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_members(&self, members: Vec<MemberSummary>) {
            *self.members.lock().unwrap() = members;
        }

        pub fn set_member_details(&self, details: Vec<MemberDetail>) {
            *self.member_details.lock().unwrap() = details;
        }

        pub fn set_sittings(&self, sittings: Vec<EventStub>) {
            *self.sittings.lock().unwrap() = sittings;
        }

        pub fn set_event_details(&self, details: Vec<EventDetail>) {
            *self.event_details.lock().unwrap() = details;
        }

        /// Make the next `event_details` call fail with `err`.
        pub fn fail_event_details(&self, err: EuroparlApiError) {
            *self.event_details_failure.lock().unwrap() = Some(err);
        }

        /// Id batches passed to `member_details`, in call order.
        pub fn member_detail_calls(&self) -> Vec<Vec<String>> {
            self.member_detail_calls.lock().unwrap().clone()
        }

        /// Id batches passed to `event_details`, in call order.
        pub fn event_detail_calls(&self) -> Vec<Vec<String>> {
            self.event_detail_calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl EuroparlApiClient for MockEuroparlClient {
        async fn current_members(&self) -> Result<Vec<MemberSummary>, EuroparlApiError> {
            Ok(self.members.lock().unwrap().clone())
        }

        async fn member_details(
            &self,
            batch: IdBatch<'_>,
        ) -> Result<Vec<MemberDetail>, EuroparlApiError> {
            self.member_detail_calls
                .lock()
                .unwrap()
                .push(batch.ids().to_vec());

            Ok(self
                .member_details
                .lock()
                .unwrap()
                .iter()
                .filter(|d| batch.ids().contains(&d.identifier))
                .cloned()
                .collect())
        }

        async fn plenary_sittings(&self) -> Result<Vec<EventStub>, EuroparlApiError> {
            Ok(self.sittings.lock().unwrap().clone())
        }

        async fn event_details(
            &self,
            batch: IdBatch<'_>,
        ) -> Result<Vec<EventDetail>, EuroparlApiError> {
            self.event_detail_calls
                .lock()
                .unwrap()
                .push(batch.ids().to_vec());

            if let Some(err) = self.event_details_failure.lock().unwrap().take() {
                return Err(err);
            }

            Ok(self
                .event_details
                .lock()
                .unwrap()
                .iter()
                .filter(|d| {
                    d.activity_id
                        .as_ref()
                        .is_some_and(|id| batch.ids().contains(id))
                })
                .cloned()
                .collect())
        }
    }
}
