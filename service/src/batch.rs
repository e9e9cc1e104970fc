//! Request batching for the detail endpoints.
//!
//! The detail endpoints take a comma-separated id list embedded in the URL
//! path. Each endpoint tolerates a limited number of ids per request, so
//! callers go through [`IdBatcher`], which refuses batch sizes above the
//! endpoint's limit.

/// Maximum ids per request accepted by `/meps/{ids}`.
pub const MEMBER_DETAILS_LIMIT: usize = 100;

/// Maximum ids per request accepted by `/events/{ids}`.
pub const EVENT_DETAILS_LIMIT: usize = 25;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BatchSizeError {
    #[error("batch size must be at least 1")]
    Zero,
    #[error("batch size {size} exceeds the endpoint limit of {limit}")]
    AboveLimit { size: usize, limit: usize },
}

/// Split `items` into consecutive batches of `size`; the last may be shorter.
///
/// Yields `ceil(n / size)` batches whose concatenation equals `items`.
/// A `size` of zero yields no batches.
pub fn chunks<T>(items: &[T], size: usize) -> impl Iterator<Item = &[T]> {
    let limit = if size == 0 { 0 } else { items.len() };
    items.chunks(size.max(1)).take(limit)
}

/// Validated batch size for one detail endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdBatcher {
    size: usize,
}

impl IdBatcher {
    /// # Errors
    ///
    /// Returns [`BatchSizeError`] if `size` is zero or above `limit`.
    pub const fn new(size: usize, limit: usize) -> Result<Self, BatchSizeError> {
        if size == 0 {
            return Err(BatchSizeError::Zero);
        }
        if size > limit {
            return Err(BatchSizeError::AboveLimit { size, limit });
        }
        Ok(Self { size })
    }

    /// Batcher using the full member-details limit.
    #[must_use]
    pub const fn member_details() -> Self {
        MEMBER_DETAILS
    }

    /// Batcher using the full event-details limit.
    #[must_use]
    pub const fn event_details() -> Self {
        EVENT_DETAILS
    }

    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Number of requests needed for `n` ids.
    #[must_use]
    pub const fn batch_count(&self, n: usize) -> usize {
        n.div_ceil(self.size)
    }

    pub fn batches<'a>(&self, ids: &'a [String]) -> impl Iterator<Item = IdBatch<'a>> + 'a {
        chunks(ids, self.size).map(IdBatch::new)
    }
}

const MEMBER_DETAILS: IdBatcher = validated(MEMBER_DETAILS_LIMIT, MEMBER_DETAILS_LIMIT);
const EVENT_DETAILS: IdBatcher = validated(EVENT_DETAILS_LIMIT, EVENT_DETAILS_LIMIT);

// Evaluated at compile time, so a limit that fails validation fails the build.
#[allow(clippy::panic)]
const fn validated(size: usize, limit: usize) -> IdBatcher {
    match IdBatcher::new(size, limit) {
        Ok(batcher) => batcher,
        Err(_) => panic!("invalid endpoint batch size"),
    }
}

/// A borrowed slice of ids sent in one detail request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdBatch<'a> {
    ids: &'a [String],
}

impl<'a> IdBatch<'a> {
    #[must_use]
    pub const fn new(ids: &'a [String]) -> Self {
        Self { ids }
    }

    #[must_use]
    pub const fn ids(&self) -> &'a [String] {
        self.ids
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ids joined with `,` for the URL path.
    #[must_use]
    pub fn path_segment(&self) -> String {
        self.ids.join(",")
    }
}
