/// Page size used when none is configured.
pub const DEFAULT_PAGE_LIMIT: u32 = 50;
/// Largest page the listing endpoint will serve.
pub const MAX_PAGE_LIMIT: u32 = 500;

/// Where the current epoch is in its fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// No fetch issued yet.
    #[default]
    Idle,
    /// The offset 0 fetch of the current epoch is in flight.
    LoadingInitial,
    /// A follow-up page is in flight.
    LoadingMore,
    Ready,
    /// The last attempt failed; whatever was loaded before is still there.
    Error,
}

impl LoadState {
    pub fn is_loading(self) -> bool {
        matches!(self, LoadState::LoadingInitial | LoadState::LoadingMore)
    }
}

/// Offset/limit bookkeeping for the current criteria.
///
/// `offset` is the offset of the last page applied, so the next page starts
/// at `offset + limit`. Until the first page of an epoch lands, `has_more`
/// stays optimistically true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationCursor {
    offset: u64,
    limit: u32,
    total: u64,
    has_more: bool,
    first_page_applied: bool,
}

impl PaginationCursor {
    pub fn new(limit: u32) -> Self {
        Self {
            offset: 0,
            limit: limit.clamp(1, MAX_PAGE_LIMIT),
            total: 0,
            has_more: true,
            first_page_applied: false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.limit);
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Offset the next fetch should request: 0 until the first page of the
    /// epoch has been applied, then one page past the last applied offset.
    pub fn next_offset(&self) -> u64 {
        if self.first_page_applied {
            self.offset + u64::from(self.limit)
        } else {
            0
        }
    }

    pub fn record_page(&mut self, offset: u64, total: u64) {
        self.offset = offset;
        self.total = total;
        self.has_more = offset + u64::from(self.limit) < total;
        self.first_page_applied = true;
    }
}

impl Default for PaginationCursor {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_LIMIT)
    }
}
