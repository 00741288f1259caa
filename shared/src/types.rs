//! Common types used across the API

use serde::{Deserialize, Serialize};

/// Default number of records returned by list endpoints
pub const DEFAULT_LIMIT: i64 = 100;

/// Upper bound accepted for `limit`
pub const MAX_LIMIT: i64 = 1000;

/// Offset pagination as accepted by list endpoints (`skip` / `limit`)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    pub skip: i64,
    pub limit: i64,
}

impl Pagination {
    pub fn new(skip: i64, limit: i64) -> Self {
        Self { skip, limit }
    }

    /// 1-indexed page the window starts on
    pub fn page(&self) -> i64 {
        if self.limit <= 0 {
            1
        } else {
            self.skip / self.limit + 1
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

pub fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_starts_at_one() {
        assert_eq!(Pagination::new(0, 100).page(), 1);
        assert_eq!(Pagination::new(99, 100).page(), 1);
    }

    #[test]
    fn page_advances_with_skip() {
        assert_eq!(Pagination::new(100, 100).page(), 2);
        assert_eq!(Pagination::new(250, 50).page(), 6);
    }

    #[test]
    fn zero_limit_does_not_divide() {
        assert_eq!(Pagination::new(10, 0).page(), 1);
    }
}
