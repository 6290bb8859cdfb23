//! Announcement model and banner rotation math.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use aeestr_core::{AnnouncementId, Email};

/// An announcement shown in the public banner while `is_active` is true.
///
/// Public visibility is decided by `is_active` alone; display order is by
/// `created_at` descending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Announcement {
    pub id: AnnouncementId,
    pub title: String,
    pub content: String,
    pub is_active: bool,
    pub author_email: Email,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Clamp an arbitrary banner index into `0..len`.
///
/// Returns 0 for an empty list so callers can pass indices straight from
/// query strings.
#[must_use]
pub const fn wrap_index(len: usize, index: usize) -> usize {
    if len == 0 { 0 } else { index % len }
}

/// The index after `index`, wrapping from the last item to the first.
#[must_use]
pub const fn next_index(len: usize, index: usize) -> usize {
    if len == 0 { 0 } else { (index + 1) % len }
}

/// The index before `index`, wrapping from the first item to the last.
#[must_use]
pub const fn previous_index(len: usize, index: usize) -> usize {
    if len == 0 { 0 } else { (index + len - 1) % len }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_index_in_range() {
        assert_eq!(wrap_index(3, 0), 0);
        assert_eq!(wrap_index(3, 2), 2);
        assert_eq!(wrap_index(3, 3), 0);
        assert_eq!(wrap_index(3, 7), 1);
    }

    #[test]
    fn test_wrap_index_empty() {
        assert_eq!(wrap_index(0, 5), 0);
    }

    #[test]
    fn test_next_wraps_last_to_first() {
        assert_eq!(next_index(3, 0), 1);
        assert_eq!(next_index(3, 2), 0);
    }

    #[test]
    fn test_previous_wraps_first_to_last() {
        assert_eq!(previous_index(3, 2), 1);
        assert_eq!(previous_index(3, 0), 2);
    }

    #[test]
    fn test_single_item_cycles_to_itself() {
        assert_eq!(next_index(1, 0), 0);
        assert_eq!(previous_index(1, 0), 0);
    }

    #[test]
    fn test_circular_invariant_all_lengths() {
        // Cycling forward then backward lands on the start for any length >= 1
        for len in 1..=10 {
            for index in 0..len {
                assert_eq!(previous_index(len, next_index(len, index)), index);
                assert_eq!(next_index(len, previous_index(len, index)), index);
            }
        }
    }
}
