//! UUIDv7 utilities for time-ordered identifiers.
//!
//! Learner and note ids are UUIDv7 (RFC 9562), which embed a millisecond
//! Unix timestamp in the first 48 bits. Ids therefore sort in creation
//! order, matching the ordering invariant on a learner's notes.

use uuid::Uuid;

/// Generate a new UUIDv7 identifier.
///
/// IDs generated later are lexicographically greater, so stored note order
/// and creation order coincide.
#[inline]
pub fn new_v7() -> Uuid {
    Uuid::now_v7()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_v7_is_version_7() {
        let id = new_v7();
        assert_eq!(id.get_version_num(), 7);
    }

    #[test]
    fn test_new_v7_ordering() {
        let a = new_v7();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = new_v7();
        assert!(a < b, "later v7 ids must sort after earlier ones");
    }
}
