/// Index of the entry after `index`, if one exists. The last entry has no
/// successor.
pub fn next(len: usize, index: usize) -> Option<usize> {
    let next = index + 1;
    (next < len).then_some(next)
}

/// Index of the entry before `index`, if one exists.
pub fn prev(index: usize) -> Option<usize> {
    index.checked_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::{prop_assert, prop_assert_eq};

    #[test]
    fn next_stops_at_last_entry() {
        assert_eq!(next(3, 0), Some(1));
        assert_eq!(next(3, 1), Some(2));
        assert_eq!(next(3, 2), None);
    }

    #[test]
    fn prev_stops_at_first_entry() {
        assert_eq!(prev(0), None);
        assert_eq!(prev(1), Some(0));
        assert_eq!(prev(2), Some(1));
    }

    #[test]
    fn empty_playlist_has_no_neighbors() {
        assert_eq!(next(0, 0), None);
        assert_eq!(prev(0), None);
    }

    proptest::proptest! {
        #[test]
        fn next_is_defined_iff_not_last(len in 1usize..100, raw_index in 0usize..100) {
            let index = raw_index.min(len - 1);
            prop_assert_eq!(next(len, index).is_some(), index < len - 1);
            if let Some(successor) = next(len, index) {
                prop_assert!(successor < len);
                prop_assert_eq!(successor, index + 1);
            }
        }

        #[test]
        fn prev_is_defined_iff_not_first(index in 0usize..100) {
            prop_assert_eq!(prev(index).is_some(), index > 0);
            if let Some(predecessor) = prev(index) {
                prop_assert_eq!(predecessor, index - 1);
            }
        }
    }
}
