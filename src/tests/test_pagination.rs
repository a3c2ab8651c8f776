#[cfg(test)]
mod tests {
    use crate::pagination::Paginator;
    use crate::tests::common::{ids, numbered_catalog};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::sync::Arc;

    fn paginator_over(len: u32, batch_size: usize) -> Paginator {
        let mut pages = Paginator::new(batch_size);
        pages.publish(Arc::new(numbered_catalog(len)));
        pages
    }

    #[test]
    fn test_forty_five_entries_in_batches_of_twenty() {
        let mut pages = paginator_over(45, 20);

        let batches: Vec<_> = (0..3).map(|_| pages.next_batch()).collect();

        let lengths: Vec<usize> = batches.iter().map(|b| b.entries.len()).collect();
        let has_more: Vec<bool> = batches.iter().map(|b| b.has_more).collect();
        assert_eq!(lengths, vec![20, 20, 5]);
        assert_eq!(has_more, vec![true, true, false]);
    }

    #[rstest]
    #[case(45, 20, 3)]
    #[case(40, 20, 2)]
    #[case(1, 20, 1)]
    #[case(0, 20, 0)]
    #[case(7, 3, 3)]
    fn test_batches_concatenate_to_result(
        #[case] len: u32,
        #[case] batch_size: usize,
        #[case] expected_batches: usize,
    ) {
        let mut pages = paginator_over(len, batch_size);
        let mut collected = Vec::new();
        let mut non_empty = 0;

        loop {
            let batch = pages.next_batch();
            if batch.entries.is_empty() {
                assert!(!batch.has_more);
                break;
            }
            non_empty += 1;
            collected.extend(batch.entries);
        }

        assert_eq!(non_empty, expected_batches);
        assert_eq!(collected, numbered_catalog(len));
    }

    #[test]
    fn test_exhausted_paginator_keeps_returning_empty_batches() {
        let mut pages = paginator_over(5, 20);
        pages.next_batch();

        for _ in 0..3 {
            let batch = pages.next_batch();
            assert!(batch.entries.is_empty());
            assert!(!batch.has_more);
        }
        // The offset is not clamped to the result length.
        assert_eq!(pages.offset(), 80);
        assert_eq!(pages.consumed(), 5);
        assert_eq!(pages.remaining(), 0);
    }

    #[test]
    fn test_publish_rewinds_to_first_batch() {
        let mut pages = paginator_over(45, 20);
        pages.next_batch();
        pages.next_batch();

        pages.publish(Arc::new(numbered_catalog(3)));
        let batch = pages.next_batch();

        assert_eq!(ids(&batch.entries), vec![1, 2, 3]);
        assert!(!batch.has_more);
    }

    #[test]
    fn test_reset_replays_same_result() {
        let mut pages = paginator_over(25, 20);
        let first = pages.next_batch();
        pages.next_batch();

        pages.reset();

        assert_eq!(pages.next_batch(), first);
        assert_eq!(pages.consumed(), 20);
        assert_eq!(pages.remaining(), 5);
    }

    #[test]
    fn test_zero_batch_size_is_bumped_to_one() {
        let pages = Paginator::new(0);
        assert_eq!(pages.batch_size(), 1);
    }
}
