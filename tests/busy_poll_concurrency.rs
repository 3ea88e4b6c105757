// ==============================================
// BUSY-POLL BUFFER TESTS (integration)
// ==============================================
//
// Single-writer, multi-reader lossy buffer: readers that fall behind
// skip ahead to the oldest committed value instead of blocking the
// writer. The threaded tests pin down the publication guarantee (a read
// value was fully written) and monotonic progress per reader.

use std::thread;
use std::time::{Duration, Instant};

mod committed_window {
    use ringkit::ring::BusyPollBuffer;

    #[test]
    fn reader_created_before_writes_skips_to_window() {
        let mut buf = BusyPollBuffer::new(3);
        let mut reader = buf.reader();
        for v in 1..=5u64 {
            buf.write(v);
        }
        // Cursor 0 predates the committed window; it lands on the start
        // of the last single-write span.
        assert_eq!(reader.read(), Some(4));
        assert_eq!(reader.read(), Some(5));
        assert_eq!(reader.read(), None);
    }

    #[test]
    fn reader_created_after_writes_sees_last_span() {
        let mut buf = BusyPollBuffer::new(3);
        for v in 1..=5u64 {
            buf.write(v);
        }
        let mut reader = buf.reader();
        assert_eq!(reader.read(), Some(4));
        assert_eq!(reader.read(), Some(5));
        assert_eq!(reader.read(), None);
    }

    #[test]
    fn keeping_pace_sees_every_value() {
        let mut buf = BusyPollBuffer::new(4);
        let mut reader = buf.reader();
        let mut seen = Vec::new();
        for v in 0..20u64 {
            buf.write(v);
            while let Some(got) = reader.read() {
                seen.push(got);
            }
        }
        assert_eq!(seen, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn write_many_publishes_whole_batch() {
        let mut buf = BusyPollBuffer::new(5);
        let mut reader = buf.reader();
        buf.write_many(&[1, 2, 3u64]);
        assert_eq!(reader.read(), Some(1));
        assert_eq!(reader.read(), Some(2));
        assert_eq!(reader.read(), Some(3));
        assert_eq!(reader.read(), None);
    }

    #[test]
    fn oversized_batch_keeps_newest_values() {
        let mut buf = BusyPollBuffer::new(3);
        let mut reader = buf.reader();
        buf.write_many(&[1, 2, 3, 4, 5u64]);
        // Only capacity - 1 values can be committed at once.
        assert_eq!(reader.read(), Some(4));
        assert_eq!(reader.read(), Some(5));
        assert_eq!(reader.read(), None);
    }

    #[test]
    fn independent_readers_do_not_share_cursors() {
        let mut buf = BusyPollBuffer::new(4);
        let mut fast = buf.reader();
        let mut slow = buf.reader();
        buf.write(1u64);
        buf.write(2);
        assert_eq!(fast.read(), Some(1));
        assert_eq!(fast.read(), Some(2));
        assert_eq!(slow.read(), Some(1));
        assert_eq!(slow.read(), Some(2));
    }
}

mod threaded {
    use super::*;
    use ringkit::ring::{BusyPollBuffer, BusyPollReader};

    const FINAL: u64 = 10_000;

    fn poll_until_final(mut reader: BusyPollReader<u64>) -> Vec<u64> {
        let deadline = Instant::now() + Duration::from_secs(30);
        let mut seen = Vec::new();
        loop {
            match reader.read() {
                Some(v) => {
                    seen.push(v);
                    if v == FINAL {
                        return seen;
                    }
                }
                None => {
                    assert!(Instant::now() < deadline, "reader never saw final value");
                    std::hint::spin_loop();
                }
            }
        }
    }

    #[test]
    fn reader_observes_strictly_increasing_values() {
        let mut buf = BusyPollBuffer::new(64);
        let reader = buf.reader();

        let writer = thread::spawn(move || {
            for v in 1..=FINAL {
                buf.write(v);
            }
        });
        let seen = poll_until_final(reader);
        writer.join().unwrap();

        assert!(!seen.is_empty());
        assert_eq!(*seen.last().unwrap(), FINAL);
        for pair in seen.windows(2) {
            assert!(
                pair[0] < pair[1],
                "reader went backwards: {} then {}",
                pair[0],
                pair[1]
            );
        }
        // Every value is one the writer actually published.
        assert!(seen.iter().all(|&v| (1..=FINAL).contains(&v)));
    }

    #[test]
    fn multiple_readers_each_make_progress() {
        let mut buf = BusyPollBuffer::new(32);
        let readers: Vec<_> = (0..3).map(|_| buf.reader()).collect();

        let writer = thread::spawn(move || {
            for v in 1..=FINAL {
                buf.write(v);
            }
        });
        let handles: Vec<_> = readers
            .into_iter()
            .map(|reader| thread::spawn(move || poll_until_final(reader)))
            .collect();

        writer.join().unwrap();
        for handle in handles {
            let seen = handle.join().unwrap();
            assert_eq!(*seen.last().unwrap(), FINAL);
            assert!(seen.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }

    #[test]
    fn batched_writer_publishes_consistent_spans() {
        let mut buf = BusyPollBuffer::new(64);
        let reader = buf.reader();

        let writer = thread::spawn(move || {
            let mut next = 1u64;
            while next <= FINAL {
                let end = (next + 7).min(FINAL);
                let batch: Vec<u64> = (next..=end).collect();
                buf.write_many(&batch);
                next = end + 1;
            }
        });
        let seen = poll_until_final(reader);
        writer.join().unwrap();

        assert_eq!(*seen.last().unwrap(), FINAL);
        assert!(seen.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
