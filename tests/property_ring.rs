//! Property-based tests for `RingBuffer`.
//!
//! # Invariants
//! - Length stays within `[0, capacity]` on fixed buffers
//! - FIFO: random interleavings of write/read/peek/discard agree with a
//!   `VecDeque<u8>` model
//! - Peek is idempotent and matches the following read
//! - Growth never loses or reorders bytes

use bytering::ring::{RingBuffer, RingError};
use proptest::prelude::*;
use std::collections::VecDeque;

// ============================================================================
// Arbitrary Generators
// ============================================================================

#[derive(Debug, Clone)]
enum Op {
    Write(Vec<u8>),
    Read(usize),
    Peek(usize),
    Discard(usize),
}

fn arb_capacity() -> impl Strategy<Value = usize> {
    0_usize..=64
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        proptest::collection::vec(any::<u8>(), 0..=96).prop_map(Op::Write),
        (0_usize..=96).prop_map(Op::Read),
        (0_usize..=96).prop_map(Op::Peek),
        (0_usize..=96).prop_map(Op::Discard),
    ]
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    proptest::collection::vec(arb_op(), 0..=64)
}

// ============================================================================
// Model Check
// ============================================================================

fn apply(ring: &mut RingBuffer, model: &mut VecDeque<u8>, op: &Op) -> Result<(), TestCaseError> {
    match op {
        Op::Write(data) => {
            let free = ring.capacity() - model.len();
            let result = ring.write(data);
            if data.is_empty() {
                prop_assert_eq!(result, Ok(0));
            } else if ring.is_growable() {
                prop_assert_eq!(result, Ok(data.len()));
                model.extend(data.iter().copied());
            } else if free == 0 {
                prop_assert!(matches!(result, Err(RingError::Full { .. })), "expected Err(RingError::Full), got {:?}", result);
            } else {
                let n = data.len().min(free);
                prop_assert_eq!(result, Ok(n));
                model.extend(data[..n].iter().copied());
            }
        }
        Op::Read(n) | Op::Peek(n) => {
            let mut out = vec![0u8; *n];
            let result = if matches!(op, Op::Read(_)) {
                ring.read(&mut out)
            } else {
                ring.peek(&mut out)
            };
            if model.is_empty() {
                prop_assert_eq!(result, Err(RingError::Empty));
            } else {
                let k = (*n).min(model.len());
                prop_assert_eq!(result, Ok(k));
                let expected: Vec<u8> = model.iter().take(k).copied().collect();
                prop_assert_eq!(&out[..k], &expected[..]);
                if matches!(op, Op::Read(_)) {
                    model.drain(..k);
                }
            }
        }
        Op::Discard(n) => {
            let k = (*n).min(model.len());
            prop_assert_eq!(ring.discard(*n), k);
            model.drain(..k);
        }
    }

    prop_assert_eq!(ring.len(), model.len());
    prop_assert!(ring.len() <= ring.capacity());
    Ok(())
}

proptest! {
    #[test]
    fn fixed_ring_matches_model(capacity in arb_capacity(), ops in arb_ops()) {
        let mut ring = RingBuffer::new(capacity, false);
        let mut model = VecDeque::new();

        for op in &ops {
            apply(&mut ring, &mut model, op)?;
            prop_assert_eq!(ring.capacity(), capacity);
        }

        let rest: Vec<u8> = model.into_iter().collect();
        prop_assert_eq!(ring.read_all(), rest);
    }

    #[test]
    fn growable_ring_matches_model(capacity in arb_capacity(), ops in arb_ops()) {
        let mut ring = RingBuffer::new(capacity, true);
        let mut model = VecDeque::new();

        for op in &ops {
            let before = ring.capacity();
            apply(&mut ring, &mut model, op)?;
            prop_assert!(ring.capacity() >= before);
        }

        let rest: Vec<u8> = model.into_iter().collect();
        prop_assert_eq!(ring.read_all(), rest);
    }

    #[test]
    fn peek_is_idempotent_and_matches_read(
        data in proptest::collection::vec(any::<u8>(), 1..=128),
        skip in 0_usize..=64,
        n in 0_usize..=128,
    ) {
        let mut ring = RingBuffer::new(64, false);
        let pre = vec![0xEEu8; skip];
        ring.write(&pre).ok();
        ring.discard(skip);
        ring.write(&data).unwrap();
        let len = ring.len();

        let mut first = vec![0u8; n];
        let mut second = vec![0u8; n];
        let a = ring.peek(&mut first).unwrap();
        let b = ring.peek(&mut second).unwrap();
        prop_assert_eq!(a, b);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(ring.len(), len);

        let mut read = vec![0u8; n];
        let c = ring.read(&mut read).unwrap();
        prop_assert_eq!(c, a);
        prop_assert_eq!(read, first);
    }

    #[test]
    fn wraparound_preserves_content(capacity in 1_usize..=64, k_seed in any::<usize>()) {
        let k = k_seed % capacity;
        let fill: Vec<u8> = (0..capacity).map(|i| i as u8).collect();
        let extra: Vec<u8> = (0..k).map(|i| (capacity + i) as u8).collect();

        let mut ring = RingBuffer::new(capacity, false);
        prop_assert_eq!(ring.write(&fill), Ok(capacity));
        ring.discard(k);
        if k > 0 {
            prop_assert_eq!(ring.write(&extra), Ok(k));
        }

        let mut expected = fill[k..].to_vec();
        expected.extend_from_slice(&extra);
        prop_assert!(ring.is_full());
        prop_assert_eq!(ring.peek_all(), expected);
    }

    #[test]
    fn growth_keeps_order_and_room(
        capacity in 0_usize..=32,
        writes in proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..=80), 1..=8),
    ) {
        let mut ring = RingBuffer::new(capacity, true);
        let mut expected = Vec::new();

        for chunk in &writes {
            let before = ring.len();
            prop_assert_eq!(ring.write(chunk), Ok(chunk.len()));
            prop_assert!(ring.capacity() >= before + chunk.len());
            expected.extend_from_slice(chunk);
        }

        prop_assert_eq!(ring.read_all(), expected);
    }
}
