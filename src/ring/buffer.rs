use std::fmt;

/// Byte ring buffer with optional growth.
///
/// The `len` unread bytes start at `head` and run cyclically up to (but not
/// including) `tail`. When the buffer is empty or full the two cursors meet.
#[derive(Debug, Clone)]
pub struct RingBuffer {
    pub(crate) buf: Vec<u8>,
    pub(crate) head: usize,
    pub(crate) tail: usize,
    pub(crate) len: usize,
    pub(crate) growable: bool,
}

impl RingBuffer {
    /// Creates an empty buffer with `capacity` zeroed bytes of storage.
    ///
    /// A capacity of zero is allowed: the buffer is then both empty and full
    /// until a growable buffer receives its first write.
    pub fn new(capacity: usize, growable: bool) -> Self {
        Self {
            buf: vec![0; capacity],
            head: 0,
            tail: 0,
            len: 0,
            growable,
        }
    }

    /// Adopts `bytes` as the buffer's readable content.
    ///
    /// The resulting buffer is full: `capacity() == len() == bytes.len()`
    /// and the first read returns `bytes[0]`.
    pub fn from_bytes(bytes: Vec<u8>, growable: bool) -> Self {
        let len = bytes.len();
        Self {
            buf: bytes,
            head: 0,
            tail: 0,
            len,
            growable,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Free bytes at the current capacity, without growing.
    #[inline]
    pub fn available(&self) -> usize {
        self.capacity() - self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True when there is no slack at the current capacity. A growable buffer
    /// can still accept writes by growing.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    #[inline]
    pub fn is_growable(&self) -> bool {
        self.growable
    }

    #[inline]
    pub fn can_read(&self, n: usize) -> bool {
        n <= self.len
    }

    #[inline]
    pub fn can_write(&self, n: usize) -> bool {
        self.growable || n <= self.available()
    }

    /// Advances a cursor by `n` slots, wrapping at the end of storage.
    #[inline(always)]
    pub(crate) fn wrap(&self, index: usize, n: usize) -> usize {
        let next = index + n;
        if next >= self.capacity() {
            next - self.capacity()
        } else {
            next
        }
    }

    #[inline(always)]
    pub(crate) fn debug_check(&self) {
        debug_assert!(self.len <= self.capacity());
        debug_assert!(self.capacity() == 0 || self.head < self.capacity());
        debug_assert!(self.capacity() == 0 || self.tail < self.capacity());
        debug_assert_eq!(self.wrap(self.head, self.len), self.tail);
    }
}

impl fmt::Display for RingBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "head={}, tail={}, length={}, capacity={}, buffer={:?}",
            self.head,
            self.tail,
            self.len,
            self.capacity(),
            self.buf
        )
    }
}
