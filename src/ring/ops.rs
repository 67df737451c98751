use super::RingError;
use crate::ring::RingBuffer;
use tracing::{debug, trace};

impl RingBuffer {
    /// Appends as much of `data` as fits and returns the number of bytes taken.
    ///
    /// A growable buffer grows first, so it always takes all of `data`. A
    /// fixed buffer performs a short write when `data` does not fit and fails
    /// with [`RingError::Full`] only when nothing could be written.
    pub fn write(&mut self, data: &[u8]) -> Result<usize, RingError> {
        if data.is_empty() {
            return Ok(0);
        }

        if self.growable && data.len() > self.available() {
            self.grow(data.len());
        }

        let n = data.len().min(self.available());
        if n == 0 {
            trace!(requested = data.len(), "write rejected, ring full");
            return Err(RingError::Full {
                requested: data.len(),
                available: 0,
            });
        }

        self.copy_in(&data[..n]);
        Ok(n)
    }

    /// Appends all of `data` or nothing.
    pub fn write_all(&mut self, data: &[u8]) -> Result<(), RingError> {
        if data.is_empty() {
            return Ok(());
        }

        if self.growable && data.len() > self.available() {
            self.grow(data.len());
        }

        let available = self.available();
        if data.len() > available {
            trace!(requested = data.len(), available, "write_all rejected");
            return Err(RingError::Full {
                requested: data.len(),
                available,
            });
        }

        self.copy_in(data);
        Ok(())
    }

    /// Moves up to `dst.len()` of the oldest bytes into `dst`.
    ///
    /// Returns [`RingError::Empty`] when nothing is stored, otherwise the
    /// number of bytes copied, which is short when less than `dst.len()` is
    /// queued.
    pub fn read(&mut self, dst: &mut [u8]) -> Result<usize, RingError> {
        let n = self.peek(dst)?;
        self.consume(n);
        Ok(n)
    }

    /// Same as [`read`](Self::read) without removing anything.
    pub fn peek(&self, dst: &mut [u8]) -> Result<usize, RingError> {
        if self.is_empty() {
            return Err(RingError::Empty);
        }

        let n = dst.len().min(self.len);
        self.copy_out(&mut dst[..n]);
        Ok(n)
    }

    /// Fills `dst` completely or fails without consuming anything.
    pub fn read_exact(&mut self, dst: &mut [u8]) -> Result<(), RingError> {
        self.peek_exact(dst)?;
        self.consume(dst.len());
        Ok(())
    }

    pub fn peek_exact(&self, dst: &mut [u8]) -> Result<(), RingError> {
        if dst.is_empty() {
            return Ok(());
        }
        if self.is_empty() {
            return Err(RingError::Empty);
        }
        if dst.len() > self.len {
            return Err(RingError::InsufficientData {
                requested: dst.len(),
                available: self.len,
            });
        }

        self.copy_out(dst);
        Ok(())
    }

    /// Drains everything currently stored.
    pub fn read_all(&mut self) -> Vec<u8> {
        let data = self.peek_all();
        self.consume(data.len());
        data
    }

    pub fn peek_all(&self) -> Vec<u8> {
        let mut data = vec![0; self.len];
        self.copy_out(&mut data);
        data
    }

    /// Drops up to `n` of the oldest bytes and returns how many were dropped.
    pub fn discard(&mut self, n: usize) -> usize {
        let n = n.min(self.len);
        self.consume(n);
        n
    }

    pub fn clear(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.len = 0;
    }

    /// Copies `data` in at `tail`. Caller guarantees `data.len() <= available()`.
    fn copy_in(&mut self, data: &[u8]) {
        let start = self.tail;
        let first = data.len().min(self.capacity() - start);

        self.buf[start..start + first].copy_from_slice(&data[..first]);
        self.buf[..data.len() - first].copy_from_slice(&data[first..]);

        self.tail = self.wrap(start, data.len());
        self.len += data.len();
        self.debug_check();
    }

    /// Copies the oldest `dst.len()` bytes out. Caller guarantees
    /// `dst.len() <= len()`.
    fn copy_out(&self, dst: &mut [u8]) {
        let start = self.head;
        let n = dst.len();
        let first = n.min(self.capacity() - start);

        dst[..first].copy_from_slice(&self.buf[start..start + first]);
        dst[first..].copy_from_slice(&self.buf[..n - first]);
    }

    fn consume(&mut self, n: usize) {
        if n == 0 {
            return;
        }

        self.len -= n;
        if self.len == 0 {
            self.head = 0;
            self.tail = 0;
        } else {
            self.head = self.wrap(self.head, n);
        }
        self.debug_check();
    }

    /// Reallocates so that at least `additional` more bytes fit, linearizing
    /// the stored bytes to the start of the new storage.
    fn grow(&mut self, additional: usize) {
        let old_capacity = self.capacity();
        let new_capacity = old_capacity + (self.len + additional).max(old_capacity);

        let mut storage = vec![0; new_capacity];
        self.copy_out(&mut storage[..self.len]);

        debug!(
            old_capacity,
            new_capacity,
            len = self.len,
            "ring buffer grown"
        );

        self.buf = storage;
        self.head = 0;
        self.tail = self.len;
        self.debug_check();
    }
}
