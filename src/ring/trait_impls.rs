use super::RingError;
use crate::ring::RingBuffer;
use std::io;

/// A full fixed buffer reports `Ok(0)`, so `io::Write::write_all` surfaces
/// `ErrorKind::WriteZero`, same as writing into `&mut [u8]`.
impl io::Write for RingBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match RingBuffer::write(self, buf) {
            Ok(n) => Ok(n),
            Err(RingError::Full { .. }) => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// An empty buffer reads as `Ok(0)`, like `VecDeque<u8>`.
impl io::Read for RingBuffer {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match RingBuffer::read(self, buf) {
            Ok(n) => Ok(n),
            Err(RingError::Empty) => Ok(0),
            Err(e) => Err(e.into()),
        }
    }
}

impl From<RingError> for io::Error {
    fn from(err: RingError) -> Self {
        let kind = match err {
            RingError::Full { .. } | RingError::Empty => io::ErrorKind::WouldBlock,
            RingError::InsufficientData { .. } => io::ErrorKind::UnexpectedEof,
        };
        io::Error::new(kind, err)
    }
}
