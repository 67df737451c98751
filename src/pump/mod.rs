//! Staging between a byte source and a byte sink that move data in
//! different chunk sizes.

pub mod stats;

pub use stats::PumpStats;

use crate::ring::{RingBuffer, RingError};
use std::io::{self, Read, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Debug, Error)]
pub enum PumpError {
    #[error("invalid {name} chunk size: must be greater than zero")]
    InvalidChunk { name: &'static str },

    #[error("fixed ring buffer has zero capacity, nothing can be staged")]
    ZeroCapacity,

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Ring(#[from] RingError),
}

pub struct Pump {
    ring: RingBuffer,
    read_chunk: usize,
    write_chunk: usize,
    scratch: Vec<u8>,
    eof: bool,
    running: Option<Arc<AtomicBool>>,
    stats: PumpStats,
}

impl Pump {
    pub fn new(ring: RingBuffer, read_chunk: usize, write_chunk: usize) -> Result<Self, PumpError> {
        if read_chunk == 0 {
            return Err(PumpError::InvalidChunk { name: "read" });
        }
        if write_chunk == 0 {
            return Err(PumpError::InvalidChunk { name: "write" });
        }
        if !ring.is_growable() && ring.capacity() == 0 {
            return Err(PumpError::ZeroCapacity);
        }

        Ok(Self {
            ring,
            read_chunk,
            write_chunk,
            scratch: vec![0; read_chunk.max(write_chunk)],
            eof: false,
            running: None,
            stats: PumpStats::default(),
        })
    }

    /// Makes [`run`](Self::run) return once `running` is cleared. The flag is
    /// checked between chunks, never in the middle of one.
    pub fn with_running(mut self, running: Arc<AtomicBool>) -> Self {
        self.running = Some(running);
        self
    }

    #[inline]
    pub fn ring(&self) -> &RingBuffer {
        &self.ring
    }

    pub fn into_ring(self) -> RingBuffer {
        self.ring
    }

    #[inline]
    pub fn stats(&self) -> PumpStats {
        self.stats
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.eof
    }

    /// Stages up to one read chunk from `src`.
    ///
    /// Returns `Ok(0)` when the source is exhausted or when a fixed ring has
    /// no room left.
    pub fn fill<R: Read + ?Sized>(&mut self, src: &mut R) -> Result<usize, PumpError> {
        if self.eof {
            return Ok(0);
        }

        let want = if self.ring.is_growable() {
            self.read_chunk
        } else {
            self.read_chunk.min(self.ring.available())
        };
        if want == 0 {
            self.stats.stalls += 1;
            trace!(len = self.ring.len(), "fill stalled, ring full");
            return Ok(0);
        }

        let n = match src.read(&mut self.scratch[..want]) {
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => return Ok(0),
            Err(e) => return Err(e.into()),
        };
        if n == 0 {
            self.eof = true;
            debug!(bytes_in = self.stats.bytes_in, "source reached end of input");
            return Ok(0);
        }

        self.ring.write_all(&self.scratch[..n])?;
        self.stats.bytes_in += n as u64;
        self.stats.fills += 1;
        Ok(n)
    }

    /// Hands up to one write chunk to `dst`. Bytes the sink does not accept
    /// stay queued.
    pub fn drain<W: Write + ?Sized>(&mut self, dst: &mut W) -> Result<usize, PumpError> {
        if self.ring.is_empty() {
            return Ok(0);
        }

        let want = self.write_chunk.min(self.ring.len());
        self.ring.peek_exact(&mut self.scratch[..want])?;

        let n = match dst.write(&self.scratch[..want]) {
            Ok(0) => return Err(io::Error::from(io::ErrorKind::WriteZero).into()),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        self.ring.discard(n);
        self.stats.bytes_out += n as u64;
        self.stats.drains += 1;
        Ok(n)
    }

    /// Alternates [`fill`](Self::fill) and [`drain`](Self::drain) until the
    /// source is exhausted and everything staged has been delivered.
    pub fn run<R, W>(&mut self, src: &mut R, dst: &mut W) -> Result<PumpStats, PumpError>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        loop {
            if !self.is_running() {
                debug!(pending = self.ring.len(), "pump stopped");
                break;
            }

            self.fill(src)?;
            self.drain(dst)?;

            if self.eof && self.ring.is_empty() {
                break;
            }
        }

        dst.flush()?;
        Ok(self.stats)
    }

    #[inline]
    fn is_running(&self) -> bool {
        self.running
            .as_ref()
            .is_none_or(|running| running.load(Ordering::SeqCst))
    }
}
