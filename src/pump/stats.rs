#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PumpStats {
    pub bytes_in: u64,
    pub bytes_out: u64,
    pub fills: u64,
    pub drains: u64,
    /// Fill attempts skipped because a fixed ring had no free space.
    pub stalls: u64,
}

impl PumpStats {
    /// Fraction of staged bytes that reached the sink.
    #[inline]
    pub fn throughput_ratio(&self) -> f64 {
        if self.bytes_in == 0 {
            1.0
        } else {
            self.bytes_out as f64 / self.bytes_in as f64
        }
    }

    /// Bytes staged but not yet delivered.
    #[inline]
    pub fn in_flight(&self) -> u64 {
        self.bytes_in - self.bytes_out
    }
}
