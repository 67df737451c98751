use bytering::ring::RingBuffer;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::{info, warn};

const RING_CAPACITY: usize = 64 * 1024;
const MAX_CHUNK: usize = 16 * 1024;
const RUN_FOR: Duration = Duration::from_secs(5);

/// xorshift64, enough to vary chunk sizes between runs of the loop.
struct ChunkSizes(u64);

impl ChunkSizes {
    fn next_size(&mut self, max: usize) -> usize {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        (x % max as u64) as usize + 1
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!("bytering stress test: unequal write/read chunks, order verified");

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .map_err(|e| format!("Failed to set Ctrl+C handler: {}", e))?;

    let mut ring = RingBuffer::new(RING_CAPACITY, false);
    let mut sizes = ChunkSizes(0x9E37_79B9_7F4A_7C15);
    let mut out = vec![0u8; MAX_CHUNK];
    let mut chunk = vec![0u8; MAX_CHUNK];

    let mut next_write = 0u8;
    let mut next_read = 0u8;
    let mut written = 0u64;
    let mut read = 0u64;
    let mut full_rejections = 0u64;

    let started = Instant::now();
    while running.load(Ordering::Relaxed) && started.elapsed() < RUN_FOR {
        let want = sizes.next_size(MAX_CHUNK);
        for (i, byte) in chunk[..want].iter_mut().enumerate() {
            *byte = next_write.wrapping_add(i as u8);
        }
        match ring.write(&chunk[..want]) {
            Ok(n) => {
                next_write = next_write.wrapping_add(n as u8);
                written += n as u64;
            }
            Err(_) => full_rejections += 1,
        }

        let want = sizes.next_size(MAX_CHUNK);
        if let Ok(n) = ring.read(&mut out[..want]) {
            for &byte in &out[..n] {
                if byte != next_read {
                    return Err(format!(
                        "byte {} out of order: expected {}, got {}",
                        read, next_read, byte
                    )
                    .into());
                }
                next_read = next_read.wrapping_add(1);
                read += 1;
            }
        }
    }

    let leftover = ring.read_all();
    for byte in leftover {
        if byte != next_read {
            return Err(format!("trailing byte {} out of order", read).into());
        }
        next_read = next_read.wrapping_add(1);
        read += 1;
    }

    if written != read {
        warn!(written, read, "byte counts diverged");
        return Err("written and read byte counts differ".into());
    }

    let secs = started.elapsed().as_secs_f64();
    info!(
        written,
        full_rejections,
        throughput_mb_s = written as f64 / secs / 1024.0 / 1024.0,
        "all bytes read back in order"
    );

    Ok(())
}
