use bytering::config::PipeConfig;
use bytering::pump::Pump;
use bytering::ring::RingBuffer;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::info;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = PipeConfig::from_env()?;
    info!(
        capacity = config.capacity,
        growable = config.growable,
        read_chunk = config.read_chunk,
        write_chunk = config.write_chunk,
        "bytering v0.1.0 piping stdin to stdout"
    );

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .map_err(|e| format!("Failed to set Ctrl+C handler: {}", e))?;

    let ring = RingBuffer::new(config.capacity, config.growable);
    let mut pump =
        Pump::new(ring, config.read_chunk, config.write_chunk)?.with_running(running.clone());

    let started = Instant::now();
    let stats = pump.run(&mut io::stdin().lock(), &mut io::stdout().lock())?;
    let elapsed = started.elapsed();

    if !running.load(Ordering::SeqCst) {
        info!(pending = pump.ring().len(), "interrupted, staged bytes dropped");
    }

    info!(
        bytes_in = stats.bytes_in,
        bytes_out = stats.bytes_out,
        fills = stats.fills,
        drains = stats.drains,
        stalls = stats.stalls,
        final_capacity = pump.ring().capacity(),
        elapsed_ms = elapsed.as_millis() as u64,
        "done"
    );

    Ok(())
}
