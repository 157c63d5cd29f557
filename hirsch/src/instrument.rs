use std::time::{Duration, Instant};

use sysinfo::{Pid, ProcessExt, System, SystemExt};

/// What a measured region cost in wall time and resident memory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub elapsed: Duration,
    /// Change in resident set size, in KiB. This can be negative
    /// when the allocator hands pages back during the region.
    pub memory_delta_kib: i64,
}

impl Measurement {
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

/// A scoped timer and memory probe for the current process.
pub struct Instrument {
    system: System,
    pid: Option<Pid>,
    start_memory_kib: Option<u64>,
    start: Instant,
}

impl Instrument {
    pub fn start() -> Self {
        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => Some(pid),
            Err(err) => {
                log::warn!("memory will not be measured: {err}");
                None
            }
        };

        let mut instrument = Self {
            system: System::new(),
            pid,
            start_memory_kib: None,
            start: Instant::now(),
        };

        instrument.start_memory_kib = instrument.resident_kib();
        // the clock starts after the probe so the probe isn't timed
        instrument.start = Instant::now();
        instrument
    }

    fn resident_kib(&mut self) -> Option<u64> {
        let pid = self.pid?;
        if !self.system.refresh_process(pid) {
            return None;
        }
        self.system
            .process(pid)
            .map(|process| process.memory() / 1024)
    }

    pub fn finish(mut self) -> Measurement {
        let elapsed = self.start.elapsed();

        let memory_delta_kib = match (self.start_memory_kib, self.resident_kib()) {
            (Some(start), Some(end)) => end as i64 - start as i64,
            _ => 0,
        };

        log::debug!(
            "measured {:.3} ms, {} KiB",
            elapsed.as_secs_f64() * 1000.0,
            memory_delta_kib
        );

        Measurement {
            elapsed,
            memory_delta_kib,
        }
    }

    /// Run `f` between a start and a finish.
    pub fn measure<T>(f: impl FnOnce() -> T) -> (T, Measurement) {
        let instrument = Self::start();
        let value = f();
        (value, instrument.finish())
    }
}
