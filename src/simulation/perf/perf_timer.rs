#[cfg(target_arch = "wasm32")]
type Stamp = f64;
#[cfg(not(target_arch = "wasm32"))]
type Stamp = std::time::Instant;

fn now() -> Stamp {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::Instant::now()
    }
}

/// Section stopwatch for `PerfStats`. A timer started with metrics off
/// never touches the clock and reads zero.
#[derive(Clone, Copy)]
pub(crate) struct PerfTimer {
    start: Option<Stamp>,
}

impl PerfTimer {
    pub(crate) fn start(enabled: bool) -> Self {
        PerfTimer { start: enabled.then(now) }
    }

    pub(crate) fn elapsed_ms(&self) -> f64 {
        let Some(start) = self.start else { return 0.0 };
        #[cfg(target_arch = "wasm32")]
        {
            now() - start
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            start.elapsed().as_secs_f64() * 1000.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_timer_reads_zero() {
        let timer = PerfTimer::start(false);
        std::thread::sleep(std::time::Duration::from_millis(2));
        assert_eq!(timer.elapsed_ms(), 0.0);
    }

    #[test]
    fn enabled_timer_measures() {
        let timer = PerfTimer::start(true);
        std::thread::sleep(std::time::Duration::from_millis(2));
        assert!(timer.elapsed_ms() >= 1.0);
    }
}
