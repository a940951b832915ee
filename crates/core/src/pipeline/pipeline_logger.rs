use std::collections::BTreeMap;
use std::time::Instant;

/// Cross-cutting logger for capture-loop events.
///
/// Decouples the capture loop from output mechanisms so callers can observe
/// attempts without changing the orchestration code.
pub trait PipelineLogger: Send {
    /// Report how many iterations of the attempt budget have been used.
    fn progress(&mut self, current: usize, total: usize);

    /// Record how long a named stage took for one frame.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a point-in-time metric (e.g. faces per frame).
    fn metric(&mut self, name: &str, value: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-attempt summary. Default: no-op.
    fn summary(&self) {}

    /// Forget everything recorded so far. Default: no-op.
    fn reset(&mut self) {}
}

/// Silent logger that discards all events.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn progress(&mut self, _current: usize, _total: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// Running total for one stage or metric within an attempt.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Tally {
    count: usize,
    sum: f64,
}

impl Tally {
    fn add(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
    }

    fn mean(&self) -> f64 {
        self.sum / self.count.max(1) as f64
    }
}

/// CLI logger: prints every stage timing at `info`, throttled progress, and a
/// per-attempt summary of stage timings and detection metrics.
pub struct StdoutPipelineLogger {
    throttle: usize,
    timings: BTreeMap<String, Tally>,
    metrics: BTreeMap<String, Tally>,
    start_time: Instant,
    iterations: usize,
}

impl StdoutPipelineLogger {
    pub fn new(throttle: usize) -> Self {
        Self {
            throttle: throttle.max(1),
            timings: BTreeMap::new(),
            metrics: BTreeMap::new(),
            start_time: Instant::now(),
            iterations: 0,
        }
    }

    /// Returns the formatted summary string, or `None` if no frame was processed.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() && self.metrics.is_empty() {
            return None;
        }

        let mut lines = vec![format!(
            "Attempt summary ({} iterations, {:.1}s total):",
            self.iterations,
            self.start_time.elapsed().as_secs_f64()
        )];
        for (stage, t) in &self.timings {
            lines.push(format!(
                "  {stage:12}: avg {:6.1}ms  total {:7.0}ms  ({} frames)",
                t.mean(),
                t.sum,
                t.count
            ));
        }
        for (name, t) in &self.metrics {
            lines.push(format!("  {name}: avg {:.1}", t.mean()));
        }
        Some(lines.join("\n"))
    }
}

impl Default for StdoutPipelineLogger {
    fn default() -> Self {
        Self::new(20)
    }
}

impl PipelineLogger for StdoutPipelineLogger {
    fn progress(&mut self, current: usize, total: usize) {
        self.iterations = current;
        if total > 0 && (current % self.throttle == 0 || current == total) {
            log::info!("Attempt progress: {current}/{total} iterations");
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        log::info!("{stage} time = {duration_ms:.1}ms");
        self.timings.entry(stage.to_string()).or_default().add(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics.entry(name.to_string()).or_default().add(value);
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }

    fn reset(&mut self) {
        self.timings.clear();
        self.metrics.clear();
        self.iterations = 0;
        self.start_time = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_logger_all_methods_are_noop() {
        let mut logger = NullPipelineLogger;
        logger.progress(1, 10);
        logger.timing("detect", 5.0);
        logger.metric("faces", 1.0);
        logger.info("hello");
        logger.summary();
        logger.reset();
    }

    #[test]
    fn test_timings_are_averaged_per_stage() {
        let mut logger = StdoutPipelineLogger::new(10);
        logger.timing("detect", 20.0);
        logger.timing("detect", 30.0);
        logger.timing("preprocess", 5.0);

        assert_eq!(logger.timings["detect"], Tally { count: 2, sum: 50.0 });
        let summary = logger.summary_string().unwrap();
        assert!(summary.contains("detect      : avg   25.0ms"), "{summary}");
        assert!(summary.contains("(1 frames)"));
    }

    #[test]
    fn test_summary_includes_iterations_and_metrics() {
        let mut logger = StdoutPipelineLogger::new(10);
        logger.progress(12, 160);
        logger.timing("detect", 20.0);
        logger.metric("faces", 1.0);
        logger.metric("faces", 2.0);

        let summary = logger.summary_string().unwrap();
        assert!(summary.starts_with("Attempt summary (12 iterations"));
        assert!(summary.contains("faces: avg 1.5"));
    }

    #[test]
    fn test_stages_are_listed_in_name_order() {
        let mut logger = StdoutPipelineLogger::new(10);
        logger.timing("preprocess", 1.0);
        logger.timing("detect", 1.0);

        let summary = logger.summary_string().unwrap();
        let detect = summary.find("detect").unwrap();
        let preprocess = summary.find("preprocess").unwrap();
        assert!(detect < preprocess);
    }

    #[test]
    fn test_empty_summary_returns_none() {
        let mut logger = StdoutPipelineLogger::new(10);
        logger.progress(5, 10);
        assert!(logger.summary_string().is_none());
    }

    #[test]
    fn test_reset_starts_a_new_attempt() {
        let mut logger = StdoutPipelineLogger::new(10);
        logger.progress(3, 10);
        logger.timing("detect", 1.0);
        logger.metric("faces", 1.0);
        logger.reset();

        assert!(logger.summary_string().is_none());
        assert_eq!(logger.iterations, 0);
    }

    #[test]
    fn test_default_throttle() {
        let logger = StdoutPipelineLogger::default();
        assert_eq!(logger.throttle, 20);
    }

    #[test]
    fn test_zero_throttle_is_clamped() {
        let mut logger = StdoutPipelineLogger::new(0);
        assert_eq!(logger.throttle, 1);
        logger.progress(7, 10);
        assert_eq!(logger.iterations, 7);
    }
}
