/// Duration-weighted sequence of scenes for the clock-driven engine.
#[derive(Debug, Clone)]
pub struct Timeline {
    durations: Vec<f64>,
    // starts[i] = sum of durations[..i]
    starts: Vec<f64>,
    total: f64,
}

impl Timeline {
    pub fn new(durations: &[f32]) -> Self {
        let durations: Vec<f64> = durations.iter().map(|d| d.max(0.0) as f64).collect();
        let mut starts = Vec::with_capacity(durations.len());
        let mut total = 0.0;
        for d in &durations {
            starts.push(total);
            total += d;
        }
        Self { durations, starts, total }
    }

    pub fn len(&self) -> usize {
        self.durations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.durations.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn duration(&self, index: usize) -> Option<f64> {
        self.durations.get(index).copied()
    }

    pub fn is_last(&self, index: usize) -> bool {
        index + 1 >= self.durations.len()
    }

    /// Seconds from the start of the timeline to `elapsed` into scene `index`.
    pub fn position(&self, index: usize, elapsed: f64) -> f64 {
        match (self.starts.get(index), self.durations.get(index)) {
            (Some(start), Some(duration)) => start + elapsed.clamp(0.0, *duration),
            _ => self.total,
        }
    }

    /// Global progress in [0, 1]. An empty or zero-length timeline reads 0.
    pub fn progress(&self, index: usize, elapsed: f64) -> f32 {
        if self.total <= 0.0 {
            return 0.0;
        }
        (self.position(index, elapsed) / self.total).clamp(0.0, 1.0) as f32
    }
}

/// `MM:SS`, minutes are not wrapped.
pub fn format_clock(seconds: f64) -> String {
    let total = if seconds.is_finite() { seconds.max(0.0).floor() as u64 } else { 0 };
    format!("{:02}:{:02}", total / 60, total % 60)
}
