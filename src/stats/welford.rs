use serde::Serialize;

/// Online mean/variance accumulator (Welford's method)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
}

/// Finished count/mean/standard-deviation triple
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Summary {
    pub count: u64,
    pub mean: f64,
    pub std_dev: f64,
}

impl RunningStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, x: f64) {
        self.count += 1;
        let delta = x - self.mean;
        #[allow(clippy::cast_precision_loss)]
        {
            self.mean += delta / self.count as f64;
        }
        let delta2 = x - self.mean;
        self.m2 += delta * delta2;
    }

    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }

    #[must_use]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample standard deviation, `sqrt(M2 / (n - 1))`. Zero below two samples.
    #[must_use]
    pub fn std_dev(&self) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let denominator = (self.count - 1) as f64;
        (self.m2 / denominator).sqrt()
    }

    #[must_use]
    pub fn summary(&self) -> Summary {
        Summary {
            count: self.count,
            mean: self.mean,
            std_dev: self.std_dev(),
        }
    }
}
