/// Running sum and count for a single group's mean.
#[derive(Debug, Default, Clone, Copy)]
pub struct MeanAccumulator {
    sum: f64,
    count: usize,
}

impl MeanAccumulator {
    /// Adds `value` unless it is NaN or infinite.
    pub fn push(&mut self, value: f64) {
        if value.is_finite() {
            self.sum += value;
            self.count += 1;
        }
    }

    /// `None` when nothing was pushed, so empty groups never produce NaN.
    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }
}

/// Share of `part` in `total`, in percent. Returns 0.0 when `total` is zero.
pub fn share_pct(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_of_nothing_is_none() {
        assert_eq!(MeanAccumulator::default().mean(), None);
    }

    #[test]
    fn test_mean_skips_non_finite() {
        let mut acc = MeanAccumulator::default();
        acc.push(10.0);
        acc.push(f64::NAN);
        acc.push(20.0);
        acc.push(f64::INFINITY);

        assert_eq!(acc.mean(), Some(15.0));
    }

    #[test]
    fn test_share_pct() {
        assert_eq!(share_pct(1, 4), 25.0);
        assert_eq!(share_pct(3, 0), 0.0);
    }
}
