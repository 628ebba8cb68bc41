use std::num::NonZeroUsize;

/// Work units each worker should see per pass when picking the default width.
pub const DEFAULT_UNITS_PER_WORKER: usize = 4;

/// Every exact divisor of `width`, ascending.
#[must_use]
pub fn divisors_of(width: u32) -> Vec<u32> {
    let mut low = Vec::new();
    let mut high = Vec::new();

    let mut candidate: u32 = 1;
    while u64::from(candidate) * u64::from(candidate) <= u64::from(width) {
        if width % candidate == 0 {
            low.push(candidate);
            let pair = width / candidate;
            if pair != candidate {
                high.push(pair);
            }
        }
        candidate += 1;
    }

    low.extend(high.into_iter().rev());
    low
}

/// The selectable band widths for one canvas width.
///
/// Only exact divisors are offered so that every pass partitions the canvas
/// into equal bands. Rebuilt whenever the canvas is resized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchWidths {
    widths: Vec<u32>,
    index: usize,
    default_index: usize,
}

impl BatchWidths {
    #[must_use]
    pub fn for_width(width: u32, worker_threads: NonZeroUsize) -> Self {
        let widths = divisors_of(width.max(1));
        let wanted_units = worker_threads.get().saturating_mul(DEFAULT_UNITS_PER_WORKER);

        let default_index = widths
            .iter()
            .rposition(|&batch_width| (width / batch_width) as usize >= wanted_units)
            .unwrap_or(0);

        Self {
            widths,
            index: default_index,
            default_index,
        }
    }

    #[must_use]
    pub fn current(&self) -> u32 {
        self.widths[self.index]
    }

    #[must_use]
    pub fn all(&self) -> &[u32] {
        &self.widths
    }

    /// Steps to the next wider band, stopping at the full canvas width.
    pub fn next(&mut self) -> u32 {
        if self.index + 1 < self.widths.len() {
            self.index += 1;
        }
        self.current()
    }

    /// Steps to the next narrower band, stopping at a single column.
    pub fn previous(&mut self) -> u32 {
        self.index = self.index.saturating_sub(1);
        self.current()
    }

    pub fn reset(&mut self) {
        self.index = self.default_index;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workers(count: usize) -> NonZeroUsize {
        NonZeroUsize::new(count).unwrap()
    }

    #[test]
    fn test_divisors_of_720() {
        assert_eq!(
            divisors_of(720),
            vec![
                1, 2, 3, 4, 5, 6, 8, 9, 10, 12, 15, 16, 18, 20, 24, 30, 36, 40, 45, 48, 60, 72, 80,
                90, 120, 144, 180, 240, 360, 720
            ]
        );
    }

    #[test]
    fn test_divisors_of_small_and_prime_widths() {
        assert_eq!(divisors_of(1), vec![1]);
        assert_eq!(divisors_of(13), vec![1, 13]);
        assert_eq!(divisors_of(16), vec![1, 2, 4, 8, 16]);
    }

    #[test]
    fn test_every_width_divides_canvas() {
        for width in [1u32, 7, 100, 1440, 1921] {
            let batch_widths = BatchWidths::for_width(width, workers(8));
            assert!(batch_widths.all().iter().all(|&b| width % b == 0));
        }
    }

    #[test]
    fn test_default_gives_each_worker_several_units() {
        let batch_widths = BatchWidths::for_width(1440, workers(8));

        assert_eq!(batch_widths.current(), 45);
        assert!(1440 / batch_widths.current() >= 32);
    }

    #[test]
    fn test_default_falls_back_to_single_columns() {
        let batch_widths = BatchWidths::for_width(10, workers(64));

        assert_eq!(batch_widths.current(), 1);
    }

    #[test]
    fn test_next_and_previous_stop_at_the_ends() {
        let mut batch_widths = BatchWidths::for_width(12, workers(1));
        assert_eq!(batch_widths.current(), 3);

        assert_eq!(batch_widths.next(), 4);
        assert_eq!(batch_widths.next(), 6);
        assert_eq!(batch_widths.next(), 12);
        assert_eq!(batch_widths.next(), 12);

        batch_widths.reset();
        assert_eq!(batch_widths.current(), 3);

        assert_eq!(batch_widths.previous(), 2);
        assert_eq!(batch_widths.previous(), 1);
        assert_eq!(batch_widths.previous(), 1);
    }
}
