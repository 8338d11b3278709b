//! Tilt smoothing: a moving average over the last few accelerometer samples.

use heapless::HistoryBuffer;

use crate::{
    scalar::Scalar,
    vector::Vec3,
};

/// Samples kept per axis.
pub const SAMPLER_CAPACITY: usize = 8;

/// Resting orientation used whenever the sensor has nothing to report, in milli-g.
pub const STEADY_ATTRACTOR: TiltSample = TiltSample::new(-81, -816, -571);

/// One raw accelerometer reading, milli-g per axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TiltSample {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl TiltSample {
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }
}

/// Fixed-capacity ring buffer with a running sum.
#[derive(Clone)]
pub struct Sampler<const N: usize> {
    samples: HistoryBuffer<i32, N>,
    sum: i32,
}

impl<const N: usize> Default for Sampler<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Sampler<N> {
    pub const fn new() -> Self {
        Self {
            samples: HistoryBuffer::new(),
            sum: 0,
        }
    }

    /// Pushes a sample, evicting the oldest one once full.
    pub fn push(&mut self, sample: i32) {
        if self.samples.len() == self.samples.capacity() {
            if let Some(oldest) = self.samples.oldest_ordered().next() {
                self.sum -= *oldest;
            }
        }
        self.samples.write(sample);
        self.sum += sample;
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.len() == 0
    }

    pub const fn sum(&self) -> i32 {
        self.sum
    }

    /// Mean of the buffered samples, zero while empty.
    pub fn average(&self) -> i32 {
        match self.samples.len() {
            0 => 0,
            n => self.sum / n as i32,
        }
    }
}

/// Three per-axis samplers turning raw readings into a stable view direction.
#[derive(Clone)]
pub struct TiltFilter {
    x: Sampler<SAMPLER_CAPACITY>,
    y: Sampler<SAMPLER_CAPACITY>,
    z: Sampler<SAMPLER_CAPACITY>,
}

impl Default for TiltFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl TiltFilter {
    /// A filter already filled with the steady attractor.
    pub fn new() -> Self {
        let mut filter = Self {
            x: Sampler::new(),
            y: Sampler::new(),
            z: Sampler::new(),
        };
        for _ in 0..SAMPLER_CAPACITY {
            filter.push(STEADY_ATTRACTOR);
        }
        filter
    }

    pub fn push(&mut self, sample: TiltSample) {
        self.x.push(i32::from(sample.x));
        self.y.push(i32::from(sample.y));
        self.z.push(i32::from(sample.z));
    }

    /// Feeds a reading, or the steady attractor when the sensor is unavailable.
    pub fn feed(&mut self, sample: Option<TiltSample>) {
        match sample {
            Some(sample) => self.push(sample),
            None => {
                trace!("tilt sensor unavailable, pushing steady attractor");
                self.push(STEADY_ATTRACTOR);
            }
        }
    }

    /// Smoothed tilt in g, with y and z flipped into world orientation.
    pub fn tilt(&self) -> Vec3 {
        let n = self.x.len().max(1) as i64;
        Vec3::new(
            milli_to_scalar(i64::from(self.x.sum()), n),
            milli_to_scalar(-i64::from(self.y.sum()), n),
            milli_to_scalar(-i64::from(self.z.sum()), n),
        )
    }
}

/// `sum / (n · 1000)` as Q16.16 without losing the fractional part.
fn milli_to_scalar(sum: i64, n: i64) -> Scalar {
    Scalar::from_bits(((sum << 16) / (n * 1000)) as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::ONE;

    #[test]
    fn running_sum_evicts_oldest() {
        let mut s = Sampler::<3>::new();
        assert!(s.is_empty());
        s.push(1);
        s.push(2);
        s.push(3);
        assert_eq!(s.sum(), 6);
        s.push(10);
        assert_eq!(s.len(), 3);
        assert_eq!(s.sum(), 15);
        assert_eq!(s.average(), 5);
    }

    #[test]
    fn filter_starts_at_attractor() {
        let filter = TiltFilter::new();
        let tilt = filter.tilt();
        assert_eq!(tilt.x, Scalar::from_bits((-81_i64 * 65_536 / 1000) as i32));
        assert_eq!(tilt.y, Scalar::from_bits((816_i64 * 65_536 / 1000) as i32));
        assert_eq!(tilt.z, Scalar::from_bits((571_i64 * 65_536 / 1000) as i32));
    }

    #[test]
    fn unavailable_sensor_keeps_the_attractor() {
        let mut filter = TiltFilter::new();
        let before = filter.tilt();
        for _ in 0..20 {
            filter.feed(None);
        }
        assert_eq!(filter.tilt(), before);
    }

    #[test]
    fn filter_converges_to_new_readings() {
        let mut filter = TiltFilter::new();
        for _ in 0..SAMPLER_CAPACITY {
            filter.feed(Some(TiltSample::new(0, 0, -1000)));
        }
        let tilt = filter.tilt();
        assert_eq!(tilt.x, Scalar::ZERO);
        assert_eq!(tilt.y, Scalar::ZERO);
        assert_eq!(tilt.z, ONE);
    }
}
