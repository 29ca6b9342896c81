//! src/graph/buffer.rs
//!
//! Fixed-capacity circular sample store with mean/scale statistics.
//!
//! Statistics are recomputed from every occupied slot on each insertion, so
//! they can never go stale when the oldest sample is overwritten.

use crate::error::{GraphError, Result};

#[derive(Clone, Debug)]
pub struct SampleBuffer {
    /// `capacity` slots; `None` until first written.
    slots: Vec<Option<f64>>,

    /// position of the next write (the oldest retained sample once full)
    write_index: usize,

    /// number of occupied slots
    filled: usize,

    /// mean over occupied slots; `None` while empty
    mean: Option<f64>,

    /// max absolute deviation from `mean` over occupied slots
    scale: f64,
}

impl SampleBuffer {
    /// Create an empty buffer. Fails on zero capacity.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(GraphError::InvalidCapacity(capacity));
        }
        Ok(Self {
            slots: vec![None; capacity],
            write_index: 0,
            filled: 0,
            mean: None,
            scale: 0.0,
        })
    }

    /// A new empty buffer with the same capacity.
    pub fn fresh(&self) -> Self {
        Self {
            slots: vec![None; self.slots.len()],
            write_index: 0,
            filled: 0,
            mean: None,
            scale: 0.0,
        }
    }

    /// Write `value` at the write index, advance it, and refresh statistics.
    ///
    /// Maintains invariant: `write_index < capacity`, statistics match slots.
    pub fn insert(&mut self, value: f64) {
        if self.slots[self.write_index].is_none() {
            self.filled += 1;
        }
        self.slots[self.write_index] = Some(value);
        self.write_index = (self.write_index + 1) % self.slots.len();
        self.recompute();
    }

    fn recompute(&mut self) {
        let mut sum = 0.0_f64;
        let mut n = 0usize;
        for v in self.slots.iter().flatten() {
            sum += *v;
            n += 1;
        }
        if n == 0 {
            self.mean = None;
            self.scale = 0.0;
            return;
        }
        let mean = sum / n as f64;
        let scale = self
            .slots
            .iter()
            .flatten()
            .map(|v| (v - mean).abs())
            .fold(0.0, f64::max);
        self.mean = Some(mean);
        self.scale = scale;
    }

    /// `(relative_position, slot)` pairs from oldest to newest.
    ///
    /// Starts at the write index and wraps around; always yields `capacity`
    /// items. Each call is an independent traversal.
    pub fn iter_oldest_to_newest(&self) -> impl Iterator<Item = (usize, Option<f64>)> + '_ {
        let (newer, older) = self.slots.split_at(self.write_index);
        older.iter().chain(newer.iter()).copied().enumerate()
    }

    /// Occupied values from oldest to newest.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.iter_oldest_to_newest().filter_map(|(_, v)| v)
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn write_index(&self) -> usize {
        self.write_index
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.filled
    }

    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    pub fn is_full(&self) -> bool {
        self.filled == self.slots.len()
    }

    pub fn mean(&self) -> Option<f64> {
        self.mean
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Raw slot by absolute index.
    pub fn slot(&self, index: usize) -> Option<f64> {
        self.slots.get(index).copied().flatten()
    }

    /// Most recently inserted value.
    pub fn latest(&self) -> Option<f64> {
        let cap = self.slots.len();
        self.slot((self.write_index + cap - 1) % cap)
    }

    /// `(mean - scale, mean + scale)`, the span the renderer maps onto the
    /// surface height.
    pub fn range(&self) -> Option<(f64, f64)> {
        self.mean.map(|m| (m - self.scale, m + self.scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(capacity: usize, values: &[f64]) -> SampleBuffer {
        let mut b = SampleBuffer::new(capacity).unwrap();
        for &v in values {
            b.insert(v);
        }
        b
    }

    fn slots(b: &SampleBuffer) -> Vec<Option<f64>> {
        b.iter_oldest_to_newest().map(|(_, v)| v).collect()
    }

    #[test]
    fn rejects_zero_capacity() {
        assert_eq!(
            SampleBuffer::new(0).unwrap_err(),
            GraphError::InvalidCapacity(0)
        );
    }

    #[test]
    fn new_buffer_is_empty() {
        let b = SampleBuffer::new(4).unwrap();
        assert!(b.is_empty());
        assert_eq!(b.mean(), None);
        assert_eq!(b.scale(), 0.0);
        assert_eq!(b.range(), None);
        assert_eq!(slots(&b), vec![None; 4]);
    }

    #[test]
    fn statistics_match_partial_fill() {
        let b = filled(10, &[2.0, 4.0, 9.0]);
        assert_eq!(b.len(), 3);
        assert_eq!(b.mean(), Some(5.0));
        assert_eq!(b.scale(), 4.0);
        assert_eq!(b.range(), Some((1.0, 9.0)));
    }

    #[test]
    fn iterates_oldest_to_newest() {
        let mut b = filled(3, &[1.0, 2.0, 3.0]);
        assert_eq!(slots(&b), vec![Some(1.0), Some(2.0), Some(3.0)]);
        b.insert(4.0);
        assert_eq!(slots(&b), vec![Some(2.0), Some(3.0), Some(4.0)]);
    }

    #[test]
    fn positions_are_relative() {
        let b = filled(3, &[1.0, 2.0, 3.0, 4.0]);
        let positions: Vec<usize> = b.iter_oldest_to_newest().map(|(p, _)| p).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    fn partial_fill_yields_empty_slots_first() {
        let b = filled(4, &[7.0, 8.0]);
        assert_eq!(slots(&b), vec![None, None, Some(7.0), Some(8.0)]);
    }

    #[test]
    fn overflow_keeps_most_recent_capacity_samples() {
        let b = filled(4, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        assert!(b.is_full());
        assert_eq!(b.len(), 4);
        assert_eq!(b.values().collect::<Vec<_>>(), vec![4.0, 5.0, 6.0, 7.0]);
        assert_eq!(b.mean(), Some(5.5));
        assert_eq!(b.scale(), 1.5);
        assert_eq!(b.latest(), Some(7.0));
    }

    #[test]
    fn evicting_the_extreme_updates_scale() {
        let mut b = filled(3, &[100.0, 1.0, 1.0]);
        assert!(b.scale() > 60.0);
        b.insert(1.0);
        assert_eq!(b.scale(), 0.0);
        assert_eq!(b.mean(), Some(1.0));
    }

    #[test]
    fn constant_input_has_zero_scale() {
        let b = filled(5, &[3.5; 8]);
        assert_eq!(b.scale(), 0.0);
        assert_eq!(b.mean(), Some(3.5));
    }

    #[test]
    fn write_index_wraps() {
        let mut b = SampleBuffer::new(3).unwrap();
        for i in 0..7 {
            assert!(b.write_index() < 3);
            b.insert(i as f64);
        }
        assert_eq!(b.write_index(), 1);
    }

    #[test]
    fn fresh_buffer_keeps_capacity_only() {
        let b = filled(3, &[1.0, 2.0, 3.0, 4.0]);
        let f = b.fresh();
        assert_eq!(f.capacity(), 3);
        assert_eq!(f.write_index(), 0);
        assert!(f.is_empty());
        assert_eq!(f.mean(), None);
    }

    #[test]
    fn traversal_is_restartable() {
        let b = filled(3, &[1.0, 2.0]);
        let first: Vec<_> = b.iter_oldest_to_newest().collect();
        let second: Vec<_> = b.iter_oldest_to_newest().collect();
        assert_eq!(first, second);
    }
}
