//! Flattens a window of the generation history into a fixed instance arena.
//!
//! The arena is allocated once and rewritten in place. Two dirty flags
//! separate the work: `needs_recompute` gates walking the history, and
//! `needs_upload` gates handing the records to the GPU. A sync whose
//! `(start, end, history length)` key matches the previous one is a no-op.

use crate::domain::GenerationHistory;

use super::{DisplayWindow, InstanceRecord};

/// Default arena size in instances (64 MB of records)
pub const DEFAULT_CAPACITY: usize = 4_000_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct SyncKey {
    start: i64,
    end: i64,
    history_len: usize,
}

/// Result of a [`InstanceBufferCache::sync`] call
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Key matched the last sync; nothing was touched
    Unchanged,
    /// Records were rewritten. `dropped` counts live cells that did not
    /// fit in the arena.
    Rebuilt { instances: usize, dropped: usize },
}

/// What the renderer needs for a draw call
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Published {
    pub instance_count: usize,
    pub min_y: usize,
    pub max_y: usize,
    /// Whether the upload callback ran this time
    pub uploaded: bool,
}

pub struct InstanceBufferCache {
    records: Box<[InstanceRecord]>,
    count: usize,
    min_y: usize,
    max_y: usize,
    dropped: usize,
    last_key: Option<SyncKey>,
    needs_recompute: bool,
    needs_upload: bool,
}

impl InstanceBufferCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Allocate the arena once; it is never resized afterwards
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: vec![InstanceRecord::default(); capacity].into_boxed_slice(),
            count: 0,
            min_y: 0,
            max_y: 1,
            dropped: 0,
            last_key: None,
            needs_recompute: true,
            needs_upload: false,
        }
    }

    /// Rebuild the records for generations `start..=end` unless the
    /// request matches the last one.
    ///
    /// Reversed or negative ranges produce zero instances. Once the arena
    /// is full the remaining cells are dropped and reported in the outcome.
    pub fn sync(&mut self, history: &GenerationHistory, start: i64, end: i64) -> SyncOutcome {
        let key = SyncKey {
            start,
            end,
            history_len: history.len(),
        };
        if !self.needs_recompute && self.last_key == Some(key) {
            return SyncOutcome::Unchanged;
        }

        let window = DisplayWindow::new(start, end);
        let half_extent = history.half_extent();
        let mut written = 0;
        let mut dropped = 0;

        if let Some(range) = window.resolve(history.len()) {
            for generation in range.filter_map(|index| history.get(index)) {
                let cells = generation.cells();
                let take = cells.len().min(self.records.len() - written);
                let slots = &mut self.records[written..written + take];
                for (slot, &cell) in slots.iter_mut().zip(cells) {
                    *slot = InstanceRecord::new(cell, generation.index(), half_extent);
                }
                written += take;
                dropped += cells.len() - take;
            }
        }

        (self.min_y, self.max_y) = window.y_range();
        self.count = written;
        self.dropped = dropped;
        self.last_key = Some(key);
        self.needs_recompute = false;
        self.needs_upload = true;

        if dropped > 0 {
            log::warn!(
                "instance arena full: kept {} of {} cells for generations {}..={}",
                written,
                written + dropped,
                start,
                end
            );
        } else {
            log::debug!("synced {} instances for generations {}..={}", written, start, end);
        }

        SyncOutcome::Rebuilt {
            instances: written,
            dropped,
        }
    }

    /// Report the draw parameters, handing the live records to `upload`
    /// first if they changed since the last transfer.
    pub fn publish<F>(&mut self, upload: F) -> Published
    where
        F: FnOnce(&[InstanceRecord]),
    {
        let uploaded = self.needs_upload;
        if uploaded {
            upload(&self.records[..self.count]);
            self.needs_upload = false;
        }
        Published {
            instance_count: self.count,
            min_y: self.min_y,
            max_y: self.max_y,
            uploaded,
        }
    }

    /// Force the next sync to walk the history even if its key matches,
    /// e.g. after a different history of the same length was swapped in.
    pub fn invalidate(&mut self) {
        self.needs_recompute = true;
    }

    /// Re-send the current records without recomputing them
    pub fn request_reupload(&mut self) {
        self.needs_upload = true;
    }

    /// Live records, valid until the next sync
    pub fn records(&self) -> &[InstanceRecord] {
        &self.records[..self.count]
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn capacity(&self) -> usize {
        self.records.len()
    }

    pub fn y_range(&self) -> (usize, usize) {
        (self.min_y, self.max_y)
    }

    /// Cells left out of the last rebuild because the arena was full
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn needs_recompute(&self) -> bool {
        self.needs_recompute
    }

    pub fn needs_upload(&self) -> bool {
        self.needs_upload
    }
}

impl Default for InstanceBufferCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LifeEngine, presets};

    fn blinker_history(generations: usize) -> GenerationHistory {
        let mut engine = LifeEngine::new(10);
        engine.initialize_from_pattern(&presets::blinker().cells).unwrap();
        engine.compute_generations(generations);
        engine.history().clone()
    }

    #[test]
    fn test_default_capacity() {
        let cache = InstanceBufferCache::new();
        assert_eq!(cache.capacity(), DEFAULT_CAPACITY);
        assert!(cache.is_empty());
        assert!(cache.needs_recompute());
        assert!(!cache.needs_upload());
    }

    #[test]
    fn test_sync_writes_one_record_per_live_cell() {
        let history = blinker_history(4);
        let mut cache = InstanceBufferCache::with_capacity(100);

        let outcome = cache.sync(&history, 1, 3);
        assert_eq!(outcome, SyncOutcome::Rebuilt { instances: 9, dropped: 0 });
        assert_eq!(cache.len(), 9);
        assert_eq!(cache.y_range(), (1, 3));

        // Records are grouped by generation in index order
        let heights: Vec<f32> = cache.records().iter().map(|r| r.position[1]).collect();
        assert_eq!(heights, vec![1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 3.0, 3.0, 3.0]);

        // Generation 1 is the vertical phase at cell x = 4, half extent 5
        let first = cache.records()[0];
        assert_eq!(first.position[0], -1.0);
        assert_eq!(first.generation_t, 1.0);
        for record in &cache.records()[..3] {
            let cell_x = record.position[0] + 5.0;
            let cell_y = record.position[2] + 5.0;
            assert!(history.get(1).unwrap().contains(crate::domain::Cell::new(
                cell_x as u32,
                cell_y as u32
            )));
        }
    }

    #[test]
    fn test_identical_sync_is_noop() {
        let history = blinker_history(4);
        let mut cache = InstanceBufferCache::with_capacity(100);

        cache.sync(&history, 0, 4);
        let before = cache.records().to_vec();
        let published = cache.publish(|_| {});
        assert!(published.uploaded);
        assert!(!cache.needs_upload());

        assert_eq!(cache.sync(&history, 0, 4), SyncOutcome::Unchanged);
        assert_eq!(cache.records(), before.as_slice());
        assert!(!cache.needs_upload());

        let again = cache.publish(|_| panic!("nothing changed, no upload expected"));
        assert!(!again.uploaded);
        assert_eq!(again.instance_count, 15);
    }

    #[test]
    fn test_history_growth_changes_key() {
        let mut engine = LifeEngine::new(10);
        engine.initialize_from_pattern(&presets::blinker().cells).unwrap();
        engine.compute_generations(2);

        let mut cache = InstanceBufferCache::with_capacity(100);
        cache.sync(engine.history(), 0, 10);
        assert_eq!(cache.len(), 9);

        engine.compute_generations(2);
        assert_eq!(
            cache.sync(engine.history(), 0, 10),
            SyncOutcome::Rebuilt { instances: 15, dropped: 0 }
        );
    }

    #[test]
    fn test_truncation_is_exact_and_silent() {
        let history = blinker_history(9);
        let mut cache = InstanceBufferCache::with_capacity(10);

        let outcome = cache.sync(&history, 0, 9);
        assert_eq!(outcome, SyncOutcome::Rebuilt { instances: 10, dropped: 20 });
        assert_eq!(cache.len(), cache.capacity());
        assert_eq!(cache.dropped(), 20);

        // Truncation keeps the earliest generations
        assert_eq!(cache.records()[9].generation_t, 3.0);

        let mut uploaded = 0;
        cache.publish(|records| uploaded = records.len());
        assert_eq!(uploaded, 10);
    }

    #[test]
    fn test_malformed_windows_are_empty() {
        let history = blinker_history(4);
        let mut cache = InstanceBufferCache::with_capacity(100);

        for (start, end) in [(3, 1), (-2, 3), (-4, -1), (40, 50)] {
            let outcome = cache.sync(&history, start, end);
            assert_eq!(outcome, SyncOutcome::Rebuilt { instances: 0, dropped: 0 });
            assert!(cache.is_empty());
            let (min_y, max_y) = cache.y_range();
            assert!(max_y - min_y >= 1);
        }
    }

    #[test]
    fn test_single_generation_window_has_unit_range() {
        let history = blinker_history(4);
        let mut cache = InstanceBufferCache::with_capacity(100);

        cache.sync(&history, 2, 2);
        let published = cache.publish(|_| {});
        assert_eq!(published.instance_count, 3);
        assert_eq!((published.min_y, published.max_y), (2, 3));
    }

    #[test]
    fn test_invalidate_forces_rebuild() {
        let history = blinker_history(4);
        let mut cache = InstanceBufferCache::with_capacity(100);

        cache.sync(&history, 0, 4);
        cache.publish(|_| {});
        cache.invalidate();
        assert!(cache.needs_recompute());
        assert!(matches!(cache.sync(&history, 0, 4), SyncOutcome::Rebuilt { .. }));
        assert!(cache.needs_upload());
    }

    #[test]
    fn test_reupload_without_recompute() {
        let history = blinker_history(4);
        let mut cache = InstanceBufferCache::with_capacity(100);

        cache.sync(&history, 0, 1);
        cache.publish(|_| {});
        cache.request_reupload();

        assert_eq!(cache.sync(&history, 0, 1), SyncOutcome::Unchanged);
        let mut seen = Vec::new();
        let published = cache.publish(|records| seen.extend_from_slice(records));
        assert!(published.uploaded);
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn test_shrinking_window_hides_old_records() {
        let history = blinker_history(4);
        let mut cache = InstanceBufferCache::with_capacity(100);

        cache.sync(&history, 0, 4);
        cache.sync(&history, 4, 4);
        assert_eq!(cache.len(), 3);
        assert!(cache.records().iter().all(|r| r.generation_t == 4.0));
    }
}
