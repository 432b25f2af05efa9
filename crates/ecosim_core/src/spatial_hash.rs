use crate::EntityId;
use std::collections::HashMap;

/// Integer grid coordinate of one bucket.
pub type CellKey = (i32, i32);

/// An id with the position it was inserted at.
type Entry = (EntityId, f64, f64);

#[derive(Clone, Debug)]
/// Uniform-grid broad-phase index over entity positions.
///
/// Entities are bucketed by `(floor(x / cell_size), floor(y / cell_size))`.
/// The grid is unbounded: negative and out-of-world coordinates get their own
/// buckets. It is rebuilt from scratch every tick, so there is no cell
/// migration logic.
///
/// Queries visit every cell touching the square `[x-r, x+r] × [y-r, y+r]`.
/// They never miss an entity within `r` of the query point, but may return
/// entities farther away that share a visited cell. [`SpatialHash::query_within`]
/// filters by exact distance against the positions given at insertion.
///
/// # Examples
/// ```
/// use ecosim_core::spatial_hash::SpatialHash;
///
/// let mut spatial = SpatialHash::new(120.0);
/// spatial.insert(1, 15.0, 15.0);
/// spatial.insert(2, 500.0, 500.0);
///
/// let nearby = spatial.query(20.0, 20.0, 50.0);
/// assert_eq!(nearby, vec![1]);
/// ```
pub struct SpatialHash {
    cell_size: f64,
    grid: HashMap<CellKey, Vec<Entry>>,
    len: usize,
}

impl Default for SpatialHash {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl SpatialHash {
    /// Creates an empty hash. Non-positive or non-finite sizes fall back to 1.
    pub fn new(cell_size: f64) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            1.0
        };
        Self {
            cell_size,
            grid: HashMap::new(),
            len: 0,
        }
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of insertions since the last clear.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn occupied_cells(&self) -> usize {
        self.grid.len()
    }

    /// Drops every bucket, so `occupied_cells` only counts cells filled
    /// since the last clear.
    pub fn clear(&mut self) {
        self.grid.clear();
        self.len = 0;
    }

    /// Maps a world coordinate to its grid cell.
    ///
    /// Returns `None` for non-finite coordinates and for coordinates whose
    /// cell index would overflow `i32`.
    #[inline]
    pub fn cell_of(&self, x: f64, y: f64) -> Option<CellKey> {
        Some((self.axis_cell(x)?, self.axis_cell(y)?))
    }

    #[inline]
    fn axis_cell(&self, v: f64) -> Option<i32> {
        if !v.is_finite() {
            return None;
        }
        let c = (v / self.cell_size).floor();
        if c < f64::from(i32::MIN) || c > f64::from(i32::MAX) {
            return None;
        }
        Some(c as i32)
    }

    /// Buckets `id` at `(x, y)`. Returns `false` if the position is not
    /// representable on the grid, in which case nothing is stored.
    pub fn insert(&mut self, id: EntityId, x: f64, y: f64) -> bool {
        match self.cell_of(x, y) {
            Some(key) => {
                self.grid.entry(key).or_default().push((id, x, y));
                self.len += 1;
                true
            }
            None => false,
        }
    }

    /// Clears the grid and inserts every `(id, x, y)` triple.
    pub fn rebuild<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = (EntityId, f64, f64)>,
    {
        self.clear();
        for (id, x, y) in items {
            self.insert(id, x, y);
        }
    }

    /// Inclusive cell range covered by the query square, clamped to `i32`.
    fn cell_range(&self, x: f64, y: f64, radius: f64) -> Option<(i32, i32, i32, i32)> {
        if !x.is_finite() || !y.is_finite() || !radius.is_finite() {
            return None;
        }
        let r = radius.abs();
        let clamp = |v: f64| {
            (v / self.cell_size)
                .floor()
                .clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
        };
        Some((clamp(x - r), clamp(y - r), clamp(x + r), clamp(y + r)))
    }

    /// Visits every entry in every cell touching the query square.
    fn visit<F>(&self, x: f64, y: f64, radius: f64, mut visitor: F)
    where
        F: FnMut(&Entry),
    {
        let Some((min_cx, min_cy, max_cx, max_cy)) = self.cell_range(x, y, radius) else {
            return;
        };

        let span_x = i64::from(max_cx) - i64::from(min_cx) + 1;
        let span_y = i64::from(max_cy) - i64::from(min_cy) + 1;
        if span_x.saturating_mul(span_y) > self.grid.len() as i64 {
            // Query box covers more cells than are occupied; walk the buckets.
            for (&(cx, cy), bucket) in &self.grid {
                if (min_cx..=max_cx).contains(&cx) && (min_cy..=max_cy).contains(&cy) {
                    bucket.iter().for_each(&mut visitor);
                }
            }
            return;
        }

        for cy in min_cy..=max_cy {
            for cx in min_cx..=max_cx {
                if let Some(bucket) = self.grid.get(&(cx, cy)) {
                    bucket.iter().for_each(&mut visitor);
                }
            }
        }
    }

    /// Calls `callback` for every id in every cell touching the query square.
    ///
    /// An id inserted more than once is reported once per insertion.
    pub fn query_callback<F>(&self, x: f64, y: f64, radius: f64, mut callback: F)
    where
        F: FnMut(EntityId),
    {
        self.visit(x, y, radius, |&(id, _, _)| callback(id));
    }

    /// Candidate ids near `(x, y)`, sorted and without duplicates.
    pub fn query(&self, x: f64, y: f64, radius: f64) -> Vec<EntityId> {
        let mut result = Vec::with_capacity(64);
        self.query_into(x, y, radius, &mut result);
        result
    }

    /// Like [`SpatialHash::query`] but reuses the caller's buffer.
    #[inline]
    pub fn query_into(&self, x: f64, y: f64, radius: f64, result: &mut Vec<EntityId>) {
        result.clear();
        self.query_callback(x, y, radius, |id| result.push(id));
        result.sort_unstable();
        result.dedup();
    }

    /// Ids whose inserted position lies within `radius` of `(x, y)`, sorted
    /// and without duplicates.
    pub fn query_within(&self, x: f64, y: f64, radius: f64) -> Vec<EntityId> {
        let r2 = radius * radius;
        let mut result = Vec::new();
        self.visit(x, y, radius, |&(id, ex, ey)| {
            let dx = ex - x;
            let dy = ey - y;
            if dx * dx + dy * dy <= r2 {
                result.push(id);
            }
        });
        result.sort_unstable();
        result.dedup();
        result
    }

    /// Number of insertions in the cells touching the query square.
    pub fn count_nearby(&self, x: f64, y: f64, radius: f64) -> usize {
        let mut count = 0;
        self.query_callback(x, y, radius, |_| count += 1);
        count
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn test_spatial_hash_query_finds_nearby() {
        let mut sh = SpatialHash::new(5.0);
        sh.insert(0, 1.0, 1.0);
        sh.insert(1, 2.0, 2.0);
        sh.insert(2, 10.0, 10.0);

        assert_eq!(sh.query(1.5, 1.5, 2.0), vec![0, 1]);
    }

    #[test]
    fn test_spatial_hash_insert_and_query_same_cell() {
        let mut sh = SpatialHash::new(5.0);
        sh.insert(7, 1.0, 1.0);
        assert_eq!(sh.count_nearby(1.0, 1.0, 1.0), 1);
    }

    #[test]
    fn test_spatial_hash_clear() {
        let mut sh = SpatialHash::new(5.0);
        sh.insert(0, 1.0, 1.0);
        sh.clear();
        assert!(sh.is_empty());
        assert!(sh.query(1.0, 1.0, 10.0).is_empty());
    }

    #[test]
    fn test_negative_coordinates_floor_into_own_cell() {
        let sh = SpatialHash::new(10.0);
        assert_eq!(sh.cell_of(-0.5, -10.0), Some((-1, -1)));
        assert_eq!(sh.cell_of(0.0, 9.99), Some((0, 0)));
    }

    #[test]
    fn test_duplicate_insertions_are_deduplicated() {
        let mut sh = SpatialHash::new(10.0);
        sh.insert(3, 1.0, 1.0);
        sh.insert(3, 15.0, 1.0);
        assert_eq!(sh.count_nearby(5.0, 1.0, 10.0), 2);
        assert_eq!(sh.query(5.0, 1.0, 10.0), vec![3]);
    }

    #[test]
    fn test_non_finite_positions_are_rejected() {
        let mut sh = SpatialHash::new(10.0);
        assert!(!sh.insert(1, f64::NAN, 0.0));
        assert!(!sh.insert(2, 0.0, f64::INFINITY));
        assert!(sh.is_empty());
        assert!(sh.query(f64::NAN, 0.0, 5.0).is_empty());
    }

    #[test]
    fn test_huge_radius_walks_buckets() {
        let mut sh = SpatialHash::new(1.0);
        sh.insert(1, 0.0, 0.0);
        sh.insert(2, 1.0e6, -1.0e6);
        assert_eq!(sh.query(0.0, 0.0, 1.0e9), vec![1, 2]);
    }

    #[test]
    fn test_clear_forgets_visited_cells() {
        let mut sh = SpatialHash::new(10.0);
        for step in 0..100 {
            sh.rebuild([(1, f64::from(step) * 10.0 + 5.0, 5.0)]);
        }
        assert_eq!(sh.len(), 1);
        assert_eq!(sh.occupied_cells(), 1);
    }

    #[test]
    fn test_query_within_uses_inserted_positions() {
        let mut sh = SpatialHash::new(10.0);
        sh.insert(1, 1.0, 1.0);
        sh.insert(2, 9.0, 9.0);
        sh.insert(3, 12.0, 1.0);
        assert_eq!(sh.query(1.0, 1.0, 2.0), vec![1, 2]);
        assert_eq!(sh.query_within(1.0, 1.0, 2.0), vec![1]);
        assert_eq!(sh.query_within(11.0, 1.0, 1.0), vec![3]);
        assert!(sh.query_within(f64::NAN, 1.0, 1.0).is_empty());
    }

    #[test]
    fn test_rebuild_replaces_contents() {
        let mut sh = SpatialHash::new(10.0);
        sh.rebuild(vec![(1, 0.0, 0.0), (2, 50.0, 50.0)]);
        sh.rebuild(vec![(3, 0.0, 0.0)]);
        assert_eq!(sh.len(), 1);
        assert_eq!(sh.query(0.0, 0.0, 100.0), vec![3]);
    }
}
