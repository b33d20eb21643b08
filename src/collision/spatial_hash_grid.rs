use std::collections::HashSet;

use tracing::debug;

use crate::bodies::Body;
use crate::collision::{BroadPhase, ContactPair};
use crate::core::BodyHandle;
use crate::error::PhysicsError;
use crate::math::Aabb;
use crate::Result;

/// Identifier of one grid cell, folding the two integer cell coordinates into
/// a single sortable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey(i64);

impl CellKey {
    /// Folds cell coordinates into a key. Distinct coordinates never share a key.
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self(((x as i64) << 32) | (y as u32 as i64))
    }

    /// Recovers the cell coordinates
    #[inline]
    pub fn coords(&self) -> (i32, i32) {
        ((self.0 >> 32) as i32, self.0 as i32)
    }
}

/// Uniform-grid broad phase.
///
/// Every pass starts from an empty grid: each body is recorded once per cell
/// its bounding box covers, the flat `(cell, body)` entry list is sorted by
/// cell, and every run of equal cells proposes its body pairs. A pair sharing
/// several cells is tested once thanks to a set of already seen pairs.
#[derive(Debug, Clone)]
pub struct SpatialHashGrid {
    cell_size: f32,
    entries: Vec<(CellKey, BodyHandle)>,
    seen: HashSet<ContactPair>,
    candidates: usize,
}

impl SpatialHashGrid {
    /// Cell count above which an insertion is logged; the cell size is then
    /// far below the body size
    pub const CELL_WARNING: i64 = 4096;

    /// Creates a grid with square cells of side `cell_size`
    pub fn new(cell_size: f32) -> Result<Self> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(PhysicsError::InvalidParameter(format!(
                "grid cell size must be positive and finite, got {cell_size}"
            )));
        }

        Ok(Self {
            cell_size,
            entries: Vec::new(),
            seen: HashSet::new(),
            candidates: 0,
        })
    }

    /// Cell size for `object_count` bodies spread over `world`: each object
    /// gets roughly five cells' worth of area.
    pub fn suggested_cell_size(world: &Aabb, object_count: usize) -> f32 {
        let cells = (object_count.max(1) * 5) as f32;
        (world.area().abs() / cells).sqrt()
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// `(cell, body)` entries recorded by the last pass, sorted by cell once
    /// pairs have been generated
    #[inline]
    pub fn entries(&self) -> &[(CellKey, BodyHandle)] {
        &self.entries
    }

    /// Number of distinct candidate pairs examined by the last pass
    #[inline]
    pub fn candidate_count(&self) -> usize {
        self.candidates
    }

    /// Drops every entry from the previous pass
    pub fn clear(&mut self) {
        self.entries.clear();
        self.seen.clear();
        self.candidates = 0;
    }

    /// Records the body in every cell its bounding box covers and stores the
    /// covered keys on the body
    pub fn insert(&mut self, handle: BodyHandle, body: &mut Body) {
        let aabb = body.aabb();
        let (min_x, min_y) = self.cell_coords(aabb.min.x, aabb.min.y);
        let (max_x, max_y) = self.cell_coords(aabb.max.x, aabb.max.y);

        let cells = (i64::from(max_x) - i64::from(min_x) + 1)
            * (i64::from(max_y) - i64::from(min_y) + 1);
        if cells > Self::CELL_WARNING {
            debug!(
                body = handle.index(),
                cells,
                cell_size = self.cell_size,
                "body covers an unusually large number of grid cells"
            );
        }

        let keys = body.cell_keys_mut();
        keys.clear();

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let key = CellKey::new(x, y);
                self.entries.push((key, handle));
                keys.push(key);
            }
        }
    }

    fn cell_coords(&self, x: f32, y: f32) -> (i32, i32) {
        (
            (x / self.cell_size).floor() as i32,
            (y / self.cell_size).floor() as i32,
        )
    }

    /// Scans runs of equal cell keys and appends the pairs whose bounding
    /// boxes overlap
    pub fn generate_pairs(&mut self, bodies: &[Body], pairs: &mut Vec<ContactPair>) {
        let Self { entries, seen, candidates, .. } = self;
        entries.sort_unstable();

        let mut start = 0;
        while start < entries.len() {
            let key = entries[start].0;
            let mut end = start + 1;
            while end < entries.len() && entries[end].0 == key {
                end += 1;
            }

            let run = &entries[start..end];
            for (i, &(_, handle_a)) in run.iter().enumerate() {
                for &(_, handle_b) in &run[i + 1..] {
                    if handle_a == handle_b {
                        continue;
                    }

                    let pair = ContactPair::new(handle_a, handle_b);
                    if !seen.insert(pair) {
                        continue;
                    }
                    *candidates += 1;

                    let aabb_a = bodies[pair.body_a.index()].aabb();
                    let aabb_b = bodies[pair.body_b.index()].aabb();
                    if aabb_a.intersects(&aabb_b) {
                        pairs.push(pair);
                    }
                }
            }

            start = end;
        }
    }
}

impl BroadPhase for SpatialHashGrid {
    fn find_pairs(&mut self, bodies: &mut [Body], pairs: &mut Vec<ContactPair>) {
        self.clear();

        for (i, body) in bodies.iter_mut().enumerate() {
            self.insert(BodyHandle::from_index(i), body);
        }

        self.generate_pairs(bodies, pairs);
    }

    fn name(&self) -> &str {
        "spatial_hash_grid"
    }
}
