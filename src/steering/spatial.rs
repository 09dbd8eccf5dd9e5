//! Uniform-grid neighbor query
//!
//! Buckets agent indices by cell so a radius query only scans the cells
//! overlapping the query square. With the cell size at the query radius
//! that is a 3x3 block.

use std::collections::HashMap;

use crate::geometry::NVec2;

pub struct SpatialGrid {
    cell: f64,
    cells: HashMap<(i64, i64), Vec<usize>>,
}

impl SpatialGrid {
    pub fn build(positions: impl IntoIterator<Item = NVec2>, cell_size: f64) -> Self {
        let cell = if cell_size.is_finite() && cell_size > 0.0 { cell_size } else { 1.0 };
        let mut cells: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
        for (i, p) in positions.into_iter().enumerate() {
            cells.entry(Self::key(cell, &p)).or_default().push(i);
        }
        Self { cell, cells }
    }

    fn key(cell: f64, p: &NVec2) -> (i64, i64) {
        ((p.x / cell).floor() as i64, (p.y / cell).floor() as i64)
    }

    /// Indices within `radius` of `center` (inclusive), according to `positions`
    /// `positions` must be the slice the grid was built from
    pub fn query(&self, positions: &[NVec2], center: &NVec2, radius: f64) -> Vec<usize> {
        let mut out = Vec::new();
        if radius.is_nan() || radius < 0.0 {
            return out;
        }
        let r2 = radius * radius;
        let span = (radius / self.cell).ceil().max(1.0) as i64;
        let (cx, cy) = Self::key(self.cell, center);
        for gx in (cx - span)..=(cx + span) {
            for gy in (cy - span)..=(cy + span) {
                let Some(bucket) = self.cells.get(&(gx, gy)) else {
                    continue;
                };
                for &i in bucket {
                    if (positions[i] - center).norm_squared() <= r2 {
                        out.push(i);
                    }
                }
            }
        }
        out
    }
}
