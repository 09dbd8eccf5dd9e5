//! Axis-aligned rectangles used as steering obstacles ("blocks")

use super::vec::NVec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: NVec2, // top-left corner (screen space)
    pub max: NVec2, // bottom-right corner
}

impl Rect {
    /// Build from a corner and a size; negative sizes are normalized
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        let a = NVec2::new(x, y);
        let b = NVec2::new(x + w, y + h);
        Self {
            min: NVec2::new(a.x.min(b.x), a.y.min(b.y)),
            max: NVec2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn contains(&self, p: &NVec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Closest point on (or in) the rectangle to `p`
    pub fn closest_point(&self, p: &NVec2) -> NVec2 {
        NVec2::new(p.x.clamp(self.min.x, self.max.x), p.y.clamp(self.min.y, self.max.y))
    }

    /// Rectangle grown by `r` on every side
    pub fn inflate(&self, r: f64) -> Self {
        Self {
            min: self.min - NVec2::new(r, r),
            max: self.max + NVec2::new(r, r),
        }
    }
}
