//! Object bookkeeping for the viewer: which ids are registered, where each one
//! sits, and what color it is drawn in. Kept free of any GPU types so it can be
//! tested off-wasm.

use std::collections::HashSet;

// f64 keeps fractional bits for every u32 id; an f32 product has none past 2^23.
const GOLDEN_RATIO_CONJUGATE: f64 = 0.618_033_988_749_895;

/// Ordered set of object ids, in registration order.
#[derive(Debug, Clone, Default)]
pub struct ObjectRegistry {
    ids: Vec<u32>,
    seen: HashSet<u32>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `id`. Returns `false` if it was already present.
    pub fn insert(&mut self, id: u32) -> bool {
        if !self.seen.insert(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn contains(&self, id: u32) -> bool {
        self.seen.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    /// Position of every object on a square grid in the XZ plane, centered on
    /// the origin. Same order as [`ids`](Self::ids).
    pub fn layout(&self, spacing: f32) -> Vec<[f32; 3]> {
        let (cols, rows) = grid_dims(self.len());
        let x0 = (cols.saturating_sub(1)) as f32 * 0.5;
        let z0 = (rows.saturating_sub(1)) as f32 * 0.5;

        (0..self.len())
            .map(|i| {
                let col = (i % cols) as f32;
                let row = (i / cols) as f32;
                [(col - x0) * spacing, 0.0, (row - z0) * spacing]
            })
            .collect()
    }

    /// Largest absolute coordinate produced by [`layout`](Self::layout).
    pub fn extent(&self, spacing: f32) -> f32 {
        let (cols, rows) = grid_dims(self.len());
        cols.max(rows).saturating_sub(1) as f32 * 0.5 * spacing
    }
}

fn grid_dims(n: usize) -> (usize, usize) {
    if n == 0 {
        return (1, 0);
    }
    let mut cols = 1;
    while cols * cols < n {
        cols += 1;
    }
    let rows = (n + cols - 1) / cols;
    (cols, rows)
}

/// Deterministic display color for an object id. Consecutive ids land far
/// apart on the hue circle.
pub fn object_color(id: u32) -> [u8; 3] {
    let hue = (f64::from(id) * GOLDEN_RATIO_CONJUGATE).fract() as f32;
    hsv_to_rgb(hue, 0.65, 0.95)
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [u8; 3] {
    let h6 = h * 6.0;
    let sector = h6.floor() as i32 % 6;
    let f = h6 - h6.floor();
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    let (r, g, b) = match sector {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    [to_u8(r), to_u8(g), to_u8(b)]
}

fn to_u8(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}
