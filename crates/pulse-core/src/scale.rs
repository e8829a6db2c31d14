// File: crates/pulse-core/src/scale.rs
// Summary: Value domains for line/bar charts and the index (X) / value (Y) pixel transforms.

/// Smallest top of a line chart domain before buffering.
pub const LINE_MAX_FLOOR: f64 = 5.0;
/// Smallest top of a bar chart domain before headroom.
pub const BAR_MAX_FLOOR: f64 = 1.0;
/// Fraction of the data range added above (and below, for negative data) the extremes.
pub const BUFFER_RATIO: f64 = 0.10;

/// Buffered value domain of a line chart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineDomain {
    pub raw_min: f64,
    pub raw_max: f64,
    pub display_min: f64,
    pub display_max: f64,
}

impl LineDomain {
    /// `raw_max` is floored at 5 and `raw_min` capped at 0; a 10% buffer of the
    /// range (or 1 for a flat range) keeps peaks off the edges. The bottom is
    /// only buffered when some value is negative, otherwise it stays at 0.
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Self {
        let mut raw_max = LINE_MAX_FLOOR;
        let mut raw_min = 0.0f64;
        let mut any_negative = false;
        for v in values.into_iter().filter(|v| v.is_finite()) {
            raw_max = raw_max.max(v);
            raw_min = raw_min.min(v);
            any_negative |= v < 0.0;
        }
        let range = raw_max - raw_min;
        let buffer = if range == 0.0 { 1.0 } else { range * BUFFER_RATIO };
        let display_min = if any_negative { raw_min - buffer } else { 0.0 };
        Self { raw_min, raw_max, display_min, display_max: raw_max + buffer }
    }

    /// True when the domain straddles zero and needs a reference line.
    pub fn has_negative(&self) -> bool {
        self.display_min < 0.0
    }

    pub fn span(&self) -> f64 {
        self.display_max - self.display_min
    }

    /// Value at a fraction of the domain (0 = bottom, 1 = top).
    pub fn value_at_fraction(&self, t: f64) -> f64 {
        self.display_min + self.span() * t
    }

    pub(crate) fn key_bits(&self) -> [u64; 2] {
        [self.display_min.to_bits(), self.display_max.to_bits()]
    }
}

/// Bar chart domain: always starts at 0 with 10% headroom above the tallest bar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarDomain {
    pub max: f64,
}

impl BarDomain {
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Self {
        let top = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(BAR_MAX_FLOOR, f64::max);
        Self { max: top * (1.0 + BUFFER_RATIO) }
    }
}

/// Vertical value scale mapping a data range to [top, bottom] pixels.
#[derive(Clone, Copy, Debug)]
pub struct ValueScale {
    pub top_px: f32,
    pub bottom_px: f32,
    pub vmin: f64,
    pub vmax: f64,
}

impl ValueScale {
    pub fn new(top_px: f32, bottom_px: f32, vmin: f64, vmax: f64) -> Self {
        let mut s = Self { top_px, bottom_px, vmin, vmax };
        if (s.vmax - s.vmin).abs() < 1e-12 { s.vmax = s.vmin + 1.0; }
        s
    }

    pub fn for_line(top_px: f32, bottom_px: f32, domain: &LineDomain) -> Self {
        Self::new(top_px, bottom_px, domain.display_min, domain.display_max)
    }

    pub fn for_bars(top_px: f32, bottom_px: f32, domain: &BarDomain) -> Self {
        Self::new(top_px, bottom_px, 0.0, domain.max)
    }

    #[inline]
    pub fn to_px(&self, y: f64) -> f32 {
        let span = self.vmax - self.vmin;
        self.bottom_px - ((y - self.vmin) / span) as f32 * (self.bottom_px - self.top_px)
    }

    #[inline]
    pub fn from_px(&self, py: f32) -> f64 {
        let span = self.vmax - self.vmin;
        let h = (self.bottom_px - self.top_px).max(1e-6);
        self.vmin + ((self.bottom_px - py) / h) as f64 * span
    }
}

/// Horizontal scale placing `len` buckets evenly from `left_px` to `right_px`.
#[derive(Clone, Copy, Debug)]
pub struct IndexScale {
    pub left_px: f32,
    pub right_px: f32,
    pub len: usize,
}

impl IndexScale {
    pub fn new(left_px: f32, right_px: f32, len: usize) -> Self {
        Self { left_px, right_px, len }
    }

    pub fn width(&self) -> f32 {
        (self.right_px - self.left_px).max(0.0)
    }

    /// X of bucket `i`. A single bucket sits in the middle.
    #[inline]
    pub fn to_px(&self, i: usize) -> f32 {
        if self.len <= 1 {
            return (self.left_px + self.right_px) * 0.5;
        }
        self.left_px + self.width() * (i as f32 / (self.len - 1) as f32)
    }

    /// Nearest bucket under a pointer x, clamped to `[0, len - 1]`.
    pub fn index_at(&self, px: f32) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        let w = self.width();
        let ratio = if w > 0.0 { ((px - self.left_px) / w).clamp(0.0, 1.0) } else { 0.0 };
        let last = self.len - 1;
        let idx = (ratio * last as f32).round() as usize;
        Some(idx.min(last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_data_uses_unit_buffer() {
        // Only the floor contributes: raw range 0..5.
        let d = LineDomain::from_values(std::iter::empty());
        assert_eq!(d.raw_max, 5.0);
        assert_eq!(d.display_min, 0.0);
        assert!((d.display_max - 5.5).abs() < 1e-9);
    }

    #[test]
    fn value_scale_round_trip() {
        let s = ValueScale::new(10.0, 110.0, 0.0, 50.0);
        assert!((s.to_px(0.0) - 110.0).abs() < 1e-4);
        assert!((s.to_px(50.0) - 10.0).abs() < 1e-4);
        assert!((s.from_px(60.0) - 25.0).abs() < 1e-4);
    }

    #[test]
    fn single_bucket_is_centered() {
        let s = IndexScale::new(0.0, 100.0, 1);
        assert_eq!(s.to_px(0), 50.0);
        assert_eq!(s.index_at(3.0), Some(0));
    }

    #[test]
    fn empty_index_scale_has_no_hover() {
        assert_eq!(IndexScale::new(0.0, 100.0, 0).index_at(50.0), None);
    }
}
