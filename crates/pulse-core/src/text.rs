// File: crates/pulse-core/src/text.rs
// Summary: Backend-independent text metrics used to size legend pills and tooltips.

/// Average advance of a proportional UI font, as a fraction of the font size.
const AVG_ADVANCE: f32 = 0.56;
/// Digits and separators in the tabular fallback fonts run a little wider.
const DIGIT_ADVANCE: f32 = 0.6;

/// Estimated rendered width of `text` at `size` px. Boxes sized from this
/// leave padding for the difference to real shaping.
pub fn measure_width(text: &str, size: f32) -> f32 {
    text.chars()
        .map(|c| {
            if c.is_ascii_digit() || matches!(c, ',' | '.' | 'k' | '-') {
                DIGIT_ADVANCE
            } else if c.is_whitespace() {
                0.3
            } else if c.is_uppercase() || !c.is_ascii() {
                0.68
            } else {
                AVG_ADVANCE
            }
        })
        .sum::<f32>()
        * size.max(1.0)
}
