//! Colour conversion for trace metadata.

/// Colour used when a node has no colour of its own.
pub const DEFAULT_COLOUR: &str = "#000000";

/// Convert an RGB triple with components in `[0, 1]` to `#RRGGBB`.
///
/// Components are scaled to `0..=255` by truncation; values outside the unit
/// range are clamped first.
///
/// ```rust
/// use mesh_trace::data::colour::rgb_to_hex;
/// assert_eq!(rgb_to_hex([0.0, 1.0, 0.0]), "#00FF00");
/// ```
pub fn rgb_to_hex(rgb: [f64; 3]) -> String {
    let [r, g, b] = rgb.map(|c| (255.0 * c.clamp(0.0, 1.0)) as u8);
    format!("#{r:02X}{g:02X}{b:02X}")
}
