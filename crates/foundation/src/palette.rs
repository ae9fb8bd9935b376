use crate::ids::ExpeditionId;

/// HTML color code, e.g. `"#a93226"`.
pub type Color = &'static str;

/// Fixed palette for expedition markers and routes.
pub const LINE_COLORS: [Color; 8] = [
    "#a93226", "#7d3c98", "#2e86c1", "#17a589", "#229954", "#f1c40f", "#d35400", "#34495e",
];

/// Deterministic color for an expedition.
///
/// Indexes the palette by `id mod 8`, so the mapping is total for any id
/// and repeats with period 8.
pub fn color_for_expedition(id: ExpeditionId) -> Color {
    LINE_COLORS[id.0 as usize % LINE_COLORS.len()]
}
