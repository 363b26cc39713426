use ratatui::layout::{Flex, Layout, Rect, Size};
use ratatui::style::Color;

/// Return a rectangle of the given size centered within `area`.  If `area`
/// is too small in either dimension, the result is clipped to `area`.
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [column] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(column);
    cell
}

/// Scale the brightness of an RGB color by `factor`, which is clamped to
/// `[0, 1]`.  Named & indexed colors are returned unchanged.
pub(crate) fn fade(color: Color, factor: f64) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let factor = factor.clamp(0.0, 1.0);
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let scale = |c: u8| (f64::from(c) * factor).round() as u8;
            Color::Rgb(scale(r), scale(g), scale(b))
        }
        other => other,
    }
}
