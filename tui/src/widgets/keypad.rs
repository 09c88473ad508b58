//! Keypad Widget
//!
//! Draws the button grid for a layout and answers "which key is under this
//! point" for mouse clicks. Both use [`button_areas`], so what is drawn and
//! what is clickable cannot drift apart.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout as Split, Position, Rect};
use ratatui::widgets::{Block, BorderType, Widget};
use unicode_width::UnicodeWidthStr;

use calc_controller::{Key, Layout};

use crate::theme::Palette;

/// Buttons shorter than this are drawn without a border
const MIN_BORDERED_HEIGHT: u16 = 3;

/// Screen area of every button, row by row
///
/// Every row is split evenly among its keys, so a short row gets wider
/// buttons.
pub fn button_areas(layout: Layout, area: Rect) -> Vec<(Key, Rect)> {
    let rows = layout.rows();
    let row_count = u32::try_from(rows.len()).unwrap_or(1);
    let row_areas = Split::vertical(vec![Constraint::Ratio(1, row_count); rows.len()]).split(area);

    rows.iter()
        .zip(row_areas.iter())
        .flat_map(|(keys, row_area)| {
            let key_count = u32::try_from(keys.len()).unwrap_or(1);
            let cols =
                Split::horizontal(vec![Constraint::Ratio(1, key_count); keys.len()]).split(*row_area);
            keys.iter()
                .copied()
                .zip(cols.iter().copied())
                .collect::<Vec<_>>()
        })
        .collect()
}

/// The key drawn at `(x, y)` inside `area`, if any
pub fn key_at(layout: Layout, area: Rect, x: u16, y: u16) -> Option<Key> {
    let point = Position::new(x, y);
    button_areas(layout, area)
        .into_iter()
        .find(|(_, rect)| rect.contains(point))
        .map(|(key, _)| key)
}

/// The calculator keypad
pub struct Keypad {
    layout: Layout,
    palette: Palette,
}

impl Keypad {
    pub fn new(layout: Layout, palette: Palette) -> Self {
        Self { layout, palette }
    }
}

impl Widget for Keypad {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, self.palette.base());

        for (key, rect) in button_areas(self.layout, area) {
            if rect.width == 0 || rect.height == 0 {
                continue;
            }
            let style = self.palette.key_style(key);

            let face = if rect.height >= MIN_BORDERED_HEIGHT && rect.width >= 3 {
                let block = Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(style.fg(self.palette.background))
                    .style(style);
                let inner = block.inner(rect);
                block.render(rect, buf);
                inner
            } else {
                buf.set_style(rect, style);
                rect
            };

            let label = key.label();
            let label_width = u16::try_from(label.width()).unwrap_or(face.width);
            let x = face.x + face.width.saturating_sub(label_width) / 2;
            let y = face.y + face.height.saturating_sub(1) / 2;
            buf.set_stringn(x, y, &label, face.width as usize, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calc_controller::{Operator, Theme};

    #[test]
    fn test_every_key_is_clickable_at_its_center() {
        let area = Rect::new(0, 0, 40, 20);
        for layout in [Layout::Standard, Layout::Scientific] {
            let buttons = button_areas(layout, area);
            assert_eq!(
                buttons.len(),
                layout.rows().iter().map(Vec::len).sum::<usize>()
            );
            for (key, rect) in buttons {
                let cx = rect.x + rect.width / 2;
                let cy = rect.y + rect.height / 2;
                assert_eq!(key_at(layout, area, cx, cy), Some(key));
            }
        }
    }

    #[test]
    fn test_outside_keypad() {
        let area = Rect::new(0, 5, 40, 20);
        assert_eq!(key_at(Layout::Standard, area, 10, 2), None);
        assert_eq!(key_at(Layout::Standard, area, 45, 10), None);
    }

    #[test]
    fn test_top_left_key() {
        let area = Rect::new(0, 0, 40, 20);
        assert_eq!(key_at(Layout::Standard, area, 0, 0), Some(Key::Clear));
        assert_eq!(
            key_at(Layout::Standard, area, 39, 0),
            Some(Key::Operator(Operator::Divide))
        );
    }

    #[test]
    fn test_render_draws_labels() {
        let area = Rect::new(0, 0, 40, 20);
        let mut buf = Buffer::empty(area);
        Keypad::new(Layout::Standard, Palette::for_theme(Theme::Dark)).render(area, &mut buf);

        let text: String = buf.content.iter().map(|c| c.symbol()).collect();
        assert!(text.contains("AC"));
        assert!(text.contains("DEL"));
        assert!(text.contains('='));
    }
}
