//! DisplayPanel Widget
//!
//! The calculator screen: a dim caption above a right-aligned main line.
//! Text that does not fit keeps its tail, so the most recent keystrokes are
//! always visible.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Widget};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use calc_controller::{DisplaySnapshot, ERROR_INDICATOR};

use crate::theme::Palette;

/// The calculator screen
pub struct DisplayPanel<'a> {
    snapshot: &'a DisplaySnapshot,
    palette: Palette,
}

impl<'a> DisplayPanel<'a> {
    pub fn new(snapshot: &'a DisplaySnapshot, palette: Palette) -> Self {
        Self { snapshot, palette }
    }
}

impl Widget for DisplayPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(self.palette.dim())
            .style(self.palette.panel());
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let main_style = if self.snapshot.text == ERROR_INDICATOR {
            self.palette.panel().fg(self.palette.error)
        } else if self.snapshot.selected {
            self.palette.highlight()
        } else {
            self.palette.panel().add_modifier(Modifier::BOLD)
        };

        let main_row = inner.y + inner.height - 1;
        write_right_aligned(buf, inner, main_row, &self.snapshot.text, main_style);

        if inner.height >= 2 {
            write_right_aligned(
                buf,
                inner,
                main_row - 1,
                &self.snapshot.caption,
                self.palette.dim(),
            );
        }
    }
}

fn write_right_aligned(buf: &mut Buffer, area: Rect, y: u16, text: &str, style: Style) {
    let visible = tail_to_width(text, area.width as usize);
    let width = u16::try_from(visible.width()).unwrap_or(area.width);
    let x = area.x + area.width.saturating_sub(width);
    buf.set_string(x, y, &visible, style);
}

/// The longest suffix of `text` that fits in `width` terminal columns
pub fn tail_to_width(text: &str, width: usize) -> String {
    let mut used = 0;
    let mut start = text.len();
    for (idx, ch) in text.char_indices().rev() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        start = idx;
    }
    text[start..].to_string()
}
