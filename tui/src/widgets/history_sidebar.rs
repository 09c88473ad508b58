//! HistorySidebar Widget
//!
//! Past calculations, newest first, with the highlighted entry inverted.
//! Long entries wrap; the list scrolls so the highlight stays on screen.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, StatefulWidget, Widget};
use textwrap::wrap;

use calc_controller::{HistoryEntry, EMPTY_HISTORY_TEXT};

use crate::theme::Palette;

/// State for the history sidebar
#[derive(Debug, Default)]
pub struct HistorySidebarState {
    /// Highlighted entry
    pub cursor: usize,
    /// Which entry each rendered row shows (layer-local y, entry index)
    pub rows: Vec<(u16, usize)>,
}

impl HistorySidebarState {
    /// Entry rendered at layer-local row `y`, if any
    pub fn entry_at(&self, y: u16) -> Option<usize> {
        self.rows
            .iter()
            .find(|(row, _)| *row == y)
            .map(|(_, index)| *index)
    }
}

/// The history sidebar
pub struct HistorySidebar<'a> {
    entries: &'a [HistoryEntry],
    palette: Palette,
}

impl<'a> HistorySidebar<'a> {
    pub fn new(entries: &'a [HistoryEntry], palette: Palette) -> Self {
        Self { entries, palette }
    }
}

impl StatefulWidget for HistorySidebar<'_> {
    type State = HistorySidebarState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(self.palette.dim())
            .style(self.palette.panel())
            .title(" History ")
            .title_bottom(Line::from(" ⏎ use · Del clear ").centered());
        let inner = block.inner(area);
        block.render(area, buf);
        state.rows.clear();

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        if self.entries.is_empty() {
            buf.set_string(inner.x + 1, inner.y, EMPTY_HISTORY_TEXT, self.palette.dim());
            return;
        }

        // Wrap each entry to width; remember which entry each line belongs to
        let text_width = inner.width.saturating_sub(2).max(1) as usize;
        let mut lines: Vec<(String, usize)> = Vec::new();
        for (index, entry) in self.entries.iter().enumerate() {
            for line in wrap(&entry.summary(), text_width) {
                lines.push((line.into_owned(), index));
            }
        }

        let height = inner.height as usize;
        let cursor = state.cursor.min(self.entries.len() - 1);
        let cursor_first = lines.iter().position(|(_, i)| *i == cursor).unwrap_or(0);
        let cursor_last = lines.iter().rposition(|(_, i)| *i == cursor).unwrap_or(0);
        let offset = if cursor_last >= height {
            (cursor_last + 1 - height).min(cursor_first)
        } else {
            0
        };

        for (row, (text, index)) in lines.iter().skip(offset).take(height).enumerate() {
            let y = inner.y + u16::try_from(row).unwrap_or(u16::MAX);
            let style = if *index == cursor {
                buf.set_style(Rect::new(inner.x, y, inner.width, 1), self.palette.highlight());
                self.palette.highlight()
            } else {
                self.palette.panel()
            };
            buf.set_string(inner.x + 1, y, text, style);
            state.rows.push((y - area.y, *index));
        }
    }
}
