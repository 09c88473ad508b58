//! SettingsPanel Widget
//!
//! Theme picker, sound switch and layout switch. Rows sit at fixed
//! positions so a click can be mapped back to the setting it shows.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Widget};

use calc_controller::{InputEvent, Layout, Theme};

use crate::theme::Palette;

/// Width of the panel including borders
pub const SETTINGS_WIDTH: u16 = 34;

/// Height of the panel including borders
pub const SETTINGS_HEIGHT: u16 = 12;

/// Layer-local row of the first theme
const FIRST_THEME_ROW: u16 = 2;

/// Layer-local row of the sound switch
const SOUND_ROW: u16 = 8;

/// Layer-local row of the scientific switch
const SCIENTIFIC_ROW: u16 = 9;

/// The settings panel
pub struct SettingsPanel {
    theme: Theme,
    sound_enabled: bool,
    layout: Layout,
    palette: Palette,
}

impl SettingsPanel {
    pub fn new(theme: Theme, sound_enabled: bool, layout: Layout, palette: Palette) -> Self {
        Self {
            theme,
            sound_enabled,
            layout,
            palette,
        }
    }

    /// The event a click on layer-local row `y` stands for
    pub fn click(sound_enabled: bool, layout: Layout, y: u16) -> Option<InputEvent> {
        match y {
            SOUND_ROW => Some(InputEvent::SoundToggled(!sound_enabled)),
            SCIENTIFIC_ROW => Some(InputEvent::ScientificToggled(!layout.is_scientific())),
            _ => {
                let index = usize::from(y.checked_sub(FIRST_THEME_ROW)?);
                Theme::all().get(index).copied().map(InputEvent::ThemeSelected)
            }
        }
    }
}

fn switch(on: bool) -> &'static str {
    if on {
        "[on] "
    } else {
        "[off]"
    }
}

impl Widget for SettingsPanel {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(self.palette.dim())
            .style(self.palette.panel())
            .title(" Settings ")
            .title_bottom(Line::from(" Esc close ").centered());
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < 4 {
            return;
        }

        let x = inner.x + 1;
        let width = inner.width.saturating_sub(2) as usize;
        buf.set_stringn(x, area.y + 1, "Theme", width, self.palette.dim());

        for (i, theme) in Theme::all().into_iter().enumerate() {
            let row = area.y + FIRST_THEME_ROW + u16::try_from(i).unwrap_or(0);
            if row >= inner.y + inner.height {
                break;
            }
            let marker = if theme == self.theme { '●' } else { '○' };
            let style = if theme == self.theme {
                self.palette.highlight()
            } else {
                self.palette.panel()
            };
            let text = format!("{} {marker} {}", i + 1, theme.display_name());
            buf.set_stringn(x, row, text, width, style);
        }

        let rows = [
            (SOUND_ROW, format!("m  Sound       {}", switch(self.sound_enabled))),
            (
                SCIENTIFIC_ROW,
                format!("F4 Scientific  {}", switch(self.layout.is_scientific())),
            ),
        ];
        for (row, text) in rows {
            let y = area.y + row;
            if y < inner.y + inner.height {
                buf.set_stringn(x, y, text, width, self.palette.panel());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_click_rows() {
        assert_eq!(
            SettingsPanel::click(true, Layout::Standard, 2),
            Some(InputEvent::ThemeSelected(Theme::Dark))
        );
        assert_eq!(
            SettingsPanel::click(true, Layout::Standard, 6),
            Some(InputEvent::ThemeSelected(Theme::SageGreen))
        );
        assert_eq!(
            SettingsPanel::click(true, Layout::Standard, 8),
            Some(InputEvent::SoundToggled(false))
        );
        assert_eq!(
            SettingsPanel::click(true, Layout::Scientific, 9),
            Some(InputEvent::ScientificToggled(false))
        );
        assert_eq!(SettingsPanel::click(true, Layout::Standard, 7), None);
        assert_eq!(SettingsPanel::click(true, Layout::Standard, 0), None);
    }

    #[test]
    fn test_render_marks_active_theme() {
        let area = Rect::new(0, 0, SETTINGS_WIDTH, SETTINGS_HEIGHT);
        let mut buf = Buffer::empty(area);
        SettingsPanel::new(
            Theme::PastelPink,
            false,
            Layout::Standard,
            Palette::for_theme(Theme::PastelPink),
        )
        .render(area, &mut buf);

        let row = |y: u16| -> String {
            (0..area.width)
                .map(|x| buf.cell((x, y)).map_or(" ", |c| c.symbol()))
                .collect()
        };
        assert!(row(4).contains("3 ● Pastel Pink"));
        assert!(row(2).contains("1 ○ Dark"));
        assert!(row(8).contains("[off]"));
    }
}
