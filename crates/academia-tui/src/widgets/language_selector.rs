//! Language picker shown as a small centered dropdown.

use std::cell::Cell;

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Widget},
};
use strum::IntoEnumIterator;

use crate::action::Action;
use crate::i18n::{I18n, Language};
use crate::theme;

const WIDTH: u16 = 28;

#[derive(Debug, Default)]
pub struct LanguageSelector {
    open: bool,
    highlight: usize,
    /// Inner list area of the last render, for mouse hits.
    list_area: Cell<Rect>,
}

impl LanguageSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Open with the cursor on the active language.
    pub fn open(&mut self, current: Language) {
        self.open = true;
        self.highlight = Language::iter().position(|l| l == current).unwrap_or(0);
    }

    pub fn close(&mut self) {
        self.open = false;
        self.list_area.set(Rect::default());
    }

    fn choose(&mut self, index: usize) -> Option<Action> {
        let language = Language::iter().nth(index)?;
        self.close();
        Some(Action::SetLanguage(language))
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        let count = Language::iter().count();
        match key.code {
            KeyCode::Esc | KeyCode::Char('L' | 'l') => self.close(),
            KeyCode::Up | KeyCode::Char('k') => self.highlight = self.highlight.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                if self.highlight + 1 < count {
                    self.highlight += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => return self.choose(self.highlight),
            _ => {}
        }
        None
    }

    /// Clicking a row chooses it; clicking elsewhere closes the dropdown.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<Action> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return None;
        }
        let list = self.list_area.get();
        if list.contains(Position::new(mouse.column, mouse.row)) {
            return self.choose(usize::from(mouse.row - list.y));
        }
        self.close();
        None
    }

    /// Draw centered in `area`, marking `i18n`'s language as active.
    pub fn render(&self, area: Rect, buf: &mut Buffer, i18n: I18n) {
        if !self.open {
            return;
        }
        let rows = u16::try_from(Language::iter().count()).unwrap_or(u16::MAX);
        let popup = centered(area, WIDTH, rows.saturating_add(2));

        Clear.render(popup, buf);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused())
            .title(Span::styled(
                format!(" {} ", i18n.t("language.title")),
                theme::title_style(),
            ))
            .style(theme::overlay_bg());
        let inner = block.inner(popup);
        block.render(popup, buf);
        self.list_area.set(inner);

        for ((index, language), row) in Language::iter().enumerate().zip(inner.rows()) {
            let active = language == i18n.language();
            if index == self.highlight {
                buf.set_style(row, theme::row_highlight());
            }
            Line::from(vec![
                Span::styled(
                    if active { " ● " } else { " ○ " },
                    if active { theme::checkmark() } else { theme::muted() },
                ),
                Span::styled(language.native_name(), theme::text()),
                Span::styled(format!(" ({language})"), theme::muted()),
            ])
            .render(row, buf);
        }
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
