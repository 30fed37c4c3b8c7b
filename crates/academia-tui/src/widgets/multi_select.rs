//! Filterable multi-select control.
//!
//! A controlled component: the option list and the current selection are
//! borrowed from the host on every call through [`MultiSelectProps`], and
//! user intent comes back as [`SelectionEvent`]s which the host applies to
//! its own state. The control itself owns only transient UI state in
//! [`MultiSelectState`]: whether the overlay is open, the search text, the
//! keyboard cursors and the hit boxes of the last render.
//!
//! Rendering is split in two widgets so the overlay can float over content
//! drawn after the control:
//!
//! ```text
//! ╭ Courses ─────────────────╮
//! │ 2 selected             ▾ │   MultiSelect (trigger, 3 rows)
//! ╰──────────────────────────╯
//!  MTH101 ×  PHY201 ×             MultiSelect (badge row, 1 row)
//! ╭──────────────────────────╮
//! │ Search: phy▏             │   MultiSelectOverlay (only while open)
//! │ [✓] PHY201   Mechanics   │
//! ╰──────────────────────────╯
//! ```

use std::cell::RefCell;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph, Widget},
};

use academia_core::{Course, Faculty};

use crate::i18n::I18n;
use crate::theme;

/// Rows taken by the control when closed: bordered trigger plus badge row.
pub const HEIGHT: u16 = 4;

/// Tallest the overlay grows, borders included.
const MAX_OVERLAY_HEIGHT: u16 = 12;

const CODE_COLUMN: usize = 8;

// ── Props and events ────────────────────────────────────────────────

/// One choosable item. `code` is the badge token, `title` the long name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub id: String,
    pub code: String,
    pub title: String,
}

impl From<&Course> for SelectOption {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id.clone(),
            code: course.code.clone(),
            title: course.title.clone(),
        }
    }
}

impl From<&Faculty> for SelectOption {
    fn from(faculty: &Faculty) -> Self {
        Self {
            id: faculty.id.clone(),
            code: faculty.short_code().to_owned(),
            title: faculty.name.clone(),
        }
    }
}

/// Host-owned inputs, passed fresh to every render and handler call.
#[derive(Debug, Clone, Copy)]
pub struct MultiSelectProps<'a> {
    pub options: &'a [SelectOption],
    pub selected: &'a [String],
    /// Trigger text while nothing is selected. `None` uses the localized
    /// default.
    pub placeholder: Option<&'a str>,
}

/// A change the user asked for. The control never applies it itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    /// Add an option that is not currently selected.
    Select(String),
    /// Drop an option that is currently selected.
    Remove(String),
}

impl SelectionEvent {
    /// Apply to a host-owned selection. Selecting a present id or removing
    /// an absent one is a no-op.
    pub fn apply(&self, selected: &mut Vec<String>) {
        match self {
            Self::Select(id) => {
                if !is_selected(selected, id) {
                    selected.push(id.clone());
                }
            }
            Self::Remove(id) => selected.retain(|s| s != id),
        }
    }
}

// ── Pure behaviour ──────────────────────────────────────────────────

/// Options whose code or title contains `search`, ignoring case, in input
/// order. An empty search matches everything.
pub fn filter_options<'a>(options: &'a [SelectOption], search: &str) -> Vec<&'a SelectOption> {
    let needle = search.to_lowercase();
    options
        .iter()
        .filter(|o| {
            needle.is_empty()
                || o.code.to_lowercase().contains(&needle)
                || o.title.to_lowercase().contains(&needle)
        })
        .collect()
}

pub fn is_selected(selected: &[String], id: &str) -> bool {
    selected.iter().any(|s| s == id)
}

/// The event produced by activating option `id`.
pub fn toggle(selected: &[String], id: &str) -> SelectionEvent {
    if is_selected(selected, id) {
        SelectionEvent::Remove(id.to_owned())
    } else {
        SelectionEvent::Select(id.to_owned())
    }
}

/// Options to show as badges, in selection order. Ids with no matching
/// option are skipped.
pub fn badge_options<'a>(
    options: &'a [SelectOption],
    selected: &[String],
) -> Vec<&'a SelectOption> {
    selected
        .iter()
        .filter_map(|id| options.iter().find(|o| &o.id == id))
        .collect()
}

pub fn trigger_label(selected: &[String], placeholder: &str, i18n: I18n) -> String {
    if selected.is_empty() {
        placeholder.to_owned()
    } else {
        format!("{} {}", selected.len(), i18n.t("multi_select.selected"))
    }
}

// ── Local state ─────────────────────────────────────────────────────

/// What a handler did with an input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    /// Not for this control; the host may handle it.
    Ignored,
    /// Consumed; only local state changed.
    Handled,
    /// Consumed; the host should apply the event.
    Changed(SelectionEvent),
}

#[derive(Debug, Clone, Default)]
struct HitBoxes {
    trigger: Rect,
    overlay: Rect,
    /// Overlay rows with their index into the filtered list.
    rows: Vec<(Rect, usize)>,
    /// The `×` of each rendered badge, in badge order.
    badges: Vec<Rect>,
}

#[derive(Debug, Default)]
pub struct MultiSelectState {
    open: bool,
    search: String,
    highlight: usize,
    badge_focus: Option<usize>,
    hits: RefCell<HitBoxes>,
}

impl MultiSelectState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn open(&mut self) {
        self.open = true;
        self.highlight = 0;
        self.badge_focus = None;
    }

    /// Hide the overlay. The search text is kept for the next opening.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// The host moved focus elsewhere.
    pub fn blur(&mut self) {
        self.close();
        self.badge_focus = None;
    }

    pub fn handle_key(&mut self, key: KeyEvent, props: MultiSelectProps<'_>) -> InputOutcome {
        if self.open {
            self.handle_open_key(key, props)
        } else {
            self.handle_closed_key(key, props)
        }
    }

    fn handle_open_key(&mut self, key: KeyEvent, props: MultiSelectProps<'_>) -> InputOutcome {
        let visible = filter_options(props.options, &self.search);
        self.highlight = self.highlight.min(visible.len().saturating_sub(1));

        match key.code {
            KeyCode::Esc => self.close(),
            KeyCode::Up => self.highlight = self.highlight.saturating_sub(1),
            KeyCode::Down => {
                if self.highlight + 1 < visible.len() {
                    self.highlight += 1;
                }
            }
            KeyCode::Enter => {
                if let Some(option) = visible.get(self.highlight) {
                    return InputOutcome::Changed(toggle(props.selected, &option.id));
                }
            }
            KeyCode::Backspace => {
                self.search.pop();
                self.highlight = 0;
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.search.push(c);
                self.highlight = 0;
            }
            _ => return InputOutcome::Ignored,
        }
        InputOutcome::Handled
    }

    fn handle_closed_key(&mut self, key: KeyEvent, props: MultiSelectProps<'_>) -> InputOutcome {
        let badges = badge_options(props.options, props.selected);

        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down => self.open(),
            KeyCode::Left if !badges.is_empty() => {
                let last = badges.len() - 1;
                self.badge_focus = Some(
                    self.badge_focus
                        .map_or(last, |i| i.min(badges.len()).saturating_sub(1)),
                );
            }
            KeyCode::Right => match self.badge_focus {
                Some(i) if i + 1 < badges.len() => self.badge_focus = Some(i + 1),
                Some(_) => self.badge_focus = None,
                None => return InputOutcome::Ignored,
            },
            KeyCode::Backspace | KeyCode::Delete => {
                let Some(i) = self.badge_focus else {
                    return InputOutcome::Ignored;
                };
                let Some(option) = badges.get(i) else {
                    self.badge_focus = None;
                    return InputOutcome::Handled;
                };
                self.badge_focus = match badges.len() {
                    0 | 1 => None,
                    n => Some(i.min(n - 2)),
                };
                return InputOutcome::Changed(SelectionEvent::Remove(option.id.clone()));
            }
            KeyCode::Esc if self.badge_focus.is_some() => self.badge_focus = None,
            _ => return InputOutcome::Ignored,
        }
        InputOutcome::Handled
    }

    /// Left clicks only. A click outside the open overlay closes it but is
    /// reported as `Ignored` so the host can still act on it.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, props: MultiSelectProps<'_>) -> InputOutcome {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return InputOutcome::Ignored;
        }
        let pos = Position::new(mouse.column, mouse.row);
        let (on_trigger, on_overlay, row, badge) = {
            let hits = self.hits.borrow();
            (
                hits.trigger.contains(pos),
                hits.overlay.contains(pos),
                hits.rows
                    .iter()
                    .find(|(rect, _)| rect.contains(pos))
                    .map(|(_, index)| *index),
                hits.badges.iter().position(|rect| rect.contains(pos)),
            )
        };

        if self.open {
            if let Some(index) = row {
                self.highlight = index;
                return filter_options(props.options, &self.search)
                    .get(index)
                    .map_or(InputOutcome::Handled, |o| {
                        InputOutcome::Changed(toggle(props.selected, &o.id))
                    });
            }
            if on_overlay {
                return InputOutcome::Handled;
            }
            self.close();
            return if on_trigger {
                InputOutcome::Handled
            } else {
                InputOutcome::Ignored
            };
        }

        if let Some(i) = badge {
            return badge_options(props.options, props.selected)
                .get(i)
                .map_or(InputOutcome::Ignored, |o| {
                    InputOutcome::Changed(SelectionEvent::Remove(o.id.clone()))
                });
        }
        if on_trigger {
            self.open();
            return InputOutcome::Handled;
        }
        InputOutcome::Ignored
    }
}

// ── Rendering ───────────────────────────────────────────────────────

/// Trigger and badge row. Render into an area [`HEIGHT`] rows tall.
#[derive(Debug, Clone, Copy)]
pub struct MultiSelect<'a> {
    props: MultiSelectProps<'a>,
    state: &'a MultiSelectState,
    i18n: I18n,
    title: &'a str,
    focused: bool,
}

impl<'a> MultiSelect<'a> {
    pub fn new(props: MultiSelectProps<'a>, state: &'a MultiSelectState, i18n: I18n) -> Self {
        Self {
            props,
            state,
            i18n,
            title: "",
            focused: false,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// The floating option list. Render it after everything it may cover,
    /// and after this widget, which positions it.
    pub fn overlay(&self) -> MultiSelectOverlay<'a> {
        MultiSelectOverlay {
            props: self.props,
            state: self.state,
            i18n: self.i18n,
        }
    }

    fn render_trigger(&self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let border = if self.focused {
            theme::border_focused()
        } else {
            theme::border_default()
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border)
            .title(Span::styled(format!(" {} ", self.title), theme::title_style()));
        let inner = block.inner(area);
        block.render(area, buf);

        let placeholder = self
            .props
            .placeholder
            .unwrap_or_else(|| self.i18n.t("multi_select.placeholder"));
        let label = trigger_label(self.props.selected, placeholder, self.i18n);
        let style = if self.props.selected.is_empty() {
            theme::muted()
        } else {
            theme::text()
        };

        let [label_area, arrow_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(2)]).areas(inner);
        Paragraph::new(Line::styled(format!(" {label}"), style)).render(label_area, buf);
        let arrow = if self.state.open { "▴" } else { "▾" };
        Paragraph::new(Span::styled(arrow, border)).render(arrow_area, buf);
    }

    fn render_badges(&self, area: Rect, buf: &mut Buffer, hits: &mut Vec<Rect>) {
        let area = area.intersection(buf.area);
        if area.is_empty() {
            return;
        }
        let right = area.right();
        let mut x = area.x;

        for (i, option) in badge_options(self.props.options, self.props.selected)
            .into_iter()
            .enumerate()
        {
            let label = format!(" {} ", option.code);
            let label_width = span_width(&label);
            // label, "×", trailing pad
            let width = label_width.saturating_add(2);
            if x.saturating_add(width) > right {
                if x < right {
                    buf.set_string(x, area.y, "…", theme::muted());
                }
                break;
            }

            let style = if self.focused && self.state.badge_focus == Some(i) {
                theme::badge_focused()
            } else {
                theme::badge()
            };
            buf.set_string(x, area.y, &label, style);
            buf.set_string(x + label_width, area.y, "× ", style);
            hits.push(Rect::new(x + label_width, area.y, 1, 1));

            x = x.saturating_add(width + 1);
        }
    }
}

impl Widget for MultiSelect<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        let [trigger_area, badge_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Length(1)]).areas(area);

        self.render_trigger(trigger_area, buf);

        let mut badges = Vec::new();
        self.render_badges(badge_area, buf, &mut badges);

        let mut hits = self.state.hits.borrow_mut();
        hits.trigger = trigger_area;
        hits.badges = badges;
        if !self.state.open {
            hits.overlay = Rect::default();
            hits.rows.clear();
        }
    }
}

/// Search line plus filtered options, anchored under the trigger.
#[derive(Debug, Clone, Copy)]
pub struct MultiSelectOverlay<'a> {
    props: MultiSelectProps<'a>,
    state: &'a MultiSelectState,
    i18n: I18n,
}

impl Widget for MultiSelectOverlay<'_> {
    /// `bounds` is the region the overlay may cover, usually the screen.
    fn render(self, bounds: Rect, buf: &mut Buffer) {
        let mut hits = self.state.hits.borrow_mut();
        hits.rows.clear();
        if !self.state.open {
            hits.overlay = Rect::default();
            return;
        }

        let visible = filter_options(self.props.options, self.state.search());
        let trigger = hits.trigger;
        let top = trigger.bottom();
        // borders + search line + at least one row for the empty state
        let wanted = u16::try_from(visible.len().max(1))
            .unwrap_or(u16::MAX)
            .saturating_add(3);
        let height = wanted
            .min(MAX_OVERLAY_HEIGHT)
            .min(bounds.bottom().saturating_sub(top));
        let area = Rect::new(trigger.x, top, trigger.width, height).intersection(bounds);
        hits.overlay = area;
        if area.is_empty() {
            return;
        }

        Clear.render(area, buf);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused())
            .style(theme::overlay_bg());
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 {
            return;
        }

        let [search_area, list_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);
        Line::from(vec![
            Span::styled(
                format!(" {}: ", self.i18n.t("multi_select.search")),
                theme::muted(),
            ),
            Span::styled(self.state.search(), theme::text()),
            Span::styled("▏", theme::border_focused()),
        ])
        .render(search_area, buf);

        if visible.is_empty() {
            Paragraph::new(Span::styled(
                format!(" {}", self.i18n.t("multi_select.empty")),
                theme::muted(),
            ))
            .render(list_area, buf);
            return;
        }

        let capacity = usize::from(list_area.height);
        let highlight = self.state.highlight.min(visible.len() - 1);
        let offset = (highlight + 1).saturating_sub(capacity);

        for ((index, option), row) in visible
            .iter()
            .enumerate()
            .skip(offset)
            .take(capacity)
            .zip(list_area.rows())
        {
            let checked = is_selected(self.props.selected, &option.id);
            let (mark, mark_style) = if checked {
                ("[✓] ", theme::checkmark())
            } else {
                ("[ ] ", theme::muted())
            };
            if index == highlight {
                buf.set_style(row, theme::row_highlight());
            }
            Line::from(vec![
                Span::raw(" "),
                Span::styled(mark, mark_style),
                Span::styled(
                    format!("{:<width$} ", option.code, width = CODE_COLUMN),
                    theme::key_hint_key(),
                ),
                Span::styled(option.title.as_str(), Style::default().fg(theme::PAPER)),
            ])
            .render(row, buf);
            hits.rows.push((row, index));
        }
    }
}

fn span_width(text: &str) -> u16 {
    u16::try_from(Span::raw(text).width()).unwrap_or(u16::MAX)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn options() -> Vec<SelectOption> {
        vec![
            SelectOption {
                id: "1".into(),
                code: "MTH101".into(),
                title: "Calculus".into(),
            },
            SelectOption {
                id: "2".into(),
                code: "PHY201".into(),
                title: "Mechanics".into(),
            },
        ]
    }

    fn ids(items: &[&SelectOption]) -> Vec<String> {
        items.iter().map(|o| o.id.clone()).collect()
    }

    fn props<'a>(options: &'a [SelectOption], selected: &'a [String]) -> MultiSelectProps<'a> {
        MultiSelectProps {
            options,
            selected,
            placeholder: None,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// Draw control + overlay into a 40x12 buffer, the control at the top.
    fn draw(props: MultiSelectProps<'_>, state: &MultiSelectState) -> Buffer {
        let bounds = Rect::new(0, 0, 40, 12);
        let mut buf = Buffer::empty(bounds);
        let widget = MultiSelect::new(props, state, I18n::default()).title("Courses");
        let overlay = widget.overlay();
        widget.render(Rect::new(0, 0, 40, HEIGHT), &mut buf);
        overlay.render(bounds, &mut buf);
        buf
    }

    fn buffer_to_string(buf: &Buffer) -> String {
        let mut lines = Vec::new();
        for y in 0..buf.area.height {
            let mut line = String::new();
            for x in 0..buf.area.width {
                line.push_str(buf[(x, y)].symbol());
            }
            lines.push(line);
        }
        lines.join("\n")
    }

    fn row_of(buf: &Buffer, y: u16) -> String {
        buffer_to_string(buf)
            .lines()
            .nth(usize::from(y))
            .unwrap()
            .to_owned()
    }

    // ── Filtering ──

    #[test]
    fn filter_matches_code_or_title_ignoring_case() {
        let opts = options();
        assert_eq!(ids(&filter_options(&opts, "mth")), vec!["1"]);
        assert_eq!(ids(&filter_options(&opts, "MECH")), vec!["2"]);
        assert_eq!(ids(&filter_options(&opts, "")), vec!["1", "2"]);
        assert!(filter_options(&opts, "zzz").is_empty());
    }

    #[test]
    fn filter_preserves_input_order() {
        let mut opts = options();
        opts.reverse();
        assert_eq!(ids(&filter_options(&opts, "1")), vec!["2", "1"]);
    }

    // ── Toggling ──

    #[test]
    fn toggle_selects_absent_and_removes_present() {
        let selected = vec!["2".to_owned()];
        assert_eq!(toggle(&selected, "1"), SelectionEvent::Select("1".into()));
        assert_eq!(toggle(&selected, "2"), SelectionEvent::Remove("2".into()));
    }

    #[test]
    fn clicking_an_option_twice_restores_selection() {
        let opts = options();
        let original = vec!["2".to_owned()];
        let mut selected = original.clone();
        let mut state = MultiSelectState::new();
        state.open();

        for _ in 0..2 {
            draw(props(&opts, &selected), &state);
            // trigger rows 0-2, overlay border 3, search 4, first option 5
            let outcome = state.handle_mouse(click(6, 5), props(&opts, &selected));
            let InputOutcome::Changed(event) = outcome else {
                panic!("expected a selection change, got {outcome:?}");
            };
            assert!(matches!(
                &event,
                SelectionEvent::Select(id) | SelectionEvent::Remove(id) if id == "1"
            ));
            event.apply(&mut selected);
        }

        assert_eq!(selected, original);
    }

    #[test]
    fn apply_is_idempotent_for_repeated_events() {
        let mut selected = vec!["1".to_owned()];
        SelectionEvent::Select("1".into()).apply(&mut selected);
        assert_eq!(selected, vec!["1"]);
        SelectionEvent::Remove("9".into()).apply(&mut selected);
        assert_eq!(selected, vec!["1"]);
    }

    // ── Badges ──

    #[test]
    fn badges_follow_selection_and_skip_unknown_ids() {
        let opts = options();
        let selected = vec!["2".to_owned(), "ghost".to_owned(), "1".to_owned()];
        assert_eq!(ids(&badge_options(&opts, &selected)), vec!["2", "1"]);

        let state = MultiSelectState::new();
        let buf = draw(props(&opts, &selected), &state);
        let badge_row = row_of(&buf, 3);
        assert!(badge_row.starts_with(" PHY201 ×   MTH101 ×"), "{badge_row:?}");
        assert!(!badge_row.contains("ghost"));
        assert_eq!(state.hits.borrow().badges.len(), 2);
    }

    #[test]
    fn clicking_badge_cross_removes_it() {
        let opts = options();
        let selected = vec!["1".to_owned(), "2".to_owned()];
        let mut state = MultiSelectState::new();
        draw(props(&opts, &selected), &state);

        let cross = state.hits.borrow().badges[1];
        let outcome = state.handle_mouse(click(cross.x, cross.y), props(&opts, &selected));
        assert_eq!(
            outcome,
            InputOutcome::Changed(SelectionEvent::Remove("2".into()))
        );
        assert!(!state.is_open());
    }

    #[test]
    fn keyboard_removes_focused_badge() {
        let opts = options();
        let selected = vec!["1".to_owned(), "2".to_owned()];
        let mut state = MultiSelectState::new();

        assert_eq!(
            state.handle_key(key(KeyCode::Left), props(&opts, &selected)),
            InputOutcome::Handled
        );
        assert_eq!(state.badge_focus, Some(1));
        assert_eq!(
            state.handle_key(key(KeyCode::Backspace), props(&opts, &selected)),
            InputOutcome::Changed(SelectionEvent::Remove("2".into()))
        );
        assert_eq!(state.badge_focus, Some(0));
    }

    // ── Empty state and labels ──

    #[test]
    fn short_areas_clip_instead_of_panicking() {
        let opts = options();
        let selected = vec!["1".to_string()];
        let state = MultiSelectState::new();

        for height in 0..=HEIGHT {
            let area = Rect::new(0, 0, 40, height);
            let mut buf = Buffer::empty(area);
            MultiSelect::new(props(&opts, &selected), &state, I18n::default())
                .render(area, &mut buf);
            let hits = state.hits.borrow();
            assert_eq!(hits.trigger.intersection(area), hits.trigger, "height {height}");
        }
        assert_eq!(state.hits.borrow().badges.len(), 1);

        // a control hanging off the bottom of the screen
        let mut buf = Buffer::empty(Rect::new(0, 0, 40, 5));
        MultiSelect::new(props(&opts, &selected), &state, I18n::default())
            .render(Rect::new(0, 3, 40, HEIGHT), &mut buf);
        let trigger = state.hits.borrow().trigger;
        assert_eq!(trigger.intersection(buf.area), trigger);
    }

    #[test]
    fn empty_options_show_empty_state() {
        let selected: Vec<String> = Vec::new();
        let mut state = MultiSelectState::new();
        state.open();

        let buf = draw(props(&[], &selected), &state);
        assert!(buffer_to_string(&buf).contains("No options available."));
        assert!(state.hits.borrow().rows.is_empty());
    }

    #[test]
    fn non_matching_search_shows_empty_state() {
        let opts = options();
        let selected: Vec<String> = Vec::new();
        let mut state = MultiSelectState::new();
        state.open();
        for c in "zzz".chars() {
            state.handle_key(key(KeyCode::Char(c)), props(&opts, &selected));
        }

        let rendered = buffer_to_string(&draw(props(&opts, &selected), &state));
        assert!(rendered.contains("No options available."));
        assert!(!rendered.contains("MTH101"));
    }

    #[test]
    fn trigger_label_shows_placeholder_only_when_empty() {
        let i18n = I18n::default();
        assert_eq!(trigger_label(&[], "Pick", i18n), "Pick");

        let one = trigger_label(&["1".to_owned()], "Pick", i18n);
        assert_eq!(one, "1 selected");
        assert_ne!(one, "Pick");
    }

    #[test]
    fn trigger_renders_localized_default_placeholder() {
        let opts = options();
        let buf = draw(props(&opts, &[]), &MultiSelectState::new());
        assert!(row_of(&buf, 1).contains("Select options..."));
    }

    #[test]
    fn checkmarks_match_selection() {
        let opts = options();
        let selected = vec!["2".to_owned()];
        let mut state = MultiSelectState::new();
        state.open();

        let buf = draw(props(&opts, &selected), &state);
        assert!(row_of(&buf, 5).contains("[ ] MTH101"));
        assert!(row_of(&buf, 6).contains("[✓] PHY201"));
    }

    // ── Open / close ──

    #[test]
    fn typing_filters_and_enter_toggles_highlight() {
        let opts = options();
        let selected: Vec<String> = Vec::new();
        let mut state = MultiSelectState::new();

        state.handle_key(key(KeyCode::Enter), props(&opts, &selected));
        assert!(state.is_open());
        for c in "phy".chars() {
            state.handle_key(key(KeyCode::Char(c)), props(&opts, &selected));
        }
        assert_eq!(
            state.handle_key(key(KeyCode::Enter), props(&opts, &selected)),
            InputOutcome::Changed(SelectionEvent::Select("2".into()))
        );
    }

    #[test]
    fn escape_closes_and_keeps_search() {
        let opts = options();
        let mut state = MultiSelectState::new();
        state.open();
        state.handle_key(key(KeyCode::Char('m')), props(&opts, &[]));
        state.handle_key(key(KeyCode::Esc), props(&opts, &[]));

        assert!(!state.is_open());
        assert_eq!(state.search(), "m");
    }

    #[test]
    fn click_outside_closes_without_consuming() {
        let opts = options();
        let mut state = MultiSelectState::new();
        state.open();
        draw(props(&opts, &[]), &state);

        assert_eq!(
            state.handle_mouse(click(39, 11), props(&opts, &[])),
            InputOutcome::Ignored
        );
        assert!(!state.is_open());
    }

    #[test]
    fn clicking_trigger_opens() {
        let opts = options();
        let mut state = MultiSelectState::new();
        draw(props(&opts, &[]), &state);

        assert_eq!(
            state.handle_mouse(click(2, 1), props(&opts, &[])),
            InputOutcome::Handled
        );
        assert!(state.is_open());
    }
}
