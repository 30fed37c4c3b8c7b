//! Application core: event loop, screen management, action dispatch.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use academia_config::save_language_to;
use academia_core::{AnySource, DataSource, LoadOptions, LoadStatus, StoreContext};

use crate::action::Action;
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::i18n::{I18n, Language};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::screens::overview::status_key;
use crate::theme;
use crate::tui::Tui;
use crate::widgets::language_selector::LanguageSelector;

/// Load progress as shown in the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum LoadState {
    #[default]
    Idle,
    Loading,
    Finished(LoadStatus),
}

/// Top-level application state and event loop.
pub struct App {
    active_screen: ScreenId,
    screens: HashMap<ScreenId, Box<dyn Component>>,
    running: bool,
    help_visible: bool,
    i18n: I18n,
    language_selector: LanguageSelector,
    load_state: LoadState,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    reload_tx: mpsc::UnboundedSender<()>,
    reload_rx: Option<mpsc::UnboundedReceiver<()>>,
    ctx: Arc<StoreContext>,
    /// Taken when the data bridge starts.
    source: Option<AnySource>,
    source_label: String,
    options: LoadOptions,
    /// Config file the chosen language is written back to.
    config_path: Option<PathBuf>,
}

impl App {
    pub fn new(
        ctx: Arc<StoreContext>,
        source: AnySource,
        options: LoadOptions,
        language: Language,
        config_path: Option<PathBuf>,
    ) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let (reload_tx, reload_rx) = mpsc::unbounded_channel();
        let i18n = I18n::new(language);

        Self {
            active_screen: ScreenId::Loading,
            screens: create_screens(i18n).into_iter().collect(),
            running: true,
            help_visible: false,
            i18n,
            language_selector: LanguageSelector::new(),
            load_state: LoadState::default(),
            action_tx,
            action_rx,
            reload_tx,
            reload_rx: Some(reload_rx),
            ctx,
            source_label: source.describe(),
            source: Some(source),
            options,
            config_path,
        }
    }

    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        Ok(())
    }

    fn spawn_data_bridge(&mut self) {
        let (Some(source), Some(reload_rx)) = (self.source.take(), self.reload_rx.take()) else {
            return;
        };
        tokio::spawn(crate::data_bridge::spawn_data_bridge(
            Arc::clone(&self.ctx),
            source,
            self.options,
            self.action_tx.clone(),
            reload_rx,
            self.ctx.child_token(),
        ));
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.init_screens()?;
        self.spawn_data_bridge();

        let mut events = EventReader::new(
            Duration::from_millis(100), // throbber tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!(source = %self.source_label, "TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(action) = self.handle_mouse_event(mouse)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Resize | Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        self.ctx.shutdown();
        events.stop();
        tui.exit();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Global keys are handled here unless
    /// an overlay or a text-capturing control has the keyboard.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        if self.language_selector.is_open() {
            return Ok(self.language_selector.handle_key(key));
        }

        if self.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                _ => Ok(None),
            };
        }

        let capturing = self
            .screens
            .get(&self.active_screen)
            .is_some_and(|s| s.captures_input());

        if !capturing && matches!(key.modifiers, KeyModifiers::NONE | KeyModifiers::SHIFT) {
            match key.code {
                KeyCode::Char('q') => return Ok(Some(Action::Quit)),
                KeyCode::Char('?') => return Ok(Some(Action::ToggleHelp)),
                KeyCode::Char('L') => return Ok(Some(Action::OpenLanguageSelector)),
                KeyCode::Char('r') => return Ok(Some(Action::Reload)),
                KeyCode::Char(c @ '1'..='9') if self.active_screen != ScreenId::Loading => {
                    let n = c as u8 - b'0';
                    if let Some(screen) = ScreenId::from_number(n) {
                        return Ok(Some(Action::SwitchScreen(screen)));
                    }
                }
                _ => {}
            }
        }

        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_key_event(key);
        }
        Ok(None)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if self.language_selector.is_open() {
            return Ok(self.language_selector.handle_mouse(mouse));
        }
        if self.help_visible {
            return Ok(None);
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_mouse_event(mouse);
        }
        Ok(None)
    }

    fn broadcast(&mut self, action: &Action) -> Result<()> {
        for screen in self.screens.values_mut() {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    fn switch_screen(&mut self, target: ScreenId) {
        if target == self.active_screen {
            return;
        }
        debug!("switching screen: {} → {}", self.active_screen, target);
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(false);
        }
        self.active_screen = target;
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
    }

    fn set_language(&mut self, language: Language) -> Result<()> {
        if language == self.i18n.language() {
            return Ok(());
        }
        info!(%language, "switching language");
        self.i18n = I18n::new(language);
        self.action_tx.send(Action::LanguageChanged(language))?;

        if let Some(path) = &self.config_path {
            if let Err(e) = save_language_to(language.as_ref(), path) {
                warn!(error = %e, path = %path.display(), "could not save language");
            }
        }
        Ok(())
    }

    /// Update app state and propagate the action to components.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,
            Action::Render => {}
            Action::SwitchScreen(target) => self.switch_screen(*target),
            Action::ToggleHelp => self.help_visible = !self.help_visible,

            Action::Tick => {
                if let Some(screen) = self.screens.get_mut(&ScreenId::Loading) {
                    screen.update(action)?;
                }
            }

            Action::Reload => {
                if self.load_state == LoadState::Loading {
                    debug!("reload ignored, a load is already running");
                } else if self.reload_tx.send(()).is_err() {
                    warn!("data bridge is gone, cannot reload");
                }
            }

            Action::LoadStarted(_) => {
                self.load_state = LoadState::Loading;
                self.broadcast(action)?;
            }

            Action::LoadFinished(report) => {
                let status = report.status();
                info!(?status, "load finished");
                self.load_state = LoadState::Finished(status);
                self.broadcast(action)?;
                if self.active_screen == ScreenId::Loading {
                    self.switch_screen(ScreenId::Enrollments);
                }
            }

            Action::OpenLanguageSelector => {
                self.language_selector.open(self.i18n.language());
            }
            Action::SetLanguage(language) => {
                self.language_selector.close();
                self.set_language(*language)?;
            }

            Action::LanguageChanged(_)
            | Action::CoursesUpdated(_)
            | Action::FacultiesUpdated(_)
            | Action::AcademicYearsUpdated(_)
            | Action::EnrollmentsUpdated(_)
            | Action::CourseFilter(_)
            | Action::FacultyFilter(_) => self.broadcast(action)?,
        }
        Ok(())
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        if self.active_screen == ScreenId::Loading {
            if let Some(screen) = self.screens.get(&ScreenId::Loading) {
                screen.render(frame, area);
            }
        } else {
            let [content_area, tab_area, status_area] = Layout::vertical([
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .areas(area);

            if let Some(screen) = self.screens.get(&self.active_screen) {
                screen.render(frame, content_area);
            }
            self.render_tab_bar(frame, tab_area);
            self.render_status_bar(frame, status_area);
        }

        if self.help_visible {
            self.render_help_overlay(frame, area);
        }
        if self.language_selector.is_open() {
            self.language_selector
                .render(area, frame.buffer_mut(), self.i18n);
        }
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ScreenId::TABS
            .iter()
            .map(|&id| {
                let style = if id == self.active_screen {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(
                    format!(" {} {} ", id.number(), self.i18n.t(id.label_key())),
                    style,
                ))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(
                ScreenId::TABS
                    .iter()
                    .position(|&s| s == self.active_screen)
                    .unwrap_or(0),
            );
        frame.render_widget(tabs, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let indicator = match self.load_state {
            LoadState::Idle => Span::styled("○", theme::muted()),
            LoadState::Loading => Span::styled(
                format!("◐ {}", self.i18n.t("load.loading")),
                Style::default().fg(theme::AMBER),
            ),
            LoadState::Finished(status) => {
                let color = match status {
                    LoadStatus::Complete => theme::GREEN,
                    LoadStatus::Partial | LoadStatus::Cancelled => theme::AMBER,
                    LoadStatus::Failed => theme::RED,
                };
                Span::styled(
                    format!("● {}", self.i18n.t(status_key(status))),
                    Style::default().fg(color),
                )
            }
        };

        let hints = Span::styled(
            format!(
                " │ {} · ? {}  L {}  r {}  q {}",
                self.i18n.language(),
                self.i18n.t("hint.help"),
                self.i18n.t("hint.language"),
                self.i18n.t("hint.reload"),
                self.i18n.t("hint.quit"),
            ),
            theme::key_hint(),
        );

        frame.render_widget(
            Paragraph::new(Line::from(vec![Span::raw(" "), indicator, hints])),
            area,
        );
    }

    /// Render the help overlay centered on screen.
    fn render_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let help_width = 56u16.min(area.width.saturating_sub(4));
        let help_height = 18u16.min(area.height.saturating_sub(2));
        let x = area.width.saturating_sub(help_width) / 2;
        let y = area.height.saturating_sub(help_height) / 2;
        let help_area = Rect::new(area.x + x, area.y + y, help_width, help_height);

        frame.render_widget(Clear, help_area);
        let block = Block::bordered()
            .title(format!(" {} ", self.i18n.t("help.title")))
            .title_style(theme::title_style())
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused())
            .style(theme::overlay_bg());
        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let t = |key| self.i18n.t(key);
        let section = |key| {
            Line::from(Span::styled(
                format!("  {}", t(key)),
                Style::default().fg(theme::TEAL),
            ))
        };
        let entry = |keys: &str, key| {
            Line::from(vec![
                Span::styled(format!("  {keys:<10}"), theme::key_hint_key()),
                Span::styled(t(key), theme::key_hint()),
            ])
        };

        let help_text = vec![
            Line::from(""),
            section("help.navigation"),
            entry("1-2", "help.screens"),
            entry("Tab", "help.focus"),
            entry("j/k ↑/↓", "help.move"),
            entry("Enter", "help.open"),
            entry("Esc", "help.close"),
            entry("←/→ ⌫", "help.badges"),
            Line::from(""),
            section("help.global"),
            entry("L", "hint.language"),
            entry("r", "hint.reload"),
            entry("?", "hint.help"),
            entry("q", "hint.quit"),
            Line::from(""),
            Line::from(Span::styled(
                format!("  {}", t("help.close_hint")),
                theme::muted(),
            )),
        ];
        frame.render_widget(Paragraph::new(help_text), inner);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use academia_config::load_config_from;
    use academia_core::{LoadReport, StaticSource, load_all};
    use pretty_assertions::assert_eq;
    use ratatui::{Terminal, backend::TestBackend};
    use tokio_util::sync::CancellationToken;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app(config_path: Option<PathBuf>) -> App {
        App::new(
            Arc::new(StoreContext::new()),
            AnySource::Static(StaticSource::demo()),
            LoadOptions::default(),
            Language::En,
            config_path,
        )
    }

    async fn report() -> Arc<LoadReport> {
        let ctx = StoreContext::new();
        let report = load_all(
            &ctx,
            &StaticSource::demo(),
            LoadOptions::default(),
            &CancellationToken::new(),
        )
        .await;
        Arc::new(report)
    }

    fn drain(app: &mut App) {
        while let Ok(action) = app.action_rx.try_recv() {
            app.process_action(&action).unwrap();
        }
    }

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(90, 24)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(usize::from(buffer.area.width))
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[tokio::test]
    async fn starts_on_loading_and_moves_on_after_report() {
        let mut app = app(None);
        assert_eq!(app.active_screen, ScreenId::Loading);

        // number keys do nothing while loading
        let action = app.handle_key_event(key(KeyCode::Char('2'))).unwrap();
        assert!(action.is_none());

        app.process_action(&Action::LoadStarted("demo".into()))
            .unwrap();
        assert_eq!(app.load_state, LoadState::Loading);

        app.process_action(&Action::LoadFinished(report().await))
            .unwrap();
        assert_eq!(app.active_screen, ScreenId::Enrollments);
        assert_eq!(app.load_state, LoadState::Finished(LoadStatus::Complete));
        assert!(screen_text(&app).contains("loaded"));
    }

    #[tokio::test]
    async fn global_keys_yield_to_an_open_filter() {
        let mut app = app(None);
        app.process_action(&Action::LoadFinished(report().await))
            .unwrap();

        // open the course filter, then type a 'q'
        let action = app.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert!(action.is_none());
        let action = app.handle_key_event(key(KeyCode::Char('q'))).unwrap();
        assert!(action.is_none());

        app.handle_key_event(key(KeyCode::Esc)).unwrap();
        let action = app.handle_key_event(key(KeyCode::Char('q'))).unwrap();
        assert!(matches!(action, Some(Action::Quit)));
    }

    #[test]
    fn language_switch_is_broadcast_and_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut app = app(Some(path.clone()));

        let open = app.handle_key_event(key(KeyCode::Char('L'))).unwrap();
        assert!(matches!(open, Some(Action::OpenLanguageSelector)));
        app.process_action(&Action::OpenLanguageSelector).unwrap();
        assert!(app.language_selector.is_open());

        app.process_action(&Action::SetLanguage(Language::Fr))
            .unwrap();
        drain(&mut app);

        assert!(!app.language_selector.is_open());
        assert_eq!(app.i18n.language(), Language::Fr);
        assert_eq!(load_config_from(&path).unwrap().language, "fr");
    }

    #[test]
    fn language_switch_writes_only_the_language() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "load_timeout_secs = 5\n").unwrap();

        let mut app = app(Some(path.clone()));

        app.process_action(&Action::SetLanguage(Language::Es))
            .unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains(r#"language = "es""#));
        assert!(text.contains("load_timeout_secs = 5"));
        assert!(!text.contains("[source]"));
    }

    #[test]
    fn same_language_does_not_write_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut app = app(Some(path.clone()));

        app.process_action(&Action::SetLanguage(Language::En))
            .unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn reload_is_forwarded_to_the_bridge() {
        let mut app = app(None);
        let mut reload_rx = app.reload_rx.take().unwrap();
        app.process_action(&Action::Reload).unwrap();
        assert!(reload_rx.try_recv().is_ok());

        app.load_state = LoadState::Loading;
        app.process_action(&Action::Reload).unwrap();
        assert!(reload_rx.try_recv().is_err());
    }
}
