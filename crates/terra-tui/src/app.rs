//! Application core: event loop, routing, action dispatch.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use terra_core::{
    AuthClient, CoreError, CountrySource, ListController, NavInput, PendingFetch, Region,
    RegistryClient, Route, RouteDecision, SessionGuard, SessionStore, UserProfile,
};

use crate::action::{Action, Notification, NotificationLevel};
use crate::component::{Component, View};
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;

/// How long a toast stays on screen.
const TOAST_TTL: Duration = Duration::from_secs(3);

/// Step through "all regions" followed by every region, wrapping.
pub fn cycle_region(current: Option<Region>, forward: bool) -> Option<Region> {
    let options: Vec<Option<Region>> = std::iter::once(None)
        .chain(Region::all().into_iter().map(Some))
        .collect();
    let len = options.len();
    let idx = options.iter().position(|r| *r == current).unwrap_or(0);
    let next = if forward {
        (idx + 1) % len
    } else {
        (idx + len - 1) % len
    };
    options.get(next).copied().flatten()
}

/// Top-level application state and event loop.
pub struct App {
    route: Route,
    screens: HashMap<ScreenId, Box<dyn Component>>,
    running: bool,
    list: ListController<RegistryClient>,
    session: SessionStore,
    auth: AuthClient,
    user: Option<UserProfile>,
    /// Spinner frame counter, advanced on every tick.
    tick: u64,
    /// Route requested on the command line, applied once the loop starts.
    initial_route: Route,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    notification: Option<(Notification, Instant)>,
}

impl App {
    pub fn new(
        list: ListController<RegistryClient>,
        session: SessionStore,
        auth: AuthClient,
        initial_route: Route,
    ) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let user = session.user();
        Self {
            route: Route::Login,
            screens: create_screens().into_iter().collect(),
            running: true,
            list,
            session,
            auth,
            user,
            tick: 0,
            initial_route,
            action_tx,
            action_rx,
            notification: None,
        }
    }

    /// Run the main event loop until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        let mut events = EventReader::new(
            Duration::from_millis(100), // spinner + toast timer
            Duration::from_millis(33),  // ~30 FPS render
        );

        self.action_tx
            .send(Action::Navigate(self.initial_route.clone()))?;
        info!(route = %self.initial_route, "TUI event loop started");

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
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                let render = matches!(action, Action::Render | Action::Resize(..));
                self.process_action(action)?;
                if render {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }

    fn active_screen(&self) -> ScreenId {
        ScreenId::for_route(&self.route)
    }

    /// Global keys first, unless the active screen is taking text input;
    /// everything else goes to the screen.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        let id = self.active_screen();
        let captures = self
            .screens
            .get(&id)
            .is_some_and(|screen| screen.as_ref().captures_text());
        if !captures {
            match key.code {
                KeyCode::Char('q') => return Ok(Some(Action::Quit)),
                KeyCode::Char('h') if self.route.is_protected() => {
                    return Ok(Some(Action::Navigate(Route::Home)));
                }
                KeyCode::Char('v') if self.route.is_protected() => {
                    return Ok(Some(Action::Navigate(Route::Favorites)));
                }
                KeyCode::Char('L') if self.route.is_protected() => {
                    return Ok(Some(Action::Logout));
                }
                _ => {}
            }
        }

        let view = View {
            list: &self.list,
            tick: self.tick,
        };
        match self.screens.get_mut(&id) {
            Some(screen) => screen.handle_key_event(key, &view),
            None => Ok(None),
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let id = self.active_screen();
        let view = View {
            list: &self.list,
            tick: self.tick,
        };
        match self.screens.get_mut(&id) {
            Some(screen) => screen.handle_mouse_event(mouse, &view),
            None => Ok(None),
        }
    }

    fn notify(&mut self, notification: Notification) {
        self.notification = Some((notification, Instant::now()));
    }

    /// Apply one action to app state, after letting every screen see it.
    #[allow(clippy::too_many_lines)]
    fn process_action(&mut self, action: Action) -> Result<()> {
        for screen in self.screens.values_mut() {
            if let Some(follow_up) = screen.update(&action)? {
                self.action_tx.send(follow_up)?;
            }
        }

        match action {
            Action::Quit => self.running = false,
            Action::Tick => {
                self.tick = self.tick.wrapping_add(1);
                if self
                    .notification
                    .as_ref()
                    .is_some_and(|(_, shown)| shown.elapsed() >= TOAST_TTL)
                {
                    self.notification = None;
                }
            }
            Action::Resize(w, h) => debug!(w, h, "terminal resized"),
            // Screens already handled these above.
            Action::Render | Action::RouteChanged(_) | Action::DetailLoaded { .. } => {}

            Action::Navigate(route) => self.navigate(route)?,
            Action::Logout => {
                if let Err(e) = self.session.logout() {
                    warn!(error = %e, "logout failed");
                    self.notify(Notification::error(e.to_string()));
                    return Ok(());
                }
                self.user = None;
                self.navigate(Route::Login)?;
                self.notify(Notification::info("Signed out"));
            }

            Action::SubmitLogin { email, password } => {
                let session = self.session.clone();
                let auth = self.auth.clone();
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    let result = session
                        .login(&auth, &email, &password)
                        .await
                        .map_err(|e| e.to_string());
                    let _ = tx.send(Action::LoginFinished(result));
                });
            }
            Action::LoginFinished(Ok(user)) => {
                self.user = user.or_else(|| self.session.user());
                let greeting = self
                    .user
                    .as_ref()
                    .map_or_else(|| "Welcome!".to_owned(), |u| format!("Welcome, {}", u.username));
                self.navigate(Route::Home)?;
                self.notify(Notification::success(greeting));
            }
            Action::LoginFinished(Err(message)) => debug!(%message, "login rejected"),

            Action::SubmitSignup {
                username,
                email,
                password,
            } => {
                let session = self.session.clone();
                let auth = self.auth.clone();
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    let result = session
                        .register(&auth, &username, &email, &password)
                        .await
                        .map_err(|e| e.to_string());
                    let _ = tx.send(Action::SignupFinished(result));
                });
            }
            Action::SignupFinished(Ok(())) => {
                self.navigate(Route::Login)?;
                self.notify(Notification::success("Account created. Sign in to continue."));
            }
            Action::SignupFinished(Err(message)) => debug!(%message, "registration rejected"),

            Action::QueryChanged(query) => self.list.update_suggestions(&query),
            Action::SubmitSearch(query) => {
                self.list.navigate_suggestions(NavInput::Escape);
                if let Some(pending) = self.list.prepare_search(&query) {
                    self.spawn_fetch(pending);
                }
            }
            Action::SuggestionNav(input) => {
                if let Some(country) = self.list.navigate_suggestions(input) {
                    self.action_tx
                        .send(Action::Navigate(Route::Country(country.code.clone())))?;
                }
            }
            Action::CycleRegion { forward } => {
                let next = cycle_region(self.list.region(), forward);
                if let Some(pending) = self.list.prepare_filter_by_region(next) {
                    self.spawn_fetch(pending);
                }
            }
            Action::SortBy(key) => self.list.select_sort_key(key),
            Action::ResetFilters => self.list.reset_filters(),
            Action::Reload => {
                let pending = self.list.prepare_load_all();
                self.spawn_fetch(pending);
            }
            Action::ToggleFavorite(code) => match self.list.toggle_favorite(&code) {
                Ok(true) => self.notify(Notification::success(format!("★ {code} added to favorites"))),
                Ok(false) => self.notify(Notification::info(format!("☆ {code} removed from favorites"))),
                Err(e) => self.notify(Notification::error(e.to_string())),
            },
            Action::FetchDone(outcome) => {
                if self.list.apply(outcome) {
                    if let Some(message) = self.list.status().error() {
                        let message = message.to_owned();
                        self.notify(Notification::error(message));
                    }
                }
            }
        }
        Ok(())
    }

    /// Change route through the session guard and kick off whatever the
    /// new view needs loaded.
    fn navigate(&mut self, requested: Route) -> Result<()> {
        let decision = SessionGuard::check(requested, &self.session);
        if let RouteDecision::Redirect(_) = decision {
            self.notify(Notification::info("Please sign in to continue"));
        }
        let target = decision.target().clone();
        debug!(from = %self.route, to = %target, screen = %ScreenId::for_route(&target), "navigating");
        if self.route == Route::Home && target != Route::Home {
            self.list.end_view_session();
        }
        self.route = target.clone();
        self.action_tx.send(Action::RouteChanged(target.clone()))?;

        match target {
            Route::Home | Route::Favorites => {
                if self.list.canonical().is_empty() && !self.list.status().is_loading() {
                    let pending = self.list.prepare_load_all();
                    self.spawn_fetch(pending);
                }
            }
            Route::Country(code) => self.load_detail(code)?,
            Route::Login | Route::Signup => {}
        }
        Ok(())
    }

    /// Answer from the loaded collection, or look the code up remotely.
    fn load_detail(&self, code: String) -> Result<()> {
        if let Some(country) = self.list.cached_country(&code) {
            self.action_tx.send(Action::DetailLoaded {
                code,
                result: Ok(country),
            })?;
            return Ok(());
        }

        let source = self.list.source();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = match CountrySource::by_code(source.as_ref(), &code).await {
                Ok(Some(country)) => Ok(Arc::new(country)),
                Ok(None) => Err(CoreError::CountryNotFound { code: code.clone() }.to_string()),
                Err(e) => Err(e.to_string()),
            };
            let _ = tx.send(Action::DetailLoaded { code, result });
        });
        Ok(())
    }

    /// Run a sequenced list fetch off the UI loop. The controller decides
    /// on arrival whether the result is still current.
    fn spawn_fetch(&self, pending: PendingFetch) {
        let source = self.list.source();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let outcome = pending.run(source.as_ref()).await;
            let _ = tx.send(Action::FetchDone(outcome));
        });
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let id = self.active_screen();
        let view = View {
            list: &self.list,
            tick: self.tick,
        };

        if id.shows_header() {
            let [header, content, status] = Layout::vertical([
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .areas(area);

            self.render_header(frame, header, id);
            if let Some(screen) = self.screens.get(&id) {
                screen.render(frame, content, &view);
            }
            self.render_status_bar(frame, status, id);
        } else if let Some(screen) = self.screens.get(&id) {
            screen.render(frame, area, &view);
        }

        if let Some((ref notification, _)) = self.notification {
            Self::render_notification(frame, area, notification);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, active: ScreenId) {
        let tab = |id: ScreenId, key: &'static str, label: String| {
            let style = if id == active {
                theme::title_style().bg(theme::DEEP_BLUE)
            } else {
                theme::label()
            };
            vec![
                Span::styled(format!(" {key} "), theme::key_hint_key()),
                Span::styled(format!("{label} "), style),
            ]
        };

        let mut spans = vec![Span::styled(" 🌍 Country Explorer ", theme::title_style())];
        spans.extend(tab(ScreenId::Home, "h", "Countries".into()));
        spans.extend(tab(
            ScreenId::Favorites,
            "v",
            format!("Favorites ({})", self.list.favorites().len()),
        ));
        if let Route::Country(code) = &self.route {
            spans.push(Span::styled(format!("  › {code}"), theme::value()));
        }

        let user = self
            .user
            .as_ref()
            .map_or_else(|| "signed in".to_owned(), |u| u.username.clone());
        let right = Line::from(vec![
            Span::styled(format!("👤 {user} "), theme::value()),
            Span::styled("L ", theme::key_hint_key()),
            Span::styled("logout ", theme::key_hint()),
        ]);

        #[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
        let right_width = right.width() as u16;
        let [left_area, right_area] =
            Layout::horizontal([Constraint::Min(1), Constraint::Length(right_width)]).areas(area);

        let bg = Style::default().bg(theme::BG_HIGHLIGHT);
        frame.render_widget(Paragraph::new(Line::from(spans)).style(bg), left_area);
        frame.render_widget(Paragraph::new(right).style(bg), right_area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect, active: ScreenId) {
        let mut spans = vec![Span::raw(" ")];
        if self.list.status().is_loading() {
            spans.push(Span::styled("◐ loading  ", Style::default().fg(theme::SAND)));
        }
        if let Some(screen) = self.screens.get(&active) {
            for (key, what) in screen.hints() {
                spans.push(Span::styled(format!("{key} "), theme::key_hint_key()));
                spans.push(Span::styled(format!("{what}  "), theme::key_hint()));
            }
        }
        spans.push(Span::styled("│ q quit", theme::key_hint()));
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    /// Toast in the bottom-right corner, above the status bar.
    fn render_notification(frame: &mut Frame, area: Rect, notif: &Notification) {
        #[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
        let msg_len = notif.message.chars().count() as u16;
        let width = (msg_len + 6).clamp(20, 60).min(area.width);
        let height = 3u16;

        let x = area.width.saturating_sub(width + 1);
        let y = area.height.saturating_sub(height + 1);
        let toast_area = Rect::new(area.x + x, area.y + y, width, height.min(area.height));

        let (border_color, icon) = match notif.level {
            NotificationLevel::Success => (theme::LEAF_GREEN, "✓"),
            NotificationLevel::Error => (theme::ERROR_RED, "✗"),
            NotificationLevel::Info => (theme::OCEAN_BLUE, "·"),
        };

        frame.render_widget(Clear, toast_area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(theme::BG_DARK));
        let inner = block.inner(toast_area);
        frame.render_widget(block, toast_area);

        let line = Line::from(vec![
            Span::styled(format!(" {icon} "), Style::default().fg(border_color)),
            Span::styled(notif.message.as_str(), Style::default().fg(theme::TEXT)),
        ]);
        frame.render_widget(Paragraph::new(line), inner);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn region_cycle_starts_and_ends_at_all() {
        assert_eq!(cycle_region(None, true), Some(Region::Africa));
        assert_eq!(cycle_region(Some(Region::Antarctic), true), None);
        assert_eq!(cycle_region(None, false), Some(Region::Antarctic));
        assert_eq!(cycle_region(Some(Region::Africa), false), None);
    }

    #[test]
    fn full_forward_cycle_visits_every_region_once() {
        let mut seen = Vec::new();
        let mut current = None;
        loop {
            current = cycle_region(current, true);
            match current {
                Some(region) => seen.push(region),
                None => break,
            }
        }
        assert_eq!(seen, Region::all());
    }
}
