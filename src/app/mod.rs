//! Application shell: routing, pages and rendering around the core engine
//!
//! [`App`] ties the injected collaborators together. It guards every route
//! against the current [`Session`], fetches through the [`DataSource`] and
//! renders the resulting view as text.

pub mod browse;
pub mod carousel;
pub mod controller;
pub mod notify;
pub mod pages;
pub mod render;
pub mod router;

use crate::app::notify::Notice;
use crate::app::pages::{LoginForm, LoginOutcome, RocketTab, RocketsPage, details, home, not_found, ships};
use crate::app::render::{Templates, TextSurface, notice_line, page_header};
use crate::app::router::{Navigation, Route, guard};
use crate::config::FleetConfig;
use crate::core::auth::{Credentials, Session};
use crate::core::error::Result;
use crate::core::query::QueryState;
use crate::core::theme::{Theme, ThemeMode, ThemeStore};
use crate::storage::{CachedDataSource, DataSource, FileSessionStore, FileThemeStore, SpaceXClient};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// One rendered view
#[derive(Debug, Clone)]
pub struct Screen {
    /// Route that was rendered (the login view after a redirect)
    pub route: Route,
    /// Guarded path the user asked for, when redirected to login
    pub redirected_from: Option<String>,
    pub body: String,
    pub notice: Option<Notice>,
}

impl Screen {
    fn new(route: Route, body: String) -> Self {
        Self {
            route,
            redirected_from: None,
            body,
            notice: None,
        }
    }

    fn with_notice(mut self, notice: Option<Notice>) -> Self {
        self.notice = notice;
        self
    }
}

/// The application with its injected collaborators
pub struct App {
    source: Arc<dyn DataSource>,
    session: Session,
    theme: Theme,
    theme_store: Option<Arc<dyn ThemeStore>>,
    templates: Templates,
}

impl App {
    pub fn new(source: Arc<dyn DataSource>, session: Session, theme: Theme) -> Result<Self> {
        Ok(Self {
            source,
            session,
            theme,
            theme_store: None,
            templates: Templates::new()?,
        })
    }

    /// Remember color scheme changes in `store`
    pub fn with_theme_store(mut self, store: Arc<dyn ThemeStore>) -> Self {
        self.theme_store = Some(store);
        self
    }

    /// Build the application from configuration: the SpaceX client behind
    /// the request cache, and the file-backed session and color scheme
    ///
    /// A configured theme wins over the remembered one.
    pub fn from_config(config: &FleetConfig) -> anyhow::Result<Self> {
        let client = SpaceXClient::from_config(&config.api)?;
        let source = CachedDataSource::new(client, Duration::from_secs(config.cache.ttl_secs));
        let session_path = config.session.resolved_path();
        let session = Session::restore(Arc::new(FileSessionStore::new(session_path.clone())))?;

        let themes: Arc<dyn ThemeStore> = Arc::new(FileThemeStore::beside(&session_path));
        let mode = config.theme.unwrap_or_else(|| restore_theme(themes.as_ref()));
        let theme = Theme::new(mode, config.color);

        Ok(Self::new(Arc::new(source), session, theme)?.with_theme_store(themes))
    }

    pub fn source(&self) -> &dyn DataSource {
        self.source.as_ref()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn templates(&self) -> &Templates {
        &self.templates
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Flip between light and dark and remember the choice
    pub fn toggle_theme(&mut self) -> Result<ThemeMode> {
        self.theme.toggle();
        self.persist_theme()?;
        Ok(self.theme.mode)
    }

    /// Switch to `mode` and remember the choice
    pub fn set_theme_mode(&mut self, mode: ThemeMode) -> Result<()> {
        self.theme.mode = mode;
        self.persist_theme()
    }

    fn persist_theme(&self) -> Result<()> {
        if let Some(store) = &self.theme_store {
            store.save(self.theme.mode)?;
        }
        info!(mode = %self.theme.mode, "color scheme changed");
        Ok(())
    }

    pub fn surface(&self) -> TextSurface {
        TextSurface::new(self.theme)
    }

    /// Sign in and return where to continue
    pub fn login(&mut self, credentials: &Credentials, from: Option<String>) -> Result<(LoginOutcome, LoginForm)> {
        let mut form = LoginForm::new(from);
        let outcome = form.submit(&mut self.session, credentials)?;
        Ok((outcome, form))
    }

    pub fn logout(&mut self) -> Result<()> {
        self.session.logout()
    }

    /// Guard a route against the current session
    pub fn navigate(&self, route: Route) -> Navigation {
        guard(route, &self.session.context())
    }

    /// Resolve a path and render it
    pub async fn open(&self, path: &str) -> Result<Screen> {
        self.open_route(Route::parse(path)).await
    }

    pub async fn open_route(&self, route: Route) -> Result<Screen> {
        debug!(path = %route, "opening route");
        match self.navigate(route) {
            Navigation::Render(route) => self.render_route(route).await,
            Navigation::Redirect { to, from } => self.redirect(to, from),
        }
    }

    /// Render the ships listing with a custom query
    pub async fn ships(&self, query: QueryState) -> Result<Screen> {
        match self.navigate(Route::Ships) {
            Navigation::Render(_) => self.render_ships(query).await,
            Navigation::Redirect { to, from } => self.redirect(to, from),
        }
    }

    /// Render the rockets listing under a tab
    pub async fn rockets(&self, tab: RocketTab) -> Result<Screen> {
        match self.navigate(Route::Rockets) {
            Navigation::Render(_) => self.render_rockets(tab).await,
            Navigation::Redirect { to, from } => self.redirect(to, from),
        }
    }

    /// Render a rocket detail with the carousel moved to `image` (0-based)
    pub async fn rocket(&self, id: &str, image: usize) -> Result<Screen> {
        match self.navigate(Route::RocketDetail(id.to_string())) {
            Navigation::Render(_) => self.render_rocket(id, image).await,
            Navigation::Redirect { to, from } => self.redirect(to, from),
        }
    }

    fn redirect(&self, to: Route, from: String) -> Result<Screen> {
        let body = LoginForm::new(Some(from.clone())).render(&self.templates)?;
        let mut screen = Screen::new(to, body);
        screen.redirected_from = Some(from);
        Ok(screen)
    }

    async fn render_ships(&self, query: QueryState) -> Result<Screen> {
        let mut controller = ships::controller();
        *controller.query_mut() = query;
        ships::load(&mut controller, self.source.as_ref()).await;
        let body = ships::render(&controller, &mut self.surface());
        Ok(Screen::new(Route::Ships, body).with_notice(controller.take_notice()))
    }

    async fn render_rockets(&self, tab: RocketTab) -> Result<Screen> {
        let mut page = RocketsPage::new(tab);
        page.load(self.source.as_ref()).await;
        let body = page.render(&self.templates, &self.theme)?;
        Ok(Screen::new(Route::Rockets, body).with_notice(page.take_notice()))
    }

    async fn render_rocket(&self, id: &str, image: usize) -> Result<Screen> {
        let detail = details::load_rocket(self.source.as_ref(), id).await;
        let mut carousel = detail.record().map(details::rocket_carousel).unwrap_or_default();
        carousel.seek(image);
        let body = details::render_rocket(&detail, &carousel, &self.templates, &self.theme)?;
        Ok(Screen::new(Route::RocketDetail(id.to_string()), body).with_notice(detail.notice))
    }

    async fn render_route(&self, route: Route) -> Result<Screen> {
        match route {
            Route::Home => Ok(Screen::new(Route::Home, home::render(&self.templates)?)),
            Route::Login => {
                let body = LoginForm::default().render(&self.templates)?;
                Ok(Screen::new(Route::Login, body))
            }
            Route::Ships => self.render_ships(ships::initial_query()).await,
            Route::ShipDetail(id) => {
                let detail = details::load_ship(self.source.as_ref(), &id).await;
                let body = details::render_ship(&detail, &self.templates, &self.theme)?;
                Ok(Screen::new(Route::ShipDetail(id), body).with_notice(detail.notice))
            }
            Route::Rockets => self.render_rockets(RocketTab::All).await,
            Route::RocketDetail(id) => self.render_rocket(&id, 0).await,
            Route::NotFound(path) => {
                let body = not_found::render(&self.templates, None)?;
                Ok(Screen::new(Route::NotFound(path), body))
            }
        }
    }

    /// Full text of a screen: header, notice and body
    pub fn compose(&self, screen: &Screen) -> String {
        let mut out = page_header(&self.theme, &self.session.context(), &screen.route);
        out.push_str("\n\n");
        if let Some(notice) = &screen.notice {
            out.push_str(&notice_line(&self.theme, notice));
            out.push_str("\n\n");
        }
        out.push_str(&screen.body);
        out
    }
}

/// Remembered color scheme, light when none was saved or it cannot be read
fn restore_theme(store: &dyn ThemeStore) -> ThemeMode {
    match store.load() {
        Ok(mode) => mode.unwrap_or_default(),
        Err(err) => {
            warn!(error = %err, "ignoring unreadable color scheme");
            ThemeMode::default()
        }
    }
}
