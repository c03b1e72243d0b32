//! Session state machine

use serde::{Deserialize, Serialize};
use wisp_fetch::{FetchError, FetchOutcome, Fetcher};
use wisp_markup::{extract, Fragment};
use wisp_navigation::InputResolver;
use wisp_tabs::Tab;

use crate::action::{Action, NavigationRequest};
use crate::error::SessionError;
use crate::snapshot::RenderSnapshot;
use crate::Result;

const BUILTIN_START_PAGE: &str = "<html><head><title>Start Page</title></head><body>\
<h1>Wisp</h1>\
<p>Type an address into the URL bar and press Enter.</p>\
<p>Press Tab to switch to the search bar.</p>\
<ul>\
<li><a href=\"https://example.com\">example.com</a></li>\
<li><a href=\"https://www.rust-lang.org\">rust-lang.org</a></li>\
</ul>\
</body></html>";

/// Which input bar receives typed characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusMode {
    #[default]
    UrlBar,
    SearchBar,
}

impl FocusMode {
    pub fn toggled(self) -> Self {
        match self {
            FocusMode::UrlBar => FocusMode::SearchBar,
            FocusMode::SearchBar => FocusMode::UrlBar,
        }
    }
}

/// Document every new tab starts on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartPage {
    pub url: String,
    pub title: String,
    pub markup: Vec<u8>,
}

impl StartPage {
    pub fn builtin() -> Self {
        Self {
            url: "about:start".to_string(),
            title: "Start Page".to_string(),
            markup: BUILTIN_START_PAGE.as_bytes().to_vec(),
        }
    }
}

impl Default for StartPage {
    fn default() -> Self {
        Self::builtin()
    }
}

pub struct Session {
    /// Never empty
    tabs: Vec<Tab>,
    current: usize,
    scroll_offset: usize,
    focus: FocusMode,
    url_buffer: String,
    search_buffer: String,
    start_page: StartPage,
    resolver: InputResolver,
}

impl Session {
    /// Create a session holding a single tab on the start page
    pub fn new(start_page: StartPage, resolver: InputResolver) -> Result<Self> {
        let tab = seed_tab(&start_page)?;

        tracing::info!(tab_id = %tab.id, url = %tab.url, "Session created");

        Ok(Self {
            tabs: vec![tab],
            current: 0,
            scroll_offset: 0,
            focus: FocusMode::default(),
            url_buffer: String::new(),
            search_buffer: String::new(),
            start_page,
            resolver,
        })
    }

    // === Accessors ===

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn current_tab_index(&self) -> usize {
        self.current
    }

    pub fn current_tab(&self) -> &Tab {
        &self.tabs[self.current]
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn focus(&self) -> FocusMode {
        self.focus
    }

    pub fn url_buffer(&self) -> &str {
        &self.url_buffer
    }

    pub fn search_buffer(&self) -> &str {
        &self.search_buffer
    }

    // === Tab lifecycle ===

    /// Append a tab seeded from `seed` and make it current
    pub fn open_tab(&mut self, seed: &StartPage) -> Result<&Tab> {
        let tab = seed_tab(seed)?;
        tracing::info!(tab_id = %tab.id, url = %tab.url, "Opened tab");

        self.tabs.push(tab);
        self.current = self.tabs.len() - 1;

        Ok(&self.tabs[self.current])
    }

    /// Append a tab on this session's start page
    pub fn open_start_tab(&mut self) -> Result<&Tab> {
        let seed = self.start_page.clone();
        self.open_tab(&seed)
    }

    /// Remove tab `index`. Closing the only tab is a no-op.
    pub fn close_tab(&mut self, index: usize) -> Result<()> {
        self.check_tab_index(index)?;

        if self.tabs.len() == 1 {
            tracing::debug!("Ignoring close of the last remaining tab");
            return Ok(());
        }

        let tab = self.tabs.remove(index);
        if index == self.current {
            self.current = index.saturating_sub(1);
        } else if index < self.current {
            self.current -= 1;
        }

        tracing::info!(tab_id = %tab.id, current = self.current, "Closed tab");

        Ok(())
    }

    pub fn select_tab(&mut self, index: usize) -> Result<()> {
        self.check_tab_index(index)?;
        self.current = index;
        tracing::debug!(current = index, "Selected tab");
        Ok(())
    }

    // === Navigation ===

    /// Start navigating the current tab to address bar input
    pub fn begin_navigation(&mut self, raw_input: &str) -> Result<NavigationRequest> {
        let url = self.resolver.normalize(raw_input)?;
        let request = self.start_loading(url)?;
        self.url_buffer.clear();
        Ok(request)
    }

    /// Start navigating the current tab to a search for `query`
    pub fn begin_search(&mut self, query: &str) -> Result<NavigationRequest> {
        let url = self.resolver.search_url(query)?;
        let request = self.start_loading(url)?;
        self.search_buffer.clear();
        Ok(request)
    }

    /// Start navigating to the link carried by fragment `index` of the current tab
    pub fn begin_link_navigation(&mut self, index: usize) -> Result<NavigationRequest> {
        let tab = self.current_tab();
        let fragment = tab
            .fragment(index)
            .ok_or(SessionError::FragmentIndexOutOfRange {
                index,
                len: tab.fragments.len(),
            })?;
        let href = fragment
            .href()
            .ok_or(SessionError::NotALink(index))?
            .to_string();

        self.begin_navigation(&href)
    }

    /// Submit whichever bar has focus
    pub fn begin_submit(&mut self) -> Result<NavigationRequest> {
        match self.focus {
            FocusMode::UrlBar => {
                let input = self.url_buffer.clone();
                self.begin_navigation(&input)
            }
            FocusMode::SearchBar => {
                let query = self.search_buffer.clone();
                self.begin_search(&query)
            }
        }
    }

    /// Install the result of a fetch into the tab that requested it
    pub fn complete_navigation(
        &mut self,
        tab_id: &str,
        url: String,
        outcome: FetchOutcome,
    ) -> Result<()> {
        let index = self
            .tabs
            .iter()
            .position(|tab| tab.id == tab_id)
            .ok_or_else(|| SessionError::TabNotFound(tab_id.to_string()))?;

        let elapsed_ms = self.tabs[index]
            .loading_elapsed()
            .map_or(0, |d| d.num_milliseconds());

        let fragments = match outcome {
            Ok(body) => {
                tracing::info!(
                    tab_id = %tab_id,
                    url = %url,
                    bytes = body.len(),
                    elapsed_ms,
                    "Page loaded"
                );
                extract(&body)
            }
            Err(error) => {
                tracing::warn!(
                    tab_id = %tab_id,
                    url = %url,
                    error = %error,
                    elapsed_ms,
                    "Page failed to load"
                );
                failure_fragments(&url, &error)
            }
        };

        let title = url.clone();
        self.tabs[index].replace_content(url, title, fragments)?;

        if index == self.current {
            self.scroll_offset = 0;
        }

        Ok(())
    }

    /// Navigate the current tab and wait for the page
    pub async fn navigate(&mut self, raw_input: &str, fetcher: &dyn Fetcher) -> Result<()> {
        let request = self.begin_navigation(raw_input)?;
        self.fetch_and_complete(request, fetcher).await
    }

    /// Search from the current tab and wait for the results page
    pub async fn submit_search(&mut self, query: &str, fetcher: &dyn Fetcher) -> Result<()> {
        let request = self.begin_search(query)?;
        self.fetch_and_complete(request, fetcher).await
    }

    /// Follow the link on fragment `index` and wait for the page
    pub async fn click_link_at(&mut self, index: usize, fetcher: &dyn Fetcher) -> Result<()> {
        let request = self.begin_link_navigation(index)?;
        self.fetch_and_complete(request, fetcher).await
    }

    // === Input bars ===

    pub fn toggle_focus(&mut self) {
        self.focus = self.focus.toggled();
        tracing::debug!(focus = ?self.focus, "Focus toggled");
    }

    pub fn append_char(&mut self, c: char) {
        self.active_buffer_mut().push(c);
    }

    pub fn backspace(&mut self) {
        self.active_buffer_mut().pop();
    }

    /// Move the viewport; the offset saturates at zero
    pub fn scroll(&mut self, delta: isize) {
        self.scroll_offset = if delta >= 0 {
            self.scroll_offset.saturating_add(delta.unsigned_abs())
        } else {
            self.scroll_offset.saturating_sub(delta.unsigned_abs())
        };
    }

    // === Dispatch ===

    /// Apply one input action. Actions that start a navigation return the
    /// request the caller must fetch.
    pub fn apply(&mut self, action: Action) -> Result<Option<NavigationRequest>> {
        match action {
            Action::OpenTab => {
                self.open_start_tab()?;
            }
            Action::CloseTab(index) => self.close_tab(index)?,
            Action::SelectTab(index) => self.select_tab(index)?,
            Action::TextChar(c) => self.append_char(c),
            Action::Backspace => self.backspace(),
            Action::ToggleFocus => self.toggle_focus(),
            Action::Submit => return self.begin_submit().map(Some),
            Action::Scroll(delta) => self.scroll(delta),
            Action::ClickFragment(index) => return self.begin_link_navigation(index).map(Some),
            Action::NavigationCompleted {
                tab_id,
                url,
                outcome,
            } => self.complete_navigation(&tab_id, url, outcome)?,
            Action::Quit => {}
        }

        Ok(None)
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        let tab = self.current_tab();

        RenderSnapshot {
            tab_titles: self
                .tabs
                .iter()
                .map(|t| t.display_title().to_string())
                .collect(),
            current_tab_index: self.current,
            current_url: tab.url.clone(),
            current_fragments: tab.fragments.clone(),
            scroll_offset: self.scroll_offset,
            focus: self.focus,
            url_buffer: self.url_buffer.clone(),
            search_buffer: self.search_buffer.clone(),
            loading: tab.loading,
        }
    }

    // === Helpers ===

    fn check_tab_index(&self, index: usize) -> Result<()> {
        if index >= self.tabs.len() {
            return Err(SessionError::TabIndexOutOfRange {
                index,
                len: self.tabs.len(),
            });
        }
        Ok(())
    }

    fn active_buffer_mut(&mut self) -> &mut String {
        match self.focus {
            FocusMode::UrlBar => &mut self.url_buffer,
            FocusMode::SearchBar => &mut self.search_buffer,
        }
    }

    /// No cancellation: a tab with a fetch outstanding rejects new navigations.
    fn start_loading(&mut self, url: String) -> Result<NavigationRequest> {
        let tab = &mut self.tabs[self.current];
        if tab.loading {
            return Err(SessionError::NavigationPending(tab.id.clone()));
        }

        tab.start_loading();
        tracing::info!(tab_id = %tab.id, url = %url, "Navigation started");

        Ok(NavigationRequest {
            tab_id: tab.id.clone(),
            url,
        })
    }

    async fn fetch_and_complete(
        &mut self,
        request: NavigationRequest,
        fetcher: &dyn Fetcher,
    ) -> Result<()> {
        let outcome = fetcher.fetch(&request.url).await;
        self.complete_navigation(&request.tab_id, request.url, outcome)
    }
}

fn seed_tab(seed: &StartPage) -> Result<Tab> {
    Ok(Tab::new(
        seed.url.clone(),
        seed.title.clone(),
        extract(&seed.markup),
    )?)
}

/// Diagnostic page shown in place of content that could not be fetched
fn failure_fragments(url: &str, error: &FetchError) -> Vec<Fragment> {
    vec![
        Fragment::text(format!("Error fetching page: {error}")),
        Fragment::text(url),
    ]
}
