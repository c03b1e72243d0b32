//! Input actions consumed by the session

use wisp_fetch::FetchOutcome;

/// Logical input, already decoded by whatever front-end produced it
#[derive(Debug, Clone)]
pub enum Action {
    OpenTab,
    CloseTab(usize),
    SelectTab(usize),
    TextChar(char),
    Backspace,
    ToggleFocus,
    /// Navigate or search, depending on which bar has focus
    Submit,
    Scroll(isize),
    ClickFragment(usize),
    /// A fetch started by an earlier navigation has finished
    NavigationCompleted {
        tab_id: String,
        url: String,
        outcome: FetchOutcome,
    },
    Quit,
}

/// A navigation that has begun and is waiting for its content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub tab_id: String,
    pub url: String,
}

impl NavigationRequest {
    /// Wrap a fetch result into the action that completes this request
    pub fn complete(self, outcome: FetchOutcome) -> Action {
        Action::NavigationCompleted {
            tab_id: self.tab_id,
            url: self.url,
            outcome,
        }
    }
}
