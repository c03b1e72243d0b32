//! Line commands for the interactive shell
//!
//! Lines starting with `:` are commands; anything else is typed into the
//! focused bar and submitted.

use wisp_core::Action;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Forward an action to the browser as-is
    Action(ActionKind),
    /// Type the text into the focused bar, then submit
    Submit(String),
    /// Click at tab-strip/content coordinates
    ClickAt { x: i64, y: i64 },
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    OpenTab,
    CloseTab(usize),
    SelectTab(usize),
    ToggleFocus,
    Backspace,
    ScrollDown,
    ScrollUp,
    Scroll(isize),
    Click(usize),
}

impl ActionKind {
    pub fn into_action(self, scroll_step: isize) -> Action {
        match self {
            ActionKind::OpenTab => Action::OpenTab,
            ActionKind::CloseTab(i) => Action::CloseTab(i),
            ActionKind::SelectTab(i) => Action::SelectTab(i),
            ActionKind::ToggleFocus => Action::ToggleFocus,
            ActionKind::Backspace => Action::Backspace,
            ActionKind::ScrollDown => Action::Scroll(scroll_step),
            ActionKind::ScrollUp => Action::Scroll(scroll_step.saturating_neg()),
            ActionKind::Scroll(delta) => Action::Scroll(delta),
            ActionKind::Click(i) => Action::ClickFragment(i),
        }
    }
}

impl ShellCommand {
    /// Parse one input line. Returns `None` for blank lines and unknown commands.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let Some(without_prefix) = line.strip_prefix(':') else {
            return Some(ShellCommand::Submit(line.to_string()));
        };

        let mut parts = without_prefix.split_whitespace();
        let command = parts.next()?.to_lowercase();
        let arg = parts.next();

        let kind = match command.as_str() {
            "open" | "new" => ActionKind::OpenTab,
            "close" => ActionKind::CloseTab(arg?.parse().ok()?),
            "tab" => ActionKind::SelectTab(arg?.parse().ok()?),
            "focus" => ActionKind::ToggleFocus,
            "back" => ActionKind::Backspace,
            "down" => ActionKind::ScrollDown,
            "up" => ActionKind::ScrollUp,
            "scroll" => ActionKind::Scroll(arg?.parse().ok()?),
            "click" => ActionKind::Click(arg?.parse().ok()?),
            "at" => {
                let x = arg?.parse().ok()?;
                let y = parts.next()?.parse().ok()?;
                return Some(ShellCommand::ClickAt { x, y });
            }
            "show" | "s" => return Some(ShellCommand::Show),
            "help" | "h" => return Some(ShellCommand::Help),
            "quit" | "q" => return Some(ShellCommand::Quit),
            _ => return None,
        };

        Some(ShellCommand::Action(kind))
    }
}

pub const HELP: &str = "\
commands:
  <text>          type into the focused bar and submit
  :open           open a new tab on the start page
  :close N        close tab N
  :tab N          switch to tab N
  :focus          toggle between URL bar and search bar
  :back           delete the last character of the focused bar
  :up / :down     scroll by one step
  :scroll N       scroll by N pixels (negative scrolls up)
  :click N        follow the link on line N
  :at X Y         click at shell coordinates
  :show           redraw the page
  :quit           exit";
