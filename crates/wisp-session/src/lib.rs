//! Wisp Session
//!
//! The session owns every tab plus the UI state around them:
//! - the current tab index and a shared scroll offset
//! - which input bar has focus, and both bars' text buffers
//! - the start page used to seed new tabs
//!
//! Invariants held across every operation:
//! - there is always at least one tab and the current index points at one
//! - the scroll offset never goes below zero and resets when a page loads
//!
//! Navigation is split in two so that fetching can happen off the mutation
//! path: `begin_*` hands back a [`NavigationRequest`], and the fetched result
//! comes back in through [`Session::complete_navigation`].

mod action;
mod error;
pub mod layout;
mod session;
mod snapshot;

pub use action::{Action, NavigationRequest};
pub use error::SessionError;
pub use session::{FocusMode, Session, StartPage};
pub use snapshot::RenderSnapshot;

pub type Result<T> = std::result::Result<T, SessionError>;
