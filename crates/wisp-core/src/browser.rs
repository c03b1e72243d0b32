//! Main browser event loop
//!
//! The browser owns the session and applies actions one at a time from a
//! single queue. Fetches run on spawned tasks and report back through the same
//! queue as `NavigationCompleted`, so input keeps flowing while pages load.

use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};

use wisp_fetch::{Fetcher, WebFetcher};
use wisp_session::{Action, NavigationRequest, RenderSnapshot, Session, SessionError};

use crate::config::Config;
use crate::error::CoreError;
use crate::Result;

/// Queue entry processed by the browser loop
enum Message {
    Action(Action),
    /// Answered once every earlier message has been applied
    Flush(oneshot::Sender<()>),
}

pub struct Browser {
    session: Session,
    fetcher: Arc<dyn Fetcher>,
    /// Kept so spawned fetches can report back
    tx: mpsc::UnboundedSender<Message>,
    rx: mpsc::UnboundedReceiver<Message>,
    /// Last published view of the session
    snapshot: watch::Sender<RenderSnapshot>,
}

/// Cloneable front-end side of a [`Browser`]
#[derive(Clone)]
pub struct BrowserHandle {
    tx: mpsc::UnboundedSender<Message>,
    snapshot: watch::Receiver<RenderSnapshot>,
}

impl BrowserHandle {
    pub fn send(&self, action: Action) -> Result<()> {
        self.tx
            .send(Message::Action(action))
            .map_err(|_| CoreError::Closed)
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Wait until everything sent so far has been applied and the current tab
    /// is no longer loading, then return that view.
    pub async fn settle(&self) -> Result<RenderSnapshot> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.tx
            .send(Message::Flush(ack_tx))
            .map_err(|_| CoreError::Closed)?;
        ack_rx.await.map_err(|_| CoreError::Closed)?;

        let mut snapshot = self.snapshot.clone();
        let settled = snapshot
            .wait_for(|s| !s.loading)
            .await
            .map_err(|_| CoreError::Closed)?
            .clone();

        Ok(settled)
    }
}

impl Browser {
    /// Build a browser from configuration, fetching over the network and disk
    pub async fn new(config: &Config) -> Result<Self> {
        let fetcher = Arc::new(WebFetcher::new(&config.fetch_options())?);
        let start_page = config.load_start_page().await;
        let session = Session::new(start_page, config.resolver())?;

        Ok(Self::with_fetcher(session, fetcher))
    }

    pub fn with_fetcher(session: Session, fetcher: Arc<dyn Fetcher>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let (snapshot, _) = watch::channel(session.snapshot());

        Self {
            session,
            fetcher,
            tx,
            rx,
            snapshot,
        }
    }

    pub fn handle(&self) -> BrowserHandle {
        BrowserHandle {
            tx: self.tx.clone(),
            snapshot: self.snapshot.subscribe(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Apply one action. Returns `false` once the browser should stop.
    ///
    /// Must be called from within a tokio runtime, since navigations spawn
    /// their fetch.
    pub fn apply(&mut self, action: Action) -> bool {
        if matches!(action, Action::Quit) {
            tracing::info!("Quit requested");
            return false;
        }

        match self.session.apply(action) {
            Ok(Some(request)) => self.dispatch(request),
            Ok(None) => {}
            Err(SessionError::Navigation(e)) => {
                tracing::debug!(error = %e, "Ignoring empty submission");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Action rejected");
            }
        }

        self.publish();
        true
    }

    /// Wait for the next action and apply it
    pub async fn step(&mut self) -> bool {
        match self.rx.recv().await {
            Some(Message::Action(action)) => self.apply(action),
            Some(Message::Flush(ack)) => {
                if ack.send(()).is_err() {
                    tracing::debug!("Flush requester went away");
                }
                true
            }
            None => false,
        }
    }

    /// Process actions until `Quit`
    pub async fn run(mut self) {
        tracing::info!("Browser started");
        while self.step().await {}
        tracing::info!("Browser stopped");
    }

    fn dispatch(&self, request: NavigationRequest) {
        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let outcome = fetcher.fetch(&request.url).await;
            if tx.send(Message::Action(request.complete(outcome))).is_err() {
                tracing::debug!("Browser gone before fetch finished");
            }
        });
    }

    fn publish(&self) {
        self.snapshot.send_replace(self.session.snapshot());
    }
}
