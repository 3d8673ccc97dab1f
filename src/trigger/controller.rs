use super::{ScanTrigger, TriggerAction, TriggerEvent};
use crate::checker::{self, dictionary::Dictionary};
use crate::dict::DictionarySource;
use crate::document::DocumentSource;
use crate::error::{Result, ScanError};
use crate::ScanResult;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, Instant};
use tracing::{debug, info, warn};

const EVENT_QUEUE: usize = 64;

/// Receives every completed scan.
pub trait Reporter {
    fn report(&mut self, result: ScanResult);

    /// Called once if the dictionary could not be loaded. Scans still run
    /// against an empty dictionary afterwards.
    fn dictionary_unavailable(&mut self, _error: &ScanError) {}
}

/// Advisory hooks around the dictionary fetch.
pub trait Progress {
    fn loading_started(&mut self) {}
    fn loading_finished(&mut self) {}
}

pub struct NoProgress;

impl Progress for NoProgress {}

pub enum Readiness {
    NotReady,
    Ready(Dictionary),
    /// Loading failed; scans fall back to an empty dictionary.
    Failed { dictionary: Dictionary, error: ScanError },
}

impl Readiness {
    /// Turn the outcome of a dictionary fetch into a scannable state.
    pub fn resolve(fetched: Result<String>) -> Self {
        match fetched {
            Ok(text) => {
                let dictionary = Dictionary::build(&text);
                if dictionary.is_empty() {
                    warn!("Dictionary source returned no words, continuing with an empty dictionary");
                    return Readiness::Failed {
                        dictionary,
                        error: ScanError::DictionaryUnavailable("word list is empty".to_string()),
                    };
                }
                info!("Dictionary ready with {} words", dictionary.len());
                Readiness::Ready(dictionary)
            }
            Err(error) => {
                warn!("Failed to load dictionary, continuing with an empty one: {}", error);
                Readiness::Failed {
                    dictionary: Dictionary::empty(),
                    error,
                }
            }
        }
    }

    pub fn dictionary(&self) -> Option<&Dictionary> {
        match self {
            Readiness::NotReady => None,
            Readiness::Ready(dictionary) => Some(dictionary),
            Readiness::Failed { dictionary, .. } => Some(dictionary),
        }
    }

    pub fn is_ready(&self) -> bool {
        !matches!(self, Readiness::NotReady)
    }
}

impl std::fmt::Debug for Readiness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Readiness::NotReady => write!(f, "NotReady"),
            Readiness::Ready(dictionary) => write!(f, "Ready({} words)", dictionary.len()),
            Readiness::Failed { error, .. } => write!(f, "Failed({})", error),
        }
    }
}

/// Sending side of a controller's event queue.
#[derive(Debug, Clone)]
pub struct ScanHandle {
    tx: mpsc::Sender<TriggerEvent>,
}

impl ScanHandle {
    pub fn channel() -> (Self, mpsc::Receiver<TriggerEvent>) {
        let (tx, rx) = mpsc::channel(EVENT_QUEUE);
        (Self { tx }, rx)
    }

    /// Report a user interaction. Returns false once the controller is gone.
    pub async fn interact(&self) -> bool {
        self.send(TriggerEvent::Interaction).await
    }

    /// Request an immediate rescan. Returns false once the controller is gone.
    pub async fn rescan(&self) -> bool {
        self.send(TriggerEvent::ManualRescan).await
    }

    async fn send(&self, event: TriggerEvent) -> bool {
        self.tx.send(event).await.is_ok()
    }
}

/// Owns all pipeline state: readiness, the debounce trigger, the document
/// and the reporter.
pub struct ScanController<D, R> {
    document: D,
    reporter: R,
    progress: Box<dyn Progress + Send>,
    trigger: ScanTrigger,
    readiness: Readiness,
    scans: usize,
}

impl<D, R> ScanController<D, R>
where
    D: DocumentSource + Send,
    R: Reporter + Send,
{
    pub fn new(document: D, reporter: R, debounce: Duration) -> Self {
        Self {
            document,
            reporter,
            progress: Box::new(NoProgress),
            trigger: ScanTrigger::new(debounce),
            readiness: Readiness::NotReady,
            scans: 0,
        }
    }

    pub fn with_progress(mut self, progress: impl Progress + Send + 'static) -> Self {
        self.progress = Box::new(progress);
        self
    }

    pub fn readiness(&self) -> &Readiness {
        &self.readiness
    }

    /// Load the dictionary, scan once, then serve events until every
    /// [`ScanHandle`] is dropped and no debounced scan is pending.
    ///
    /// Returns the number of scans performed.
    pub async fn run<S>(mut self, source: S, mut events: mpsc::Receiver<TriggerEvent>) -> usize
    where
        S: DictionarySource,
    {
        let mut open = true;

        self.progress.loading_started();
        info!("Loading dictionary from {}", source.describe());

        let fetched = {
            let fetch = source.fetch_raw_text();
            tokio::pin!(fetch);
            loop {
                tokio::select! {
                    result = &mut fetch => break result,
                    event = events.recv(), if open => match event {
                        Some(event) => debug!("Dictionary not ready, dropping {:?}", event),
                        None => open = false,
                    },
                }
            }
        };

        self.progress.loading_finished();
        self.readiness = Readiness::resolve(fetched);
        if let Readiness::Failed { error, .. } = &self.readiness {
            self.reporter.dictionary_unavailable(error);
        }

        if self.trigger.on_ready() == TriggerAction::ScanNow {
            self.scan();
        }

        loop {
            let deadline = self.trigger.deadline();
            tokio::select! {
                _ = time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if self.trigger.on_deadline(Instant::now()) == TriggerAction::ScanNow {
                        self.scan();
                    }
                }
                event = events.recv(), if open => match event {
                    Some(TriggerEvent::Interaction) => {
                        self.trigger.on_interaction(Instant::now());
                    }
                    Some(TriggerEvent::ManualRescan) => {
                        if self.trigger.on_manual_rescan() == TriggerAction::ScanNow {
                            self.scan();
                        }
                    }
                    None => {
                        debug!("Event source closed");
                        open = false;
                    }
                },
                else => break,
            }
        }

        info!("Scan controller stopped after {} scans", self.scans);
        self.scans
    }

    fn scan(&mut self) {
        let Some(dictionary) = self.readiness.dictionary() else {
            warn!("Scan requested before the dictionary was loaded");
            self.trigger.scan_finished();
            return;
        };

        match self.document.visible_text() {
            Ok(text) => {
                let result = checker::scan(&text, dictionary);
                self.scans += 1;
                info!(
                    "Scan #{}: {} words, {} unknown",
                    self.scans,
                    result.total_tokens_scanned,
                    result.mistakes.len()
                );
                self.reporter.report(result);
            }
            Err(e) => warn!("Failed to read document, skipping scan: {}", e),
        }

        self.trigger.scan_finished();
    }
}
