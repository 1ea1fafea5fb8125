use std::io::Stdout;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::task::TaskTracker;
use tracing::{info, warn};

use super::opener::{open_url, platform_opener};
use super::speech::SpeechChannel;
use super::text::TextOutput;
use crate::config::Config;
use crate::kernel::event::Event;
use crate::kernel::scheduler::SideEffect;
use crate::services::lookup::LookupService;

/// Extra time granted on top of the request timeout when draining lookups.
const LOOKUP_GRACE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Performs the side effects the reactor schedules.
pub struct Executor {
    text: TextOutput<Stdout>,
    speech: SpeechChannel,
    opener: String,
    lookup: LookupService,
    lookup_timeout: Duration,
    lookups: TaskTracker,
    events: mpsc::Sender<Event>,
}

impl Executor {
    /// `events` is the reactor's own channel; finished lookups are posted
    /// back through it.
    pub fn new(config: &Config, events: mpsc::Sender<Event>) -> Self {
        Self {
            text: TextOutput::stdout(),
            speech: SpeechChannel::new(&config.speech),
            opener: config
                .opener
                .clone()
                .unwrap_or_else(|| platform_opener().to_string()),
            lookup: LookupService::new(&config.lookup),
            lookup_timeout: Duration::from_millis(config.lookup.timeout_ms),
            lookups: TaskTracker::new(),
            events,
        }
    }

    pub fn execute(&mut self, effects: Vec<SideEffect>) -> Flow {
        let mut flow = Flow::Continue;

        for effect in effects {
            match effect {
                SideEffect::Log(msg) => info!("[LOG] {}", msg),
                SideEffect::Display(text) => {
                    if let Err(e) = self.text.display(&text) {
                        warn!("Failed to write reply: {}", e);
                    }
                }
                SideEffect::Speak { id, text, voice } => self.speech.speak(id, &text, &voice),
                SideEffect::OpenUrl(url) => open_url(&self.opener, &url),
                SideEffect::Lookup { topic } => self.spawn_lookup(topic),
                SideEffect::StopListening => {
                    info!("Stopped listening");
                    flow = Flow::Stop;
                }
            }
        }

        flow
    }

    fn spawn_lookup(&self, topic: String) {
        let service = self.lookup.clone();
        let tx = self.events.clone();

        self.lookups.spawn(async move {
            let outcome = service.summarize(&topic).await;
            if let Err(e) = &outcome {
                warn!("Lookup failed: {}", e);
            }
            if tx.send(Event::LookupCompleted { topic, outcome }).await.is_err() {
                info!("Lookup finished after the session closed");
            }
        });
    }

    /// Lookups spawned but not yet posted back.
    pub fn pending_lookups(&self) -> usize {
        self.lookups.len()
    }

    /// Waits for in-flight lookups to post their results, bounded by the
    /// request timeout. Returns false if some were still running.
    pub async fn wait_for_lookups(&self) -> bool {
        self.lookups.close();
        let limit = self.lookup_timeout + LOOKUP_GRACE;
        let settled = tokio::time::timeout(limit, self.lookups.wait()).await.is_ok();
        self.lookups.reopen();
        settled
    }

    /// Lets the last utterance play out before exit.
    pub async fn shutdown(&mut self) {
        self.speech.finish().await;
    }
}
