use chrono::Utc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::event::{Control, Event, InputContent, InputEvent};
use super::localizer::{fallback_text, localize, MessageKey};
use super::scheduler::{Scheduler, SideEffect};
use super::session::Session;
use super::time::Turn;
use crate::memory::history::HistoryStore;
use crate::outputs::{Executor, Flow};
use crate::services::lookup::{LookupError, LookupSummary};

pub struct Reactor {
    pub receiver: mpsc::Receiver<Event>,
    pub session: Session,
    pub history: Box<dyn HistoryStore>,
    pub scheduler: Scheduler,
    pub turn: Turn,
    pub session_id: Uuid,
    // Outputs emitted so far in the current turn.
    ordinal: u16,
}

impl Reactor {
    pub fn new(
        receiver: mpsc::Receiver<Event>,
        session: Session,
        history: Box<dyn HistoryStore>,
    ) -> Self {
        Self {
            receiver,
            session,
            history,
            scheduler: Scheduler,
            turn: Turn::new(),
            session_id: Uuid::new_v4(),
            ordinal: 0,
        }
    }

    fn next_ordinal(&mut self) -> u16 {
        let ordinal = self.ordinal;
        self.ordinal = self.ordinal.saturating_add(1);
        ordinal
    }

    fn say(&mut self, text: &str) -> Vec<SideEffect> {
        let ordinal = self.next_ordinal();
        self.scheduler.say(text, self.session.language(), self.turn, ordinal)
    }

    /// Time-of-day greeting shown when the session opens.
    pub fn welcome(&mut self) -> Vec<SideEffect> {
        let text = self.session.welcome();
        self.say(&text)
    }

    /// One turn: consumes a batch of events and returns the side effects
    /// for the driver. Performs no I/O besides the history store.
    pub fn step(&mut self, events: Vec<Event>) -> Vec<SideEffect> {
        self.turn = self.turn.next();
        self.ordinal = 0;
        let mut effects = Vec::new();

        for event in events {
            let produced = match event {
                Event::Input(input) => self.handle_input(input),
                Event::LookupCompleted { topic, outcome } => self.handle_lookup(&topic, outcome),
                Event::InputClosed => vec![SideEffect::StopListening],
            };
            effects.extend(produced);
        }

        effects
    }

    fn handle_input(&mut self, input: InputEvent) -> Vec<SideEffect> {
        match input.content {
            InputContent::Text(text) => self.handle_utterance(&input.source, &text),
            InputContent::Control(Control::ShowHistory) => self.show_history(),
            InputContent::Control(Control::ClearHistory) => self.clear_history(),
        }
    }

    fn handle_utterance(&mut self, source: &str, text: &str) -> Vec<SideEffect> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }
        debug!("Utterance from {}: '{}'", source, text);

        if let Err(e) = self.history.record(text, Utc::now()) {
            warn!("Failed to record history: {}", e);
        }

        match self.session.interpret(text) {
            Some(response) => {
                let ordinal = self.next_ordinal();
                self.scheduler.schedule(&response, self.turn, ordinal)
            }
            None => {
                let fallback = fallback_text(self.session.language());
                self.say(&fallback)
            }
        }
    }

    fn handle_lookup(
        &mut self,
        topic: &str,
        outcome: Result<LookupSummary, LookupError>,
    ) -> Vec<SideEffect> {
        let language = self.session.language();
        match outcome {
            Ok(found) => {
                info!("Lookup for '{}' succeeded", topic);
                let read_more = localize(MessageKey::ReadMore, language, &[found.link.as_str()]);
                let shown = format!("{}\n\n{}", found.summary, read_more);
                let ordinal = self.next_ordinal();
                self.scheduler.say_split(&shown, &found.summary, language, self.turn, ordinal)
            }
            Err(LookupError::NotFound(_)) => {
                self.say(&localize(MessageKey::LookupNotFound, language, &[]))
            }
            Err(LookupError::Transport(_)) => {
                self.say(&localize(MessageKey::LookupFailed, language, &[]))
            }
        }
    }

    fn show_history(&mut self) -> Vec<SideEffect> {
        let entries = self.history.entries();
        if entries.is_empty() {
            let text = localize(MessageKey::HistoryEmpty, self.session.language(), &[]);
            return vec![SideEffect::Display(text)];
        }

        let listing = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                format!("{:>2}. {}  ({})", i + 1, entry.command, entry.local_timestamp())
            })
            .collect::<Vec<_>>()
            .join("\n");
        vec![SideEffect::Display(listing)]
    }

    fn clear_history(&mut self) -> Vec<SideEffect> {
        if let Err(e) = self.history.clear() {
            warn!("Failed to clear history: {}", e);
        }
        let text = localize(MessageKey::HistoryCleared, self.session.language(), &[]);
        vec![SideEffect::Display(text)]
    }

    /// Reports lookups that were still running when the loop stopped, so a
    /// question asked right before EOF or a farewell still gets its answer.
    /// Other queued input is discarded. Returns the effects it executed.
    pub async fn settle(&mut self, executor: &mut Executor) -> Vec<SideEffect> {
        let pending = executor.pending_lookups();
        if pending > 0 {
            debug!("Waiting for {} lookup(s) before stopping", pending);
            if !executor.wait_for_lookups().await {
                warn!("Lookups still running at shutdown, dropping them");
            }
        }

        let mut finished = Vec::new();
        while let Ok(event) = self.receiver.try_recv() {
            if matches!(event, Event::LookupCompleted { .. }) {
                finished.push(event);
            }
        }
        if finished.is_empty() {
            return Vec::new();
        }

        let effects = self.step(finished);
        executor.execute(effects.clone());
        effects
    }

    /// Async driver loop: waits for events, steps, executes. Ends on
    /// `StopListening` or when every sender is gone.
    pub async fn run(&mut self, executor: &mut Executor) {
        info!("Session {} started (language: {})", self.session_id, self.session.language());

        let greeting = self.welcome();
        let mut flow = executor.execute(greeting);

        while flow == Flow::Continue {
            let Some(event) = self.receiver.recv().await else { break };

            // Drain whatever else is already queued into the same turn.
            let mut events = vec![event];
            while let Ok(more) = self.receiver.try_recv() {
                events.push(more);
            }

            let effects = self.step(events);
            flow = executor.execute(effects);
        }

        self.settle(executor).await;
        executor.shutdown().await;
        info!("Session {} ended after {} turns", self.session_id, self.turn.index);
    }
}
