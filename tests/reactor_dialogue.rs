use chrono::NaiveDate;
use golu::config::{Config, LookupConfig};
use golu::kernel::event::{Control, Event, InputEvent};
use golu::kernel::language::Language;
use golu::kernel::reactor::Reactor;
use golu::kernel::scheduler::SideEffect;
use golu::kernel::session::Session;
use golu::kernel::time::FixedClock;
use golu::memory::history::InMemoryHistoryStore;
use golu::outputs::{Executor, Flow};
use golu::services::lookup::{LookupError, LookupSummary};
use tokio::sync::mpsc;

fn reactor() -> Reactor {
    let (_tx, rx) = mpsc::channel(100);
    reactor_on(rx)
}

fn reactor_on(rx: mpsc::Receiver<Event>) -> Reactor {
    let now = NaiveDate::from_ymd_opt(2026, 10, 19)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap();
    let session = Session::with_clock(Language::English, Box::new(FixedClock(now)));
    Reactor::new(rx, session, Box::new(InMemoryHistoryStore::default()))
}

fn control(control: Control) -> Event {
    Event::Input(InputEvent::control("Test", control))
}

fn say(text: &str) -> Event {
    Event::Input(InputEvent::text("Test", text))
}

fn displayed(effects: &[SideEffect]) -> Vec<String> {
    effects
        .iter()
        .filter_map(|e| match e {
            SideEffect::Display(text) => Some(text.clone()),
            _ => None,
        })
        .collect()
}

fn spoken(effects: &[SideEffect]) -> Vec<String> {
    effects
        .iter()
        .filter_map(|e| match e {
            SideEffect::Speak { text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn test_open_site_displays_speaks_then_opens() {
    let mut reactor = reactor();
    let effects = reactor.step(vec![say("open youtube")]);

    assert_eq!(effects.len(), 3);
    assert_eq!(displayed(&effects), vec!["Opening YouTube..."]);
    assert_eq!(spoken(&effects), vec!["Opening YouTube..."]);
    assert_eq!(effects[2], SideEffect::OpenUrl("https://www.youtube.com".to_string()));
}

#[tokio::test]
async fn test_unmatched_input_gets_fallback() {
    let mut reactor = reactor();
    let effects = reactor.step(vec![say("qwerty")]);
    assert_eq!(displayed(&effects), vec!["Sorry, I didn't understand that. Could you try again?"]);

    reactor.step(vec![say("speak in bengali")]);
    let effects = reactor.step(vec![say("qwerty")]);
    assert_eq!(displayed(&effects), vec!["দুঃখিত, আমি বুঝতে পারিনি। আপনি আবার বলতে পারেন?"]);
}

#[tokio::test]
async fn test_blank_input_is_ignored() {
    let mut reactor = reactor();
    let effects = reactor.step(vec![say("   ")]);
    assert!(effects.is_empty());
    assert!(reactor.history.entries().is_empty());
}

#[tokio::test]
async fn test_every_input_is_recorded_newest_first() {
    let mut reactor = reactor();
    reactor.step(vec![say("hello")]);
    reactor.step(vec![say("qwerty")]);
    reactor.step(vec![say("  two plus two  ")]);

    let commands: Vec<String> = reactor.history.entries().into_iter().map(|e| e.command).collect();
    assert_eq!(commands, vec!["two plus two", "qwerty", "hello"]);
}

#[tokio::test]
async fn test_history_is_capped_at_ten() {
    let mut reactor = reactor();
    for i in 0..15 {
        reactor.step(vec![say(&format!("{} plus 1", i))]);
    }
    let entries = reactor.history.entries();
    assert_eq!(entries.len(), 10);
    assert_eq!(entries[0].command, "14 plus 1");
    assert_eq!(entries[9].command, "5 plus 1");
}

#[tokio::test]
async fn test_history_controls() {
    let mut reactor = reactor();
    let effects = reactor.step(vec![control(Control::ShowHistory)]);
    assert_eq!(displayed(&effects), vec!["No commands yet"]);

    reactor.step(vec![say("hello")]);
    let effects = reactor.step(vec![control(Control::ShowHistory)]);
    let listing = displayed(&effects).remove(0);
    assert!(listing.starts_with(" 1. hello  ("), "unexpected listing: {}", listing);

    let effects = reactor.step(vec![control(Control::ClearHistory)]);
    assert_eq!(displayed(&effects), vec!["Conversation history cleared."]);
    assert!(reactor.history.entries().is_empty());
}

#[tokio::test]
async fn test_lookup_request_and_completion() {
    let mut reactor = reactor();
    let effects = reactor.step(vec![say("who is grace hopper")]);
    assert_eq!(
        effects.last(),
        Some(&SideEffect::Lookup { topic: "grace hopper".to_string() })
    );

    let found = LookupSummary {
        summary: "Grace Hopper was a computer scientist.".to_string(),
        link: "https://en.wikipedia.org/wiki/grace%20hopper".to_string(),
    };
    let effects = reactor.step(vec![Event::LookupCompleted {
        topic: "grace hopper".to_string(),
        outcome: Ok(found),
    }]);

    assert_eq!(
        displayed(&effects),
        vec!["Grace Hopper was a computer scientist.\n\n👉 Read more: https://en.wikipedia.org/wiki/grace%20hopper"]
    );
    assert_eq!(spoken(&effects), vec!["Grace Hopper was a computer scientist."]);
}

#[tokio::test]
async fn test_lookup_failures_are_localized() {
    let mut reactor = reactor();
    let effects = reactor.step(vec![Event::LookupCompleted {
        topic: "zzz".to_string(),
        outcome: Err(LookupError::NotFound("zzz".to_string())),
    }]);
    assert_eq!(displayed(&effects), vec!["Sorry, I couldn't find information about that."]);

    reactor.session.set_language(Language::Hindi);
    let effects = reactor.step(vec![Event::LookupCompleted {
        topic: "zzz".to_string(),
        outcome: Err(LookupError::Transport("timeout".to_string())),
    }]);
    assert_eq!(displayed(&effects), vec!["जानकारी प्राप्त करते समय कोई समस्या आई।"]);
}

#[tokio::test]
async fn test_farewell_and_eof_stop_listening() {
    let mut reactor = reactor();
    let effects = reactor.step(vec![say("bye")]);
    assert_eq!(spoken(&effects), vec!["Goodbye! Have a wonderful day!"]);
    assert_eq!(effects.last(), Some(&SideEffect::StopListening));

    let effects = reactor.step(vec![Event::InputClosed]);
    assert_eq!(effects, vec![SideEffect::StopListening]);
}

#[tokio::test]
async fn test_batched_events_get_distinct_output_ids() {
    let mut reactor = reactor();
    let effects = reactor.step(vec![say("hello"), say("two plus two")]);

    let ids: Vec<_> = effects
        .iter()
        .filter_map(|e| match e {
            SideEffect::Speak { id, .. } => Some(*id),
            _ => None,
        })
        .collect();
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);
    assert_eq!(ids[0].turn, ids[1].turn);
}

#[tokio::test]
async fn test_welcome_is_spoken() {
    let mut reactor = reactor();
    let effects = reactor.welcome();
    assert_eq!(
        spoken(&effects),
        vec!["Good morning! I'm Golu, your assistant. What can I do for you today?"]
    );
}

#[tokio::test]
async fn test_lookup_in_flight_at_eof_is_still_answered() {
    let (tx, rx) = mpsc::channel(100);
    let mut reactor = reactor_on(rx);

    // Nothing listens on the discard port, so the request fails fast.
    let config = Config {
        lookup: LookupConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_ms: 2000,
            max_summary_chars: 400,
        },
        ..Config::default()
    };
    let mut executor = Executor::new(&config, tx.clone());

    let effects = reactor.step(vec![say("who is ada lovelace"), Event::InputClosed]);
    assert_eq!(
        effects[2..],
        [SideEffect::Lookup { topic: "ada lovelace".to_string() }, SideEffect::StopListening]
    );
    assert_eq!(executor.execute(effects), Flow::Stop);

    let settled = reactor.settle(&mut executor).await;
    assert_eq!(executor.pending_lookups(), 0);
    assert_eq!(displayed(&settled), vec!["Something went wrong while fetching the information."]);
    assert_eq!(spoken(&settled), vec!["Something went wrong while fetching the information."]);
}

#[tokio::test]
async fn test_settle_ignores_queued_input() {
    let (tx, rx) = mpsc::channel(100);
    let mut reactor = reactor_on(rx);
    let mut executor = Executor::new(&Config::default(), tx.clone());

    tx.send(say("open youtube")).await.unwrap();
    let settled = reactor.settle(&mut executor).await;
    assert!(settled.is_empty());
}
