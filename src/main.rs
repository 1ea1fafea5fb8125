use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use golu::config::Config;
use golu::kernel::event::{Control, Event, InputEvent};
use golu::memory::history::{FileHistoryStore, HistoryStore, InMemoryHistoryStore};
use golu::outputs::Executor;
use golu::{Reactor, Session};

/// Console lines that are controls rather than utterances.
fn parse_control(line: &str) -> Option<Control> {
    match line {
        "/history" => Some(Control::ShowHistory),
        "/clear" => Some(Control::ClearHistory),
        _ => None,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Logging (stderr, so replies on stdout stay clean)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("golu=info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    // 2. Configuration
    let config = Config::load().context("loading configuration")?;
    tracing::debug!("Configuration: {:?}", config);

    // 3. History (falls back to memory if the file is unusable)
    let history: Box<dyn HistoryStore> =
        match FileHistoryStore::open(config.history_path.clone(), config.history_capacity) {
            Ok(store) => Box::new(store),
            Err(e) => {
                tracing::warn!(
                    "History at {} unavailable ({}), keeping it in memory",
                    config.history_path.display(),
                    e
                );
                Box::new(InMemoryHistoryStore::new(config.history_capacity))
            }
        };

    // 4. Reactor + Channel
    let (tx, rx) = mpsc::channel(100);
    let mut reactor = Reactor::new(rx, Session::new(config.language), history);
    let mut executor = Executor::new(&config, tx.clone());

    // 5. Input reader (stdin stands in for voice capture)
    tokio::spawn(async move {
        let reader = BufReader::new(tokio::io::stdin());
        let mut lines = reader.lines();

        while let Ok(Some(line)) = lines.next_line().await {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let input = match parse_control(line) {
                Some(control) => InputEvent::control("console", control),
                None => InputEvent::text("console", line),
            };
            if let Err(e) = tx.send(Event::Input(input)).await {
                tracing::error!("Failed to send input: {}", e);
                return;
            }
        }
        let _ = tx.send(Event::InputClosed).await;
    });

    // 6. Run until farewell or EOF
    reactor.run(&mut executor).await;
    Ok(())
}
