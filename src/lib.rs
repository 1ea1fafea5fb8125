pub mod config;
pub mod kernel;
pub mod memory;
pub mod outputs;
pub mod services;

// Re-export the interpreter surface for convenient access
pub use kernel::arithmetic::solve;
pub use kernel::intent::{interpret, Action, IntentKind, Response};
pub use kernel::language::Language;
pub use kernel::lexicon::resolve_words;
pub use kernel::localizer::{fallback_text, localize, MessageKey};
pub use kernel::reactor::Reactor;
pub use kernel::session::Session;
