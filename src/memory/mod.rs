pub mod history;

pub use history::{FileHistoryStore, HistoryEntry, HistoryError, HistoryStore, InMemoryHistoryStore};
