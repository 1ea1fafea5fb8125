pub mod arithmetic;
pub mod event;
pub mod intent;
pub mod language;
pub mod lexicon;
pub mod localizer;
pub mod reactor;
pub mod scheduler;
pub mod session;
pub mod time;
