pub mod executor;
pub mod opener;
pub mod speech;
pub mod text;

pub use executor::{Executor, Flow};
