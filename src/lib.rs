pub mod back;
pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod keywords;
pub mod locate;
pub mod navigate;
pub mod observe;
pub mod page;
pub mod print_url;
pub mod redirect;
pub mod runner;
pub mod scenario;
pub mod state;

pub use error::{ReaderError, Result};
