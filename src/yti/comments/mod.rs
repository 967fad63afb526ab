pub mod config;
pub mod error;
pub mod export;
pub mod ids;
pub mod io;
pub mod localization;
pub mod model;
pub mod pipeline;
pub mod results;
pub mod service;
pub mod store;
pub mod tree;
pub mod urls;
pub mod users;

pub use error::{CommentsError, Result};
