pub mod args;
pub mod classify;
pub mod converter;
pub mod discovery;
pub mod error;
pub mod filename;
pub mod processor;
pub mod report;
pub mod transcoder;
