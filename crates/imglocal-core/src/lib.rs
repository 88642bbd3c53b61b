pub mod config;
pub mod logging;

pub mod backup;
pub mod document;
pub mod encoding;
pub mod fetch;
pub mod rewrite;
pub mod run;
pub mod slide;
pub mod storage;
pub mod url_model;
