mod common;
mod history;
mod log;
mod policy;
