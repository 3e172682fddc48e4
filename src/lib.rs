// Library for tests to access modules

pub mod archive;
pub mod buffer;
pub mod cli;
pub mod config;
pub mod live;
pub mod models;
pub mod notify;
pub mod render;
pub mod rollover;
pub mod sampler;
pub mod stats;
pub mod store;
