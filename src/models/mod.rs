// src/models/mod.rs

//! Data models for the application

mod catalog;
mod channel;
mod config;

pub use catalog::{Blacklist, Catalog, Category, CorrectionMap};
pub use channel::ChannelLine;
pub use config::{
    CategoriesConfig, CategorySpec, CleaningConfig, Config, FetchConfig, LimitsConfig,
    PathsConfig, PlaylistConfig, ProbeConfig, Replacement,
};
