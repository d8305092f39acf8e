// src/services/mod.rs

//! Core services: fetching, probing, classification, and rendering

pub mod classifier;
pub mod fetcher;
pub mod normalizer;
pub mod ordering;
pub mod playlist;
pub mod prober;
pub mod protocols;

pub use classifier::ClassificationEngine;
pub use fetcher::SourceFetcher;
pub use normalizer::NameNormalizer;
pub use ordering::OrderingEngine;
pub use prober::{FailureTracker, ProbeBatchOutcome, Prober, WHITELIST_FALLBACK_MS};
pub use protocols::{ProbeDispatch, ProtocolProbe};
