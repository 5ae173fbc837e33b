//! Core lyrics resolution engine
//!
//! This module contains the actual lookup logic organized into layers:
//! - `extract`: HTML fragment to plain-text normalization
//! - `providers`: network lyrics sources (search stage + page fetch)
//! - `resolver`: ordered fallback across local and remote sources
//! - `media`: tag metadata access for local media files
//! - `sidecar`: companion lyrics file handling

pub mod extract;
pub mod media;
pub mod providers;
pub mod resolver;
pub mod sidecar;
