//! Simpson's Paradox - Detection of trend reversals under segmentation
//!
//! This crate checks whether the treatment with the best success rate over a
//! whole population differs from the treatment that is best inside every
//! segment of it.
//!
//! # Architecture
//!
//! - `domain` - Pure types and services (labels, rates, aggregation, detection)
//! - `ports` - Interfaces for reading datasets and rendering verdicts
//! - `adapters` - File and in-memory readers, text and JSON renderers
//! - `application` - Command handlers wiring the domain to the ports
//! - `config` - Environment-driven configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
