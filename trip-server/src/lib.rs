//! Trip quote engine server.
//!
//! Answers "what will this multi-stop trip cost, and when am I where?"
//! for itineraries built against a destination and hotel catalog.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod geo;
pub mod pricing;
pub mod quote;
pub mod share;
pub mod web;
