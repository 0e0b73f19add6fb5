//! Crate-level tests
//!
//! - `mocks`: scripted fake backend and fixtures
//! - `unit`: async behaviour of the fetchers, search bar, results page,
//!   category sources and the TUI event handling
//! - `property`: proptest invariants for grouping, derivation and aggregation
