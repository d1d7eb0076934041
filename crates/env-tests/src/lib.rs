//! Traffic Ops API Integration Test Suite
//!
//! This crate exercises a running Traffic Ops deployment through the typed
//! `to-client`. Suites create the test data they need through the API,
//! run their assertions, and tear the data down again in reverse
//! dependency order (see [`objs::with_objs`]).
//!
//! # Features
//!
//! - `smoke`: Reachability and session lifecycle (seconds)
//! - `crud`: Per-endpoint create/read/update/delete suites (minutes)
//! - `all`: Enable every test category
//!
//! # Prerequisites
//!
//! 1. A running Traffic Ops deployment, reachable at `TO_URL`
//!    (default `https://localhost:6443`)
//! 2. An admin account (`TO_USER` / `TO_PASSWORD`, default
//!    `admin` / `twelve12`)
//! 3. Fixture data at `TO_FIXTURES` (default `testdata/fixtures.json`)
//!
//! # Usage
//!
//! ```bash
//! # From repo root - runs only hermetic tests (no default features)
//! cargo test
//!
//! # Smoke tests only (seconds)
//! cargo test -p env-tests --features smoke
//!
//! # Full suite against a live deployment
//! cargo test -p env-tests --features all
//! ```

pub mod config;
pub mod env;
pub mod fixtures;
pub mod objs;
