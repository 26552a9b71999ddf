//! # Menu Catalog Ordering Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── fixtures.rs        # Seeded managers and snapshots
//!     ├── scenarios.rs       # Multi-step flows through the manager
//!     ├── store_boundary.rs  # What actually reaches the store
//!     ├── concurrency.rs     # Concurrent callers, both disciplines
//!     ├── properties.rs      # proptest: density, minimal touch, round trip
//!     └── catalog_flows.rs   # Catalog adapters and the command driver
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p mc-tests
//!
//! # By category
//! cargo test -p mc-tests integration::concurrency::
//! cargo test -p mc-tests integration::properties::
//!
//! # Benchmarks
//! cargo bench -p mc-tests
//! ```
