//! HTTP JSON API over a genome index.
//!
//! The index is built once at start-up and then shared read-only across
//! request handlers.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 8080
//! genome-matcher serve --genomes data.fa
//!
//! # Custom port, window length, and bind address
//! genome-matcher serve --genomes data.fa --min-search-length 12 --port 3000 --address 0.0.0.0
//! ```
//!
//! ## API Endpoints
//!
//! - `GET /api/genomes` - List indexed genomes
//! - `POST /api/search` - Find genomes containing a fragment
//!   (`{"fragment": "ACGT...", "minimum_length": 12, "exact_match_only": false}`)
//! - `POST /api/related` - Rank genomes related to a query sequence
//!   (`{"sequence": "ACGT...", "name": "q1", "fragment_match_length": 12,
//!   "exact_match_only": true, "match_percent_threshold": 20.0}`)
//!
//! Precondition violations return `400`, queries without results return `404`.

pub mod server;
