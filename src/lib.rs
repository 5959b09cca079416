// CARD:Live - Antimicrobial resistance dashboard data core
// Copyright (c) 2025 CARD:Live Contributors
// Licensed under the MIT License

//! # CARD:Live - dashboard data core
//!
//! CARD:Live collects one JSON report per sequenced sample, each holding the
//! results of up to four analyses: primary resistance gene calls (`rgi_main`),
//! k-mer based pathogen prediction (`rgi_kmer`), sequence typing (`mlst`) and
//! whole-read classification (`lmat`). This crate turns a directory of those
//! reports into an immutable, queryable dataset.
//!
//! ## Overview
//!
//! - **Loading** a directory of reports into a sample table plus four
//!   category tables sharing one key space
//! - **Selecting** by time range, cutoff level, drug class or best-hit ARO,
//!   with every table narrowed through one key filter
//! - **Counting** samples per distinct column values for charts
//! - **Refreshing** only when new reports appear, with readers kept on a
//!   consistent snapshot
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Loading, selection, modifiers and refresh
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cardlive::core::dataset::Selection;
//! use cardlive::core::load::RecordLoader;
//! use cardlive::core::modifiers::{AntarcticaCorrector, DatasetModifier};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let data = RecordLoader::new("data/card_live").read_data()?;
//!     let data = AntarcticaCorrector::from_cutoff("2020-07-20")?.modify(&data)?;
//!
//!     let perfect = data.select(&Selection::parse("rgi", "cutoff", &["perfect"])?);
//!     for (group, count) in perfect.value_counts(&["geo_area_code"], None).iter() {
//!         println!("{}: {}", group.join(", "), count);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`domain::Result`], carrying a
//! [`domain::CardLiveError`]. Loading fails as a whole on the first malformed
//! file; selections with unknown names fail instead of returning empty data.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
