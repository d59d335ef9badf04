//! # Herbier
//!
//! A local-first catalog manager for medicinal plants: raw herbs bought
//! loose, packaged supplements, essential oils, and plants grown in the
//! garden, each with its own field set and a shared care journal.
//!
//! Records enter the catalog from fiche documents — Word files typed by hand
//! with `Label: value` paragraphs — dropped into a staging directory and
//! imported in batch. Everything lands in a single SQLite file.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐   ┌──────────────┐   ┌──────────┐
//! │  Staging   │──▶│  Extraction  │──▶│  SQLite   │
//! │ .docx/.txt │   │ type+fields  │   │ catalog   │
//! └────────────┘   └──────────────┘   └────┬─────┘
//!                                          │
//!                                          ▼
//!                                    ┌──────────┐
//!                                    │   CLI    │
//!                                    │(herbier) │
//!                                    └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! herbier init                          # create database
//! herbier import                        # ingest staged fiches
//! herbier list --kind essential_oil     # browse the catalog
//! herbier show 3                        # one full record
//! herbier journal add 3 "début cure"    # log a care action
//! herbier export 3 --out ortie.txt      # write the fiche back out
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Plant records and the kind payloads |
//! | [`labels`] | French label dictionaries and the type resolver |
//! | [`docx`] | Paragraph extraction from .docx files |
//! | [`extract`] | Fiche extraction (paragraphs → record) |
//! | [`import`] | Staging directory scan and batch import |
//! | [`store`] | SQLite persistence |
//! | [`export`] | Fiche text rendering |
//! | [`journal`] | Care journal commands |
//! | [`db`] | Database connection |
//! | [`migrate`] | Schema migrations |

pub mod config;
pub mod db;
pub mod docx;
pub mod export;
pub mod extract;
pub mod import;
pub mod journal;
pub mod labels;
pub mod list;
pub mod migrate;
pub mod models;
pub mod show;
pub mod stats;
pub mod store;
pub mod update;
