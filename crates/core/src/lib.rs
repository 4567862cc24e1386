//! Core library for bookdesk
//!
//! This crate implements the **Functional Core** of the bookdesk admin
//! tooling, following the Functional Core - Imperative Shell architectural
//! pattern.
//!
//! # Architecture Overview
//!
//! The project uses a two-crate architecture:
//!
//! - **`bookdesk_core`** (this crate): pure transformation functions with zero I/O
//! - **`bookdesk`**: loading records, argument handling and rendering (the Imperative Shell)
//!
//! Every admin list screen (admins, articles, categories, books, book images)
//! is a page of records pushed through the same steps: a case-insensitive
//! keyword search over a fixed set of fields, an optional sort on one field,
//! and a pagination bar. Those steps live here as plain functions that take
//! the data and the current state and return a fresh result, so the caller
//! can re-run them on every change.
//!
//! # Module Organization
//!
//! - [`record`]: field access by key over typed entities and raw JSON
//! - [`collate`]: locale-aware ordering of display strings
//! - [`table`]: search, sort and the [`table::TableFilter`] state holder
//! - [`pagination`]: page-button window, item ranges and page bounds
//! - [`entities`]: bookstore record types and per-screen list settings
//! - [`format`]: date, currency, number and rich-text display helpers
//!
//! # Example Usage
//!
//! ```rust
//! use bookdesk_core::table::{SortOrder, TableFilter};
//! use bookdesk_core::pagination::page_window;
//! use serde_json::json;
//!
//! let rows = vec![
//!     json!({"name": "Rust", "author": "Carol", "qty": 10}),
//!     json!({"name": "Dune", "author": "Frank", "qty": 9}),
//! ];
//!
//! let mut filter = TableFilter::new(vec!["name", "author"]);
//! filter.set_sort_key("qty");
//! filter.set_sort_order(SortOrder::Asc);
//!
//! let view = filter.apply(&rows);
//! assert_eq!(view[0]["name"], "Dune");
//!
//! assert_eq!(page_window(10, 20, 5), vec![8, 9, 10, 11, 12]);
//! ```

pub mod collate;
pub mod entities;
pub mod format;
pub mod pagination;
pub mod record;
pub mod table;
