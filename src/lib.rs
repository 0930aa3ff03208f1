#![doc(test(attr(deny(warnings))))]

//! Wish Matrix keeps a per-month wish list sorted into four priority quadrants,
//! tracks which wishes are selected for purchase and compares their total with
//! the month's budget.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Wish Matrix tracing initialized.");
    });
}
