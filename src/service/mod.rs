//! Performance-measurement services.
//!
//! Each service acquires measurement documents for the lint engine.
//! WebPageTest is the only one supported.

pub mod webpagetest;

pub use webpagetest::{fetch_results, translate, TestInfo, WebPageTestClient};
