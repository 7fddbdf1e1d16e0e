#![forbid(unsafe_code)]

pub mod build;
pub mod categories;
pub mod cli;
pub mod config;
pub mod entry;
pub mod error;
pub mod faqs;
pub mod filter;
pub mod formats;
pub mod github;
pub mod html;
pub mod layout;
pub mod logging;
pub mod pages;
pub mod platforms;
pub mod query;
pub mod render;
pub mod session;
pub mod sort;
pub mod source;
pub mod stats;
pub mod table;
