#![doc = include_str!("../README.md")]

mod common;
pub mod quote;
pub mod tracking;

pub use common::*;
pub use quote::{Quote, QuoteGenerator};
