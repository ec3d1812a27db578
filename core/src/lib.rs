//! Rules of the reveal game, free of any browser dependency.
//!
//! A [`GalleryConfig`] describes the images and the special rules, a [`GallerySession`] holds the progress of one
//! player and [`SessionStore`] keeps that progress in any [`KeyValueStore`].

#![no_std]

extern crate alloc;

pub use config::*;
pub use counters::*;
pub use engine::*;
pub use error::*;
pub use mask::*;
pub use selection::*;
pub use session::*;
pub use storage::*;

mod config;
mod counters;
mod engine;
mod error;
mod mask;
mod selection;
mod session;
mod storage;
