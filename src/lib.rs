#![cfg_attr(feature = "clippy", feature(plugin))]
#![cfg_attr(feature = "clippy", plugin(clippy))]

extern crate rand;
extern crate serde;
#[macro_use]
extern crate serde_derive;

pub mod arena;
pub mod entry;
pub mod skiplist;
