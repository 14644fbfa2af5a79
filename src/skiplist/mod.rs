//! Probabilistic ordered index over a layered hierarchy of forward links.

mod index;

pub use self::index::{IntoIter, Iter, LevelIter, ScoreIndex, DEFAULT_MAX_HEIGHT, DEFAULT_P};
