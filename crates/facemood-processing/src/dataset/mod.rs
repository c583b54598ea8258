//! Offline dataset tooling

pub mod fer2013;

pub use fer2013::{
    load_fer2013, prepare_fer2013, DatasetError, DatasetSplits, Split, SplitStrategy,
};
