pub mod dataset;
pub mod encoding;
pub mod matching;
pub mod search;
