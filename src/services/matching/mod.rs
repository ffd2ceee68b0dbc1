pub mod date;
pub mod hash;
pub mod matcher;
pub mod normalize;
