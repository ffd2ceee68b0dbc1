pub mod interaction;
pub mod query;
pub mod record;
