pub mod filters;
pub mod limit;
pub mod parse;
