pub mod parser;
pub mod record;
