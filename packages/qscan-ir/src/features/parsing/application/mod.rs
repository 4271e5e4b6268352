//! Parsing application layer

mod parse_file;

pub use parse_file::ParseSourceUseCase;
