pub mod parser;

pub use parser::parse_file_position;
