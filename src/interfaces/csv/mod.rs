pub mod catalog_reader;
pub mod instruction_reader;
pub mod statement_writer;
