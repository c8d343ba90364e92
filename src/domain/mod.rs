pub mod document;
pub mod speech;
