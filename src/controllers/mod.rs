pub mod audio;
pub mod document;
pub mod health;
pub mod page;
