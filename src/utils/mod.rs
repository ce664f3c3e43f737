pub mod category;
pub mod header;
pub mod text;
