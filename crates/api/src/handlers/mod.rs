pub mod characters;
pub mod records;
