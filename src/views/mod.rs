pub mod editor;
pub mod repositories;
