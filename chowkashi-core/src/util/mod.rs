pub mod map_link;
pub mod sort;
pub mod text;
pub mod validate;
