pub mod decoder;
pub mod descriptor;
pub mod extract;
pub mod geometry;
pub mod record;
