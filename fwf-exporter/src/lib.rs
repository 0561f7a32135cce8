pub mod colormap;
pub mod writer;
