pub mod dataset;
pub mod filter;
pub mod model;
pub mod sort;
pub mod view;
