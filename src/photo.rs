pub mod interface;
pub mod load;
pub mod orientation;
