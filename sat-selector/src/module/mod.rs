pub mod satdata;
pub mod selector;
