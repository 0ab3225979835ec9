pub mod book;
pub mod cart_entry;
pub mod review;
