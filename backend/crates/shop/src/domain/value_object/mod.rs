pub mod cart_quantity;
pub mod catalog_text;
pub mod price;
pub mod rating;
pub mod review_comment;
pub mod stock;
