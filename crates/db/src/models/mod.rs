pub mod role;
pub mod session;
pub mod user;
pub mod wishlist;
pub mod wishlist_item;
