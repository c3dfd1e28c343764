pub mod account;
pub mod auth;
pub mod wishlist;
pub mod wishlist_item;
