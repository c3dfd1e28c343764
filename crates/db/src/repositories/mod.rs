pub mod role_repo;
pub mod session_repo;
pub mod user_repo;
pub mod wishlist_item_repo;
pub mod wishlist_repo;

pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
pub use wishlist_item_repo::WishlistItemRepo;
pub use wishlist_repo::WishlistRepo;
