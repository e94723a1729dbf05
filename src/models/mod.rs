pub mod category;
pub mod product;
pub mod product_categories;
pub mod role;
pub mod user;
pub mod user_roles;

pub use category::CategoryDto;
pub use product::ProductDto;
pub use role::RoleDto;
pub use user::UserDto;
