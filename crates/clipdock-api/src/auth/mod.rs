pub mod extract;
pub mod jwt;

pub use extract::CurrentUser;
pub use jwt::TokenService;
