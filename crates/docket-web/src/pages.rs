mod home;
mod login;
mod register;

pub use home::HomePage;
pub use login::LoginPage;
pub use register::RegisterPage;
