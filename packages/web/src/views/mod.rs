mod home;
pub use home::Home;

mod login;
pub use login::Login;

mod payment;
pub use payment::Payment;
