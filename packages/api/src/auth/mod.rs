//! Email + password authentication against the SkyPlan backend.

mod login;
mod token;
mod validation;

pub use login::login;
pub use token::is_token_expired;
pub use validation::is_valid_email;
