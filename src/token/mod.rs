// Internal modules
mod fields;
mod identity;
#[allow(clippy::module_inception)]
mod token;

// Public API exports
pub use fields::FieldToken;
pub use identity::IdentityToken;
pub use token::TimeToken;
