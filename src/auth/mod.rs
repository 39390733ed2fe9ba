//! Authentication glue: who is signed in, and the checks run before any auth request

pub mod credentials;
pub mod flow;
pub mod session;

pub use credentials::Credentials;
pub use flow::{AuthClient, AuthFlow};
pub use session::{IdentityProvider, Session, UserId};
