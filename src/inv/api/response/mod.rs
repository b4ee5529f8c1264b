/// This module contains types that serve as representations
/// of server responses from the inventory API.

pub mod login;

// Re-export
pub use self::login::Login;
