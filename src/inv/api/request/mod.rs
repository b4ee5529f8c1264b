/// This module contains types that serve as representations
/// of client requests to the inventory API.

pub mod login;

// Re-export
pub use self::login::Login;
