// Copyright (c) 2026 Inventory Dashboard Developers. All Rights Reserved.

use std::fmt;

/// A bearer access token issued by the inventory backend on login.
#[derive(Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new<S: Into<String>>(token: S) -> Self {
        AccessToken(token.into())
    }

    /// A shortened form of the token that is safe to write to logs.
    pub fn redacted(&self) -> String {
        let prefix: String = self.0.chars().take(6).collect();
        format!("{}…", prefix)
    }
}

// Tokens are credentials; keep them out of `{:?}` output.
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "AccessToken({})", self.redacted())
    }
}

impl AsRef<String> for AccessToken {
    fn as_ref(&self) -> &String {
        &self.0
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<String> for AccessToken {
    fn from(token: String) -> Self {
        AccessToken::new(token)
    }
}

impl From<AccessToken> for String {
    fn from(token: AccessToken) -> Self {
        token.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_never_contains_the_full_token() {
        let token = AccessToken::new("eyJhbGciOiJIUzI1NiJ9.secret-payload");
        let debugged = format!("{:?}", token);
        assert!(!debugged.contains("secret-payload"));
        assert!(debugged.starts_with("AccessToken(eyJhbG"));
    }
}
