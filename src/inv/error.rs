// Copyright (c) 2026 Inventory Dashboard Developers. All Rights Reserved.

//! Inventory-specific errors and such.

#![allow(deprecated)]

use hyper::StatusCode;

error_chain! {
    foreign_links {
        HttpError(::hyper::Error);
        IoError(::std::io::Error);
        JsonError(::serde_json::Error);
        UrlParseError(::url::ParseError);
        XlsxError(::rust_xlsxwriter::XlsxError);
    }

    errors {
        ApiError(status: StatusCode, message: String) {
            description("api error")
            display("API error :: {} :: {}", status, message)
        }
        MissingAccessToken {
            description("missing access token")
            display("Login failed :: no access_token received")
        }
        NoSession {
            description("no session")
            display("No active session :: log in first")
        }
        LoginInProgress {
            description("login in progress")
            display("A login request is already in flight")
        }
        InvalidConfig(key: String, value: String) {
            description("invalid configuration")
            display("Invalid configuration value :: {} = {:?}", key, value)
        }
        InvalidPath(path: String) {
            description("invalid path")
            display("Invalid request path :: {}", path)
        }
    }
}

impl Error {
    /// Returns the HTTP status code if the error originated from an API
    /// response.
    pub fn status(&self) -> Option<StatusCode> {
        match *self.kind() {
            ErrorKind::ApiError(status, _) => Some(status),
            _ => None,
        }
    }
}
