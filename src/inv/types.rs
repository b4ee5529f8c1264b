/// Library-wide type definitions.

use std::result;

use crate::inv::error;

/// A Result type parameterized by `inv::error::Error`
pub type Result<T> = result::Result<T, error::Error>;

/// A Future type parameterized by `inv::error::Error`
pub type Future<T> = Box<dyn futures::Future<Item = T, Error = error::Error> + Send>;
