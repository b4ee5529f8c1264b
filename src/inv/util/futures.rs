//! Helpers for futures 0.1 combinator chains.

use futures::*;

/// Box a future so that branches producing different combinator types can
/// share one `inv::Future` return type.
pub fn into_future_trait<F, I, E>(f: F) -> Box<dyn Future<Item = I, Error = E> + Send>
where
    F: 'static + Send + Future<Item = I, Error = E>,
{
    Box::new(f)
}
