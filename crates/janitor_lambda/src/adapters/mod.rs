use std::future::Future;

pub mod aws_ec2;
pub mod aws_sns;
pub mod compute;
pub mod notify;

/// Drives an SDK future to completion from the synchronous adapter traits.
/// Requires a multi-threaded tokio runtime.
pub(crate) fn block_on<F: Future>(future: F) -> F::Output {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
