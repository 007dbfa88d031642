//! The work capability a worker child process runs.

use async_trait::async_trait;

/// Capability contract between the supervisor and the embedding
/// application's worker.
///
/// `work` is invoked over and over by the child work loop. It is expected
/// to return promptly: the loop only notices a termination request between
/// invocations, so a long-blocking `work` delays graceful shutdown. This is
/// a contract the embedding application must honor.
///
/// The lifecycle hooks are explicitly optional; the default
/// implementations do nothing.
#[async_trait]
pub trait Work: Send {
    /// Perform one bounded unit of work.
    async fn work(&mut self);

    /// Called once in the freshly spawned child, before the first `work`
    /// invocation.
    async fn setup(&mut self) {}

    /// Called once after a graceful termination request has been observed,
    /// immediately before the child exits.
    async fn teardown(&mut self) {}
}
