use async_trait::async_trait;

/// The person driving the client: receives notices, answers confirmations
/// and follows navigation.
#[async_trait]
pub trait Operator: Send + Sync {
    async fn notify(&self, message: &str);
    /// Blocking yes/no question. `true` means the operator accepted.
    async fn confirm(&self, question: &str) -> bool;
    async fn navigate(&self, destination: &str);
}
