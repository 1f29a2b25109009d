use async_trait::async_trait;
use tracing::info;

/// Outbound mail collaborator. The API only ever sends password-reset links,
/// so the contract stays narrow; production deployments plug in a real
/// transport, development logs the link.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_password_reset(&self, to: &str, link: &str) -> anyhow::Result<()>;
}

#[derive(Clone)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_password_reset(&self, to: &str, link: &str) -> anyhow::Result<()> {
        info!(recipient = %to, %link, "password reset link issued");
        Ok(())
    }
}
