#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Send one line. The implementation adds the terminator.
    async fn send(&mut self, line: &str) -> anyhow::Result<()>;
    /// Receive one line without its terminator.
    async fn recv(&mut self) -> anyhow::Result<String>;
    /// Release the connection. Further calls may fail.
    async fn close(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

pub mod tcp;
pub mod in_memory;
