use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use crate::ansi;
use crate::net::output::OutFrame;
use crate::net::sink::ClientSink;

/// Sink for plain line based writers (stdout, pipes)
pub struct TextSink<W> {
    writer: W,
}

impl<W> TextSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

#[async_trait]
impl<W> ClientSink for TextSink<W>
where
    W: AsyncWriteExt + Unpin + Send,
{
    async fn send_frame(&mut self, frame: OutFrame, _seq: u64) -> anyhow::Result<()> {
        match frame {
            OutFrame::Line(s) => {
                self.writer.write_all(s.as_bytes()).await?;
                self.writer.write_all(b"\n").await?;
            }
            OutFrame::System(s) => {
                self.writer.write_all(ansi::FG_YELLOW.as_bytes()).await?;
                self.writer.write_all(s.as_bytes()).await?;
                self.writer.write_all(ansi::RESET.as_bytes()).await?;
                self.writer.write_all(b"\n").await?;
            }
            OutFrame::Prompt(p) => {
                // Write prompt, but DON'T newline.
                self.writer.write_all(p.as_bytes()).await?;
            }
        }

        self.writer.flush().await?;
        Ok(())
    }
}
