use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use tokio::io::AsyncWrite;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use crate::net::sink::ClientSink;
use crate::net::sink::text::TextSink;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutFrame {
    /// Regular "in-game" text line
    Line(String),
    /// System prompt from the game engine, not world related
    System(String),
    /// Display prompt line
    Prompt(String),
}

impl OutFrame {
    pub fn text(&self) -> &str {
        match self {
            OutFrame::Line(s) | OutFrame::System(s) | OutFrame::Prompt(s) => s,
        }
    }
}

/// Handle to push output to a player. Sending never blocks and never fails loudly: when
/// the receiving side is gone the frame is dropped.
#[derive(Debug, Clone)]
pub struct OutputHandle {
    /// Sender for output events
    tx: mpsc::UnboundedSender<OutEvent>,
    /// Next sequence number for output frames
    next_seq: Arc<AtomicU64>,
}

impl OutputHandle {
    pub fn new(tx: mpsc::UnboundedSender<OutEvent>) -> Self {
        Self {
            tx,
            next_seq: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Creates a handle together with the receiving end (used by sessions and tests)
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<OutEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    #[inline]
    pub fn next_seq(&self) -> u64 {
        self.next_seq.fetch_add(1, std::sync::atomic::Ordering::Relaxed)
    }

    pub fn line(&self, s: impl Into<String>) {
        self.send(OutFrame::Line(s.into()));
    }

    pub fn system(&self, s: impl Into<String>) {
        self.send(OutFrame::System(s.into()));
    }

    pub fn prompt(&self, s: impl Into<String>) {
        self.send(OutFrame::Prompt(s.into()));
    }

    fn send(&self, frame: OutFrame) {
        if self.tx.send(OutEvent::Frame(frame, self.next_seq())).is_err() {
            tracing::trace!("output receiver gone, frame dropped");
        }
    }
}

#[derive(Debug)]
pub enum OutEvent {
    /// A complete output frame with sequence number
    Frame(OutFrame, u64),
}

pub struct SessionOut {
    rx: mpsc::UnboundedReceiver<OutEvent>,
}

impl SessionOut {
    pub fn new(rx: mpsc::UnboundedReceiver<OutEvent>) -> Self {
        Self { rx }
    }

    pub async fn run<C>(mut self, mut client: C) -> anyhow::Result<()>
    where
        C: ClientSink
    {
        while let Some(event) = self.rx.recv().await {
            match event {
                OutEvent::Frame(frame, seq_nr) => client.send_frame(frame, seq_nr).await?,
            }
        }

        Ok(())
    }
}

/// Spawns the output pump for a plain text writer (stdout for the console). The pump ends
/// once every clone of the returned handle is dropped.
pub fn init_session_for_writer<W>(writer: W) -> (OutputHandle, JoinHandle<()>)
where
    W: AsyncWrite + Unpin + Send + 'static
{
    let (output_handle, rx) = OutputHandle::channel();
    let session_out = SessionOut::new(rx);
    let sink = TextSink::new(writer);

    let pump = tokio::spawn(async move {
        if let Err(e) = session_out.run(sink).await {
            tracing::error!(error=%e, "session output error");
        }
    });

    (output_handle, pump)
}

/// Drains everything currently queued on a receiver. Handy for tests and for
/// collecting output synchronously.
pub fn drain_text(rx: &mut mpsc::UnboundedReceiver<OutEvent>) -> Vec<String> {
    let mut out = Vec::new();
    while let Ok(OutEvent::Frame(frame, _)) = rx.try_recv() {
        out.push(frame.text().to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_are_sequenced() {
        let (out, mut rx) = OutputHandle::channel();
        out.line("one");
        out.system("two");

        let Ok(OutEvent::Frame(f1, s1)) = rx.try_recv() else { panic!("no frame") };
        let Ok(OutEvent::Frame(f2, s2)) = rx.try_recv() else { panic!("no frame") };
        assert_eq!(f1, OutFrame::Line("one".into()));
        assert_eq!(f2, OutFrame::System("two".into()));
        assert!(s2 > s1);
    }

    #[test]
    fn sending_after_receiver_dropped_is_silent() {
        let (out, rx) = OutputHandle::channel();
        drop(rx);
        out.line("nobody listens");
    }

    #[test]
    fn drain_collects_texts() {
        let (out, mut rx) = OutputHandle::channel();
        out.line("a");
        out.prompt("> ");
        assert_eq!(drain_text(&mut rx), vec!["a".to_string(), "> ".to_string()]);
        assert!(drain_text(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn pump_writes_until_handles_are_gone() {
        use tokio::io::AsyncReadExt;

        let (client, mut server) = tokio::io::duplex(1024);
        let (out, pump) = init_session_for_writer(client);
        out.line("hello");
        out.prompt("> ");
        drop(out);
        pump.await.unwrap();

        let mut text = String::new();
        server.read_to_string(&mut text).await.unwrap();
        assert_eq!(text, "hello\n> ");
    }
}
