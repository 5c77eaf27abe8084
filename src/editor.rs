use crate::export::{self, ExportFormat, ExportedFile, ShareOutcome};
use crate::generate::QuoteGenerator;
use crate::platform::ShareTarget;
use crate::rendering::raster::{RasterOptions, Rasterizer};
use crate::rendering::Surface;
use crate::session::{Edit, Session};
use crate::{Error, Result, Viewport};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};

enum Command {
    Edit(Edit, oneshot::Sender<Session>),
    Generate(oneshot::Sender<Result<bool>>),
    GenerationDone(Result<String>),
    Download(ExportFormat, oneshot::Sender<Result<ExportedFile>>),
    Share(oneshot::Sender<Result<ShareOutcome>>),
    Close(oneshot::Sender<Session>),
}

/// External collaborators the editor drives.
#[derive(Clone)]
pub struct Services {
    pub generator: Arc<dyn QuoteGenerator>,
    pub rasterizer: Arc<dyn Rasterizer>,
    pub share: Arc<dyn ShareTarget>,
    pub options: RasterOptions,
    pub viewport: Viewport,
}

/// Async handle to a single-owner editing session.
///
/// A background task owns the `Session` and applies commands in the order
/// they arrive. A generation call runs in its own task and posts its result
/// back into the same queue, so edits stay live while it is outstanding.
/// Download and share capture the session as it is when they are processed.
#[derive(Clone)]
pub struct Editor {
    cmd_tx: mpsc::UnboundedSender<Command>,
    state_rx: watch::Receiver<Session>,
    share_supported: bool,
}

impl Editor {
    /// Start the editing task. Must be called from within a tokio runtime.
    pub fn spawn(session: Session, services: Services) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<Command>();
        let (state_tx, state_rx) = watch::channel(session.clone());
        let share_supported = services.share.is_supported();
        let loopback = cmd_tx.downgrade();

        tokio::spawn(async move {
            let mut session = session;
            let mut cmd_rx = cmd_rx;

            while let Some(cmd) = cmd_rx.recv().await {
                match cmd {
                    Command::Edit(edit, resp) => {
                        session = session.apply(edit);
                        state_tx.send_replace(session.clone());
                        let _ = resp.send(session.clone());
                    }
                    Command::Generate(resp) => match session.begin_generation() {
                        Ok(Some((next, request))) => {
                            session = next;
                            state_tx.send_replace(session.clone());
                            let fut = services.generator.generate(request);
                            match loopback.upgrade() {
                                Some(tx) => {
                                    tokio::spawn(async move {
                                        // A panicking generator still ends the pending state.
                                        let outcome = match tokio::spawn(fut).await {
                                            Ok(outcome) => outcome,
                                            Err(e) => Err(Error::ExternalServiceError(format!(
                                                "generation task failed: {}",
                                                e
                                            ))),
                                        };
                                        let _ = tx.send(Command::GenerationDone(outcome));
                                    });
                                }
                                None => {
                                    log::warn!("editor handle dropped while starting generation");
                                    session = session.finish_generation(Err(Error::ExternalServiceError(
                                        "editor handle dropped".into(),
                                    )));
                                    state_tx.send_replace(session.clone());
                                }
                            }
                            let _ = resp.send(Ok(true));
                        }
                        Ok(None) => {
                            let _ = resp.send(Ok(false));
                        }
                        Err(err) => {
                            session = session.report(&err);
                            state_tx.send_replace(session.clone());
                            let _ = resp.send(Err(err));
                        }
                    },
                    Command::GenerationDone(outcome) => {
                        if let Err(err) = &outcome {
                            log::warn!("quote generation failed: {:?}", err);
                        }
                        session = session.finish_generation(outcome);
                        state_tx.send_replace(session.clone());
                    }
                    Command::Download(format, resp) => {
                        let surface = Surface::capture(&session, services.viewport);
                        session = session.clear_error();
                        let res = export::download(
                            Some(&surface),
                            format,
                            services.rasterizer.as_ref(),
                            &services.options,
                        );
                        if let Err(err) = &res {
                            session = session.report(err);
                        }
                        state_tx.send_replace(session.clone());
                        let _ = resp.send(res);
                    }
                    Command::Share(resp) => {
                        let surface = Surface::capture(&session, services.viewport);
                        session = session.clear_error();
                        let res = export::share(
                            Some(&surface),
                            services.share.as_ref(),
                            services.rasterizer.as_ref(),
                            &services.options,
                        );
                        if let Err(err) = &res {
                            session = session.report(err);
                        }
                        state_tx.send_replace(session.clone());
                        let _ = resp.send(res);
                    }
                    Command::Close(resp) => {
                        let _ = resp.send(session.clone());
                        break;
                    }
                }
            }
            log::debug!("editor task finished");
        });

        Self { cmd_tx, state_rx, share_supported }
    }

    fn send(&self, cmd: Command) -> Result<()> {
        self.cmd_tx
            .send(cmd)
            .map_err(|_| Error::Other("Editor is closed".into()))
    }

    /// Apply one edit; returns the resulting snapshot.
    pub async fn edit(&self, edit: Edit) -> Result<Session> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Edit(edit, tx))?;
        rx.await
            .map_err(|e| Error::Other(format!("Edit canceled: {}", e)))
    }

    /// Trigger generation. `Ok(true)` when a call was issued, `Ok(false)`
    /// when the trigger is inert (custom source or call already pending).
    pub async fn generate(&self) -> Result<bool> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Generate(tx))?;
        rx.await
            .map_err(|e| Error::Other(format!("Generate canceled: {}", e)))?
    }

    pub async fn download(&self, format: ExportFormat) -> Result<ExportedFile> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Download(format, tx))?;
        rx.await
            .map_err(|e| Error::Other(format!("Download canceled: {}", e)))?
    }

    /// Share the current frame. Without native sharing the control is inert:
    /// this returns `UnsupportedCapability` without rasterizing.
    pub async fn share(&self) -> Result<ShareOutcome> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Share(tx))?;
        rx.await
            .map_err(|e| Error::Other(format!("Share canceled: {}", e)))?
    }

    /// Whether the share control should be enabled.
    pub fn share_supported(&self) -> bool {
        self.share_supported
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> Session {
        self.state_rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state_rx.clone()
    }

    /// Wait until no generation call is outstanding.
    pub async fn wait_idle(&self) -> Result<Session> {
        let mut rx = self.state_rx.clone();
        let s = rx
            .wait_for(|s| !s.is_generating())
            .await
            .map_err(|e| Error::Other(format!("Editor closed: {}", e)))?;
        Ok(s.clone())
    }

    /// Stop the editing task and return the final snapshot.
    pub async fn close(self) -> Result<Session> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Close(tx))?;
        rx.await
            .map_err(|e| Error::Other(format!("Close canceled: {}", e)))
    }
}
