use std::io;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use detibot_logging::{detibot_debug, detibot_warn};
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

use crate::backend::{Backend, BackendSettings, ReqwestBackend};
use crate::speech::{
    LoggingSynthesizer, SpeechRecognizer, SpeechSynthesizer, UnavailableRecognizer,
};
use crate::{BackendError, CaptureId, EngineEvent, RequestId, SourceRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand {
    SubmitSource {
        request_id: RequestId,
        source: SourceRequest,
    },
    SendPrompt {
        request_id: RequestId,
        language: String,
        prompt: String,
        chat: Vec<String>,
    },
    SubmitFeedback {
        index: usize,
        question: String,
        answer: String,
    },
    StartListening {
        capture_id: CaptureId,
        locale: String,
    },
    StopListening,
    Speak {
        text: String,
        locale: String,
    },
    /// Report `TimerElapsed { ticket }` after `after`.
    ScheduleTimer {
        ticket: u64,
        after: Duration,
    },
}

/// Collaborators the engine drives.
#[derive(Clone)]
pub struct EngineServices {
    pub backend: Arc<dyn Backend>,
    pub recognizer: Arc<dyn SpeechRecognizer>,
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
}

impl EngineServices {
    /// HTTP backend with the console speech stand-ins.
    pub fn with_backend(settings: BackendSettings) -> Result<Self, BackendError> {
        Ok(Self {
            backend: Arc::new(ReqwestBackend::new(settings)?),
            recognizer: Arc::new(UnavailableRecognizer),
            synthesizer: Arc::new(LoggingSynthesizer),
        })
    }
}

/// Runs commands on a background tokio runtime and reports results as [`EngineEvent`]s.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    /// Starts the worker thread. Fails if the tokio runtime cannot be built.
    pub fn new(services: EngineServices) -> io::Result<Self> {
        let runtime = Runtime::new()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let mut worker = Worker {
                runtime,
                services,
                event_tx,
                capture: None,
            };
            while let Ok(command) = cmd_rx.recv() {
                worker.handle(command);
            }
            detibot_debug!("engine command channel closed");
        });

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    pub fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            detibot_warn!("engine thread is gone; command dropped");
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.recv_event(timeout).ok()
    }

    /// Like [`Self::recv_timeout`], but tells a quiet engine apart from a stopped one.
    pub fn recv_event(&self, timeout: Duration) -> Result<EngineEvent, RecvTimeoutError> {
        let rx = self
            .event_rx
            .lock()
            .map_err(|_| RecvTimeoutError::Disconnected)?;
        rx.recv_timeout(timeout)
    }
}

struct Worker {
    runtime: Runtime,
    services: EngineServices,
    event_tx: mpsc::Sender<EngineEvent>,
    /// Cancels the active speech capture.
    capture: Option<CancellationToken>,
}

impl Worker {
    fn handle(&mut self, command: EngineCommand) {
        match command {
            EngineCommand::SubmitSource { request_id, source } => {
                let backend = self.services.backend.clone();
                let event_tx = self.event_tx.clone();
                self.runtime.spawn(async move {
                    let result = backend.submit_source(&source).await;
                    if let Err(err) = &result {
                        detibot_warn!("source request {} failed: {}", request_id, err);
                    }
                    let _ = event_tx.send(EngineEvent::SourceSubmitted { request_id, result });
                });
            }
            EngineCommand::SendPrompt {
                request_id,
                language,
                prompt,
                chat,
            } => {
                let backend = self.services.backend.clone();
                let event_tx = self.event_tx.clone();
                self.runtime.spawn(async move {
                    let result = backend.send_prompt(&language, &prompt, &chat).await;
                    if let Err(err) = &result {
                        detibot_warn!("chat turn {} failed: {}", request_id, err);
                    }
                    let _ = event_tx.send(EngineEvent::ChatReplied { request_id, result });
                });
            }
            EngineCommand::SubmitFeedback {
                index,
                question,
                answer,
            } => {
                let backend = self.services.backend.clone();
                let event_tx = self.event_tx.clone();
                self.runtime.spawn(async move {
                    let source = SourceRequest::Faq { question, answer };
                    let result = backend.submit_source(&source).await;
                    let _ = event_tx.send(EngineEvent::FeedbackSubmitted { index, result });
                });
            }
            EngineCommand::StartListening { capture_id, locale } => {
                self.stop_capture();
                let token = CancellationToken::new();
                self.capture = Some(token.clone());

                let recognizer = self.services.recognizer.clone();
                let event_tx = self.event_tx.clone();
                self.runtime.spawn(async move {
                    tokio::select! {
                        _ = token.cancelled() => {
                            detibot_debug!("speech capture stopped");
                        }
                        result = recognizer.recognize(&locale) => {
                            let event = match result {
                                Ok(text) => EngineEvent::SpeechRecognized { capture_id, text },
                                Err(error) => {
                                    detibot_warn!("speech capture {} failed: {}", capture_id, error);
                                    EngineEvent::SpeechFailed { capture_id, error }
                                }
                            };
                            let _ = event_tx.send(event);
                        }
                    }
                });
            }
            EngineCommand::StopListening => self.stop_capture(),
            EngineCommand::Speak { text, locale } => {
                self.services.synthesizer.speak(&text, &locale);
            }
            EngineCommand::ScheduleTimer { ticket, after } => {
                let event_tx = self.event_tx.clone();
                self.runtime.spawn(async move {
                    tokio::time::sleep(after).await;
                    let _ = event_tx.send(EngineEvent::TimerElapsed { ticket });
                });
            }
        }
    }

    fn stop_capture(&mut self) {
        if let Some(token) = self.capture.take() {
            token.cancel();
        }
    }
}
