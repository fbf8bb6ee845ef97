//! Action sequencing over a single session state container.

use std::sync::{Arc, Mutex, MutexGuard};

use axiom_client::SynthesisClient;
use axiom_types::{ChatMessage, SessionId, SynthesisResult};
use tokio::sync::broadcast;
use tokio::time::sleep;

use crate::config::ShellConfig;
use crate::event::ShellEvent;
use crate::log::{LogEntry, LogLevel};
use crate::state::{ActionKind, AuthPhase, Progress, ProgressStage, SessionState};

/// Shown in the transcript when a chat turn fails.
pub const CHAT_FALLBACK: &str =
    "Link to the reasoning core was interrupted. The last message was not processed.";

/// Stored as the answer when a fast query fails.
pub const FAST_QUERY_FALLBACK: &str = "Fast query failed. No response from the low-latency core.";

const EVENT_CAPACITY: usize = 256;

/// Why a submission was dropped without a remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    Locked,
    Busy,
    EmptyInput,
}

impl std::fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            IgnoreReason::Locked => "console is not authorized",
            IgnoreReason::Busy => "a call of this kind is already in flight",
            IgnoreReason::EmptyInput => "input is empty",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome<T> {
    Ignored(IgnoreReason),
    Completed(T),
}

impl<T> ActionOutcome<T> {
    pub fn completed(self) -> Option<T> {
        match self {
            ActionOutcome::Completed(value) => Some(value),
            ActionOutcome::Ignored(_) => None,
        }
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, ActionOutcome::Ignored(_))
    }
}

/// Interaction shell.
///
/// Cloning is cheap and every clone drives the same session, so the three
/// action kinds can run from independent tasks. The state lock is never held
/// across an await.
#[derive(Clone)]
pub struct Shell {
    inner: Arc<ShellInner>,
}

struct ShellInner {
    client: SynthesisClient,
    config: ShellConfig,
    session_id: SessionId,
    state: Mutex<SessionState>,
    events: broadcast::Sender<ShellEvent>,
}

impl std::fmt::Debug for Shell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shell")
            .field("session_id", &self.inner.session_id)
            .field("config", &self.inner.config)
            .finish()
    }
}

/// Busy flag of one action kind, cleared on drop, including when the action
/// future is cancelled mid-call. Never drop it while the state lock is held.
struct BusyGuard<'a> {
    shell: &'a Shell,
    kind: ActionKind,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        {
            let mut state = self.shell.lock();
            state.busy.release(self.kind);
            if self.kind == ActionKind::Generate {
                state.progress = Progress::default();
            }
        }
        self.shell.emit(ShellEvent::BusyChanged {
            kind: self.kind,
            busy: false,
        });
    }
}

impl Shell {
    pub fn new(client: SynthesisClient, config: ShellConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let session_id = SessionId::generate();
        tracing::debug!(session = %session_id, "shell created");

        Self {
            inner: Arc::new(ShellInner {
                client,
                state: Mutex::new(SessionState::new(config.log_capacity)),
                config,
                session_id,
                events,
            }),
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.inner.session_id
    }

    pub fn config(&self) -> &ShellConfig {
        &self.inner.config
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ShellEvent> {
        self.inner.events.subscribe()
    }

    /// Copy of the current session state.
    pub fn snapshot(&self) -> SessionState {
        self.lock().clone()
    }

    pub fn set_input(&self, kind: ActionKind, text: impl Into<String>) {
        *self.lock().inputs.get_mut(kind) = text.into();
    }

    /// Display the history entry at `index` (0 is the newest).
    pub fn select_history(&self, index: usize) -> Option<SynthesisResult> {
        let mut state = self.lock();
        let selected = state.history.get(index).cloned()?;
        state.current = Some(selected.clone());
        Some(selected)
    }

    /// Run the two-step cosmetic authorization. Any caller reaches
    /// [`AuthPhase::Unlocked`]; a call made while the sequence is running or
    /// finished returns the current phase.
    pub async fn authorize(&self) -> AuthPhase {
        {
            let mut state = self.lock();
            if state.auth != AuthPhase::Locked {
                return state.auth;
            }
            self.enter_auth_phase(&mut state, AuthPhase::Handshake);
        }

        sleep(self.inner.config.auth_step()).await;
        self.enter_auth_phase(&mut self.lock(), AuthPhase::Verifying);

        sleep(self.inner.config.auth_step()).await;
        let mut state = self.lock();
        self.enter_auth_phase(&mut state, AuthPhase::Unlocked);
        self.append_log(&mut state, LogLevel::Info, "Access granted. Console unlocked.");
        AuthPhase::Unlocked
    }

    /// Gate first, then store `prompt` as the pending input and run generate.
    /// A submission rejected as locked or busy leaves the pending input alone.
    pub async fn submit_generate(&self, prompt: &str) -> ActionOutcome<SynthesisResult> {
        self.run_generate(Some(prompt)).await
    }

    /// Synthesize a protocol from the pending generate input.
    ///
    /// The cosmetic stages play out in full before the remote call is issued.
    pub async fn generate(&self) -> ActionOutcome<SynthesisResult> {
        self.run_generate(None).await
    }

    async fn run_generate(&self, submitted: Option<&str>) -> ActionOutcome<SynthesisResult> {
        let (prompt, busy) = match self.begin(ActionKind::Generate, submitted) {
            Ok(started) => started,
            Err(reason) => return ActionOutcome::Ignored(reason),
        };
        tracing::info!(session = %self.inner.session_id, "generate started");

        for stage in ProgressStage::ALL {
            {
                let mut state = self.lock();
                state.progress = Progress {
                    stage: Some(stage),
                    percent: stage.percent(),
                };
                self.append_log(&mut state, LogLevel::Info, format!("Stage {}", stage.label()));
            }
            self.emit(ShellEvent::StageEntered {
                stage,
                percent: stage.percent(),
            });
            sleep(self.inner.config.stage_delay()).await;
        }

        let result = self.inner.client.request_protocol(&prompt).await;

        {
            let mut state = self.lock();
            state.history.record(result.clone());
            state.current = Some(result.clone());
            state.inputs.generate.clear();
            if result.is_sentinel() {
                self.append_log(&mut state, LogLevel::Error, "Synthesis failed. Null state returned.");
            } else {
                self.append_log(
                    &mut state,
                    LogLevel::Info,
                    format!("Protocol {} synthesized.", result.signature),
                );
            }
        }
        self.emit(ShellEvent::ProtocolReady(Box::new(result.clone())));

        sleep(self.inner.config.settle_delay()).await;
        drop(busy);

        ActionOutcome::Completed(result)
    }

    pub async fn submit_chat(&self, message: &str) -> ActionOutcome<ChatMessage> {
        self.run_chat(Some(message)).await
    }

    /// Send the pending chat input with the prior transcript as context.
    ///
    /// A failed call is answered with [`CHAT_FALLBACK`].
    pub async fn chat(&self) -> ActionOutcome<ChatMessage> {
        self.run_chat(None).await
    }

    async fn run_chat(&self, submitted: Option<&str>) -> ActionOutcome<ChatMessage> {
        let (message, busy) = match self.begin(ActionKind::Chat, submitted) {
            Ok(started) => started,
            Err(reason) => return ActionOutcome::Ignored(reason),
        };

        let prior = {
            let mut state = self.lock();
            let prior = state.transcript.messages().to_vec();
            state.transcript.push(ChatMessage::user(message.clone()));
            state.inputs.chat.clear();
            prior
        };

        let reply_text = match self.inner.client.send_chat_turn(&message, &prior).await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(session = %self.inner.session_id, error = %err, "chat turn failed");
                self.append_log(&mut self.lock(), LogLevel::Warn, "Chat link failure.");
                CHAT_FALLBACK.to_string()
            }
        };
        let reply = ChatMessage::model(reply_text);

        self.lock().transcript.push(reply.clone());
        drop(busy);
        self.emit(ShellEvent::ChatReply(reply.clone()));

        ActionOutcome::Completed(reply)
    }

    pub async fn submit_fast_query(&self, prompt: &str) -> ActionOutcome<String> {
        self.run_fast_query(Some(prompt)).await
    }

    /// Single-shot lookup; a failed call is answered with [`FAST_QUERY_FALLBACK`].
    pub async fn fast_query(&self) -> ActionOutcome<String> {
        self.run_fast_query(None).await
    }

    async fn run_fast_query(&self, submitted: Option<&str>) -> ActionOutcome<String> {
        let (prompt, busy) = match self.begin(ActionKind::FastQuery, submitted) {
            Ok(started) => started,
            Err(reason) => return ActionOutcome::Ignored(reason),
        };

        let answer = match self.inner.client.fast_query(&prompt).await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(session = %self.inner.session_id, error = %err, "fast query failed");
                self.append_log(&mut self.lock(), LogLevel::Warn, "Fast query failure.");
                FAST_QUERY_FALLBACK.to_string()
            }
        };

        {
            let mut state = self.lock();
            state.fast_answer = Some(answer.clone());
            state.inputs.fast_query.clear();
        }
        drop(busy);
        self.emit(ShellEvent::FastAnswer(answer.clone()));

        ActionOutcome::Completed(answer)
    }

    /// Gate a submission and mark its kind busy.
    ///
    /// Checks run in the order locked, busy, empty. `submitted` replaces the
    /// pending input only once the first two checks pass. On success returns
    /// the trimmed input and the guard that clears the busy flag.
    fn begin(
        &self,
        kind: ActionKind,
        submitted: Option<&str>,
    ) -> Result<(String, BusyGuard<'_>), IgnoreReason> {
        let mut state = self.lock();
        if !state.auth.is_unlocked() {
            return Err(IgnoreReason::Locked);
        }
        if state.busy.is_busy(kind) {
            tracing::debug!(%kind, "submission ignored while busy");
            return Err(IgnoreReason::Busy);
        }
        if let Some(text) = submitted {
            *state.inputs.get_mut(kind) = text.to_string();
        }
        let input = state.inputs.get(kind).trim().to_string();
        if input.is_empty() {
            return Err(IgnoreReason::EmptyInput);
        }
        if !state.busy.try_acquire(kind) {
            return Err(IgnoreReason::Busy);
        }

        self.emit(ShellEvent::BusyChanged { kind, busy: true });
        Ok((input, BusyGuard { shell: self, kind }))
    }

    fn enter_auth_phase(&self, state: &mut SessionState, phase: AuthPhase) {
        state.auth = phase;
        tracing::debug!(session = %self.inner.session_id, phase = phase.label(), "authorization phase");
        self.emit(ShellEvent::AuthPhaseChanged(phase));
    }

    fn append_log(&self, state: &mut SessionState, level: LogLevel, message: impl Into<String>) {
        let entry = LogEntry::new(level, message);
        state.log.push(entry.clone());
        self.emit(ShellEvent::LogAppended(entry));
    }

    fn emit(&self, event: ShellEvent) {
        // No subscribers is fine.
        let _ = self.inner.events.send(event);
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
