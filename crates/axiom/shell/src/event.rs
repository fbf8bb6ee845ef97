//! Events broadcast by the shell to whatever renders it.

use axiom_types::{ChatMessage, SynthesisResult};

use crate::log::LogEntry;
use crate::state::{ActionKind, AuthPhase, ProgressStage};

#[derive(Debug, Clone, PartialEq)]
pub enum ShellEvent {
    AuthPhaseChanged(AuthPhase),
    StageEntered { stage: ProgressStage, percent: u8 },
    LogAppended(LogEntry),
    BusyChanged { kind: ActionKind, busy: bool },
    ProtocolReady(Box<SynthesisResult>),
    ChatReply(ChatMessage),
    FastAnswer(String),
}
