//! Session state owned by the shell.

use axiom_types::{ChatTranscript, History, SynthesisResult};
use serde::{Deserialize, Serialize};

use crate::log::LogBuffer;

/// The three user-triggered actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Generate,
    Chat,
    FastQuery,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ActionKind::Generate => "generate",
            ActionKind::Chat => "chat",
            ActionKind::FastQuery => "fast_query",
        };
        f.write_str(label)
    }
}

/// Cosmetic authorization sequence. No credential is ever checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthPhase {
    Locked,
    Handshake,
    Verifying,
    Unlocked,
}

impl AuthPhase {
    pub fn is_unlocked(&self) -> bool {
        matches!(self, AuthPhase::Unlocked)
    }

    pub fn label(&self) -> &'static str {
        match self {
            AuthPhase::Locked => "LOCKED",
            AuthPhase::Handshake => "HANDSHAKE",
            AuthPhase::Verifying => "VERIFYING",
            AuthPhase::Unlocked => "UNLOCKED",
        }
    }
}

/// Decorative progress stages played before the generate call is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressStage {
    AxiomaticGrounding,
    EntropyMinimization,
    RecursiveSynthesis,
    FormalValidation,
}

impl ProgressStage {
    pub const ALL: [ProgressStage; 4] = [
        ProgressStage::AxiomaticGrounding,
        ProgressStage::EntropyMinimization,
        ProgressStage::RecursiveSynthesis,
        ProgressStage::FormalValidation,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProgressStage::AxiomaticGrounding => "AXIOMATIC_GROUNDING",
            ProgressStage::EntropyMinimization => "ENTROPY_MINIMIZATION",
            ProgressStage::RecursiveSynthesis => "RECURSIVE_SYNTHESIS",
            ProgressStage::FormalValidation => "FORMAL_VALIDATION",
        }
    }

    /// Percent shown once this stage is entered.
    pub fn percent(&self) -> u8 {
        let position = Self::ALL
            .iter()
            .position(|stage| stage == self)
            .unwrap_or_default();
        ((position + 1) * 100 / Self::ALL.len()) as u8
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub stage: Option<ProgressStage>,
    pub percent: u8,
}

/// Pending input text per action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inputs {
    pub generate: String,
    pub chat: String,
    pub fast_query: String,
}

impl Inputs {
    pub fn get(&self, kind: ActionKind) -> &str {
        match kind {
            ActionKind::Generate => &self.generate,
            ActionKind::Chat => &self.chat,
            ActionKind::FastQuery => &self.fast_query,
        }
    }

    pub fn get_mut(&mut self, kind: ActionKind) -> &mut String {
        match kind {
            ActionKind::Generate => &mut self.generate,
            ActionKind::Chat => &mut self.chat,
            ActionKind::FastQuery => &mut self.fast_query,
        }
    }
}

/// One busy flag per action kind. Kinds never block each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyFlags {
    generate: bool,
    chat: bool,
    fast_query: bool,
}

impl BusyFlags {
    pub fn is_busy(&self, kind: ActionKind) -> bool {
        match kind {
            ActionKind::Generate => self.generate,
            ActionKind::Chat => self.chat,
            ActionKind::FastQuery => self.fast_query,
        }
    }

    /// Mark `kind` busy. Returns false if it already was.
    pub fn try_acquire(&mut self, kind: ActionKind) -> bool {
        let flag = self.flag_mut(kind);
        if *flag {
            return false;
        }
        *flag = true;
        true
    }

    pub fn release(&mut self, kind: ActionKind) {
        *self.flag_mut(kind) = false;
    }

    pub fn any(&self) -> bool {
        self.generate || self.chat || self.fast_query
    }

    fn flag_mut(&mut self, kind: ActionKind) -> &mut bool {
        match kind {
            ActionKind::Generate => &mut self.generate,
            ActionKind::Chat => &mut self.chat,
            ActionKind::FastQuery => &mut self.fast_query,
        }
    }
}

/// Everything the console knows about the current session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionState {
    pub auth: AuthPhase,
    pub inputs: Inputs,
    pub busy: BusyFlags,
    pub progress: Progress,
    pub log: LogBuffer,
    pub history: History,
    /// Result on display: the latest produced, or a selected history entry.
    pub current: Option<SynthesisResult>,
    pub transcript: ChatTranscript,
    pub fast_answer: Option<String>,
}

impl SessionState {
    pub fn new(log_capacity: usize) -> Self {
        Self {
            auth: AuthPhase::Locked,
            inputs: Inputs::default(),
            busy: BusyFlags::default(),
            progress: Progress::default(),
            log: LogBuffer::new(log_capacity),
            history: History::new(),
            current: None,
            transcript: ChatTranscript::new(),
            fast_answer: None,
        }
    }
}
