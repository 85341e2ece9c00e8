//! Toast-style notices the controller emits for the presentation layer.
//!
//! Notices are accumulated here and drained by the frame loop; they carry no
//! state of their own and dropping them loses nothing but a status line.

/// A user-facing notice raised by a session operation.
///
/// This is a closed enum - only controller code constructs these, so the
/// presentation can render them without sanitizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// A run began.
    RunStarted,
    /// The completion timer elapsed and results are available.
    RunCompleted,
    /// The session returned to idle.
    SessionReset,
    /// A report export was requested.
    ReportDownloaded,
}

/// Severity used to pick the status-line color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
}

impl Notice {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Notice::RunStarted => "Experiment started!",
            Notice::RunCompleted => "Experiment completed!",
            Notice::SessionReset => "Experiment reset",
            Notice::ReportDownloaded => "Lab report downloaded!",
        }
    }

    #[must_use]
    pub fn level(self) -> NoticeLevel {
        match self {
            Notice::RunStarted | Notice::RunCompleted | Notice::ReportDownloaded => {
                NoticeLevel::Success
            }
            Notice::SessionReset => NoticeLevel::Info,
        }
    }
}

/// Queue of pending notices, drained once per frame.
#[derive(Debug, Default)]
pub(crate) struct NoticeQueue {
    pending: Vec<Notice>,
}

impl NoticeQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Push a notice. Duplicates already pending are dropped.
    pub(crate) fn push(&mut self, notice: Notice) {
        if !self.pending.contains(&notice) {
            self.pending.push(notice);
        }
    }

    /// Take all pending notices in the order they were raised.
    pub(crate) fn take(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.pending)
    }
}
