//! Command definitions for keyboard input handling.
//!
//! The [`Command`] enum decouples key bindings from their effects. Printable
//! characters typed into a prompt are not commands; the screen handlers
//! insert them directly.

/// Scrollable text panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollTarget {
    /// Body preview in the main screen's request pane.
    RequestBody,
    /// Body of the last response.
    ResponseBody,
    /// Body preview in the editor's preview pane.
    DraftBody,
    /// Run detail in the history screen.
    HistoryDetail,
}

/// Direction of a split-ratio nudge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nudge {
    Shrink,
    Grow,
}

/// Represents all possible commands that can be triggered by keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // =========================================================================
    // Global
    // =========================================================================
    /// Stop the event loop (Ctrl+C, ZZ, ZQ)
    Quit,

    // =========================================================================
    // List navigation
    // =========================================================================
    SelectNext,
    SelectPrev,
    /// Jump to the first item (gg)
    SelectFirst,
    SelectLast,

    // =========================================================================
    // Scroll and resize
    // =========================================================================
    ScrollUp(ScrollTarget),
    ScrollDown(ScrollTarget),
    /// Move the vertical divider (H/L)
    NudgeSplit(Nudge),
    /// Move the horizontal divider (K/J)
    NudgeResponse(Nudge),

    // =========================================================================
    // Main screen, normal mode
    // =========================================================================
    OpenSearch,
    OpenReverseSearch,
    OpenCommandLine,
    OpenActions,
    ConfirmDeleteSelected,
    EditSelected,
    ClearFilter,

    // =========================================================================
    // Main screen, action menu
    // =========================================================================
    SendSelected,
    EditSelectedBody,
    EditSelectedAuth,

    // =========================================================================
    // Confirmations and prompts
    // =========================================================================
    Confirm,
    Cancel,
    Submit,
    DeleteChar,
    DeleteWord,

    // =========================================================================
    // Editor screen, normal mode
    // =========================================================================
    NextField,
    PrevField,
    CycleMethodBack,
    CycleMethodForward,
    StartInsert,
    EditDraftBody,
    SaveDraft,

    // =========================================================================
    // History screen
    // =========================================================================
    ReplaySelected,
}

impl Command {
    /// True for commands that only move the viewport and never touch data.
    pub fn is_view_only(&self) -> bool {
        matches!(
            self,
            Command::ScrollUp(_)
                | Command::ScrollDown(_)
                | Command::NudgeSplit(_)
                | Command::NudgeResponse(_)
        )
    }
}
