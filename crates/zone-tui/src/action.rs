//! Action enum — every user intent and internal event the App dispatches.

/// Unique identifier for a focusable component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    ZoneList,
    ZoneViewer,
    LogPanel,
    HelpOverlay,
    AlertOverlay,
}

/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ── Zones ────────────────────────────────────────────────────────────────
    Open(i64), // zone id
    CloseZone,
    OpenInNewContext,
    /// Show the current display surface in the system browser.
    ShowInBrowser,
    ToggleMaximize,

    // ── Navigation ───────────────────────────────────────────────────────────
    FocusNext,
    FocusPrev,
    FocusPane(ComponentId),

    // ── Filter/search ────────────────────────────────────────────────────────
    OpenFilter,
    CloseFilter,
    FilterChanged(String),
    ClearFilter,

    // ── Catalog ──────────────────────────────────────────────────────────────
    CycleSort,
    CycleSortReverse,
    Reload,

    // ── UI toggles ───────────────────────────────────────────────────────────
    ToggleLogs,
    ToggleHelp,
    ToggleKeys,
    DismissAlert,
    CopyToClipboard(String),

    // ── System ───────────────────────────────────────────────────────────────
    Quit,
    Resize(u16, u16),
}
