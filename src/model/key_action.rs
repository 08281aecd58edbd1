//! Domain-level keyboard actions independent of key bindings.

/// Actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Scrolling
    /// Scroll the timeline up by one row. Default: k/↑
    ScrollUp,
    /// Scroll the timeline down by one row. Default: j/↓
    ScrollDown,
    /// Scroll up by half a page. Default: Ctrl+u/Page Up
    PageUp,
    /// Scroll down by half a page. Default: Ctrl+d/Page Down
    PageDown,
    /// Jump to the newest edits. Default: g/Home
    ScrollToTop,
    /// Jump to the oldest loaded edits. Default: G/End
    ScrollToBottom,

    // Appearance
    /// Cycle light → dark → sepia → black. Default: t
    CycleTheme,

    // Application
    /// Close the screen. Default: q/Esc
    Close,
}
