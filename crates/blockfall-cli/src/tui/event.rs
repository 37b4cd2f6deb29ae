use crossterm::event::Event as CrosstermEvent;

/// Events processed by TUI applications.
#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// The tick interval elapsed.
    Tick,
    /// Something changed since the last frame was drawn.
    Render,
    /// Terminal events such as key input and resize.
    Crossterm(CrosstermEvent),
}
