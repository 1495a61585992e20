/// Occupancy of the single shared editor. At most one session is open
/// system-wide; `Editing` means that session exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    Editing,
}
