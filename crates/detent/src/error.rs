use thiserror::Error;

/// Reasons an input event was dropped before reaching the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("wheel has no layout yet")]
    NoLayout,
    #[error("touch event carried no contact points")]
    NoTouchPoints,
    #[error("wheel is not mounted")]
    Unmounted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MountError {
    #[error("wheel already has active pointer listeners")]
    AlreadyMounted,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SegmentError {
    #[error("expected 12 segments, got {0}")]
    WrongCount(usize),
    #[error("invalid colour '{0}'")]
    BadColor(String),
}
