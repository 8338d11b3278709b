//! Configuration errors. The per-tick pipeline itself cannot fail.

/// A [`Config`](crate::Config) that would overflow the Q16.16 arithmetic or
/// degenerate the projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    #[error("grid needs at least 2 lines per axis, got {0}")]
    GridTooSmall(usize),
    #[error("world half extent must be within (0, 16]")]
    HalfExtentOutOfRange,
    #[error("camera distance must be within (0, 64]")]
    CameraDistanceOutOfRange,
    #[error("zoom must be positive")]
    ZoomNotPositive,
    #[error("probe depth {0} exceeds the maximum of 10 levels")]
    ProbeDepthTooLarge(u32),
    #[error("terminator depth {0} exceeds the maximum of 16 steps")]
    TerminatorDepthTooLarge(u32),
    #[error("shift of {0} bits leaves nothing of a Q16.16 value")]
    ShiftTooLarge(u32),
    #[error("screen of {0}x{1} pixels is too small to draw on")]
    ScreenTooSmall(u32, u32),
}

/// A [`DisplayList`](crate::DisplayList) ran out of room for another primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[error("display list is full")]
pub struct DisplayListFull;
