use crate::CameraError;
use serde::{Deserialize, Serialize};

/// Raw value reported when no frame-rate mode has been applied.
pub const UNSET_FPS_MODE: i32 = -1;

/// Vendor frame-rate modes for VR preview.
///
/// The ordinal (`0`, `1`, `2`) is the selector accepted by
/// [`VrCamera::configure_frame_rate`](crate::VrCamera::configure_frame_rate)
/// and the value written to the `fast-fps-mode` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FpsMode {
    /// 30 frames per second.
    Fps30,
    /// 60 frames per second.
    Fps60,
    /// 120 frames per second.
    Fps120,
}

impl FpsMode {
    /// All modes, in ordinal order.
    pub const ALL: [Self; 3] = [Self::Fps30, Self::Fps60, Self::Fps120];

    /// Frames per second.
    #[must_use]
    pub const fn fps(self) -> u32 {
        match self {
            Self::Fps30 => 30,
            Self::Fps60 => 60,
            Self::Fps120 => 120,
        }
    }

    /// Selector ordinal.
    #[must_use]
    pub const fn ordinal(self) -> i32 {
        match self {
            Self::Fps30 => 0,
            Self::Fps60 => 1,
            Self::Fps120 => 2,
        }
    }

    /// Mode for a selector ordinal.
    #[must_use]
    pub const fn from_ordinal(ordinal: i32) -> Option<Self> {
        match ordinal {
            0 => Some(Self::Fps30),
            1 => Some(Self::Fps60),
            2 => Some(Self::Fps120),
            _ => None,
        }
    }

    /// Fixed preview frame-rate range, in frames per 1000 seconds.
    #[must_use]
    pub const fn fps_range(self) -> (u32, u32) {
        let scaled = self.fps() * 1000;
        (scaled, scaled)
    }
}

impl TryFrom<i32> for FpsMode {
    type Error = CameraError;

    fn try_from(ordinal: i32) -> Result<Self, Self::Error> {
        Self::from_ordinal(ordinal).ok_or(CameraError::InvalidMode(ordinal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectors_map_to_rates() {
        let rates: Vec<_> = (0..3)
            .map(|i| FpsMode::try_from(i).unwrap().fps_range())
            .collect();
        assert_eq!(
            rates,
            [(30_000, 30_000), (60_000, 60_000), (120_000, 120_000)]
        );
        for mode in FpsMode::ALL {
            assert_eq!(FpsMode::from_ordinal(mode.ordinal()), Some(mode));
        }
    }

    #[test]
    fn out_of_range_selectors_are_rejected_not_clamped() {
        for bad in [UNSET_FPS_MODE, 3, 120, i32::MIN, i32::MAX] {
            assert!(matches!(
                FpsMode::try_from(bad),
                Err(CameraError::InvalidMode(v)) if v == bad
            ));
        }
    }
}
