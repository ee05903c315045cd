//! Platform-specific camera implementations.
//!
//! `PlatformHal` names the camera stack for the current target.

cfg_if::cfg_if! {
    if #[cfg(target_os = "android")] {
        pub mod android;
        pub use android::AndroidCameraHal as PlatformHal;
    } else {
        mod fallback;
        pub use fallback::{NoDevice, UnsupportedHal as PlatformHal, UnsupportedSurface};
    }
}
