//! Parameter profiles for VR preview.
//!
//! Headsets with a VR-capable camera (e.g. Gear VR class devices) expose
//! vendor keys that cut ISP processing and lock the preview to a fixed high
//! frame rate. These functions edit a parameter block in place; writing it
//! back to the device is the session's job.

use crate::{CameraParameters, FocusMode, FpsMode, Resolution, keys};

/// Apply the VR preview profile for `mode`.
///
/// Returns `false`, leaving `params` untouched, when the device does not
/// declare `vrmode-supported`.
pub fn apply_vr_mode(params: &mut CameraParameters, mode: FpsMode) -> bool {
    if !params.vr_mode_supported() {
        return false;
    }

    let (min, max) = mode.fps_range();
    params.set_preview_fps_range(min, max);
    params.set_video_stabilization(false);
    params.set_focus_mode(FocusMode::ContinuousVideo);
    put_vendor(params, keys::FAST_FPS_MODE, mode.ordinal());
    put_vendor(params, keys::VR_MODE, 1);
    if params.ois_supported() {
        put_vendor(params, keys::OIS, "center");
    }
    true
}

/// Apply the full preview setup used when sessions configure themselves on
/// open.
///
/// Unlike [`apply_vr_mode`], the frame-rate range is written whether or not
/// the device supports VR mode; the vendor `vrmode` flag only when it does.
pub fn apply_automatic(params: &mut CameraParameters, size: Resolution, mode: FpsMode) {
    params.set_preview_size(size);
    params.set_recording_hint(false);
    params.set_focus_mode(FocusMode::Infinity);
    params.set_video_stabilization(false);
    put_vendor(params, keys::FAST_FPS_MODE, mode.ordinal());

    let (min, max) = mode.fps_range();
    params.set_preview_fps_range(min, max);

    if params.ois_supported() {
        put_vendor(params, keys::OIS, "center");
    }
    if params.vr_mode_supported() {
        log::info!("vr mode supported");
        put_vendor(params, keys::VR_MODE, 1);
    }
}

fn put_vendor(params: &mut CameraParameters, key: &str, value: impl std::fmt::Display) {
    // Keys and values here are fixed tokens.
    if let Err(err) = params.set(key, value) {
        log::error!("{err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: &str = "preview-fps-range=15000,30000;video-stabilization=true;focus-mode=auto";

    #[test]
    fn vr_mode_is_skipped_without_support() {
        let mut params = CameraParameters::unflatten(PLAIN);
        assert!(!apply_vr_mode(&mut params, FpsMode::Fps60));
        assert_eq!(params.flatten(), PLAIN);
    }

    #[test]
    fn vr_mode_writes_vendor_profile() {
        let mut params =
            CameraParameters::unflatten(&format!("{PLAIN};vrmode-supported=true;ois-supported=true"));
        assert!(apply_vr_mode(&mut params, FpsMode::Fps120));

        assert_eq!(params.preview_fps_range(), Some((120_000, 120_000)));
        assert_eq!(params.video_stabilization(), Some(false));
        assert_eq!(params.focus_mode(), Some(FocusMode::ContinuousVideo));
        assert_eq!(params.get(keys::VR_MODE), Some("1"));
        assert_eq!(params.get(keys::FAST_FPS_MODE), Some("2"));
        assert_eq!(params.get(keys::OIS), Some("center"));
    }

    #[test]
    fn vr_mode_leaves_ois_alone_without_support() {
        let mut params = CameraParameters::unflatten("vrmode-supported=true");
        assert!(apply_vr_mode(&mut params, FpsMode::Fps30));
        assert_eq!(params.get(keys::OIS), None);
    }

    #[test]
    fn automatic_profile_sets_rate_without_vr_support() {
        let mut params = CameraParameters::unflatten(PLAIN);
        apply_automatic(&mut params, Resolution::FULL_HD, FpsMode::Fps60);

        assert_eq!(params.preview_size(), Some(Resolution::FULL_HD));
        assert_eq!(params.preview_fps_range(), Some((60_000, 60_000)));
        assert_eq!(params.focus_mode(), Some(FocusMode::Infinity));
        assert_eq!(params.get(keys::RECORDING_HINT), Some("false"));
        assert_eq!(params.get(keys::FAST_FPS_MODE), Some("1"));
        assert_eq!(params.get(keys::VR_MODE), None);
    }

    #[test]
    fn automatic_profile_enables_vr_mode_when_supported() {
        let mut params = CameraParameters::unflatten("vrmode-supported=TRUE");
        apply_automatic(&mut params, Resolution::HD, FpsMode::Fps30);

        assert_eq!(params.get(keys::VR_MODE), Some("1"));
        assert_eq!(params.preview_size(), Some(Resolution::HD));
    }
}
