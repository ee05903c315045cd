//! `extern "system"` functions backing the native methods of
//! `com.mozilla.servo.VRCamera`.

#![allow(non_snake_case)]

use jni::JNIEnv;
use jni::objects::{JClass, JObject, JString};
use jni::sys::{JNI_FALSE, JNI_TRUE, jboolean, jint, jlong};
use crate::session_config;
use std::sync::Arc;
use vrkit_camera::sys::android::{AndroidCameraHal, SurfaceTexture};
use vrkit_camera::{
    CameraError, TextureId, VrCamera, has_camera_permission, request_camera_permission,
};
use vrkit_permission::sys::ActivityHost;

struct Binding {
    camera: VrCamera<AndroidCameraHal>,
    // The session only holds the surface weakly.
    _surface: Arc<SurfaceTexture>,
}

fn init_logging() {
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Info)
            .with_tag("VRCamera"),
    );
}

const fn to_jboolean(value: bool) -> jboolean {
    if value { JNI_TRUE } else { JNI_FALSE }
}

fn with_binding<R>(handle: jlong, default: R, f: impl FnOnce(&mut Binding) -> R) -> R {
    if handle == 0 {
        return default;
    }
    // SAFETY: non-zero handles come from `nativeCreate` and stay valid until
    // `nativeDestroy`; Java serializes calls on one session.
    let binding = unsafe { &mut *(handle as *mut Binding) };
    f(binding)
}

fn create(
    env: &mut JNIEnv,
    context: &JObject,
    texture_id: jint,
    config_json: &JString,
) -> Result<Binding, CameraError> {
    let texture = u32::try_from(texture_id)
        .map_err(|_| CameraError::Platform(format!("invalid texture name {texture_id}")))?;

    let json: Option<String> = if config_json.is_null() {
        None
    } else {
        Some(
            env.get_string(config_json)
                .map_err(|e| CameraError::InvalidConfig(e.to_string()))?
                .into(),
        )
    };
    let config = session_config(json.as_deref())?;

    let hal = AndroidCameraHal::new(env, context)?;
    let surface = Arc::new(SurfaceTexture::new(env, TextureId(texture))?);

    Ok(Binding {
        camera: VrCamera::with_config(hal, &surface, config),
        _surface: surface,
    })
}

// ============================================================================
// Session lifecycle
// ============================================================================

/// Create a closed session streaming into GL texture `textureId`.
///
/// `configJson` may be null for the default configuration. Returns `0` on
/// failure.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_mozilla_servo_VRCamera_nativeCreate(
    mut env: JNIEnv,
    _class: JClass,
    context: JObject,
    texture_id: jint,
    config_json: JString,
) -> jlong {
    init_logging();

    match create(&mut env, &context, texture_id, &config_json) {
        Ok(binding) => Box::into_raw(Box::new(binding)) as jlong,
        Err(err) => {
            log::error!("failed to create camera session: {err}");
            0
        }
    }
}

/// Reopen the camera and restart streaming.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_mozilla_servo_VRCamera_nativeResume(
    _env: JNIEnv,
    _class: JClass,
    handle: jlong,
) -> jboolean {
    with_binding(handle, JNI_FALSE, |b| to_jboolean(b.camera.resume().is_ok()))
}

/// Stop streaming and release the camera.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_mozilla_servo_VRCamera_nativePause(
    _env: JNIEnv,
    _class: JClass,
    handle: jlong,
) {
    with_binding(handle, (), |b| b.camera.pause());
}

/// Release the camera and close the session.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_mozilla_servo_VRCamera_nativeClose(
    _env: JNIEnv,
    _class: JClass,
    handle: jlong,
) {
    with_binding(handle, (), |b| b.camera.close());
}

/// Latch the latest frame; returns its timestamp in nanoseconds, or `0`.
///
/// Must be called on the thread owning the texture's GL context.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_mozilla_servo_VRCamera_nativeUpdate(
    _env: JNIEnv,
    _class: JClass,
    handle: jlong,
) -> jlong {
    with_binding(handle, 0, |b| b.camera.update())
}

/// Apply frame-rate mode `0`, `1` or `2` (30, 60, 120 fps).
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_mozilla_servo_VRCamera_nativeConfigureFrameRate(
    _env: JNIEnv,
    _class: JClass,
    handle: jlong,
    mode: jint,
) -> jboolean {
    with_binding(handle, JNI_FALSE, |b| {
        to_jboolean(b.camera.configure_frame_rate(mode))
    })
}

/// The last applied frame-rate mode, or `-1`.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_mozilla_servo_VRCamera_nativeFpsMode(
    _env: JNIEnv,
    _class: JClass,
    handle: jlong,
) -> jint {
    with_binding(handle, vrkit_camera::UNSET_FPS_MODE, |b| {
        b.camera.fps_mode_raw()
    })
}

/// Destroy a session created by `nativeCreate`, releasing the camera.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_mozilla_servo_VRCamera_nativeDestroy(
    _env: JNIEnv,
    _class: JClass,
    handle: jlong,
) {
    if handle != 0 {
        // SAFETY: the handle came from `nativeCreate` and Java drops it after
        // this call.
        drop(unsafe { Box::from_raw(handle as *mut Binding) });
    }
}

// ============================================================================
// Permission helpers
// ============================================================================

/// Whether the camera permission is granted to `activity`.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_mozilla_servo_VRCamera_nativeHasPermission(
    mut env: JNIEnv,
    _class: JClass,
    activity: JObject,
) -> jboolean {
    init_logging();
    let mut host = ActivityHost::new(&mut env, &activity);
    to_jboolean(has_camera_permission(&mut host))
}

/// Prompt `activity` for the camera permission. The result is delivered to
/// `onRequestPermissionsResult` with request code `0`.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_mozilla_servo_VRCamera_nativeRequestPermission(
    mut env: JNIEnv,
    _class: JClass,
    activity: JObject,
) {
    init_logging();
    let mut host = ActivityHost::new(&mut env, &activity);
    request_camera_permission(&mut host);
}
