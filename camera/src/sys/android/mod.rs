//! Android camera implementation using the `android.hardware.Camera` API via JNI.
//!
//! The vendor VR keys (`vrmode`, `fast-fps-mode`, ...) only exist as string
//! parameters of this API, so parameter blocks cross the JNI boundary in their
//! flattened form (`Camera.Parameters.flatten` / `unflatten`).

use crate::{
    CameraDevice, CameraError, CameraHal, CameraParameters, PreviewSurface, Resolution, TextureId,
};
use jni::errors::Error as JniError;
use jni::objects::{GlobalRef, JObject, JString, JValue};
use jni::{AttachGuard, JNIEnv, JavaVM};
use std::sync::Arc;

const CAMERA_CLASS: &str = "android/hardware/Camera";
const SURFACE_TEXTURE_CLASS: &str = "android/graphics/SurfaceTexture";
const FEATURE_CAMERA: &str = "android.hardware.camera";

/// Camera stack backed by `android.hardware.Camera`.
#[derive(Debug)]
pub struct AndroidCameraHal {
    vm: Arc<JavaVM>,
    context: Option<GlobalRef>,
}

impl AndroidCameraHal {
    /// Create a camera stack from a JNI environment and an Android `Context`.
    ///
    /// # Errors
    /// Returns [`CameraError::Platform`] if the VM or context cannot be
    /// retained.
    pub fn new(env: &mut JNIEnv, context: &JObject) -> Result<Self, CameraError> {
        let vm = env.get_java_vm().map_err(|e| java_error(env, "get_java_vm", e))?;
        let context = env
            .new_global_ref(context)
            .map_err(|e| java_error(env, "new_global_ref context", e))?;

        Ok(Self {
            vm: Arc::new(vm),
            context: Some(context),
        })
    }

    /// Create a camera stack from the process-wide NDK context.
    ///
    /// # Errors
    /// Returns [`CameraError::Platform`] if no VM has been registered.
    pub fn from_ndk_context() -> Result<Self, CameraError> {
        let ctx = ndk_context::android_context();
        // SAFETY: ndk-context hands out the process JavaVM pointer.
        let vm = unsafe { JavaVM::from_raw(ctx.vm().cast()) }
            .map_err(|e| CameraError::Platform(format!("vm attach: {e}")))?;

        let context = if ctx.context().is_null() {
            None
        } else {
            let mut env = vm
                .attach_current_thread()
                .map_err(|e| CameraError::Platform(format!("env attach: {e}")))?;
            // SAFETY: the pointer is a live global reference owned by ndk-context.
            let obj = unsafe { JObject::from_raw(ctx.context().cast()) };
            Some(
                env.new_global_ref(&obj)
                    .map_err(|e| java_error(&mut env, "new_global_ref context", e))?,
            )
        };

        Ok(Self {
            vm: Arc::new(vm),
            context,
        })
    }
}

impl CameraHal for AndroidCameraHal {
    type Surface = SurfaceTexture;
    type Device = AndroidCamera;

    fn open_default(&mut self) -> Result<AndroidCamera, CameraError> {
        let mut env = attach(&self.vm)?;

        let camera = match env.call_static_method(
            CAMERA_CLASS,
            "open",
            "()Landroid/hardware/Camera;",
            &[],
        ) {
            Ok(value) => value.l().map_err(|e| java_error(&mut env, "open result", e))?,
            // Camera.open() throws RuntimeException when another client holds it.
            Err(JniError::JavaException) => {
                clear_exception(&mut env);
                return Err(CameraError::AlreadyInUse);
            }
            Err(e) => return Err(CameraError::Platform(format!("Camera.open: {e}"))),
        };

        if camera.is_null() {
            return Err(CameraError::NotFound);
        }

        let camera = env
            .new_global_ref(camera)
            .map_err(|e| java_error(&mut env, "new_global_ref camera", e))?;

        Ok(AndroidCamera {
            vm: Arc::clone(&self.vm),
            camera,
        })
    }

    fn has_camera_hardware(&self) -> bool {
        let Some(context) = &self.context else {
            return true;
        };
        match package_has_feature(&self.vm, context, FEATURE_CAMERA) {
            Ok(present) => present,
            Err(err) => {
                log::warn!("failed to query camera feature: {err}");
                false
            }
        }
    }
}

fn package_has_feature(
    vm: &JavaVM,
    context: &GlobalRef,
    feature: &str,
) -> Result<bool, CameraError> {
    let mut env = attach(vm)?;

    let package_manager = env
        .call_method(
            context.as_obj(),
            "getPackageManager",
            "()Landroid/content/pm/PackageManager;",
            &[],
        )
        .map_err(|e| java_error(&mut env, "getPackageManager", e))?
        .l()
        .map_err(|e| java_error(&mut env, "getPackageManager result", e))?;

    let feature = env
        .new_string(feature)
        .map_err(|e| java_error(&mut env, "new_string", e))?;

    env.call_method(
        &package_manager,
        "hasSystemFeature",
        "(Ljava/lang/String;)Z",
        &[JValue::Object(&feature)],
    )
    .map_err(|e| java_error(&mut env, "hasSystemFeature", e))?
    .z()
    .map_err(|e| java_error(&mut env, "hasSystemFeature result", e))
}

/// An open `android.hardware.Camera`.
#[derive(Debug)]
pub struct AndroidCamera {
    vm: Arc<JavaVM>,
    camera: GlobalRef,
}

impl AndroidCamera {
    fn call_void(&self, method: &'static str) -> Result<(), CameraError> {
        let mut env = attach(&self.vm)?;
        env.call_method(self.camera.as_obj(), method, "()V", &[])
            .map_err(|e| java_error(&mut env, method, e))?;
        Ok(())
    }

    fn java_parameters<'local>(
        &self,
        env: &mut JNIEnv<'local>,
    ) -> Result<JObject<'local>, CameraError> {
        env.call_method(
            self.camera.as_obj(),
            "getParameters",
            "()Landroid/hardware/Camera$Parameters;",
            &[],
        )
        .map_err(|e| java_error(env, "getParameters", e))?
        .l()
        .map_err(|e| java_error(env, "getParameters result", e))
    }
}

impl CameraDevice<SurfaceTexture> for AndroidCamera {
    fn parameters(&mut self) -> Result<CameraParameters, CameraError> {
        let mut env = attach(&self.vm)?;
        let params = self.java_parameters(&mut env)?;

        let flattened = env
            .call_method(&params, "flatten", "()Ljava/lang/String;", &[])
            .map_err(|e| java_error(&mut env, "flatten", e))?
            .l()
            .map_err(|e| java_error(&mut env, "flatten result", e))?;
        let flattened: String = env
            .get_string(&JString::from(flattened))
            .map_err(|e| java_error(&mut env, "get_string", e))?
            .into();

        Ok(CameraParameters::unflatten(&flattened))
    }

    fn set_parameters(&mut self, params: &CameraParameters) -> Result<(), CameraError> {
        let mut env = attach(&self.vm)?;
        let java_params = self.java_parameters(&mut env)?;

        let flattened = env
            .new_string(params.flatten())
            .map_err(|e| java_error(&mut env, "new_string", e))?;
        env.call_method(
            &java_params,
            "unflatten",
            "(Ljava/lang/String;)V",
            &[JValue::Object(&flattened)],
        )
        .map_err(|e| java_error(&mut env, "unflatten", e))?;

        env.call_method(
            self.camera.as_obj(),
            "setParameters",
            "(Landroid/hardware/Camera$Parameters;)V",
            &[JValue::Object(&java_params)],
        )
        .map_err(|e| java_error(&mut env, "setParameters", e))?;
        Ok(())
    }

    fn set_preview_texture(&mut self, surface: &SurfaceTexture) -> Result<(), CameraError> {
        let mut env = attach(&self.vm)?;
        env.call_method(
            self.camera.as_obj(),
            "setPreviewTexture",
            "(Landroid/graphics/SurfaceTexture;)V",
            &[JValue::Object(surface.as_obj())],
        )
        .map_err(|e| java_error(&mut env, "setPreviewTexture", e))?;
        Ok(())
    }

    fn start_preview(&mut self) -> Result<(), CameraError> {
        self.call_void("startPreview")
    }

    fn stop_preview(&mut self) -> Result<(), CameraError> {
        self.call_void("stopPreview")
    }

    fn release(self) {
        if let Err(err) = self.call_void("release") {
            log::error!("failed to release camera: {err}");
        }
    }
}

/// An `android.graphics.SurfaceTexture` streaming into a GL texture.
///
/// Must be updated on the thread that owns the GL context the texture
/// belongs to.
#[derive(Debug)]
pub struct SurfaceTexture {
    vm: Arc<JavaVM>,
    texture: TextureId,
    inner: GlobalRef,
}

impl SurfaceTexture {
    /// Create a surface texture for the GL texture `texture`.
    ///
    /// # Errors
    /// Returns [`CameraError::Platform`] if the Java object cannot be created.
    pub fn new(env: &mut JNIEnv, texture: TextureId) -> Result<Self, CameraError> {
        let name = i32::try_from(texture.0)
            .map_err(|_| CameraError::Platform(format!("{texture} out of range")))?;

        let obj = env
            .new_object(SURFACE_TEXTURE_CLASS, "(I)V", &[JValue::Int(name)])
            .map_err(|e| java_error(env, "new SurfaceTexture", e))?;
        let inner = env
            .new_global_ref(obj)
            .map_err(|e| java_error(env, "new_global_ref SurfaceTexture", e))?;
        let vm = env.get_java_vm().map_err(|e| java_error(env, "get_java_vm", e))?;

        Ok(Self {
            vm: Arc::new(vm),
            texture,
            inner,
        })
    }

    /// The underlying Java object.
    #[must_use]
    pub fn as_obj(&self) -> &JObject<'static> {
        self.inner.as_obj()
    }
}

impl PreviewSurface for SurfaceTexture {
    fn texture_id(&self) -> TextureId {
        self.texture
    }

    fn set_default_buffer_size(&self, size: Resolution) -> Result<(), CameraError> {
        let width = i32::try_from(size.width)
            .map_err(|_| CameraError::Platform(format!("width {} out of range", size.width)))?;
        let height = i32::try_from(size.height)
            .map_err(|_| CameraError::Platform(format!("height {} out of range", size.height)))?;

        let mut env = attach(&self.vm)?;
        env.call_method(
            self.as_obj(),
            "setDefaultBufferSize",
            "(II)V",
            &[JValue::Int(width), JValue::Int(height)],
        )
        .map_err(|e| java_error(&mut env, "setDefaultBufferSize", e))?;
        Ok(())
    }

    fn update_tex_image(&self) -> Result<(), CameraError> {
        let mut env = attach(&self.vm)?;
        env.call_method(self.as_obj(), "updateTexImage", "()V", &[])
            .map_err(|e| java_error(&mut env, "updateTexImage", e))?;
        Ok(())
    }

    fn timestamp(&self) -> i64 {
        let result = attach(&self.vm).and_then(|mut env| {
            env.call_method(self.as_obj(), "getTimestamp", "()J", &[])
                .map_err(|e| java_error(&mut env, "getTimestamp", e))?
                .j()
                .map_err(|e| java_error(&mut env, "getTimestamp result", e))
        });
        result.unwrap_or_else(|err| {
            log::warn!("{err}");
            0
        })
    }
}

impl Drop for SurfaceTexture {
    fn drop(&mut self) {
        let Ok(mut env) = attach(&self.vm) else {
            return;
        };
        if let Err(e) = env.call_method(self.inner.as_obj(), "release", "()V", &[]) {
            log::warn!("{}", java_error(&mut env, "SurfaceTexture.release", e));
        }
    }
}

fn attach(vm: &JavaVM) -> Result<AttachGuard<'_>, CameraError> {
    vm.attach_current_thread()
        .map_err(|e| CameraError::Platform(format!("env attach: {e}")))
}

fn clear_exception(env: &mut JNIEnv) {
    let _ = env.exception_describe();
    let _ = env.exception_clear();
}

/// Clear any pending Java exception and wrap the failure.
fn java_error(env: &mut JNIEnv, context: &str, err: JniError) -> CameraError {
    if matches!(err, JniError::JavaException) {
        clear_exception(env);
    }
    CameraError::Platform(format!("{context}: {err}"))
}
