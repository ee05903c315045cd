//! Platform-specific permission hosts.

cfg_if::cfg_if! {
    if #[cfg(target_os = "android")] {
        pub mod android;
        pub use android::ActivityHost;
    } else {
        mod desktop;
        pub use desktop::SystemHost;
    }
}
