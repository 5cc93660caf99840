//! Browser/OS detection.
//!
//! Only what the editor branches on: the primary modifier (Cmd vs Ctrl).

use std::sync::OnceLock;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Platform {
    pub ios: bool,
    pub mac: bool,
}

impl Platform {
    /// Whether shortcuts use Cmd rather than Ctrl.
    pub fn uses_meta(&self) -> bool {
        self.mac || self.ios
    }
}

static PLATFORM: OnceLock<Platform> = OnceLock::new();

/// Get cached platform info. Detection runs once on first call.
pub fn platform() -> &'static Platform {
    PLATFORM.get_or_init(detect_platform)
}

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
fn detect_platform() -> Platform {
    let Some(window) = web_sys::window() else {
        return Platform::default();
    };

    let navigator = window.navigator();
    let user_agent = navigator.user_agent().unwrap_or_default().to_lowercase();
    let platform_str = navigator.platform().unwrap_or_default().to_lowercase();

    Platform::from_strings(&user_agent, &platform_str)
}

#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
fn detect_platform() -> Platform {
    Platform::default()
}

impl Platform {
    /// Classify lowercased `navigator.userAgent` and `navigator.platform`.
    pub fn from_strings(user_agent: &str, platform_str: &str) -> Self {
        // iPadOS reports a Mac platform; the UA still names the device on iPhone.
        let ios = user_agent.contains("iphone")
            || user_agent.contains("ipad")
            || user_agent.contains("ipod");
        let mac = platform_str.contains("mac") && !ios;

        Platform { ios, mac }
    }
}
