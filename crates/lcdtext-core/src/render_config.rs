//! Global rendering configuration
//!
//! Rasterizers coalesce runs of same-colored pixels into single
//! [`fill_area`](crate::traits::Framebuffer::fill_area) calls. That is
//! **enabled by default**; turn it off with `set_coalescing_enabled(false)`
//! or the `LCDTEXT_COALESCE=0` environment variable when a driver's fill
//! path is slower than its pixel path, or to compare output pixel by pixel.
//!
//! ```
//! use lcdtext_core::render_config;
//!
//! render_config::set_coalescing_enabled(false);
//! assert!(!render_config::is_coalescing_enabled());
//! render_config::set_coalescing_enabled(true);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

/// Whether rasterizers batch runs into fills (enabled by default)
static COALESCING_ENABLED: AtomicBool = AtomicBool::new(true);

/// Whether the env var has been checked
static ENV_CHECKED: OnceLock<()> = OnceLock::new();

fn check_env() {
    ENV_CHECKED.get_or_init(|| {
        if let Ok(val) = std::env::var("LCDTEXT_COALESCE") {
            let enabled = !matches!(val.to_lowercase().as_str(), "0" | "false" | "no" | "off");
            COALESCING_ENABLED.store(enabled, Ordering::SeqCst);
            log::info!(
                "Run coalescing {} via LCDTEXT_COALESCE env var",
                if enabled { "enabled" } else { "disabled" }
            );
        }
    });
}

/// Check if run coalescing is enabled
///
/// Reads `LCDTEXT_COALESCE` on first call; later runtime changes via
/// [`set_coalescing_enabled`] win.
pub fn is_coalescing_enabled() -> bool {
    check_env();
    COALESCING_ENABLED.load(Ordering::SeqCst)
}

/// Enable or disable run coalescing at runtime
pub fn set_coalescing_enabled(enabled: bool) {
    check_env();
    COALESCING_ENABLED.store(enabled, Ordering::SeqCst);
    log::debug!(
        "Run coalescing {} via runtime call",
        if enabled { "enabled" } else { "disabled" }
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        // Global state: other tests only ever leave this enabled
        set_coalescing_enabled(false);
        assert!(!is_coalescing_enabled());

        set_coalescing_enabled(true);
        assert!(is_coalescing_enabled());
    }
}
