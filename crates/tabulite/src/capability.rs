//! Process-wide color capability.
//!
//! Whether escape sequences are emitted is decided once per process: the
//! first query runs a detector (by default, "is stdout an interactive
//! terminal?") and caches the answer. [`set_colors_enabled`] forces the
//! answer either way, and [`set_color_detector`] swaps the detector for
//! testing.
//!
//! ```rust
//! use tabulite::{colors_enabled, set_colors_enabled};
//!
//! set_colors_enabled(false);
//! assert!(!colors_enabled());
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard, PoisonError};

use console::Term;
use once_cell::sync::Lazy;

type ColorDetector = fn() -> bool;

struct Capability {
    detector: ColorDetector,
    cached: Option<bool>,
}

static CAPABILITY: Lazy<Mutex<Capability>> = Lazy::new(|| {
    Mutex::new(Capability {
        detector: stdout_is_terminal,
        cached: None,
    })
});

fn capability() -> MutexGuard<'static, Capability> {
    CAPABILITY.lock().unwrap_or_else(PoisonError::into_inner)
}

fn stdout_is_terminal() -> bool {
    Term::stdout().is_term()
}

/// Returns whether color output is enabled for this process.
///
/// The detector runs at most once; later calls return the cached answer
/// until [`set_colors_enabled`] or [`set_color_detector`] changes it.
pub fn colors_enabled() -> bool {
    let mut cap = capability();
    if let Some(enabled) = cap.cached {
        return enabled;
    }
    let enabled = (cap.detector)();
    cap.cached = Some(enabled);
    enabled
}

/// Forces color output on or off for the whole process.
///
/// Returns the new state.
pub fn set_colors_enabled(enabled: bool) -> bool {
    capability().cached = Some(enabled);
    enabled
}

/// Replaces the detector used to decide color capability.
///
/// Any cached answer is dropped, so the next [`colors_enabled`] call runs
/// the new detector.
///
/// ```rust
/// use tabulite::{colors_enabled, set_color_detector};
///
/// set_color_detector(|| true);
/// assert!(colors_enabled());
/// ```
pub fn set_color_detector(detector: ColorDetector) {
    let mut cap = capability();
    cap.detector = detector;
    cap.cached = None;
}

/// User-facing color preference, as typically taken from a `--color` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Follow the process-wide capability.
    #[default]
    Auto,
    /// Always emit escape sequences.
    Always,
    /// Never emit escape sequences.
    Never,
}

impl ColorChoice {
    /// Resolves the choice to a concrete decision about whether to use color.
    pub fn should_use_color(&self) -> bool {
        match self {
            ColorChoice::Auto => colors_enabled(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

impl FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            other => Err(format!(
                "invalid color choice '{}': expected auto, always or never",
                other
            )),
        }
    }
}

impl fmt::Display for ColorChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColorChoice::Auto => "auto",
            ColorChoice::Always => "always",
            ColorChoice::Never => "never",
        };
        f.write_str(name)
    }
}
