//! Application-wide constants
//!
//! This module contains all magic numbers and string literals used throughout
//! the application, providing a single source of truth for constant values.

/// Locations relative to the user's home directory
pub mod paths {
    /// Directory holding per-configuration layout scripts
    pub const SCRIPT_DIR: &str = ".screenlayout";

    /// Directory for resource fragments included from ~/.Xresources
    pub const XRESOURCES_DIR: &str = ".Xresources.d";

    /// Generated resource fragment consumed by the i3 config
    pub const XRESOURCES_FILE: &str = "i3";

    /// Root resource file handed to xrdb on reload
    pub const XRESOURCES_ROOT: &str = ".Xresources";

    /// Single-instance lock file name (in XDG_RUNTIME_DIR or cache dir)
    pub const LOCK_FILE: &str = "xrandr-autolayout.lock";
}

/// Config file location
pub mod config {
    /// Directory under the user config dir
    pub const APP_DIR: &str = "xrandr-autolayout";

    /// Config filename
    pub const FILENAME: &str = "config.json";
}

/// External programs
pub mod commands {
    /// Display enumeration and fallback reset
    pub const XRANDR: &str = "xrandr";

    /// X resource database loader
    pub const XRDB: &str = "xrdb";

    /// i3 IPC client
    pub const I3_MSG: &str = "i3-msg";

    /// Argument asking i3 to reload its config
    pub const I3_RELOAD: &str = "reload";
}

/// Polling loop timing
pub mod polling {
    /// Seconds between two polls
    pub const DEFAULT_INTERVAL_SECS: u64 = 3;

    pub const MIN_INTERVAL_SECS: u64 = 1;

    pub const MAX_INTERVAL_SECS: u64 = 60;
}

/// Configuration fingerprint and script naming
pub mod identity {
    /// Characters kept from the encoded EDID digest
    pub const HASH_LENGTH: usize = 10;

    /// Joins name and hash inside a token, and tokens inside a script name
    pub const SEPARATOR: &str = "_";

    /// Layout script extension
    pub const SCRIPT_EXTENSION: &str = "sh";
}

/// Display classification thresholds
pub mod classify {
    /// Aspect ratio above which a display counts as ultrawide
    pub const ULTRAWIDE_ASPECT: f64 = 2.0;
}

/// X resource output
pub mod xresources {
    /// Resource name prefix
    pub const PREFIX: &str = "i3.output";

    /// Aliases for output indices 0, 1 and 2
    pub const ALIASES: [&str; 3] = ["primary", "secondary", "third"];
}

/// X11 protocol constants
pub mod x11 {
    /// RandR output property carrying the raw EDID block
    pub const EDID_ATOM: &[u8] = b"EDID";

    /// RandR version we negotiate (output properties need 1.2+)
    pub const RANDR_MAJOR: u32 = 1;
    pub const RANDR_MINOR: u32 = 5;

    /// Property format for byte arrays
    pub const FORMAT_8: u8 = 8;
}
