//! Common constants used throughout changeme.

/// Supported settings file names, searched inside the data directory.
pub const CONFIG_FILES: [&str; 3] = ["changeme.json", "changeme.yml", "changeme.yaml"];

/// Root-relative directories never rewritten or renamed.
pub const DEFAULT_SKIP_DIRS: [&str; 8] = [
    ".git",
    ".mypy_cache",
    "assets",
    "fuzz/artifacts",
    "fuzz/corpus",
    "fuzz/target",
    "scripts",
    "target",
];

/// File name globs excluded from rewriting and renaming.
pub const DEFAULT_DENYLIST: [&str; 4] = ["Cargo.lock", "*.png", "*.ico", "*.icns"];

/// Data files holding the raw external values.
pub const PRIMARY_EMAIL_FILE: &str = "PMAIL";
pub const SECONDARY_EMAIL_FILE: &str = "SMAIL";
pub const DESCRIPTION_FILE: &str = "DESC";

/// Placeholder tokens.
pub const TOKEN_USER: &str = "CHANGEME_USER";
pub const TOKEN_NAME: &str = "CHANGEME_NAME";
pub const TOKEN_BIN: &str = "CHANGEME_BIN";
pub const TOKEN_BIN_LOWER: &str = "changeme_bin";
pub const TOKEN_PRIMARY_EMAIL: &str = "CHANGEME_PMAIL";
pub const TOKEN_SECONDARY_EMAIL: &str = "CHANGEME_SMAIL";
pub const TOKEN_DESCRIPTION: &str = "CHANGEME_DESC";
pub const TOKEN_BARE: &str = "CHANGEME";

/// Square sizes of the themed PNG icons.
pub const ICON_SIZES: [u32; 6] = [16, 32, 64, 128, 256, 512];

/// Edge of the single ICO image.
pub const ICO_SIZE: u32 = 256;

/// Fixed icon slot inside a macOS bundle.
pub const MACOS_BUNDLE_ICON: &str = "Contents/Resources/AppIcon.icns";
