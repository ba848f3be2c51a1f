/// File name of the executable shipped in every platform package, without extension.
pub const BINARY_NAME: &str = "commitfmt";

/// Common prefix of the platform package names.
pub const PACKAGE_PREFIX: &str = "commitfmt";

pub const PACKAGE_DELIMITER: char = '-';

pub const MANIFEST_FILE: &str = "package.json";

pub const NODE_MODULES: &str = "node_modules";

/// Global folders Node consults after `NODE_PATH`, relative to the home directory.
pub const GLOBAL_FOLDERS: [&str; 2] = [".node_modules", ".node_libraries"];

pub const NODE_PATH_ENV: &str = "NODE_PATH";

pub const WINDOWS_TAG: &str = "windows";

pub const WINDOWS_EXTENSION: &str = ".exe";

/// Raw `process.platform` values that denote a Windows environment.
pub const WINDOWS_FAMILY: [&str; 2] = ["win32", "cygwin"];

pub const CONFIG_ENV: &str = "COMMITFMT_LOCATE_CONFIG";
