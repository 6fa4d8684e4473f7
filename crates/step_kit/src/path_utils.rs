use std::path::MAIN_SEPARATOR;

/// Converts `\` separators to `/`.
pub fn to_posix_path(path: &str) -> String {
    path.replace('\\', "/")
}

/// Converts `/` separators to `\`.
pub fn to_win32_path(path: &str) -> String {
    path.replace('/', "\\")
}

/// Converts either separator to the one used by the current platform.
pub fn to_platform_path(path: &str) -> String {
    path.chars()
        .map(|ch| match ch {
            '/' | '\\' => MAIN_SEPARATOR,
            other => other,
        })
        .collect()
}
