//! Operating system detection.

/// Lowercased kernel/platform name of the running host.
///
/// This follows the vocabulary release publishers use in asset names
/// (`linux`, `darwin`, `windows`, `freebsd`), so macOS reports `darwin`.
pub fn detect() -> String {
    normalize(host_name())
}

/// Lowercase a host-reported platform name.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn host_name() -> &'static str {
    match std::env::consts::OS {
        "macos" | "ios" => "Darwin",
        "linux" | "android" => "Linux",
        "windows" => "Windows",
        "freebsd" => "FreeBSD",
        "netbsd" => "NetBSD",
        "openbsd" => "OpenBSD",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_lowercases() {
        assert_eq!(normalize("Linux"), "linux");
        assert_eq!(normalize("Darwin"), "darwin");
        assert_eq!(normalize(" FreeBSD\n"), "freebsd");
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn detect_linux() {
        assert_eq!(detect(), "linux");
    }

    #[test]
    #[cfg(target_os = "macos")]
    fn detect_macos_as_darwin() {
        assert_eq!(detect(), "darwin");
    }
}
