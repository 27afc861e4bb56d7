//! Architecture detection.

/// Machine architecture of the running host, normalized.
pub fn detect() -> String {
    let cpu_arch = sysinfo::System::cpu_arch();
    if cpu_arch.is_empty() {
        return normalize(std::env::consts::ARCH);
    }
    normalize(&cpu_arch)
}

/// Lowercase a host-reported machine name and fold `aarch64` into `arm64`.
///
/// Every other value passes through unchanged, `x86_64` included.
pub fn normalize(raw: &str) -> String {
    let arch = raw.trim().to_lowercase();
    match arch.as_str() {
        "aarch64" => "arm64".to_string(),
        _ => arch,
    }
}
