// File: crates/screener-chart/build.rs
// Summary: Links the extra Windows system libraries Skia's font manager pulls in.

fn main() {
    #[cfg(target_os = "windows")]
    {
        // RegOpenKeyExW / RegQueryInfoKeyW come from advapi32.
        println!("cargo:rustc-link-lib=advapi32");
    }
}
