// File: crates/heatmap-core/build.rs
// Summary: Links the Windows system libraries Skia needs for font and ICU lookups.

fn main() {
    #[cfg(target_os = "windows")]
    {
        // Needed for RegOpenKeyExW, RegQueryInfoKeyW, etc.
        println!("cargo:rustc-link-lib=advapi32");
    }
}
