fn main() {
    // Re-export the build target triple so release assets can be matched
    // against the platform the binary actually runs on.
    let target = std::env::var("TARGET").expect("cargo always sets TARGET for build scripts");
    println!("cargo:rustc-env=TARGET_TRIPLE={target}");
    println!("cargo:rerun-if-changed=build.rs");
}
