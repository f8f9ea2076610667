//! Apple platform build utilities.

use std::path::{Path, PathBuf};

/// Configuration for Swift compilation.
#[derive(Debug, Clone)]
pub struct AppleSwiftConfig {
    /// The crate/module name (e.g., "touchkit-biometric").
    pub pkg_name: String,
    /// Swift source files to compile, relative to the crate root.
    pub swift_sources: Vec<PathBuf>,
    /// Output library name (e.g., "LocalAuthHelper").
    pub lib_name: String,
    /// Frameworks to link.
    pub frameworks: Vec<String>,
}

impl AppleSwiftConfig {
    /// Create a new config with required fields. `Foundation` is always linked.
    #[must_use]
    pub fn new(pkg_name: impl Into<String>, lib_name: impl Into<String>) -> Self {
        Self {
            pkg_name: pkg_name.into(),
            swift_sources: Vec::new(),
            lib_name: lib_name.into(),
            frameworks: vec!["Foundation".to_string()],
        }
    }

    /// Add a Swift source file.
    #[must_use]
    pub fn swift_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.swift_sources.push(path.into());
        self
    }

    /// Add a framework to link.
    #[must_use]
    pub fn framework(mut self, name: impl Into<String>) -> Self {
        self.frameworks.push(name.into());
        self
    }
}

/// SDK name, `swiftc` target triple and Swift runtime directory for a cargo target.
#[cfg_attr(not(any(target_os = "ios", target_os = "macos")), allow(dead_code))]
fn target_settings(target: &str) -> (&'static str, &'static str, &'static str) {
    if target.contains("ios") {
        if target.starts_with("x86_64") {
            ("iphonesimulator", "x86_64-apple-ios14.0-simulator", "iphonesimulator")
        } else if target.contains("sim") {
            ("iphonesimulator", "arm64-apple-ios14.0-simulator", "iphonesimulator")
        } else {
            ("iphoneos", "arm64-apple-ios14.0", "iphoneos")
        }
    } else if target.starts_with("aarch64") {
        ("macosx", "arm64-apple-macos12.3", "macosx")
    } else {
        ("macosx", "x86_64-apple-macos12.3", "macosx")
    }
}

#[cfg_attr(not(any(target_os = "ios", target_os = "macos")), allow(dead_code))]
fn xcrun(args: &[&str]) -> String {
    let output = std::process::Command::new("xcrun")
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("xcrun {args:?} failed: {e}"));
    String::from_utf8(output.stdout)
        .expect("xcrun printed non UTF-8 output")
        .trim()
        .to_string()
}

/// Write the bridging header that exposes the generated C glue to Swift.
#[cfg_attr(not(any(target_os = "ios", target_os = "macos")), allow(dead_code))]
fn write_bridging_header(out_dir: &Path, pkg_name: &str) -> PathBuf {
    let core_h = out_dir.join("SwiftBridgeCore.h");
    let pkg_h = out_dir.join(format!("{pkg_name}/{pkg_name}.h"));
    let bridging_h = out_dir.join("Bridging-Header.h");

    let content = format!(
        "#include \"{}\"\n#include \"{}\"\n",
        core_h.display(),
        pkg_h.display()
    );
    std::fs::write(&bridging_h, content).expect("Failed to write bridging header");
    bridging_h
}

/// Concatenate the generated Swift glue and the crate's Swift sources into one file.
#[cfg_attr(not(any(target_os = "ios", target_os = "macos")), allow(dead_code))]
fn combine_sources(out_dir: &Path, manifest_dir: &Path, config: &AppleSwiftConfig) -> PathBuf {
    let generated = [
        out_dir.join("SwiftBridgeCore.swift"),
        out_dir.join(format!("{0}/{0}.swift", config.pkg_name)),
    ];
    let sources = config.swift_sources.iter().map(|source| manifest_dir.join(source));

    let mut combined = String::new();
    for path in generated.into_iter().chain(sources) {
        let content = std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));
        combined.push_str(&content);
        combined.push('\n');
    }

    let combined_swift = out_dir.join(format!("Combined{}.swift", config.lib_name));
    std::fs::write(&combined_swift, combined).expect("Failed to write combined Swift file");
    combined_swift
}

/// Compile Swift code and link it into the crate.
///
/// This handles:
/// 1. Swift bridge generation
/// 2. Creating the bridging header
/// 3. Compiling Swift to an object file
/// 4. Creating a static library
/// 5. Linking the Swift runtime and frameworks
///
/// # Arguments
/// * `bridge_rs` - Path to the Rust bridge module
/// * `config` - Swift compilation configuration
///
/// # Panics
/// Panics if any tool in the pipeline fails. Build scripts report errors this way.
#[cfg(any(target_os = "ios", target_os = "macos"))]
pub fn compile_swift(bridge_rs: &str, config: &AppleSwiftConfig) {
    use std::env;
    use std::process::Command;

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let target = env::var("TARGET").unwrap();
    let (sdk, swift_target, runtime_dir) = target_settings(&target);

    println!("cargo:rerun-if-changed={bridge_rs}");
    for source in &config.swift_sources {
        println!("cargo:rerun-if-changed={}", manifest_dir.join(source).display());
    }

    swift_bridge_build::parse_bridges(vec![bridge_rs])
        .write_all_concatenated(out_dir.clone(), &config.pkg_name);

    let bridging_h = write_bridging_header(&out_dir, &config.pkg_name);
    let combined_swift = combine_sources(&out_dir, &manifest_dir, config);

    let obj_file = out_dir.join(format!("{}.o", config.lib_name));
    let sdk_path = xcrun(&["--sdk", sdk, "--show-sdk-path"]);

    let mut swiftc = Command::new("swiftc");
    swiftc
        .arg("-emit-object")
        .arg("-o")
        .arg(&obj_file)
        .arg("-sdk")
        .arg(&sdk_path)
        .arg("-target")
        .arg(swift_target)
        .arg("-import-objc-header")
        .arg(&bridging_h)
        .arg("-parse-as-library")
        .arg("-module-name")
        .arg(&config.lib_name)
        .arg(&combined_swift);

    let output = swiftc.output().expect("Failed to run swiftc");
    if !output.status.success() {
        eprintln!("swiftc args: {:?}", swiftc.get_args().collect::<Vec<_>>());
        eprintln!("{}", String::from_utf8_lossy(&output.stderr));
        panic!("Swift compilation failed");
    }

    let lib_file = out_dir.join(format!("lib{}.a", config.lib_name));
    let ar_status = Command::new("ar")
        .arg("rcs")
        .arg(&lib_file)
        .arg(&obj_file)
        .status()
        .expect("Failed to run ar");
    assert!(ar_status.success(), "ar failed");

    println!("cargo:rustc-link-search=native={}", out_dir.display());
    println!("cargo:rustc-link-lib=static={}", config.lib_name);

    let swiftc_path = PathBuf::from(xcrun(&["--find", "swiftc"]));
    if let Some(toolchain) = swiftc_path.parent().and_then(Path::parent) {
        let runtime = toolchain.join("lib/swift").join(runtime_dir);
        println!("cargo:rustc-link-search=native={}", runtime.display());
    }
    println!("cargo:rustc-link-search=native=/usr/lib/swift");

    for framework in &config.frameworks {
        println!("cargo:rustc-link-lib=framework={framework}");
    }
}

/// No-op on non-Apple hosts.
#[cfg(not(any(target_os = "ios", target_os = "macos")))]
pub const fn compile_swift(_bridge_rs: &str, _config: &AppleSwiftConfig) {}
