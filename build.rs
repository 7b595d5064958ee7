use std::cmp::Ordering;
use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::process::Command;

#[allow(dead_code)]
#[path = "src/table/generate.rs"]
mod generate;

// CPU features we want to detect
#[derive(PartialEq, Eq, Debug)]
struct CpuFeature {
    name: &'static str,
    // Every flag must be reported by the host for the feature to count as detected
    flags: &'static [&'static str],
    cfg_flag: &'static str,
    detected: bool,
}

impl CpuFeature {
    // Define priority order between CPU Features (Lowest number == Highest Priority)
    fn priority(&self) -> usize {
        match self.name {
            "avx2" => 0,
            "neon" => 1,
            _ => usize::MAX, // lowest priority by default
        }
    }

    // Groups all supported CPU features that have a backend in this crate
    fn features() -> Vec<CpuFeature> {
        vec![
            CpuFeature {
                name: "avx2",
                flags: &["avx2", "fma"],
                cfg_flag: "avx2",
                detected: false,
            },
            CpuFeature {
                name: "neon",
                flags: &["neon"],
                cfg_flag: "neon",
                detected: false,
            },
        ]
    }
}

impl Ord for CpuFeature {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority().cmp(&other.priority())
    }
}

impl PartialOrd for CpuFeature {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Feature detection trait to make implementations more modular
trait CpuFeatureDetector {
    fn detect_features(&self, features: &mut [CpuFeature]);
    fn is_applicable(&self) -> bool;
}

// Linux CPU feature detector
struct LinuxDetector;
impl CpuFeatureDetector for LinuxDetector {
    fn detect_features(&self, features: &mut [CpuFeature]) {
        if let Ok(cpuinfo) = fs::read_to_string("/proc/cpuinfo") {
            let words: Vec<String> = cpuinfo
                .to_lowercase()
                .split_whitespace()
                .map(str::to_string)
                .collect();
            for feature in features.iter_mut() {
                feature.detected = feature
                    .flags
                    .iter()
                    .all(|flag| words.iter().any(|word| word == flag));
            }
        }
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "linux")
    }
}

// macOS CPU feature detector
struct MacOSDetector;
impl CpuFeatureDetector for MacOSDetector {
    fn detect_features(&self, features: &mut [CpuFeature]) {
        let output = Command::new("sysctl").args(["-a"]).output();

        if let Ok(output) = output {
            let contents = String::from_utf8_lossy(&output.stdout).to_lowercase();

            for feature in features.iter_mut() {
                match feature.name {
                    "avx2" => {
                        feature.detected = contents.contains("hw.optional.avx2_0: 1")
                            && contents.contains("hw.optional.fma: 1")
                    }
                    "neon" => feature.detected = contents.contains("hw.optional.neon: 1"),
                    _ => {}
                }
            }
        }
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "macos")
    }
}

// Factory that creates the appropriate detector for the current OS
struct PlatformDetector;
impl PlatformDetector {
    fn cpu_features_detectors() -> Vec<Box<dyn CpuFeatureDetector>> {
        vec![Box::new(LinuxDetector), Box::new(MacOSDetector)]
    }

    fn detect_cpu_features(features: &mut [CpuFeature]) {
        // Find the applicable detector and use it
        for detector in Self::cpu_features_detectors() {
            if detector.is_applicable() {
                detector.detect_features(features);
                break;
            }
        }
    }

    fn apply(features: &mut [CpuFeature], target_arch: &str) {
        // NEON is part of the aarch64 baseline and the backend only exists there
        for feature in features.iter_mut() {
            match feature.name {
                "neon" => feature.detected = target_arch == "aarch64",
                "avx2" => feature.detected &= target_arch == "x86_64",
                _ => {}
            }
        }

        // Sort features by priority (highest first)
        features.sort();

        // Find and use the highest detected feature (if any)
        // if no feature is detected, use fallback implementation
        let cfg_flag = features
            .iter()
            .find(|cpu_feature| cpu_feature.detected)
            .map(|cpu_feature| cpu_feature.cfg_flag)
            .unwrap_or("fallback");

        println!("cargo:rustc-cfg={cfg_flag}");

        println!("cargo::rustc-check-cfg=cfg(avx2)");
        println!("cargo::rustc-check-cfg=cfg(neon)");
        println!("cargo::rustc-check-cfg=cfg(fallback)");
    }
}

// Writes the 2^(k/2048) table as an f32 array literal. `{:?}` prints the shortest
// representation that parses back to the same bits.
fn write_exp2_table(out_dir: &Path) {
    let mut source = String::new();
    let _ = writeln!(source, "// Generated by build.rs. Do not edit.");
    let _ = writeln!(
        source,
        "pub(crate) const EXP2_TABLE_DATA: [f32; {}] = [",
        generate::TABLE_LEN
    );
    for k in 0..generate::TABLE_LEN {
        let _ = writeln!(source, "    {:?},", generate::exp2_entry(k));
    }
    let _ = writeln!(source, "];");

    let path = out_dir.join("exp2_table.rs");
    fs::write(&path, source).expect("Failed to write exp2 table");
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src/table/generate.rs");

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    write_exp2_table(Path::new(&out_dir));

    let mut features = CpuFeature::features();

    // Determine if we're cross-compiling
    let host = env::var("HOST").unwrap_or_default();
    let target = env::var("TARGET").unwrap_or_default();
    let target_arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();

    // Only run CPU detection for native builds
    if host == target {
        PlatformDetector::detect_cpu_features(&mut features);
    }

    PlatformDetector::apply(&mut features, &target_arch);
}
