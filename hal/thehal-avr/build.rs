//! Build script for thehal-avr
//!
//! - Reads the CPU frequency from `THEHAL_CPU_HZ` (default 16 MHz)
//! - Rejects frequencies the Timer0 tick engine cannot track exactly
//! - Writes the chosen value to `$OUT_DIR/cpu.rs`

use std::env;
use std::fs;
use std::path::PathBuf;

const DEFAULT_CPU_HZ: u32 = 16_000_000;
const PRESCALER: u32 = 64;

fn main() {
    println!("cargo:rerun-if-env-changed=THEHAL_CPU_HZ");
    println!("cargo:rerun-if-changed=build.rs");

    let cpu_hz = match env::var("THEHAL_CPU_HZ") {
        Ok(raw) => match raw.trim().replace('_', "").parse::<u32>() {
            Ok(hz) => hz,
            Err(e) => {
                panic!(
                    "\n\
                    ╔══════════════════════════════════════════════════════════════════╗\n\
                    ║  ERROR: THEHAL_CPU_HZ is not a number                            ║\n\
                    ╚══════════════════════════════════════════════════════════════════╝\n\
                    \n  value: {:?}\n  error: {}\n",
                    raw, e
                );
            }
        },
        Err(_) => DEFAULT_CPU_HZ,
    };

    let cycles_per_us = cpu_hz / 1_000_000;
    if cpu_hz % 1_000_000 != 0 || cycles_per_us == 0 || PRESCALER % cycles_per_us != 0 {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: unsupported CPU frequency for the Timer0 tick engine     ║\n\
            ║                                                                  ║\n\
            ║  micros() scales timer ticks by 64 / (CPU MHz), so the clock     ║\n\
            ║  must be 1, 2, 4, 8, 16, 32 or 64 MHz.                           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n\
            \n  THEHAL_CPU_HZ = {}\n",
            cpu_hz
        );
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    let source = format!(
        "/// CPU clock in Hz, from `THEHAL_CPU_HZ` at build time\n\
         pub const CPU_HZ: u32 = {};\n",
        cpu_hz
    );
    fs::write(out_dir.join("cpu.rs"), source).expect("failed to write cpu.rs");
}
