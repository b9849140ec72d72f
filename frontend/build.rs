use std::env;
use std::fs;
use std::path::Path;

// Exposes `.env` entries to `option_env!` unless the variable is already set.
fn main() {
    let env_file = Path::new(".env");

    if env_file.exists() {
        println!("cargo:rerun-if-changed=.env");

        if let Ok(contents) = fs::read_to_string(env_file) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }

                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim().trim_matches('"');
                    if env::var(key).is_err() {
                        println!("cargo:rustc-env={}={}", key, value);
                    }
                }
            }
        }
    }

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=MONEYBANK_API_URL");
    println!("cargo:rerun-if-env-changed=MONEYBANK_IMAGE_URL");
    println!("cargo:rerun-if-env-changed=MONEYBANK_LOG");
}
