// build.rs - TOML-driven input limit generation
use std::env;
use std::fs;
use std::path::Path;

/// `ID_LENGTH + 1 + max(SECRET_SIZES)`; mirrors `grammar::LONGEST_TOKEN_LENGTH`
const LONGEST_TOKEN_LENGTH: usize = 31;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    input: InputLimits,
    cli: CliLimits,
}

#[derive(serde::Deserialize)]
struct InputLimits {
    max_token_length: usize,
    max_document_size: usize,
}

#[derive(serde::Deserialize)]
struct CliLimits {
    max_file_size: u64,
    max_batch_tokens: usize,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=BOOTSTRAP_TOKEN_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=BOOTSTRAP_TOKEN_CONFIG_DIR");

    let profile =
        env::var("BOOTSTRAP_TOKEN_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("BOOTSTRAP_TOKEN_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Find workspace root (parent of bootstrap_token directory)
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_security_constraints(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_security_constraints(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_TOKEN_LENGTH: usize = 4096;
    const ABSOLUTE_MAX_DOCUMENT_SIZE: usize = 1_048_576;
    const ABSOLUTE_MAX_FILE_SIZE: u64 = 100_000_000;

    // Quotes around the longest combined form
    let longest_document = LONGEST_TOKEN_LENGTH + 2;

    if config.input.max_token_length < LONGEST_TOKEN_LENGTH {
        panic!(
            "CONFIG: max_token_length {} would reject valid tokens (minimum {})",
            config.input.max_token_length, LONGEST_TOKEN_LENGTH
        );
    }

    if config.input.max_document_size < longest_document {
        panic!(
            "CONFIG: max_document_size {} would reject valid documents (minimum {})",
            config.input.max_document_size, longest_document
        );
    }

    if config.input.max_token_length > ABSOLUTE_MAX_TOKEN_LENGTH {
        panic!("SECURITY: max_token_length exceeds absolute maximum");
    }

    if config.input.max_document_size > ABSOLUTE_MAX_DOCUMENT_SIZE {
        panic!("SECURITY: max_document_size exceeds absolute maximum");
    }

    if config.cli.max_file_size > ABSOLUTE_MAX_FILE_SIZE {
        panic!("SECURITY: max_file_size exceeds absolute maximum");
    }

    if config.cli.max_batch_tokens == 0 {
        panic!("CONFIG: max_batch_tokens must be at least 1");
    }

    if profile == "production" {
        if config.input.max_token_length > 256 {
            panic!("PRODUCTION: max_token_length too high for production");
        }
        if config.cli.max_file_size > 1_048_576 {
            panic!("PRODUCTION: max_file_size too high for production");
        }
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod input {{
        pub const MAX_TOKEN_LENGTH: usize = {};
        pub const MAX_DOCUMENT_SIZE: usize = {};
    }}

    pub mod cli {{
        pub const MAX_FILE_SIZE: u64 = {};
        pub const MAX_BATCH_TOKENS: usize = {};
    }}
}}
"#,
        profile,
        config.input.max_token_length,
        config.input.max_document_size,
        config.cli.max_file_size,
        config.cli.max_batch_tokens,
    );

    fs::write(output_path, constants_code).unwrap();
}
