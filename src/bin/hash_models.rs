//! Digest manifest utility for bpsense model artifacts.
//!
//! Writes `manifest.json` listing the SHA-256 of each model JSON in a directory,
//! so the app can detect a modified or swapped artifact at load time.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin hash_models -- <model_dir> [--file <name>]...
//! ```
//!
//! Without `--file`, every `*.json` in the directory except the manifest
//! itself is hashed.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use bpsense::adapters::manifest::{ArtifactManifest, MANIFEST_FILE};

fn usage() -> String {
    "Usage: hash_models <model_dir> [--file <name>]...".to_string()
}

fn parse_args() -> Result<(PathBuf, Vec<String>), String> {
    let mut args = env::args().skip(1);
    let mut model_dir: Option<PathBuf> = None;
    let mut files: Vec<String> = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--file" => {
                let v = args.next().ok_or_else(usage)?;
                files.push(v);
            }
            "-h" | "--help" => return Err(usage()),
            _ => {
                if model_dir.is_none() {
                    model_dir = Some(PathBuf::from(arg));
                } else {
                    return Err(usage());
                }
            }
        }
    }

    let model_dir = model_dir.ok_or_else(usage)?;
    Ok((model_dir, files))
}

fn discover_model_files(model_dir: &Path) -> Result<Vec<String>, String> {
    let entries =
        fs::read_dir(model_dir).map_err(|e| format!("Failed to list {model_dir:?}: {e}"))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| format!("Failed to list {model_dir:?}: {e}"))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(".json") && name != MANIFEST_FILE && entry.path().is_file() {
            files.push(name);
        }
    }
    files.sort();
    Ok(files)
}

fn main() -> Result<(), String> {
    let (model_dir, mut files) = parse_args()?;

    if !model_dir.is_dir() {
        return Err(format!("{model_dir:?} is not a directory"));
    }

    if files.is_empty() {
        files = discover_model_files(&model_dir)?;
    }
    if files.is_empty() {
        return Err(format!("No model JSON found in {model_dir:?}"));
    }

    let manifest = ArtifactManifest::build(&model_dir, files.iter().map(String::as_str))
        .map_err(|e| e.to_string())?;
    manifest.write(&model_dir).map_err(|e| e.to_string())?;

    println!("Wrote {}", model_dir.join(MANIFEST_FILE).display());
    for (name, digest) in &manifest.files {
        println!("  {name}  sha256:{digest}");
    }
    Ok(())
}
