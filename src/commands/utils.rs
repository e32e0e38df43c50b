use std::path::{Path, PathBuf};

use splinegen::{PreprocessParams, SplineGenerator};

use crate::cli::PreprocessArgs;

/// Build a generator configured from the shared preprocessing arguments.
pub fn build_generator(args: &PreprocessArgs) -> SplineGenerator {
    let params: PreprocessParams = args.into();
    SplineGenerator::new()
        .with_params(params)
        .with_chain_approximation(args.chain.into())
}

/// Derive a variant file path by appending a suffix before the extension.
pub fn derive_variant_path(input: &Path, suffix: &str, extension: &str) -> PathBuf {
    let mut derived = input.to_path_buf();
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| suffix.to_string());
    derived.set_file_name(format!("{stem}-{suffix}.{extension}"));
    derived
}
