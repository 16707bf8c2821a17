//! Output path derivation.
//!
//! - no output given: `<input base>_data.csv` and `<input base>_errors.txt`
//! - output given: that path, and `<output base>_errors.txt`
//! - output `-`: standard output, errors next to the input
//!
//! The base name is the path without its final extension.

use std::path::{Path, PathBuf};

use hvf_output::Sink;

pub const DATA_SUFFIX: &str = "_data";
pub const ERRORS_SUFFIX: &str = "_errors";
pub const TABULAR_EXTENSION: &str = "csv";
pub const ERRORS_EXTENSION: &str = "txt";

/// Output argument value selecting standard output.
pub const STDOUT_MARKER: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub output: Sink,
    pub errors: PathBuf,
}

pub fn derive_output_paths(input: &Path, output: Option<&Path>) -> OutputPaths {
    match output {
        Some(path) if path.as_os_str() == STDOUT_MARKER => OutputPaths {
            output: Sink::Stdout,
            errors: sibling(input, ERRORS_SUFFIX, ERRORS_EXTENSION),
        },
        Some(path) => OutputPaths {
            output: Sink::File(path.to_path_buf()),
            errors: sibling(path, ERRORS_SUFFIX, ERRORS_EXTENSION),
        },
        None => OutputPaths {
            output: Sink::File(sibling(input, DATA_SUFFIX, TABULAR_EXTENSION)),
            errors: sibling(input, ERRORS_SUFFIX, ERRORS_EXTENSION),
        },
    }
}

/// `dir/name.ext` becomes `dir/name<suffix>.<extension>`.
fn sibling(path: &Path, suffix: &str, extension: &str) -> PathBuf {
    let base = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{base}{suffix}.{extension}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_from_input() {
        let paths = derive_output_paths(Path::new("exports/clinic.xml"), None);
        assert_eq!(
            paths.output,
            Sink::File(PathBuf::from("exports/clinic_data.csv"))
        );
        assert_eq!(paths.errors, PathBuf::from("exports/clinic_errors.txt"));
    }

    #[test]
    fn derived_from_explicit_output() {
        let paths = derive_output_paths(
            Path::new("exports/clinic.xml"),
            Some(Path::new("out/results.csv")),
        );
        assert_eq!(paths.output, Sink::File(PathBuf::from("out/results.csv")));
        assert_eq!(paths.errors, PathBuf::from("out/results_errors.txt"));
    }

    #[test]
    fn stdout_output_keeps_errors_beside_input() {
        let paths = derive_output_paths(Path::new("clinic.xml"), Some(Path::new("-")));
        assert_eq!(paths.output, Sink::Stdout);
        assert_eq!(paths.errors, PathBuf::from("clinic_errors.txt"));
    }

    #[test]
    fn only_final_extension_is_dropped() {
        let paths = derive_output_paths(Path::new("/data/site.2020.xml"), None);
        assert_eq!(paths.errors, PathBuf::from("/data/site.2020_errors.txt"));
    }
}
