//! Environment Configuration
//!
//! Builds the environment entries each external tool is spawned with.
//! The variable names are fixed: the project's CMake scripts and the
//! doxygen config file consume exactly these.

use crate::parser::{PlatformConfig, ProjectConfig};
use crate::utils::log::{log, LogLevel};
use std::path::PathBuf;

/// Marker consumed by the CMake scripts to detect a driver-run build
pub const SCRIPT_MARKER: &str = "LW_PROJECT_SCRIPT_IS_USED";

/// Returns a `PATH` entry extended with the given extra directories,
/// joined with the platform path separator. Empty entries are skipped.
pub fn extend_path(extra: &[&str]) -> (String, String) {
    let mut paths: Vec<PathBuf> = match std::env::var_os("PATH") {
        Some(path) => std::env::split_paths(&path).collect(),
        None => Vec::new(),
    };
    paths.extend(extra.iter().copied().filter(|dir| !dir.is_empty()).map(PathBuf::from));
    let joined = std::env::join_paths(paths).unwrap_or_else(|why| {
        log(LogLevel::Error, &format!("Could not build PATH: {}", why));
        std::process::exit(1);
    });
    ("PATH".to_string(), joined.to_string_lossy().into_owned())
}

/// This function builds the environment list passed to cmake invocations
pub fn cmake_env(platform: &PlatformConfig, project: &ProjectConfig) -> Vec<(String, String)> {
    let mut envs = Vec::new();
    if !platform.cmake_dir.is_empty() {
        envs.push(extend_path(&[platform.cmake_dir.as_str()]));
    }
    envs.push(("LW_PROJECT_NAME".to_string(), platform.project_name.clone()));
    if !project.extra_include_folders.is_empty() {
        envs.push((
            "LW_EXTRA_INCLUDE_FOLDERS".to_string(),
            project.extra_include_folders.join(" "),
        ));
    }
    if !project.include_unit_tests.is_empty() {
        envs.push((
            "LW_INCLUDE_UNITTESTS".to_string(),
            project.include_unit_tests.clone(),
        ));
    }
    if !project.include_tools.is_empty() {
        envs.push(("LW_INCLUDE_TOOLS".to_string(), project.include_tools.clone()));
    }
    envs.push((SCRIPT_MARKER.to_string(), "1".to_string()));
    envs
}

/// This function builds the environment list passed to the doxygen invocation
pub fn doxygen_env(platform: &PlatformConfig, project: &ProjectConfig) -> Vec<(String, String)> {
    let doxygen = &platform.doxygen;
    let mut envs = Vec::new();
    if !doxygen.doxygen_dir.is_empty() || !doxygen.hhc_dir.is_empty() {
        envs.push(extend_path(&[doxygen.doxygen_dir.as_str(), doxygen.hhc_dir.as_str()]));
    }
    if !doxygen.hhc_app.is_empty() {
        envs.push(("HHC_APP".to_string(), doxygen.hhc_app.clone()));
    }
    if !doxygen.dot_dir.is_empty() {
        envs.push(("DOT_APP_PATH".to_string(), doxygen.dot_dir.clone()));
    }
    if !doxygen.use_dot.is_empty() {
        envs.push(("USE_DOT".to_string(), doxygen.use_dot.clone()));
    }
    envs.push(("LW_PROJECT_NAME".to_string(), platform.project_name.clone()));
    envs.push((
        "MY_INPUT_DIRECTORIES".to_string(),
        project.doc_input_dirs.join(" "),
    ));
    envs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{DoxygenConfig, PlatformConfig, ProjectConfig};

    fn sample_platform() -> PlatformConfig {
        PlatformConfig {
            os: "linux".to_string(),
            cmake_dir: "/opt/cmake/bin".to_string(),
            generator: "Unix Makefiles".to_string(),
            output_folder: "build_linux".to_string(),
            project_name: "lw_index_datastructs".to_string(),
            test_subdir: "tests".to_string(),
            doxygen: DoxygenConfig::default(),
        }
    }

    fn sample_project() -> ProjectConfig {
        ProjectConfig {
            source_tree: "./".to_string(),
            extra_include_folders: Vec::new(),
            include_unit_tests: String::new(),
            include_tools: String::new(),
            doc_config: "scripts/doxygen/library_documentation.conf".to_string(),
            doc_output: "scripts/doxygen/generated_docs".to_string(),
            doc_input_dirs: vec!["headers_public".to_string(), "src".to_string()],
        }
    }

    fn lookup<'a>(envs: &'a [(String, String)], key: &str) -> Option<&'a str> {
        envs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    #[test]
    fn cmake_env_always_carries_name_and_marker() {
        let envs = cmake_env(&sample_platform(), &sample_project());
        assert_eq!(lookup(&envs, "LW_PROJECT_NAME"), Some("lw_index_datastructs"));
        assert_eq!(lookup(&envs, SCRIPT_MARKER), Some("1"));
    }

    #[test]
    fn cmake_env_omits_absent_options() {
        let envs = cmake_env(&sample_platform(), &sample_project());
        assert_eq!(lookup(&envs, "LW_EXTRA_INCLUDE_FOLDERS"), None);
        assert_eq!(lookup(&envs, "LW_INCLUDE_UNITTESTS"), None);
        assert_eq!(lookup(&envs, "LW_INCLUDE_TOOLS"), None);
    }

    #[test]
    fn cmake_env_exports_present_options() {
        let mut project = sample_project();
        project.extra_include_folders =
            vec!["./../extern/a".to_string(), "./../extern/b".to_string()];
        project.include_unit_tests = "ON".to_string();
        let envs = cmake_env(&sample_platform(), &project);
        assert_eq!(
            lookup(&envs, "LW_EXTRA_INCLUDE_FOLDERS"),
            Some("./../extern/a ./../extern/b")
        );
        assert_eq!(lookup(&envs, "LW_INCLUDE_UNITTESTS"), Some("ON"));
    }

    #[test]
    fn cmake_env_path_ends_with_cmake_dir() {
        let envs = cmake_env(&sample_platform(), &sample_project());
        let path = lookup(&envs, "PATH").unwrap();
        assert!(path.ends_with("/opt/cmake/bin"));
    }

    #[test]
    fn doxygen_env_joins_input_dirs() {
        let envs = doxygen_env(&sample_platform(), &sample_project());
        assert_eq!(lookup(&envs, "MY_INPUT_DIRECTORIES"), Some("headers_public src"));
        // No doxygen table configured on this platform
        assert_eq!(lookup(&envs, "HHC_APP"), None);
        assert_eq!(lookup(&envs, "USE_DOT"), None);
        assert_eq!(lookup(&envs, "PATH"), None);
    }

    #[test]
    fn doxygen_env_exports_tool_locations() {
        let mut platform = sample_platform();
        platform.doxygen = DoxygenConfig {
            doxygen_dir: "/opt/doxygen/bin".to_string(),
            hhc_dir: String::new(),
            hhc_app: "/opt/hhc/hhc.exe".to_string(),
            dot_dir: "/opt/graphviz/bin".to_string(),
            use_dot: "YES".to_string(),
        };
        let envs = doxygen_env(&platform, &sample_project());
        assert_eq!(lookup(&envs, "HHC_APP"), Some("/opt/hhc/hhc.exe"));
        assert_eq!(lookup(&envs, "DOT_APP_PATH"), Some("/opt/graphviz/bin"));
        assert_eq!(lookup(&envs, "USE_DOT"), Some("YES"));
        let path = lookup(&envs, "PATH").unwrap();
        assert!(path.ends_with("/opt/doxygen/bin"));
        // Graphviz reaches doxygen through DOT_APP_PATH, not PATH
        assert!(!path.contains("/opt/graphviz/bin"));
    }
}
