//! Parsing Module

use crate::utils::log::{log, LogLevel};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use toml::{Table, Value};

/// Struct describing one `[platform.<os>]` entry of the config file
#[derive(Debug, Default, PartialEq, Clone)]
pub struct PlatformConfig {
    pub os: String,
    pub cmake_dir: String,
    pub generator: String,
    pub output_folder: String,
    pub project_name: String,
    pub test_subdir: String,
    pub doxygen: DoxygenConfig,
}

/// Struct describing the doxygen tool locations of a platform.
/// Every field may be empty; a platform without doxygen tooling can
/// still run documentation generation off `PATH`.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct DoxygenConfig {
    pub doxygen_dir: String,
    pub hhc_dir: String,
    pub hhc_app: String,
    pub dot_dir: String,
    pub use_dot: String,
}

/// Struct describing the `[project]` table of the config file
#[derive(Debug, PartialEq, Clone)]
pub struct ProjectConfig {
    pub source_tree: String,
    pub extra_include_folders: Vec<String>,
    pub include_unit_tests: String,
    pub include_tools: String,
    pub doc_config: String,
    pub doc_output: String,
    pub doc_input_dirs: Vec<String>,
}

/// This function is used to parse the config file of the driven project
/// # Arguments
/// * `path` - The path to the config file
pub fn parse_config(path: &str) -> (ProjectConfig, HashMap<String, PlatformConfig>) {
    // Open toml file and parse it into a string
    let mut file = File::open(path).unwrap_or_else(|_| {
        log(
            LogLevel::Error,
            &format!("Could not open config file: {}", path),
        );
        std::process::exit(1);
    });
    let mut contents = String::new();
    file.read_to_string(&mut contents).unwrap_or_else(|_| {
        log(
            LogLevel::Error,
            &format!("Could not read config file: {}", path),
        );
        std::process::exit(1);
    });
    let config = contents.parse::<Table>().unwrap_or_else(|e| {
        log(
            LogLevel::Error,
            &format!("Could not parse config file: {}", path),
        );
        log(LogLevel::Error, &format!("Error: {}", e));
        std::process::exit(1);
    });

    let project_config = parse_project_config(&config);
    let platforms = parse_platforms(&config);

    (project_config, platforms)
}

/// Selects the platform entry matching the given OS identifier,
/// as reported by `std::env::consts::OS`
pub fn select_platform<'a>(
    platforms: &'a HashMap<String, PlatformConfig>,
    os: &str,
) -> Option<&'a PlatformConfig> {
    platforms.get(os)
}

/// Parses the `[project]` table; every field has a default
fn parse_project_config(config: &Table) -> ProjectConfig {
    let empty_project = Value::Table(toml::map::Map::default());
    let project = config.get("project").unwrap_or(&empty_project);
    let project_tb = project.as_table().unwrap_or_else(|| {
        log(LogLevel::Error, "Project is not a table");
        std::process::exit(1);
    });
    ProjectConfig {
        source_tree: parse_cfg_string(project_tb, "source_tree", "./"),
        extra_include_folders: parse_cfg_vector(project_tb, "extra_include_folders"),
        include_unit_tests: parse_cfg_string(project_tb, "include_unit_tests", ""),
        include_tools: parse_cfg_string(project_tb, "include_tools", ""),
        doc_config: parse_cfg_string(
            project_tb,
            "doc_config",
            "scripts/doxygen/library_documentation.conf",
        ),
        doc_output: parse_cfg_string(project_tb, "doc_output", "scripts/doxygen/generated_docs"),
        doc_input_dirs: parse_cfg_vector(project_tb, "doc_input_dirs"),
    }
}

/// Parses the `[platform.*]` tables into a map keyed by OS identifier
fn parse_platforms(config: &Table) -> HashMap<String, PlatformConfig> {
    let platform = config.get("platform").unwrap_or_else(|| {
        log(LogLevel::Error, "Could not find platform tables in config file");
        std::process::exit(1);
    });
    let platform_tb = platform.as_table().unwrap_or_else(|| {
        log(LogLevel::Error, "Platform is not a table");
        std::process::exit(1);
    });

    let mut platforms = HashMap::new();
    for (os, value) in platform_tb {
        let os_tb = value.as_table().unwrap_or_else(|| {
            log(LogLevel::Error, &format!("platform.{} is not a table", os));
            std::process::exit(1);
        });
        // Multi-config generators nest test binaries one level deeper
        let test_subdir_default = if os == "windows" { "tests/Release" } else { "tests" };
        let platform_config = PlatformConfig {
            os: os.clone(),
            cmake_dir: parse_cfg_string(os_tb, "cmake_dir", ""),
            generator: parse_cfg_string(os_tb, "generator", ""),
            output_folder: parse_cfg_string(os_tb, "output_folder", ""),
            project_name: parse_cfg_string(os_tb, "project_name", ""),
            test_subdir: parse_cfg_string(os_tb, "test_subdir", test_subdir_default),
            doxygen: parse_doxygen(os_tb),
        };
        for (field, value) in [
            ("generator", &platform_config.generator),
            ("output_folder", &platform_config.output_folder),
            ("project_name", &platform_config.project_name),
        ] {
            if value.is_empty() {
                log(
                    LogLevel::Error,
                    &format!("platform.{} is missing '{}'", os, field),
                );
                std::process::exit(1);
            }
        }
        platforms.insert(os.clone(), platform_config);
    }
    if platforms.is_empty() {
        log(LogLevel::Error, "No platform tables found in config file");
        std::process::exit(1);
    }

    platforms
}

/// Parses the doxygen configuration of a platform
fn parse_doxygen(config: &Table) -> DoxygenConfig {
    let empty_doxygen = Value::Table(toml::map::Map::default());
    let doxygen = config.get("doxygen").unwrap_or(&empty_doxygen);
    if let Some(doxygen_tb) = doxygen.as_table() {
        DoxygenConfig {
            doxygen_dir: parse_cfg_string(doxygen_tb, "doxygen_dir", ""),
            hhc_dir: parse_cfg_string(doxygen_tb, "hhc_dir", ""),
            hhc_app: parse_cfg_string(doxygen_tb, "hhc_app", ""),
            dot_dir: parse_cfg_string(doxygen_tb, "dot_dir", ""),
            use_dot: parse_cfg_string(doxygen_tb, "use_dot", ""),
        }
    } else {
        log(LogLevel::Error, "Doxygen is not a table");
        std::process::exit(1);
    }
}

/// Parses the configuration field of the string type
fn parse_cfg_string(config: &Table, field: &str, default: &str) -> String {
    let default_string = Value::String(default.to_string());
    config
        .get(field)
        .unwrap_or(&default_string)
        .as_str()
        .unwrap_or_else(|| {
            log(LogLevel::Error, &format!("{} is not a string", field));
            std::process::exit(1);
        })
        .to_string()
}

/// Parses the configuration field of the vector type
fn parse_cfg_vector(config: &Table, field: &str) -> Vec<String> {
    let empty_vector = Value::Array(Vec::new());
    config
        .get(field)
        .unwrap_or(&empty_vector)
        .as_array()
        .unwrap_or_else(|| {
            log(LogLevel::Error, &format!("{} is not an array", field));
            std::process::exit(1);
        })
        .iter()
        .map(|value| {
            value
                .as_str()
                .unwrap_or_else(|| {
                    log(LogLevel::Error, &format!("{} elements are strings", field));
                    std::process::exit(1);
                })
                .to_string()
        })
        .collect()
}
