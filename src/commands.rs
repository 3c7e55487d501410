//! This module contains the implementations behind each CLI action.

use crate::global_cfg;
use crate::hasher::Hasher;
use crate::parser::{PlatformConfig, ProjectConfig};
use crate::utils::env;
use crate::utils::exec;
use crate::utils::log::{log, LogLevel};
use crate::vcs;
use std::fs;
use std::path::Path;
use std::thread;

/// Build configuration understood by multi-config CMake generators
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BuildProfile {
    Debug,
    Release,
}

impl BuildProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildProfile::Debug => "Debug",
            BuildProfile::Release => "Release",
        }
    }
}

/// Removes the build output folder of the current platform
/// # Arguments
/// * `platform` - The platform entry selected for this run
pub fn clean(platform: &PlatformConfig) {
    let folder = &platform.output_folder;
    if Path::new(folder).exists() {
        fs::remove_dir_all(folder).unwrap_or_else(|why| {
            log(
                LogLevel::Error,
                &format!("Could not remove output folder '{}': {}", folder, why),
            );
            std::process::exit(1);
        });
        log(LogLevel::Log, &format!("Cleaning: {}", folder));
    } else {
        log(LogLevel::Log, &format!("Output folder does not exist: {}", folder));
    }
}

/// Generates the platform build tree by running the cmake generator
/// inside the output folder
pub fn generate(platform: &PlatformConfig, project: &ProjectConfig) {
    let out_dir = Path::new(&platform.output_folder);
    if !out_dir.exists() {
        fs::create_dir_all(out_dir).unwrap_or_else(|why| {
            log(
                LogLevel::Error,
                &format!("Could not create output folder '{}': {}", platform.output_folder, why),
            );
            std::process::exit(1);
        });
    }
    // cmake is run from inside the output folder, so the source tree
    // has to be made absolute first
    let source_tree = absolute(&project.source_tree);
    let cmd = generate_cmd(&platform.generator, &source_tree);
    exec::run_checked(&cmd, Some(out_dir), &env::cmake_env(platform, project));
}

/// Builds the given configuration of the generated project
pub fn build(platform: &PlatformConfig, project: &ProjectConfig, profile: BuildProfile) {
    let cmd = build_cmd(&platform.output_folder, profile, build_jobs());
    exec::run_checked(&cmd, None, &env::cmake_env(platform, project));
    log(
        LogLevel::Log,
        &format!(
            "Output {} binaries are available in: {}",
            profile.as_str(),
            platform.output_folder
        ),
    );
}

/// Runs the compiled unit test binary of the library
pub fn run_tests(platform: &PlatformConfig) {
    let bin_path = test_binary(platform);
    if !Path::new(&bin_path).exists() {
        log(LogLevel::Error, &format!("Could not find test binary: {}", bin_path));
        std::process::exit(1);
    }
    log(LogLevel::Log, &format!("Running: {}", bin_path));
    exec::run_checked(&format!("\"{}\"", bin_path), None, &[]);
}

/// Generates the library documentation by running doxygen with the
/// configured input directories and tool locations. Unless `force` is
/// set, the run is skipped when no input file changed since the last
/// generation.
pub fn gen_docs(platform: &PlatformConfig, project: &ProjectConfig, force: bool) {
    let html_dir = format!("{}/html", project.doc_output);
    if !Path::new(&html_dir).exists() {
        fs::create_dir_all(&html_dir).unwrap_or_else(|why| {
            log(
                LogLevel::Error,
                &format!("Could not create documentation folder '{}': {}", html_dir, why),
            );
            std::process::exit(1);
        });
    }

    let files = Hasher::collect_files(&project.doc_input_dirs);
    let new_hashes = Hasher::hash_files(&files);
    let hash_path = format!("{}/doxygen.hash", project.doc_output);
    let old_hashes = Hasher::load_hashes_from_file(&hash_path);
    if !force && !new_hashes.is_empty() && new_hashes == old_hashes {
        log(LogLevel::Log, "Documentation inputs unchanged, skipping doxygen");
        return;
    }

    log(LogLevel::Info, &format!("Documentation stamp: {}", vcs::build_stamp()));
    let conf_path = Path::new(&project.doc_config);
    let conf_name = match conf_path.file_name().and_then(|name| name.to_str()) {
        Some(name) => name,
        None => {
            log(
                LogLevel::Error,
                &format!("Invalid doc_config path: {}", project.doc_config),
            );
            std::process::exit(1);
        }
    };
    // doxygen resolves its config-relative paths from the conf file's folder
    let conf_dir = conf_path.parent().filter(|dir| !dir.as_os_str().is_empty());
    exec::run_checked(
        &format!("doxygen {}", conf_name),
        conf_dir,
        &env::doxygen_env(platform, project),
    );
    Hasher::save_hashes_to_file(&hash_path, &new_hashes);
    log(
        LogLevel::Log,
        &format!(
            "Completed [OK]: Final generated single chm file is here: {}/library_documentation.chm",
            project.doc_output
        ),
    );
}

fn generate_cmd(generator: &str, source_tree: &str) -> String {
    format!("cmake -G \"{}\" \"{}\"", generator, source_tree)
}

fn build_cmd(output_folder: &str, profile: BuildProfile, jobs: Option<usize>) -> String {
    let mut cmd = format!(
        "cmake --build \"{}\" --clean-first --config {}",
        output_folder,
        profile.as_str()
    );
    if let Some(jobs) = jobs {
        cmd.push_str(&format!(" -- -j{}", jobs));
    }
    cmd
}

fn test_binary(platform: &PlatformConfig) -> String {
    format!(
        "{}/{}/{}_unittest",
        platform.output_folder, platform.test_subdir, platform.project_name
    )
}

// Windows generators schedule their own parallelism
fn build_jobs() -> Option<usize> {
    if cfg!(target_os = "windows") {
        return None;
    }
    let jobs = global_cfg::get().defaults.jobs.unwrap_or_else(|| {
        thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
    });
    Some(jobs)
}

fn absolute(path: &str) -> String {
    let path_buf = Path::new(path);
    if path_buf.is_absolute() {
        return path.to_string();
    }
    let current_dir = std::env::current_dir().unwrap_or_else(|why| {
        log(LogLevel::Error, &format!("Could not read current directory: {}", why));
        std::process::exit(1);
    });
    current_dir.join(path_buf).to_string_lossy().into_owned()
}
