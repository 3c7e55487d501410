use clap::{CommandFactory, Parser};
use lwbuild::commands::{self, BuildProfile};
use lwbuild::parser;
use lwbuild::utils::log::{log, LogLevel};
use std::time::Instant;

/// Build and documentation driver for the lw_index_datastructs library
#[derive(Parser, Debug)]
#[command(name = "lwbuild", version, about, arg_required_else_help = true)]
struct CommandLineArgs {
    /// Generate platform build files with cmake
    #[arg(short, long)]
    generate: bool,
    /// Build the Debug configuration
    #[arg(short = 'd', long)]
    build_debug: bool,
    /// Build the Release configuration
    #[arg(short = 'r', long)]
    build_release: bool,
    /// Remove the build output folder
    #[arg(short, long)]
    clean: bool,
    /// Run the compiled unit test binary
    #[arg(short, long)]
    tests: bool,
    /// Generate library documentation with doxygen
    #[arg(long)]
    docs: bool,
    /// Regenerate documentation even if its inputs are unchanged
    #[arg(short, long)]
    force: bool,
    /// Path of the project config file
    #[arg(long, default_value = "config_build.toml")]
    config: String,
}

/// One step of the sequencer; variants are listed in execution order
#[derive(Debug, Clone, Copy, PartialEq)]
enum Action {
    Clean,
    Generate,
    BuildRelease,
    BuildDebug,
    Tests,
    Docs,
}

/// Maps the parsed flags onto the fixed action order. The order of the
/// command line arguments never changes the order of execution.
fn plan_actions(args: &CommandLineArgs) -> Vec<Action> {
    let mut plan = Vec::new();
    if args.clean {
        plan.push(Action::Clean);
    }
    if args.generate {
        plan.push(Action::Generate);
    }
    if args.build_release {
        plan.push(Action::BuildRelease);
    }
    if args.build_debug {
        plan.push(Action::BuildDebug);
    }
    if args.tests {
        plan.push(Action::Tests);
    }
    if args.docs {
        plan.push(Action::Docs);
    }
    plan
}

fn main() {
    let args = CommandLineArgs::parse();
    log(
        LogLevel::Debug,
        &format!("lwbuild {} on {}", env!("CARGO_PKG_VERSION"), std::env::consts::OS),
    );

    let plan = plan_actions(&args);
    if plan.is_empty() {
        // Nothing requested: behave like --help, touch no external tool
        CommandLineArgs::command().print_help().unwrap_or_else(|why| {
            log(LogLevel::Error, &format!("Could not print help: {}", why));
            std::process::exit(1);
        });
        std::process::exit(0);
    }

    let start = Instant::now();
    let (project_config, platforms) = parser::parse_config(&args.config);
    let platform = match parser::select_platform(&platforms, std::env::consts::OS) {
        Some(platform) => platform,
        None => {
            log(
                LogLevel::Error,
                &format!("Unsupported OS: {}", std::env::consts::OS),
            );
            std::process::exit(-1);
        }
    };
    log(LogLevel::Info, &format!("Current OS is: {}", platform.os));

    for action in &plan {
        match action {
            Action::Clean => commands::clean(platform),
            Action::Generate => commands::generate(platform, &project_config),
            Action::BuildRelease => commands::build(platform, &project_config, BuildProfile::Release),
            Action::BuildDebug => commands::build(platform, &project_config, BuildProfile::Debug),
            Action::Tests => commands::run_tests(platform),
            Action::Docs => commands::gen_docs(platform, &project_config, args.force),
        }
    }

    log(
        LogLevel::Log,
        &format!("Completed in: {:.2} seconds", start.elapsed().as_secs_f64()),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        CommandLineArgs::command().debug_assert();
    }

    #[test]
    fn actions_run_in_fixed_order() {
        let args = CommandLineArgs::parse_from(["lwbuild", "-t", "-d", "-g", "-c", "-r"]);
        let plan = plan_actions(&args);
        assert_eq!(
            plan,
            vec![
                Action::Clean,
                Action::Generate,
                Action::BuildRelease,
                Action::BuildDebug,
                Action::Tests,
            ]
        );
    }

    #[test]
    fn long_flags_match_short_flags() {
        let short = CommandLineArgs::parse_from(["lwbuild", "-g", "-r"]);
        let long = CommandLineArgs::parse_from(["lwbuild", "--generate", "--build-release"]);
        assert_eq!(plan_actions(&short), plan_actions(&long));
    }

    #[test]
    fn docs_action_runs_last() {
        let args = CommandLineArgs::parse_from(["lwbuild", "--docs", "-c"]);
        assert_eq!(plan_actions(&args), vec![Action::Clean, Action::Docs]);
    }

    #[test]
    fn unknown_flags_are_rejected() {
        let result = CommandLineArgs::try_parse_from(["lwbuild", "--frobnicate"]);
        assert!(result.is_err());
    }

    #[test]
    fn no_action_flags_yield_an_empty_plan() {
        let args = CommandLineArgs::parse_from(["lwbuild", "--config", "other.toml"]);
        assert!(plan_actions(&args).is_empty());
    }
}
