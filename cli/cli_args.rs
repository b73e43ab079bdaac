use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::{Args, Parser};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default)]
pub struct FormatOutputOpts {
    #[arg(
        short = 'f',
        long,
        help = "Set the plan output format.",
        value_name = "FORMAT",
        default_value = "table",
        value_parser = ["table", "json", "yaml"],
        requires = "plan",
        help_heading = "Output Formatting"
    )]
    pub format: String,

    #[arg(
        long,
        help = "Emit compact JSON instead of pretty-printed JSON.",
        requires = "plan",
        help_heading = "Output Formatting"
    )]
    pub json_minify: bool,
}

#[derive(Parser, Debug)]
#[command(
    name = "vcxgen",
    author,
    version,
    about = "Generate Visual Studio solution, project and filter files from build-system configs.",
    long_about = "vcxgen reads either a directory of .vs_solution_config / .vs_project_config records \nor a single XML manifest, aggregates each project's source files into typed buckets \nand IDE filters, and writes <name>.sln plus <project>/<project>.vcxproj(.filters).",
    help_template = "{about-section}\nUsage: {usage}\n\n{all-args}{after-help}",
    after_help = "EXAMPLES:\n  vcxgen ./build/vs\n  vcxgen wave.xml -o ./ide\n  vcxgen ./build/vs --plan -f yaml\n  vcxgen ./build/vs --clean"
)]
pub struct Cli {
    #[arg(
        value_name = "PATH",
        required_unless_present = "completions",
        help = "Config directory, a .vs_solution_config file, or an XML manifest."
    )]
    pub path: Option<String>,

    #[arg(
        long,
        conflicts_with = "plan",
        help = "Remove previously generated solution, project and IDE files instead of generating."
    )]
    pub clean: bool,

    #[arg(long, help = "Print the aggregated solution without writing any files.")]
    pub plan: bool,

    #[command(flatten)]
    pub format_output: FormatOutputOpts,

    #[arg(
        short = 'o',
        long,
        value_name = "DIR",
        help = "Directory to write into (default: the config's directory)."
    )]
    pub output_dir: Option<PathBuf>,

    #[arg(
        long,
        value_name = "FILE",
        help = "Generator settings TOML (default: vcxgen.toml next to the config, if present)."
    )]
    pub settings: Option<PathBuf>,

    #[arg(long, help = "Use sequential GUIDs so repeated runs produce identical files.")]
    pub deterministic_ids: bool,

    #[arg(
        long,
        value_name = "SHELL",
        value_parser = PossibleValuesParser::new(["bash", "zsh", "fish"])
            .try_map(|s| s.parse::<Shell>()),
        exclusive = true,
        help = "Print shell completions and exit."
    )]
    pub completions: Option<Shell>,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase message verbosity (-v, -vv, -vvv).")]
    pub verbose: u8,

    #[arg(short, long, help = "Silence the summary line and all log output.")]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn completions_do_not_need_a_path() {
        let cli = Cli::try_parse_from(["vcxgen", "--completions", "bash"]).unwrap();
        assert_eq!(cli.completions, Some(Shell::Bash));
        assert!(cli.path.is_none());
    }

    #[test]
    fn unsupported_shell_is_rejected() {
        assert!(Cli::try_parse_from(["vcxgen", "--completions", "powershell"]).is_err());
    }

    #[test]
    fn missing_path_is_a_usage_error() {
        let err = Cli::try_parse_from(["vcxgen"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn clean_conflicts_with_plan() {
        assert!(Cli::try_parse_from(["vcxgen", "dir", "--clean", "--plan"]).is_err());
    }

    #[test]
    fn format_requires_plan() {
        assert!(Cli::try_parse_from(["vcxgen", "dir", "-f", "json"]).is_err());
        let cli = Cli::try_parse_from(["vcxgen", "dir", "--plan", "-f", "json"]).unwrap();
        assert_eq!(cli.format_output.format, "json");
    }
}
