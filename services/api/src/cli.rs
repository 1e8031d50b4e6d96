use crate::demo::{run_classify, run_demo, run_rank, ClassifyArgs, DemoArgs, RankArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use parkmobility::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Parkmobility",
    about = "Rank mobility solutions and classify governance models for business parks",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Rank mobility solutions for a set of motivations
    Rank(RankArgs),
    /// Classify governance models for the chosen solution and variant
    Classify(ClassifyArgs),
    /// Walk through the wizard against the bundled sample catalog
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Rank(args) => run_rank(args),
        Command::Classify(args) => run_classify(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn rank_accepts_repeated_reasons_and_traffic_types() {
        let cli = Cli::try_parse_from([
            "parkmobility-api",
            "rank",
            "--reason",
            "reden-milieu",
            "--reason",
            "reden-ov",
            "--traffic",
            "woon-werkverkeer",
            "--pickup",
            "thuis",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Rank(args)) => {
                assert_eq!(args.reasons, vec!["reden-milieu", "reden-ov"]);
                assert_eq!(args.traffic_types.len(), 1);
                assert!(args.pickup.is_some());
            }
            other => panic!("expected rank command, got {other:?}"),
        }
    }

    #[test]
    fn rank_rejects_unknown_traffic_type() {
        let result = Cli::try_parse_from(["parkmobility-api", "rank", "--traffic", "vracht"]);
        assert!(result.is_err());
    }
}
