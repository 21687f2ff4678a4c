use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use envconfig::Envconfig;
use ironcore_admission::config::{AdmissionConfig, OutputFormat};
use ironcore_admission::report::run;
use ironcore_admission::{
    KubeCloudProfileLookup, MemoryCloudProfileLookup, init_tracing,
};
use ironcore_models::{CloudProfile, NamespacedCloudProfile};
use kube::ResourceExt;
use tracing::info;

#[derive(clap::Parser, Clone, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Clone, Debug)]
enum Command {
    /// Validate a NamespacedCloudProfile against its parent CloudProfile
    #[clap(aliases = &["v"])]
    Validate(ValidateArgs),
}

#[derive(clap::Args, Clone, Debug)]
struct ValidateArgs {
    /// NamespacedCloudProfile manifest (YAML or JSON), `-` reads stdin
    profile: clap_stdin::FileOrStdin,
    /// Parent CloudProfile manifests. Without any, parents are fetched from
    /// the cluster of the current kubeconfig.
    #[arg(short, long)]
    parent: Vec<PathBuf>,
    /// Findings output format
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,
    /// Seconds before the run is cancelled, 0 disables
    #[arg(long)]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let Command::Validate(args) = cli.command;

    let cfg = AdmissionConfig::init_from_env()?
        .apply_overrides(args.output, args.timeout);
    init_tracing(&cfg.log, cfg.log_json);

    let mut raw = String::new();
    args.profile
        .clone()
        .into_reader()?
        .read_to_string(&mut raw)
        .context("reading NamespacedCloudProfile manifest")?;
    let profile: NamespacedCloudProfile = serde_yaml::from_str(&raw)
        .context("parsing NamespacedCloudProfile manifest")?;

    let outcome = if args.parent.is_empty() {
        let client = kube::Client::try_default().await?;
        run(&cfg, KubeCloudProfileLookup::new(client), &profile).await?
    } else {
        let lookup = MemoryCloudProfileLookup::new();
        for path in &args.parent {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let parent: CloudProfile = serde_yaml::from_str(&content)
                .with_context(|| format!("parsing {}", path.display()))?;
            info!(parent = %parent.name_any(), "loaded parent CloudProfile");
            lookup.insert(parent).await;
        }
        run(&cfg, lookup, &profile).await?
    };

    println!("{}", outcome.render(cfg.output, &profile.qualified_name())?);
    match outcome.exit_code() {
        0 => Ok(()),
        code => std::process::exit(code),
    }
}
