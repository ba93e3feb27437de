//! # aksval
//!
//! Command-line front-end for the AKS parameter validators.
//!
//! Parses the same flags the cluster-management CLI takes, builds a
//! namespace from them (optionally layered over a JSON/YAML params file) and
//! runs the command's check set.
//!
//! ## Usage
//!
//! ```bash
//! # Validate cluster creation parameters
//! aksval create --name mycluster --kubernetes-version 1.11.8 \
//!     --api-server-authorized-ip-ranges 20.0.0.0/8,52.1.2.3
//!
//! # Validate a spot node pool, reporting every failure
//! aksval --all nodepool-add --nodepool-name spot1 --priority Spot --spot-max-price -1
//!
//! # Parameters from a file, flags win over file values
//! aksval --params-file params.yaml create --max-pods 30
//!
//! # Show the known add-ons
//! aksval list addons
//! ```

use std::path::PathBuf;

use aks_validators::config::ValidatorConfig;
use aks_validators::constants::{ADDONS, CLUSTER_AUTOSCALER_PROFILE_KEYS};
use aks_validators::logging::init_logging;
use aks_validators::namespace::load_params_file;
use aks_validators::validation::{
    run_checks, run_checks_collect, Check, CREATE_CHECKS, NODEPOOL_ADD_CHECKS,
    POD_IDENTITY_ADD_CHECKS, UPDATE_CHECKS,
};
use aks_validators::Namespace;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("BUILD_GIT_HASH"),
    ", built ",
    env!("BUILD_DATETIME"),
    ")"
);

/// Validate AKS command parameters
#[derive(Parser)]
#[command(name = "aksval", version, long_version = LONG_VERSION)]
#[command(
    about = "Validate AKS cluster, node pool and pod identity parameters",
    long_about = None,
    after_help = "\
Examples:
  aksval create --name mycluster --kubernetes-version 1.11
  aksval nodepool-add --nodepool-name spot1 --priority Spot --spot-max-price 0.068
  aksval --params-file params.json update
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON or YAML object of parameters; command-line flags override it
    #[arg(long, global = true, value_name = "FILE")]
    params_file: Option<PathBuf>,

    /// Report every failing check instead of stopping at the first
    #[arg(long, global = true)]
    all: bool,

    /// Log format (overrides LOG_FORMAT)
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate `aks create` parameters
    Create(ClusterArgs),
    /// Validate `aks update` parameters
    Update(ClusterArgs),
    /// Validate `aks nodepool add` parameters
    #[command(name = "nodepool-add")]
    NodepoolAdd(ClusterArgs),
    /// Validate `aks pod-identity add` parameters
    #[command(name = "pod-identity-add")]
    PodIdentityAdd(PodIdentityArgs),
    /// Print a fixed set of recognized values
    List {
        #[arg(value_enum)]
        kind: ListKind,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum ListKind {
    /// Add-on names accepted by --enable-addons
    Addons,
    /// Settings accepted by --cluster-autoscaler-profile
    #[value(name = "autoscaler-keys")]
    AutoscalerKeys,
}

/// Cluster and node pool flags
///
/// Everything is taken as text; the validators own parsing so bad numbers
/// get the same messages they would inside the CLI.
#[derive(Args)]
struct ClusterArgs {
    /// Cluster name (also the Linux host name prefix)
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    kubernetes_version: Option<String>,
    #[arg(long)]
    nodepool_name: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    node_count: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    min_count: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    max_count: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    max_pods: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    max_surge: Option<String>,
    /// Comma-separated IPv4 addresses/CIDRs; "" disables the feature
    #[arg(long)]
    api_server_authorized_ip_ranges: Option<String>,
    /// key=value entries
    #[arg(long, num_args = 1..)]
    cluster_autoscaler_profile: Option<Vec<String>>,
    /// Comma-separated add-on names
    #[arg(long = "enable-addons", short = 'a')]
    addons: Option<String>,
    #[arg(long)]
    vnet_subnet_id: Option<String>,
    #[arg(long)]
    pod_subnet_id: Option<String>,
    #[arg(long)]
    node_public_ip_prefix_id: Option<String>,
    #[arg(long)]
    assign_identity: Option<String>,
    #[arg(long)]
    assign_kubelet_identity: Option<String>,
    #[arg(long)]
    priority: Option<String>,
    #[arg(long)]
    eviction_policy: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    spot_max_price: Option<String>,
    /// Comma-separated key=value:effect taints
    #[arg(long = "node-taints")]
    node_taints: Option<String>,
    /// key=value labels
    #[arg(long = "labels", num_args = 1..)]
    nodepool_labels: Option<Vec<String>>,
    #[arg(long, allow_hyphen_values = true)]
    load_balancer_idle_timeout: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    load_balancer_outbound_ports: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    nat_gateway_managed_outbound_ip_count: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    nat_gateway_idle_timeout: Option<String>,
}

impl ClusterArgs {
    fn into_namespace(self) -> Namespace {
        let mut ns = Namespace::new();
        let text_fields = [
            ("name", self.name),
            ("kubernetes_version", self.kubernetes_version),
            ("nodepool_name", self.nodepool_name),
            ("node_count", self.node_count),
            ("min_count", self.min_count),
            ("max_count", self.max_count),
            ("max_pods", self.max_pods),
            ("max_surge", self.max_surge),
            (
                "api_server_authorized_ip_ranges",
                self.api_server_authorized_ip_ranges,
            ),
            ("addons", self.addons),
            ("vnet_subnet_id", self.vnet_subnet_id),
            ("pod_subnet_id", self.pod_subnet_id),
            ("node_public_ip_prefix_id", self.node_public_ip_prefix_id),
            ("assign_identity", self.assign_identity),
            ("assign_kubelet_identity", self.assign_kubelet_identity),
            ("priority", self.priority),
            ("eviction_policy", self.eviction_policy),
            ("spot_max_price", self.spot_max_price),
            ("node_taints", self.node_taints),
            ("load_balancer_idle_timeout", self.load_balancer_idle_timeout),
            ("load_balancer_outbound_ports", self.load_balancer_outbound_ports),
            (
                "nat_gateway_managed_outbound_ip_count",
                self.nat_gateway_managed_outbound_ip_count,
            ),
            ("nat_gateway_idle_timeout", self.nat_gateway_idle_timeout),
        ];
        for (field, value) in text_fields {
            if let Some(value) = value {
                ns.set(field, value);
            }
        }

        let list_fields = [
            ("cluster_autoscaler_profile", self.cluster_autoscaler_profile),
            ("nodepool_labels", self.nodepool_labels),
        ];
        for (field, value) in list_fields {
            if let Some(value) = value {
                ns.set(field, value);
            }
        }
        ns
    }
}

/// Pod identity flags
#[derive(Args)]
struct PodIdentityArgs {
    /// Pod identity name
    #[arg(long = "name")]
    identity_name: Option<String>,
    /// Kubernetes namespace the identity binds to
    #[arg(long)]
    namespace: Option<String>,
}

impl PodIdentityArgs {
    fn into_namespace(self) -> Namespace {
        let mut ns = Namespace::new();
        if let Some(name) = self.identity_name {
            ns.set("identity_name", name);
        }
        if let Some(namespace) = self.namespace {
            ns.set("namespace", namespace);
        }
        ns
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ValidatorConfig::from_env();
    if cli.all {
        config.collect_all = true;
    }
    match cli.log_format {
        Some(LogFormat::Json) => config.log_format = "json".to_string(),
        Some(LogFormat::Text) => config.log_format = "text".to_string(),
        None => {}
    }
    init_logging(&config)?;

    let (command, flags, checks): (&str, Namespace, &[Check]) = match cli.command {
        Commands::Create(args) => ("create", args.into_namespace(), CREATE_CHECKS),
        Commands::Update(args) => ("update", args.into_namespace(), UPDATE_CHECKS),
        Commands::NodepoolAdd(args) => ("nodepool-add", args.into_namespace(), NODEPOOL_ADD_CHECKS),
        Commands::PodIdentityAdd(args) => (
            "pod-identity-add",
            args.into_namespace(),
            POD_IDENTITY_ADD_CHECKS,
        ),
        Commands::List { kind } => {
            list_command(kind);
            return Ok(());
        }
    };

    let mut namespace = match &cli.params_file {
        Some(path) => load_params_file(path)?,
        None => Namespace::new(),
    };
    namespace.merge(flags);

    info!(
        command,
        checks = checks.len(),
        collect_all = config.collect_all,
        "Validating parameters"
    );

    if config.collect_all {
        let errors = run_checks_collect(&mut namespace, checks);
        if !errors.is_empty() {
            for error in &errors {
                eprintln!("{error}");
            }
            return Err(anyhow::anyhow!(
                "{} parameter check(s) failed for '{command}'",
                errors.len()
            ));
        }
    } else {
        run_checks(&mut namespace, checks)?;
    }

    info!(command, "All parameters valid");
    println!(
        "{}",
        serde_json::to_string_pretty(namespace.values())
            .context("Failed to render validated parameters")?
    );
    Ok(())
}

/// Print one of the fixed value sets, one per line
fn list_command(kind: ListKind) {
    match kind {
        ListKind::Addons => {
            for (name, profile) in ADDONS {
                println!("{name}\t{profile}");
            }
        }
        ListKind::AutoscalerKeys => {
            for key in CLUSTER_AUTOSCALER_PROFILE_KEYS {
                println!("{key}");
            }
        }
    }
}
