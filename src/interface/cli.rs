use crate::generators::RouteStyle;
use crate::interface::config::{BundleConfig, GenerateConfig, CONFIG_FILE_NAME};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rpc-typegen")]
#[command(about = "Generate a typed RPC client and HTTP router from TypeScript handlers")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the client and router from the handler directory
    Generate {
        /// Directory holding the handler modules (default: ./src/api)
        #[arg(short = 'e', long = "entry", default_value = "./src/api")]
        entry_dir: PathBuf,

        /// Output path of the generated router (default: src/rpcRouter.ts)
        #[arg(short = 'r', long = "router", default_value = "src/rpcRouter.ts")]
        router_path: PathBuf,

        /// Output directory of the generated client (default: src/client)
        #[arg(short = 'o', long = "client-out", default_value = "src/client")]
        client_out_dir: PathBuf,

        /// Class name of the generated client
        #[arg(short = 'n', long = "name", default_value = "RpcClient")]
        client_name: String,

        /// Prefix of every endpoint path
        #[arg(long = "prefix", default_value = "/")]
        endpoint_path_prefix: String,

        /// Client template replacing the built-in one
        #[arg(long = "client-template")]
        client_template: Option<PathBuf>,

        /// Router template replacing the built-in one
        #[arg(long = "server-template")]
        server_template: Option<PathBuf>,

        /// Route binding style (table or register)
        #[arg(long = "route-style", default_value = "table")]
        route_style: RouteStyle,

        /// Module path the router imports handlers from
        #[arg(long = "imports-base")]
        imports_base: Option<String>,

        /// Skip handlers declared without parameters
        #[arg(long, action = clap::ArgAction::SetTrue)]
        no_parameterless: bool,

        /// Bundle the generated files with esbuild
        #[arg(long, action = clap::ArgAction::SetTrue)]
        bundle: bool,

        /// Output directory of the bundles (default: dist)
        #[arg(long = "bundle-out", default_value = "dist")]
        bundle_out: PathBuf,

        /// Verbose output
        #[arg(long, action = clap::ArgAction::SetTrue)]
        verbose: bool,

        /// Configuration file path
        #[arg(short = 'c', long = "config")]
        config_file: Option<PathBuf>,
    },
    /// Write a configuration file and run an initial generation
    Init {
        /// Directory holding the handler modules (default: ./src/api)
        #[arg(short = 'e', long = "entry", default_value = "./src/api")]
        entry_dir: PathBuf,

        /// Output path of the generated router (default: src/rpcRouter.ts)
        #[arg(short = 'r', long = "router", default_value = "src/rpcRouter.ts")]
        router_path: PathBuf,

        /// Output directory of the generated client (default: src/client)
        #[arg(short = 'g', long = "client-out", default_value = "src/client")]
        client_out_dir: PathBuf,

        /// Class name of the generated client
        #[arg(short = 'n', long = "name", default_value = "RpcClient")]
        client_name: String,

        /// Prefix of every endpoint path
        #[arg(long = "prefix", default_value = "/")]
        endpoint_path_prefix: String,

        /// Configuration file to write; a package.json receives an rpcTypegen section
        #[arg(short = 'o', long = "output", default_value = CONFIG_FILE_NAME)]
        output_path: PathBuf,

        /// Verbose output
        #[arg(long, action = clap::ArgAction::SetTrue)]
        verbose: bool,

        /// Force overwrite existing configuration
        #[arg(long, action = clap::ArgAction::SetTrue)]
        force: bool,
    },
}

impl From<&Commands> for GenerateConfig {
    fn from(cmd: &Commands) -> Self {
        match cmd {
            Commands::Generate {
                entry_dir,
                router_path,
                client_out_dir,
                client_name,
                endpoint_path_prefix,
                client_template,
                server_template,
                route_style,
                imports_base,
                no_parameterless,
                bundle,
                bundle_out,
                verbose,
                ..
            } => GenerateConfig {
                entry_dir: entry_dir.to_string_lossy().to_string(),
                router_path: router_path.to_string_lossy().to_string(),
                client_out_dir: client_out_dir.to_string_lossy().to_string(),
                client_name: client_name.clone(),
                endpoint_path_prefix: endpoint_path_prefix.clone(),
                client_template: client_template
                    .as_ref()
                    .map(|p| p.to_string_lossy().to_string()),
                server_template: server_template
                    .as_ref()
                    .map(|p| p.to_string_lossy().to_string()),
                route_style: *route_style,
                imports_base: imports_base.clone(),
                allow_parameterless: no_parameterless.then_some(false),
                bundle: bundle.then(|| BundleConfig {
                    out_dir: bundle_out.to_string_lossy().to_string(),
                    ..BundleConfig::default()
                }),
                verbose: verbose.then_some(true),
                ..Default::default()
            },
            Commands::Init {
                entry_dir,
                router_path,
                client_out_dir,
                client_name,
                endpoint_path_prefix,
                verbose,
                ..
            } => GenerateConfig {
                entry_dir: entry_dir.to_string_lossy().to_string(),
                router_path: router_path.to_string_lossy().to_string(),
                client_out_dir: client_out_dir.to_string_lossy().to_string(),
                client_name: client_name.clone(),
                endpoint_path_prefix: endpoint_path_prefix.clone(),
                verbose: Some(*verbose),
                ..Default::default()
            },
        }
    }
}
