use clap::Parser;
use rpc_typegen::interface::{
    generate_from_config, load_base_config, print_usage_info, write_init_config, Cli, Commands,
};
use rpc_typegen::{GenerateConfig, Result};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: &Commands) -> Result<()> {
    let config = match command {
        Commands::Generate { config_file, .. } => {
            let mut config = load_base_config(config_file.as_deref())?;
            config.merge(&GenerateConfig::from(command));
            config
        }
        Commands::Init {
            output_path, force, ..
        } => {
            let config = GenerateConfig::from(command);
            config.validate()?;
            write_init_config(&config, output_path, *force)?;
            println!("✓ Wrote configuration to {}", output_path.display());
            config
        }
    };

    let summary = generate_from_config(&config)?;
    if summary.endpoint_count > 0 {
        print_usage_info(&config.client_path(), &config.router_path(), &config.client_name);
    }
    Ok(())
}
