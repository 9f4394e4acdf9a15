use clap::Parser;

use folio::cli::{Cli, Commands};
use folio::{Config, cli};

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let config = Config::load()?;
    folio::init_tracing(&config);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    match args.command {
        None | Some(Commands::Serve) => runtime.block_on(folio::run(config)),

        Some(Commands::CreateAdmin {
            email,
            name,
            password,
        }) => runtime.block_on(cli::create_admin(&config, email, &name, &password)),

        Some(Commands::Seed) => runtime.block_on(cli::seed(&config)),

        Some(Commands::Init) => {
            if Config::create_default_if_missing()? {
                println!("✓ Config file created. Edit folio.toml and run again.");
            } else {
                println!("Config file already exists.");
            }
            Ok(())
        }
    }
}
