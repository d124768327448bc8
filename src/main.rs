use anyhow::Context;
use box_shipper::app::{form, report};
use box_shipper::config::{Command, StoreBackend};
use box_shipper::utils::{logger, validation::Validate};
use box_shipper::{
    BoxService, BoxStore, CliConfig, ErrorCategory, JsonFileStore,
    MemoryStore, RestStore, ShippingEngine, ShippingError, TomlConfig,
};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let config = match &cli.config {
        Some(path) => TomlConfig::from_file(path)
            .with_context(|| format!("Failed to load config file '{}'", path.display()))?,
        None => TomlConfig::default(),
    };

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let engine = config.build_engine()?;
    let store = &config.store;

    let outcome = match store.backend {
        StoreBackend::Memory => run(BoxService::new(MemoryStore::new(), engine), cli.command).await,
        StoreBackend::File => {
            let store = JsonFileStore::new(&store.path);
            run(BoxService::new(store, engine), cli.command).await
        }
        StoreBackend::Rest => {
            // validate() guarantees both are present for the rest backend
            let endpoint = store.endpoint.clone().unwrap_or_default();
            let api_key = store.api_key.clone().unwrap_or_default();
            let store = RestStore::new(endpoint, api_key, store.table.clone());
            run(BoxService::new(store, engine), cli.command).await
        }
    };

    if let Err(e) = outcome {
        tracing::error!("Command failed: {} (Category: {:?})", e, e.category());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.category() {
            ErrorCategory::UserInput => 2,
            ErrorCategory::System => 1,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

async fn run<S: BoxStore>(service: BoxService<S>, command: Command) -> Result<(), ShippingError> {
    let engine = service.engine();

    match command {
        Command::Add {
            receiver,
            weight,
            color,
            destination,
        } => {
            let mut submission = form::submission_from_input(receiver, weight, &color, destination);

            let check = form::check_submission(engine, &mut submission);
            if !check.errors.is_valid() {
                for (field, message) in check.errors.iter() {
                    eprintln!("  {}: {}", field.as_str(), message);
                }
                if check.weight_reset {
                    eprintln!("  weight has been reset to {} kg", submission.weight);
                }
                return Err(ShippingError::Validation(check.errors));
            }

            let record = service.save_box(&submission).await?;
            println!("✅ Box saved successfully!");
            print_record(engine, &record);
        }
        Command::Estimate {
            weight,
            destination,
        } => {
            let cost = service.estimate(weight, &destination)?;
            println!(
                "Estimated shipping cost to {}: {}",
                engine.display_name(&destination),
                engine.format_currency(cost)
            );
        }
        Command::List { csv } => {
            let records = service.fetch_boxes().await?;
            let stdout = std::io::stdout();
            if csv {
                report::write_csv(stdout.lock(), &records)?;
            } else {
                report::write_table(&mut stdout.lock(), engine, &records)?;
            }
        }
        Command::Countries => print_countries(engine),
    }

    Ok(())
}

fn print_record(engine: &ShippingEngine, record: &box_shipper::BoxRecord) {
    let row = engine.render_row(record);
    println!("  Id:            {}", record.id);
    println!("  Receiver:      {}", row.receiver_name);
    println!("  Weight:        {}", row.weight);
    println!("  Color:         {}", row.color);
    println!("  Destination:   {}", row.destination);
    println!("  Shipping cost: {}", row.shipping_cost);
}

fn print_countries(engine: &ShippingEngine) {
    for option in engine.pricing().options() {
        println!(
            "{:<10} {} ({} per kg)",
            option.code,
            option.name,
            engine.format_currency(option.multiplier)
        );
    }
}
