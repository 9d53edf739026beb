//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `vehicle_dal` linkage, bootstrap and a round trip through the
//!   services.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Usage: `vehicle_dal_cli [config.json]`. Without a config the run uses a
//! throwaway in-memory database.

use log::info;
use std::error::Error;
use std::process::ExitCode;
use vehicle_dal::{
    DalConfig, MakeService, ModelService, QueryOptions, UnitOfWork, VehicleMake, VehicleModel,
};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("vehicle_dal_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    println!("vehicle_dal version={}", vehicle_dal::core_version());

    let config = match std::env::args_os().nth(1) {
        Some(path) => DalConfig::load(path)?,
        None => DalConfig::default(),
    };
    vehicle_dal::init_from_config(&config.logging)?;

    let uow = UnitOfWork::from_config(&config)?;
    let makes = MakeService::new(&uow);
    let models = ModelService::new(&uow);

    if makes.get_all(&QueryOptions::new())?.total_count() == 0 {
        let bmw = makes.add(&VehicleMake::new("BMW", "bmw"))?;
        let x5 = models.add(&VehicleModel::new(bmw.id, "X5", "x5"))?;
        info!(
            "event=cli_seed module=cli status=ok make_id={} model_id={}",
            bmw.id, x5.id
        );
    }

    let page = models.get_paged(&QueryOptions::new())?;
    println!("{}", serde_json::to_string_pretty(&page)?);

    uow.dispose()?;
    Ok(())
}
