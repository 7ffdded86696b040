use chrono::Local;
use clap::Parser;
use log::{error, info};
use std::path::Path;
use std::process::ExitCode;

use bmp280_sensor::bmp280::{BMP280, Bmp280DeviceAddress};
use bmp280_sensor::i2cio;

const EXIT_CODE_SET_CTR_C_HNDLR_FAILED: u8 = 0x02;
const EXIT_CODE_BMP280_INIT_FAILED: u8 = 0x61;
const EXIT_CODE_BMP280_READ_ID_FAILED: u8 = 0x62;
const EXIT_CODE_BMP280_READ_ALL_FAILED: u8 = 0x63;

#[derive(Parser)]
struct Args {
    // -- i2c bus device
    #[clap(env = "BMP280_BUS_PATH", default_value = "/dev/i2c-1")]
    bus_path: String,
    // -- use the secondary device address 0x77
    #[clap(long)]
    secondary: bool,
    // -- delay between readings
    #[clap(long, default_value_t = 1000)]
    interval_ms: u32,
}

fn main() -> ExitCode {

    // -- read .env file
    dotenv::dotenv().ok();
    // -- setup logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let now = Local::now();
    info!("Starting up: {now}");

    let args = Args::parse();
    let bus_path = args.bus_path;
    info!("Using i2c bus device {bus_path}");

    // -- set handler for Ctrl-C
    if let Err(err) = ctrlc::set_handler(move || {
        info!("Received Ctrl+C, terminating...");
        std::process::exit(0);
    }) {
        error!("ERROR - Failed to set Ctrl-C handler: {err}");
        return ExitCode::from(EXIT_CODE_SET_CTR_C_HNDLR_FAILED);
    }

    info!("Initializing BMP280");
    let bus_path = Path::new(&bus_path);
    let dev_addr = match args.secondary {
        false => Bmp280DeviceAddress::Default,
        true => Bmp280DeviceAddress::Secondary,
    };
    let mut bmp280 = match BMP280::new(bus_path, dev_addr) {
        Ok(bmp280) => bmp280,
        Err(err) => {
            error!("ERROR - Failed to initialize BMP280: {err}");
            return ExitCode::from(EXIT_CODE_BMP280_INIT_FAILED);
        }
    };
    let (chip_id, chip_version) = match bmp280.read_chip_identity() {
        Ok(identity) => identity,
        Err(err) => {
            error!("ERROR - Failed to read BMP280 chip id: {err}");
            return ExitCode::from(EXIT_CODE_BMP280_READ_ID_FAILED);
        }
    };
    info!("Chip id: {chip_id}, version: {chip_version}");
    loop {
        let reading = match bmp280.read_all() {
            Ok(reading) => reading,
            Err(err) => {
                error!("ERROR - Failed to read BMP280: {err}");
                return ExitCode::from(EXIT_CODE_BMP280_READ_ALL_FAILED);
            }
        };
        info!("{reading}");
        // -- delay next reading
        i2cio::delay(args.interval_ms);
    }
}
