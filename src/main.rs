mod configuration;
mod extent;
mod flight_log;
mod footprint;
mod overlay;
mod path;
mod render;
mod session;
mod telemetry;
mod utilities;
mod video;

use clap::Parser;

lazy_static::lazy_static! {
    pub static ref DATETIME_FORMAT: String = "%Y-%m-%d %H:%M:%S".to_string();
    pub static ref LOG_LEVEL: log::Level = log::Level::Info;
}

pub const FILENAME_DATETIME_FORMAT: &str = "%Y%m%dT%H%M%S";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    // configuration file to read
    configuration_filename: std::path::PathBuf,

    // include debug messages in the log
    #[arg(long, default_value_t = false)]
    debug: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let arguments = Cli::parse();
    let program_start_time = chrono::Local::now();

    let configuration_file = std::fs::File::open(&arguments.configuration_filename)?;
    let configuration: crate::configuration::RunConfiguration =
        serde_yaml::from_reader(configuration_file)?;

    let level = if arguments.debug {
        log::Level::Debug
    } else {
        *LOG_LEVEL
    };
    let mut log = crate::utilities::MessageLog::new(
        level,
        configuration.log_filename(&program_start_time),
    );
    log.add(
        format!(
            "starting \"{:}\" with configuration {:}",
            configuration.name,
            arguments.configuration_filename.to_string_lossy()
        ),
        log::Level::Info,
    );

    match crate::session::run(&configuration, &program_start_time, &mut log) {
        Ok(_) => Ok(()),
        Err(error) => {
            log.add(error.to_string(), log::Level::Error);
            Err(Box::new(error))
        }
    }
}
