use std::error::Error;
use std::path::PathBuf;

use log::{LevelFilter, info, warn};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

mod output;
mod runs;
mod scenario;

use output::write_csv_file;
use scenario::Scenario;

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let scenario = match args.next() {
        Some(path) => Scenario::load(&path)?,
        None => Scenario::default(),
    };
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "output".to_string()));

    let level = scenario.level_filter();
    TermLogger::init(
        level.unwrap_or(LevelFilter::Info),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;
    if level.is_none() {
        warn!("unknown log level {:?}, using info", scenario.log_level);
    }

    let ramp = runs::drivetrain_ramp(&scenario)?;
    let cruise = runs::drivetrain_cruise(&scenario)?;
    let speed_hold = runs::drivetrain_speed_hold(&scenario)?;
    let circle = runs::bicycle_circle(&scenario)?;
    let figure_eight = runs::bicycle_figure_eight(&scenario)?;

    for path in [
        write_csv_file(&out_dir, "drivetrain_ramp", &ramp)?,
        write_csv_file(&out_dir, "drivetrain_cruise", &cruise)?,
        write_csv_file(&out_dir, "drivetrain_speed_hold", &speed_hold)?,
        write_csv_file(&out_dir, "bicycle_circle", &circle)?,
        write_csv_file(&out_dir, "bicycle_figure_eight", &figure_eight)?,
    ] {
        info!("wrote {}", path.display());
    }

    Ok(())
}
