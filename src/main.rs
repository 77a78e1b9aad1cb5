use std::path::PathBuf;

use clap::{AppSettings, Parser};
use itertools::Itertools;
use log::info;

use vex_schedule::{NoSiteTable, SefdLookup, SiteTable, VexDocument, VexError};

#[derive(Parser)]
#[clap(global_setting(AppSettings::DeriveDisplayOrder))]
#[clap(disable_help_subcommand = true)]
#[clap(infer_long_args = true)]
/// Summarise the sources, frequency setup, sites and scans of a VEX file.
struct Args {
    /// The VEX file to read.
    vex: PathBuf,

    /// An array table providing station SEFDs. Without one, every station
    /// gets the default SEFD.
    #[clap(short, long)]
    site_table: Option<PathBuf>,

    /// Only list scans of this source.
    #[clap(long)]
    source: Option<String>,

    /// The verbosity of the program. Increase by specifying multiple times
    /// (e.g. -vv). The default is to print only high-level information.
    #[clap(short, long, parse(from_occurrences))]
    verbosity: u8,
}

fn main() {
    let args = Args::parse();
    setup_logging(args.verbosity);

    if let Err(e) = try_main(args) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn try_main(args: Args) -> Result<(), VexError> {
    let site_table = args.site_table.as_ref().map(SiteTable::from_file).transpose()?;
    let sefd_lookup: &dyn SefdLookup = match site_table.as_ref() {
        Some(t) => t,
        None => &NoSiteTable,
    };
    let vex = VexDocument::from_file(&args.vex, sefd_lookup)?;
    info!("Read {}", args.vex.display());

    println!(
        "Frequency: {} MHz, bandwidth {} MHz",
        vex.center_frequency_hz / 1e6,
        vex.bandwidth_hz / 1e6
    );

    println!("{} sources", vex.sources.len());
    for s in &vex.sources {
        println!("  {:10} {} {} ({})", s.name, s.ra, s.dec, s.coordinate_frame);
    }

    println!("{} sites", vex.sites.len());
    for site in &vex.sites {
        let ids = vex
            .station_ids
            .iter()
            .filter(|(_, name)| *name == site.name)
            .map(|(id, _)| id)
            .sorted()
            .join(",");
        let (x, y, z) = site.position_xyz_m;
        println!(
            "  {ids:3} {:10} {x:15.3} {y:15.3} {z:15.3} SEFD {}",
            site.name, site.sefd
        );
    }

    let scans: Vec<_> = match args.source.as_deref() {
        Some(source) => vex.scans_of_required(source)?.into_vec(),
        None => vex.schedule.iter().collect(),
    };
    println!("{} scans", scans.len());
    for scan in scans {
        println!(
            "  MJD {} {:8.4} h {:10} {:>6} s  {}",
            scan.mjd_floor,
            scan.start_hour,
            scan.source,
            scan.duration_sec().unwrap_or(0.0),
            scan.site_names().join(",")
        );
    }

    Ok(())
}

fn setup_logging(verbosity: u8) {
    let mut builder = env_logger::Builder::from_default_env();
    builder.target(env_logger::Target::Stderr);
    builder.format_target(false);
    match verbosity {
        0 => builder.filter_level(log::LevelFilter::Info),
        1 => builder.filter_level(log::LevelFilter::Debug),
        2 => builder.filter_level(log::LevelFilter::Trace),
        _ => {
            builder.filter_level(log::LevelFilter::Trace);
            builder.format(|buf, record| {
                use std::io::Write;

                let timestamp = buf.timestamp();
                let level = record.level();
                let target = record.target();
                let line = record.line().unwrap_or(0);
                let message = record.args();

                writeln!(buf, "[{timestamp} {level} {target}:{line}] {message}")
            })
        }
    };
    builder.init();
}
