use anyhow::{Context, Result};
use cli::CorrectionSource;
use log::{error, info};
use serialport::SerialPort;
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    thread,
};
use ubx_rtk::{CorrectionRelay, Decoder, FixStream, FrameTable, Shutdown, Synchronizer};

mod cli;
mod publish;

fn main() -> Result<()> {
    env_logger::Builder::new()
        .format_target(false)
        .filter_level(log::LevelFilter::Info)
        .parse_env("RUST_LOG")
        .init();

    let cli = cli::CommandBuilder::default()
        .build()
        .about(clap::crate_description!())
        .name(clap::crate_name!())
        .version(clap::crate_version!());
    let settings = cli::Settings::from_matches(&cli.get_matches())?;

    let port = settings.serialport()?;
    let shutdown = Shutdown::new();

    if let Some(source) = &settings.corrections {
        let writer = port
            .try_clone()
            .context("Failed to clone serial port for the correction relay")?;
        spawn_relay(source, writer, shutdown.clone())?;
    }

    if let Some(run_for) = settings.run_for {
        let shutdown = shutdown.clone();
        thread::spawn(move || {
            thread::sleep(run_for);
            info!("Ran for {run_for:?}, stopping ...");
            shutdown.trigger();
        });
    }

    let sync = Synchronizer::new(FrameTable::default(), settings.accept_tag.as_str());
    let mut stream = FixStream::new(port, sync, Decoder::default(), shutdown.clone());
    let mut publisher = publish::Publisher::new(io::stdout());

    info!(
        "Receiver opened on {}, waiting for UBX and {} data ...",
        settings.port, settings.accept_tag
    );
    let result = stream.run(&mut publisher);
    shutdown.trigger();
    info!(
        "Terminated after publishing {} messages",
        publisher.published()
    );
    result.with_context(|| format!("Reading from {} failed", settings.port))
}

fn spawn_relay(
    source: &CorrectionSource,
    writer: Box<dyn SerialPort>,
    shutdown: Shutdown,
) -> Result<thread::JoinHandle<()>> {
    let input: Box<dyn BufRead + Send> = match source {
        CorrectionSource::Stdin => Box::new(BufReader::new(io::stdin())),
        CorrectionSource::File(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
        )),
    };
    info!("Relaying corrections from {source:?}");

    Ok(thread::spawn(move || {
        let mut relay = CorrectionRelay::new(writer);
        match relay.relay_lines(input, &shutdown) {
            Ok(()) => info!(
                "Correction input ended after {} bytes",
                relay.relayed()
            ),
            Err(e) => error!("Correction relay stopped: {e}"),
        }
    }))
}
