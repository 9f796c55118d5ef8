use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgMatches};
use serialport::{FlowControl as SerialFlowControl, SerialPort};
use std::{path::PathBuf, time::Duration};
use ubx_rtk::constants::DEFAULT_ACCEPTED_TAG;

pub struct CommandBuilder {
    command: clap::Command,
}

/// Where hex encoded correction lines are read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorrectionSource {
    Stdin,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub port: String,
    pub baud_rate: u32,
    pub stop_bits: serialport::StopBits,
    pub data_bits: serialport::DataBits,
    pub parity: serialport::Parity,
    pub timeout: Duration,
    pub corrections: Option<CorrectionSource>,
    pub accept_tag: String,
    pub run_for: Option<Duration>,
}

impl Default for CommandBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandBuilder {
    pub fn new() -> Self {
        let command = clap::Command::new("u-blox RTK node")
            .about("Publishes RTK fixes of a u-blox receiver and relays corrections to it")
            .arg_required_else_help(true)
            .arg(
                Arg::new("port")
                    .value_name("port")
                    .short('p')
                    .long("port")
                    .required(true)
                    .help("Serial port to open to connect to the receiver"),
            )
            .arg(
                Arg::new("baud")
                    .value_name("baud")
                    .short('s')
                    .long("baud")
                    .required(false)
                    .default_value("115200")
                    .value_parser(value_parser!(u32))
                    .help("Baud rate for the selected port"),
            )
            .arg(
                Arg::new("stop-bits")
                    .long("stop-bits")
                    .help("Number of stop bits for the selected port")
                    .required(false)
                    .value_parser(["1", "2"])
                    .default_value("1"),
            )
            .arg(
                Arg::new("data-bits")
                    .long("data-bits")
                    .help("Number of data bits for the selected port")
                    .required(false)
                    .value_parser(["7", "8"])
                    .default_value("8"),
            )
            .arg(
                Arg::new("parity")
                    .long("parity")
                    .help("Parity to use for selected port")
                    .required(false)
                    .value_parser(["even", "odd"]),
            )
            .arg(
                Arg::new("timeout-ms")
                    .value_name("ms")
                    .long("timeout-ms")
                    .required(false)
                    .default_value("1000")
                    .value_parser(value_parser!(u64))
                    .help("Read timeout of the serial port, in milliseconds"),
            )
            .arg(
                Arg::new("corrections")
                    .value_name("PATH|-")
                    .short('c')
                    .long("corrections")
                    .required(false)
                    .value_parser(value_parser!(String))
                    .help("Relay hex encoded correction lines from a file, or '-' for stdin"),
            )
            .arg(
                Arg::new("accept-tag")
                    .long("accept-tag")
                    .required(false)
                    .default_value(DEFAULT_ACCEPTED_TAG)
                    .value_parser(|tag: &str| {
                        if tag.len() == 5 && tag.bytes().all(|b| b.is_ascii_alphanumeric()) {
                            Ok(tag.to_string())
                        } else {
                            Err(format!("'{tag}' is not a 5 character sentence tag"))
                        }
                    })
                    .help("Talker and type of the NMEA sentences to forward"),
            )
            .arg(
                Arg::new("run-for")
                    .value_name("secs")
                    .long("run-for")
                    .required(false)
                    .value_parser(value_parser!(u64))
                    .help("Stop after the given number of seconds"),
            );
        Self { command }
    }

    pub fn build(&self) -> clap::Command {
        self.command.clone()
    }
}

impl Settings {
    pub fn from_matches(cli: &ArgMatches) -> Result<Self> {
        let port = cli
            .get_one::<String>("port")
            .cloned()
            .context("Expected required 'port' cli argument")?;

        let baud_rate = cli.get_one::<u32>("baud").cloned().unwrap_or(115_200);
        let stop_bits = match cli.get_one::<String>("stop-bits").map(|s| s.as_str()) {
            Some("2") => serialport::StopBits::Two,
            _ => serialport::StopBits::One,
        };
        let data_bits = match cli.get_one::<String>("data-bits").map(|s| s.as_str()) {
            Some("7") => serialport::DataBits::Seven,
            _ => serialport::DataBits::Eight,
        };
        let parity = match cli.get_one::<String>("parity").map(|s| s.as_str()) {
            Some("odd") => serialport::Parity::Odd,
            Some("even") => serialport::Parity::Even,
            _ => serialport::Parity::None,
        };
        let timeout =
            Duration::from_millis(cli.get_one::<u64>("timeout-ms").cloned().unwrap_or(1000));

        let corrections = cli
            .get_one::<String>("corrections")
            .map(|path| match path.as_str() {
                "-" => CorrectionSource::Stdin,
                path => CorrectionSource::File(PathBuf::from(path)),
            });

        let accept_tag = cli
            .get_one::<String>("accept-tag")
            .cloned()
            .unwrap_or_else(|| DEFAULT_ACCEPTED_TAG.to_string());

        let run_for = cli.get_one::<u64>("run-for").map(|s| Duration::from_secs(*s));

        Ok(Self {
            port,
            baud_rate,
            stop_bits,
            data_bits,
            parity,
            timeout,
            corrections,
            accept_tag,
            run_for,
        })
    }

    pub fn serialport(&self) -> Result<Box<dyn SerialPort>> {
        let builder = serialport::new(&self.port, self.baud_rate)
            .stop_bits(self.stop_bits)
            .data_bits(self.data_bits)
            .timeout(self.timeout)
            .parity(self.parity)
            .flow_control(SerialFlowControl::None);

        log::debug!("{:?}", &builder);
        builder
            .open()
            .with_context(|| format!("Failed to open port: {}", self.port))
    }
}
