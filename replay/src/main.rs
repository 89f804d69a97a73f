use std::{io, path::Path};

use clap::Parser;
use replay_core::{config, replay, transcript};
use spdy::FrameEncoder;
use tracing::{error, info, info_span};

mod logging;

fn file_appender(log_file: &Path) -> io::Result<tracing_appender::rolling::RollingFileAppender> {
    let directory = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir()?,
    };
    let file_name = log_file
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "log file has no name"))?;

    Ok(tracing_appender::rolling::never(directory, file_name))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> io::Result<()> {
    let cli_conf = config::CliConfig::parse();

    let config_file_content = match config::read_config_from_file(&cli_conf.config).await {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let conf = match config::Config::from_yaml_str(&config_file_content).await {
        Ok(c) => c,
        Err(err) => {
            eprintln!("Error while loading configuration file: {}", err);
            std::process::exit(1);
        }
    };

    if let Some(log_file) = conf.log_file.as_ref() {
        logging::init_logging_file(&cli_conf, file_appender(log_file)?);
        info!("Init logging to file: {}", log_file.display());
    } else {
        logging::init_logging(&cli_conf);
    }

    let entries = match transcript::read_transcript_from_file(&conf.transcript)
        .await
        .and_then(|content| transcript::parse_transcript(&content))
    {
        Ok(entries) => entries,
        Err(err) => {
            error!("Failed to load transcript {}: {}", conf.transcript.display(), err);
            std::process::exit(1);
        }
    };

    let span = info_span!("replay", version = %conf.version);
    let _guard = span.enter();
    info!("Replaying {} entries", entries.len());

    let mut encoder = FrameEncoder::new(conf.version);
    match replay::replay(&mut encoder, entries, |frame| println!("{frame}")) {
        Ok(count) => {
            info!("Encoded {count} frame(s)");
            Ok(())
        }
        Err(err) => {
            error!("Replay stopped: {err}");
            std::process::exit(2);
        }
    }
}
