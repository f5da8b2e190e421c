use std::{fs::OpenOptions, path::Path};

use anyhow::Context;
use env_logger::{Builder, Env, Target};

/// Where log records go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput<'a> {
    /// Standard error, for commands that do not take over the terminal.
    Stderr,
    /// Appended to a file; the only option while the terminal UI is running.
    File(&'a Path),
    /// Logging disabled.
    Off,
}

impl LogOutput<'_> {
    fn default_filter(self) -> &'static str {
        match self {
            LogOutput::Stderr => "warn",
            LogOutput::File(_) => "info",
            LogOutput::Off => "off",
        }
    }
}

/// Installs the global logger. `RUST_LOG` overrides the default filter.
pub fn init(output: LogOutput<'_>) -> anyhow::Result<()> {
    if output == LogOutput::Off {
        return Ok(());
    }

    let mut builder = Builder::from_env(Env::default().default_filter_or(output.default_filter()));
    match output {
        LogOutput::Stderr | LogOutput::Off => {
            builder.target(Target::Stderr);
        }
        LogOutput::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            builder.target(Target::Pipe(Box::new(file))).write_style(env_logger::WriteStyle::Never);
        }
    }
    builder.try_init().context("Failed to initialize logger")?;
    Ok(())
}
