use std::io::Write as _;

use colored::{Color, ColoredString, Colorize};
use kwatch_webclient::SubmissionStatus;

#[macro_export]
macro_rules! print_success {
    ($fmt:literal, $($e:tt)*) => {
        use ::colored::Colorize as _;
        println!("{}", format!($fmt, $($e)*).green())
    }
}

pub trait ColorTheme {
    fn color(&self) -> Color;
}

impl ColorTheme for log::Level {
    fn color(&self) -> Color {
        use log::Level::*;
        match self {
            Error => Color::BrightRed,
            Warn => Color::BrightYellow,
            Info => Color::Cyan,
            Debug => Color::Magenta,
            Trace => Color::Blue,
        }
    }
}

impl ColorTheme for SubmissionStatus {
    fn color(&self) -> Color {
        use SubmissionStatus::*;
        match self {
            Pending | Running => Color::Yellow,
            Complete => Color::Green,
            Error => Color::Red,
            Other(_) => Color::BrightBlack,
        }
    }
}

pub fn status_label(status: &SubmissionStatus) -> ColoredString {
    format!("{:<8}", status.as_str()).color(status.color()).bold()
}

/// Initializes `env_logger` with a colored `<time> <LEVEL> <message>` format.
/// `RUST_LOG` overrides `default_level`.
pub fn init_logger(default_level: log::LevelFilter) {
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_env("RUST_LOG")
        .format(|buf, record| {
            let level = record.level();
            writeln!(
                buf,
                "{} {} {}",
                chrono::Local::now()
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
                    .dimmed(),
                format!("{:<5}", level).color(level.color()).bold(),
                record.args()
            )
        })
        .init();
}
