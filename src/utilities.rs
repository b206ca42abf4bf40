use std::io::Write;

#[cfg(test)]
pub fn approx_equal(a: f64, b: f64, decimal_precision: u8) -> bool {
    let p = 10f64.powi(-(decimal_precision as i32));
    (a - b).abs() < p
}

pub type LogMessage = (chrono::DateTime<chrono::Local>, String, log::Level);

pub fn message(message: String, level: log::Level) -> LogMessage {
    (chrono::Local::now(), message, level)
}

pub fn format_message(time: &chrono::DateTime<chrono::Local>, message: &str, level: log::Level) -> String {
    format!(
        "{:} {:<5} {:}",
        time.format(&crate::DATETIME_FORMAT),
        level,
        message
    )
}

/// Collects progress and error messages, echoing accepted ones to stderr and an optional log file.
pub struct MessageLog {
    pub level: log::Level,
    pub messages: Vec<LogMessage>,
    pub filename: Option<std::path::PathBuf>,
    pub echo: bool,
}

impl MessageLog {
    pub fn new(level: log::Level, filename: Option<std::path::PathBuf>) -> Self {
        Self {
            level,
            messages: vec![],
            filename,
            echo: true,
        }
    }

    #[cfg(test)]
    pub fn silent(level: log::Level) -> Self {
        Self {
            level,
            messages: vec![],
            filename: None,
            echo: false,
        }
    }

    pub fn add(&mut self, message: String, level: log::Level) {
        self.push(crate::utilities::message(message, level));
    }

    pub fn extend(&mut self, messages: Vec<LogMessage>) {
        for message in messages {
            self.push(message);
        }
    }

    fn push(&mut self, message: LogMessage) {
        let (time, text, level) = &message;
        if *level > self.level {
            return;
        }

        let line = format_message(time, text, *level);
        if self.echo {
            eprintln!("{:}", line);
        }

        if let Some(filename) = &self.filename {
            let written = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(filename)
                .and_then(|mut file| writeln!(file, "{:}", line));
            if let Err(error) = written {
                eprintln!(
                    "could not write to log file {:}; {:}",
                    filename.to_string_lossy(),
                    error
                );
                self.filename = None;
            }
        }

        self.messages.push(message);
    }
}

pub fn duration_string(duration: &chrono::Duration) -> String {
    let mut parts = vec![];

    let hours = duration.num_hours().abs();
    let minutes = duration.num_minutes().abs() % 60;
    let seconds = duration.num_seconds().abs() % 60;
    let tenths = (duration.num_milliseconds().abs() % 1000) / 100;

    if hours > 0 {
        parts.push(format!("{:}h", hours));
    }

    if minutes > 0 {
        parts.push(format!("{:}m", minutes));
    }

    if seconds > 0 || tenths > 0 {
        if tenths > 0 {
            parts.push(format!("{:}.{:}s", seconds, tenths));
        } else {
            parts.push(format!("{:}s", seconds));
        }
    }

    if parts.is_empty() {
        parts.push("0s".to_string());
    }

    parts.join(" ")
}
