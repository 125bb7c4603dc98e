use std::{
    env,
    io::{self, Write},
    path::{Path, PathBuf},
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt::MakeWriter, prelude::*, registry, EnvFilter};

/// Writes every log line to both the console and the log file.
///
/// Each side receives the whole buffer. An error is only reported when both
/// sides fail.
struct Tee<A, B> {
    console: A,
    file: B,
}

impl<A: Write, B: Write> Write for Tee<A, B> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let console = self.console.write_all(buf);
        let file = self.file.write_all(buf);
        console.or(file).map(|()| buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let console = self.console.flush();
        let file = self.file.flush();
        console.and(file)
    }
}

struct MakeTee<A, B> {
    console: A,
    file: B,
}

impl<'a, A, B> MakeWriter<'a> for MakeTee<A, B>
where
    A: MakeWriter<'a>,
    B: MakeWriter<'a>,
{
    type Writer = Tee<A::Writer, B::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        Tee {
            console: self.console.make_writer(),
            file: self.file.make_writer(),
        }
    }
}

/// Where log events are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    Console,
    File,
    Both,
    None,
}

/// How log events are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Human,
    Compact,
    Json,
}

/// Logging settings read from `LOG_LEVEL`, `LOG_OUTPUT`, `LOG_FORMAT` and
/// `LOG_FILE_PATH`. `RUST_LOG` still wins over `LOG_LEVEL` when set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: String,
    pub output: LogOutput,
    pub format: LogFormat,
    pub file_path: PathBuf,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            output: LogOutput::Console,
            format: LogFormat::Human,
            file_path: PathBuf::from("/tmp/vmsetup.log"),
        }
    }
}

impl LogSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup. Unknown values fall
    /// back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let output = match lookup("LOG_OUTPUT").as_deref() {
            Some("file") => LogOutput::File,
            Some("both") => LogOutput::Both,
            Some("none") => LogOutput::None,
            _ => defaults.output,
        };
        let format = match lookup("LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            Some("compact") => LogFormat::Compact,
            _ => defaults.format,
        };

        Self {
            level: lookup("LOG_LEVEL").unwrap_or(defaults.level),
            output,
            format,
            file_path: lookup("LOG_FILE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.file_path),
        }
    }

    fn file_parts(&self) -> (&Path, &Path) {
        let dir = self
            .file_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("/tmp"));
        let name = self
            .file_path
            .file_name()
            .map(Path::new)
            .unwrap_or_else(|| Path::new("vmsetup.log"));
        (dir, name)
    }
}

macro_rules! init_with_writer {
    ($subscriber:expr, $writer:expr, $format:expr) => {{
        let fmt_layer = tracing_subscriber::fmt::layer().with_writer($writer);
        match $format {
            LogFormat::Json => $subscriber.with(fmt_layer.json()).try_init(),
            LogFormat::Compact => $subscriber.with(fmt_layer.compact()).try_init(),
            LogFormat::Human => $subscriber.with(fmt_layer).try_init(),
        }
    }};
}

/// Initializes the global tracing subscriber based on environment variables.
///
/// Console output goes to stderr so stdout carries only the step banners and
/// the output of the invoked tools. The returned guard must be held until
/// exit when file output is enabled.
pub fn init_subscriber() -> Option<WorkerGuard> {
    init_with_settings(&LogSettings::from_env())
}

pub fn init_with_settings(settings: &LogSettings) -> Option<WorkerGuard> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level));
    let subscriber = registry().with(env_filter);

    let (log_dir, log_filename) = settings.file_parts();
    let mut guard: Option<WorkerGuard> = None;

    let result = match settings.output {
        LogOutput::Both => {
            let file_appender = tracing_appender::rolling::daily(log_dir, log_filename);
            let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
            guard = Some(_guard);

            let tee_writer = MakeTee {
                console: std::io::stderr,
                file: non_blocking,
            };
            init_with_writer!(subscriber, tee_writer, settings.format)
        }
        LogOutput::Console => init_with_writer!(subscriber, std::io::stderr, settings.format),
        LogOutput::File => {
            let file_appender = tracing_appender::rolling::daily(log_dir, log_filename);
            let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
            guard = Some(_guard);
            init_with_writer!(subscriber, non_blocking, settings.format)
        }
        LogOutput::None => subscriber.try_init(),
    };

    // A subscriber may already be installed (tests, embedding); keep it.
    if result.is_err() {
        return None;
    }

    guard
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let settings = LogSettings::from_lookup(|_| None);
        assert_eq!(settings, LogSettings::default());
        assert_eq!(settings.output, LogOutput::Console);
        assert_eq!(settings.format, LogFormat::Human);
    }

    #[test]
    fn test_reads_all_variables() {
        let settings = LogSettings::from_lookup(lookup_from(&[
            ("LOG_LEVEL", "debug"),
            ("LOG_OUTPUT", "both"),
            ("LOG_FORMAT", "json"),
            ("LOG_FILE_PATH", "/var/log/vmsetup/run.log"),
        ]));
        assert_eq!(settings.level, "debug");
        assert_eq!(settings.output, LogOutput::Both);
        assert_eq!(settings.format, LogFormat::Json);

        let (dir, name) = settings.file_parts();
        assert_eq!(dir, Path::new("/var/log/vmsetup"));
        assert_eq!(name, Path::new("run.log"));
    }

    #[test]
    fn test_unknown_values_fall_back() {
        let settings = LogSettings::from_lookup(lookup_from(&[
            ("LOG_OUTPUT", "syslog"),
            ("LOG_FORMAT", "xml"),
        ]));
        assert_eq!(settings.output, LogOutput::Console);
        assert_eq!(settings.format, LogFormat::Human);
    }

    #[test]
    fn test_bare_file_name_logs_to_tmp() {
        let settings = LogSettings::from_lookup(lookup_from(&[("LOG_FILE_PATH", "run.log")]));
        let (dir, name) = settings.file_parts();
        assert_eq!(dir, Path::new("/tmp"));
        assert_eq!(name, Path::new("run.log"));
    }

    #[test]
    fn test_second_init_is_harmless() {
        let settings = LogSettings {
            output: LogOutput::None,
            ..LogSettings::default()
        };
        let _ = init_with_settings(&settings);
        assert!(init_with_settings(&settings).is_none());
    }

    #[derive(Clone, Default)]
    struct SharedBuffer(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct ClosedSink;

    impl Write for ClosedSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_both_output_reaches_console_and_file() {
        let console = SharedBuffer::default();
        let file = SharedBuffer::default();
        let (console_handle, file_handle) = (console.clone(), file.clone());

        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(MakeTee {
                console: move || console_handle.clone(),
                file: move || file_handle.clone(),
            })
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(block = "setup_vim", "starting");
        });

        assert!(console.contents().contains("starting"));
        assert!(file.contents().contains("setup_vim"));
        assert_eq!(console.contents(), file.contents());
    }

    #[test]
    fn test_tee_keeps_writing_when_one_side_fails() {
        let file = SharedBuffer::default();
        let mut tee = Tee {
            console: ClosedSink,
            file: file.clone(),
        };
        assert_eq!(tee.write(b"line\n").unwrap(), 5);
        assert_eq!(file.contents(), "line\n");

        let mut broken = Tee {
            console: ClosedSink,
            file: ClosedSink,
        };
        assert!(broken.write(b"line\n").is_err());
    }
}
