//! System log output plugin
//!
//! Options: `format` (required template), `tag` (required identifier),
//! `facility` (optional, case-insensitive, default `user`), `socket`
//! (optional unix datagram path, default the platform log socket) or
//! `server` (optional `host:port`, sends over UDP instead).
//!
//! Messages are sent as RFC 3164 datagrams:
//! `<PRI>Mmm dd hh:mm:ss tag[pid]: text`.

use crate::core::{
    required_option, BasicFormatter, Formatter, LogLevel, LoggerError, Message, OutputPlugin,
    Options, Outputter, Result, SharedOutputter,
};
use parking_lot::Mutex;
use std::io;
use std::net::UdpSocket;
#[cfg(unix)]
use std::os::unix::net::UnixDatagram;
#[cfg(unix)]
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Facility {
    Kern = 0 << 3,
    User = 1 << 3,
    Mail = 2 << 3,
    Daemon = 3 << 3,
    Auth = 4 << 3,
    Syslog = 5 << 3,
    Lpr = 6 << 3,
    News = 7 << 3,
    Uucp = 8 << 3,
    Cron = 9 << 3,
    AuthPrivate = 10 << 3,
    Ftp = 11 << 3,
    Local0 = 16 << 3,
    Local1 = 17 << 3,
    Local2 = 18 << 3,
    Local3 = 19 << 3,
    Local4 = 20 << 3,
    Local5 = 21 << 3,
    Local6 = 22 << 3,
    Local7 = 23 << 3,
}

impl Facility {
    pub fn from_name(name: &str) -> Option<Self> {
        let facility = match name.to_ascii_lowercase().as_str() {
            "kern" | "kernel" => Facility::Kern,
            "user" => Facility::User,
            "mail" => Facility::Mail,
            "daemon" => Facility::Daemon,
            "auth" => Facility::Auth,
            "syslog" => Facility::Syslog,
            "lpr" => Facility::Lpr,
            "news" => Facility::News,
            "uucp" => Facility::Uucp,
            "cron" => Facility::Cron,
            "authpriv" => Facility::AuthPrivate,
            "ftp" => Facility::Ftp,
            "local0" => Facility::Local0,
            "local1" => Facility::Local1,
            "local2" => Facility::Local2,
            "local3" => Facility::Local3,
            "local4" => Facility::Local4,
            "local5" => Facility::Local5,
            "local6" => Facility::Local6,
            "local7" => Facility::Local7,
            _ => return None,
        };
        Some(facility)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Severity {
    Emergency,
    Alert,
    Critical,
    Error,
    Warning,
    Notice,
    Info,
    Debug,
}

impl Severity {
    /// Nearest syslog severity of a log level; custom levels map to notice.
    pub fn for_level(level: LogLevel) -> Self {
        match level {
            LogLevel::FATAL => Severity::Critical,
            LogLevel::ERROR => Severity::Error,
            LogLevel::WARN => Severity::Warning,
            LogLevel::NOTICE => Severity::Notice,
            LogLevel::INFO => Severity::Info,
            LogLevel::DEBUG | LogLevel::TRACE => Severity::Debug,
            _ => Severity::Notice,
        }
    }
}

enum SyslogBackend {
    #[cfg(unix)]
    Unix(UnixDatagram),
    Udp(UdpSocket),
}

impl SyslogBackend {
    #[cfg(unix)]
    fn unix(path: &Path) -> io::Result<Self> {
        let sock = UnixDatagram::unbound()?;
        sock.connect(path)?;
        Ok(SyslogBackend::Unix(sock))
    }

    fn udp(server: &str) -> io::Result<Self> {
        let sock = UdpSocket::bind(("0.0.0.0", 0))?;
        sock.connect(server)?;
        Ok(SyslogBackend::Udp(sock))
    }

    fn send(&self, buf: &[u8]) -> io::Result<usize> {
        match self {
            #[cfg(unix)]
            SyslogBackend::Unix(s) => s.send(buf),
            SyslogBackend::Udp(s) => s.send(buf),
        }
    }
}

#[cfg(target_os = "macos")]
const DEFAULT_SOCKET: &str = "/var/run/syslog";
#[cfg(any(target_os = "freebsd", target_os = "dragonfly", target_os = "netbsd"))]
const DEFAULT_SOCKET: &str = "/var/run/log";
#[cfg(not(any(
    target_os = "macos",
    target_os = "freebsd",
    target_os = "dragonfly",
    target_os = "netbsd"
)))]
const DEFAULT_SOCKET: &str = "/dev/log";

/// Sends formatted messages to the system log daemon.
pub struct SyslogOutputter {
    formatter: Box<dyn Formatter>,
    tag: String,
    facility: Facility,
    pid: u32,
    backend: Mutex<SyslogBackend>,
}

impl SyslogOutputter {
    /// Connect to the platform's local log socket.
    pub fn connect(formatter: impl Formatter + 'static, tag: impl Into<String>, facility: Facility) -> Result<Self> {
        Self::connect_socket(formatter, tag, facility, DEFAULT_SOCKET)
    }

    pub fn connect_socket(
        formatter: impl Formatter + 'static,
        tag: impl Into<String>,
        facility: Facility,
        socket: &str,
    ) -> Result<Self> {
        #[cfg(unix)]
        let backend = SyslogBackend::unix(Path::new(socket));
        #[cfg(not(unix))]
        let backend = SyslogBackend::udp("127.0.0.1:514");

        let backend =
            backend.map_err(|e| LoggerError::io_operation("connecting to syslog", socket, e))?;
        Ok(Self::with_backend(formatter, tag, facility, backend))
    }

    pub fn connect_udp(
        formatter: impl Formatter + 'static,
        tag: impl Into<String>,
        facility: Facility,
        server: &str,
    ) -> Result<Self> {
        let backend = SyslogBackend::udp(server)
            .map_err(|e| LoggerError::io_operation("connecting to syslog", server, e))?;
        Ok(Self::with_backend(formatter, tag, facility, backend))
    }

    fn with_backend(
        formatter: impl Formatter + 'static,
        tag: impl Into<String>,
        facility: Facility,
        backend: SyslogBackend,
    ) -> Self {
        Self {
            formatter: Box::new(formatter),
            tag: tag.into(),
            facility,
            pid: std::process::id(),
            backend: Mutex::new(backend),
        }
    }

    fn datagram(&self, msg: &Message) -> String {
        let priority = self.facility as u8 | Severity::for_level(msg.level) as u8;
        format!(
            "<{}>{} {}[{}]: {}",
            priority,
            msg.timestamp.format("%b %e %H:%M:%S"),
            self.tag,
            self.pid,
            self.formatter.format(msg)
        )
    }
}

impl Outputter for SyslogOutputter {
    fn output(&self, msg: &Message) {
        let datagram = self.datagram(msg);
        let _ = self.backend.lock().send(datagram.as_bytes());
    }
}

/// Plugin registered as `syslog`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyslogPlugin;

impl SyslogPlugin {
    pub const NAME: &'static str = "syslog";
}

impl OutputPlugin for SyslogPlugin {
    fn create_outputter(&self, options: &Options) -> Result<SharedOutputter> {
        let formatter = BasicFormatter::new(required_option(options, Self::NAME, "format")?)?;
        let tag = required_option(options, Self::NAME, "tag")?;
        let facility = match options.get("facility") {
            None => Facility::User,
            Some(name) => Facility::from_name(name)
                .ok_or_else(|| LoggerError::invalid_option(Self::NAME, "facility", name.as_str()))?,
        };

        let outputter = if let Some(server) = options.get("server") {
            SyslogOutputter::connect_udp(formatter, tag, facility, server)?
        } else {
            let socket = options.get("socket").map_or(DEFAULT_SOCKET, String::as_str);
            SyslogOutputter::connect_socket(formatter, tag, facility, socket)?
        };
        Ok(Arc::new(outputter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn options(pairs: &[(&str, &str)]) -> Options {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_facility_names() {
        assert_eq!(Facility::from_name("LOCAL3"), Some(Facility::Local3));
        assert_eq!(Facility::from_name("AuthPriv"), Some(Facility::AuthPrivate));
        assert_eq!(Facility::from_name("kern"), Some(Facility::Kern));
        assert_eq!(Facility::from_name("local8"), None);
    }

    #[test]
    fn test_severity_mapping() {
        assert_eq!(Severity::for_level(LogLevel::FATAL), Severity::Critical);
        assert_eq!(Severity::for_level(LogLevel::ERROR), Severity::Error);
        assert_eq!(Severity::for_level(LogLevel::WARN), Severity::Warning);
        assert_eq!(Severity::for_level(LogLevel::NOTICE), Severity::Notice);
        assert_eq!(Severity::for_level(LogLevel::INFO), Severity::Info);
        assert_eq!(Severity::for_level(LogLevel::DEBUG), Severity::Debug);
        assert_eq!(Severity::for_level(LogLevel::TRACE), Severity::Debug);
        assert_eq!(Severity::for_level(LogLevel::custom(450)), Severity::Notice);
    }

    #[test]
    fn test_option_errors() {
        assert!(matches!(
            SyslogPlugin.create_outputter(&options(&[("tag", "app")])),
            Err(LoggerError::MissingOption { ref option, .. }) if option == "format"
        ));
        assert!(matches!(
            SyslogPlugin.create_outputter(&options(&[("format", "$msg")])),
            Err(LoggerError::MissingOption { ref option, .. }) if option == "tag"
        ));
        assert!(matches!(
            SyslogPlugin.create_outputter(&options(&[
                ("format", "$msg"),
                ("tag", "app"),
                ("facility", "moon"),
            ])),
            Err(LoggerError::InvalidOption { ref option, .. }) if option == "facility"
        ));
    }

    #[test]
    fn test_udp_datagram() {
        let server = UdpSocket::bind("127.0.0.1:0").expect("bind");
        server
            .set_read_timeout(Some(Duration::from_secs(5)))
            .expect("timeout");
        let addr = server.local_addr().unwrap().to_string();

        let outputter = SyslogPlugin
            .create_outputter(&options(&[
                ("format", "[$level] $msg"),
                ("tag", "myapp"),
                ("facility", "Local0"),
                ("server", &addr),
            ]))
            .expect("syslog outputter");
        outputter.output(&Message::new(LogLevel::ERROR, "disk full".to_string(), "root".into()));

        let mut buf = [0u8; 512];
        let n = server.recv(&mut buf).expect("datagram");
        let datagram = std::str::from_utf8(&buf[..n]).unwrap();

        // local0 (16 << 3) | error (3)
        assert!(datagram.starts_with("<131>"), "{}", datagram);
        assert!(datagram.contains(&format!(" myapp[{}]: ", std::process::id())));
        assert!(datagram.ends_with("[ERROR] disk full"));
    }

    #[cfg(unix)]
    #[test]
    fn test_unix_socket_datagram() {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("log.sock");
        let server = UnixDatagram::bind(&path).expect("bind");

        let outputter = SyslogPlugin
            .create_outputter(&options(&[
                ("format", "$msg"),
                ("tag", "svc"),
                ("socket", path.to_str().unwrap()),
            ]))
            .expect("syslog outputter");
        outputter.output(&Message::new(LogLevel::DEBUG, "hello".to_string(), "root".into()));

        let mut buf = [0u8; 512];
        let n = server.recv(&mut buf).expect("datagram");
        let datagram = std::str::from_utf8(&buf[..n]).unwrap();

        // user (1 << 3) | debug (7)
        assert!(datagram.starts_with("<15>"), "{}", datagram);
        assert!(datagram.ends_with(&format!(" svc[{}]: hello", std::process::id())));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreachable_socket() {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("nobody-listens.sock");
        assert!(matches!(
            SyslogPlugin.create_outputter(&options(&[
                ("format", "$msg"),
                ("tag", "svc"),
                ("socket", path.to_str().unwrap()),
            ])),
            Err(LoggerError::IoOperation { .. })
        ));
    }
}
