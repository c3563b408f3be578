//! Event sources: a local JSON file or an HTTP resource.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::thread;

use crate::error::{Error, Result};
use crate::types::CalendarEvent;

/// Something that can produce the full event list once.
pub trait EventSource {
    /// Human-readable location, used in log messages.
    fn describe(&self) -> String;

    fn fetch(&self) -> Result<Vec<CalendarEvent>>;
}

/// Parse a JSON array of events.
pub fn parse_events(json: &str) -> Result<Vec<CalendarEvent>> {
    Ok(serde_json::from_str(json)?)
}

/// Events stored in a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source for `path`, expanding a leading `~`.
    pub fn new(path: &str) -> Self {
        let expanded = shellexpand::tilde(path);
        FileSource {
            path: PathBuf::from(expanded.as_ref()),
        }
    }
}

impl EventSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<Vec<CalendarEvent>> {
        let json = std::fs::read_to_string(&self.path).map_err(|source| Error::Io {
            path: self.describe(),
            source,
        })?;
        parse_events(&json)
    }
}

/// Events served over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
}

impl HttpSource {
    pub fn new(url: &str) -> Self {
        HttpSource {
            url: url.to_string(),
        }
    }
}

impl EventSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    #[cfg(feature = "http")]
    fn fetch(&self) -> Result<Vec<CalendarEvent>> {
        let http_error = |source| Error::Http {
            url: self.url.clone(),
            source,
        };
        let response = ureq::get(&self.url).call().map_err(http_error)?;
        let body = response.into_body().read_to_string().map_err(http_error)?;
        parse_events(&body)
    }

    #[cfg(not(feature = "http"))]
    fn fetch(&self) -> Result<Vec<CalendarEvent>> {
        Err(Error::UnsupportedSource(format!(
            "{} (built without the `http` feature)",
            self.url
        )))
    }
}

/// Pick a source for a location string: http(s) URLs are fetched, anything
/// else is read as a file path.
pub fn source_for(location: &str) -> Box<dyn EventSource + Send> {
    let lower = location.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Box::new(HttpSource::new(location))
    } else {
        Box::new(FileSource::new(location))
    }
}

/// Fetch events, falling back to an empty list on any failure.
pub fn load_events(source: &dyn EventSource) -> Vec<CalendarEvent> {
    match source.fetch() {
        Ok(events) => {
            tracing::info!(source = %source.describe(), count = events.len(), "loaded events");
            events
        }
        Err(err) => {
            tracing::warn!(source = %source.describe(), error = %err, "event load failed, showing no events");
            Vec::new()
        }
    }
}

/// Load events on a background thread.
///
/// The receiver yields exactly one list once the load finishes. If the
/// load never finishes nothing is ever received.
pub fn spawn_loader(source: Box<dyn EventSource + Send>) -> Receiver<Vec<CalendarEvent>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let events = load_events(&*source);
        // Receiver gone means the session already ended.
        let _ = tx.send(events);
    });
    rx
}
