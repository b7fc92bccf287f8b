use std::{
    fs::OpenOptions,
    io::{self, BufWriter, Write},
};

use tracing::{debug, warn};

use crate::{error::Result, model::record::RecordBundle, processor::recorded_data::RecordWriter};

/// Writes every bundle as one JSON document per line.
///
/// Once open, write failures are logged and the bundle is dropped; the
/// processor is never interrupted by its writer.
pub struct JsonlRecordWriter {
    out: Box<dyn Write + Send>,
    pretty: bool,
    written: usize,
}

impl JsonlRecordWriter {
    /// Append to `path`, creating it if needed.
    pub fn create(path: &str) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        debug!(path, "opened record file");
        Ok(Self::from_writer(BufWriter::new(file)))
    }

    pub fn stdout() -> Self {
        Self::from_writer(io::stdout())
    }

    pub fn from_writer(out: impl Write + Send + 'static) -> Self {
        Self {
            out: Box::new(out),
            pretty: false,
            written: 0,
        }
    }

    /// Pretty-print each bundle (one bundle then spans several lines).
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Bundles successfully written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn flush(&mut self) {
        if let Err(e) = self.out.flush() {
            warn!(error = %e, "failed to flush record writer");
        }
    }
}

impl RecordWriter for JsonlRecordWriter {
    fn write(&mut self, bundle: RecordBundle) {
        let json = if self.pretty {
            serde_json::to_string_pretty(&bundle)
        } else {
            serde_json::to_string(&bundle)
        };

        let json = match json {
            Ok(j) => j,
            Err(e) => {
                warn!(view_id = %bundle.view_id, error = %e, "failed to serialize record bundle");
                return;
            }
        };

        if let Err(e) = writeln!(self.out, "{}", json) {
            warn!(error = %e, "failed to write record bundle");
            return;
        }

        self.written += 1;
    }
}

impl Drop for JsonlRecordWriter {
    fn drop(&mut self) {
        self.flush();
    }
}
