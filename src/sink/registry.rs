//! Ordered sink list owned by the dispatch thread.

use super::{Capabilities, Sink};
use crate::internal;
use crate::pool::Encoded;
use std::path::Path;

struct Entry {
    sink: Box<dyn Sink>,
    caps: Capabilities,
    name: String,
}

/// Registration order is write order. Capabilities are read once, at `push`.
#[derive(Default)]
pub struct SinkRegistry {
    entries: Vec<Entry>,
}

impl SinkRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an already-initialized sink. Active files of the new sink and of every sink
    /// already registered are protected from each other's retention passes.
    pub fn push(&mut self, mut sink: Box<dyn Sink>) {
        if let Some(path) = sink.active_path().map(Path::to_path_buf) {
            for entry in &mut self.entries {
                entry.sink.protect_path(&path);
            }
        }
        for entry in &self.entries {
            if let Some(path) = entry.sink.active_path() {
                sink.protect_path(path);
            }
        }

        let caps = sink.capabilities();
        let name = sink.name();
        if caps.is_empty() {
            internal::debug("REGISTRY", &format!("Registered {name} (write only)"));
        } else {
            internal::debug(
                "REGISTRY",
                &format!(
                    "Registered {name} (flush={}, rotate={}, delete={})",
                    caps.contains(Capabilities::FLUSH),
                    caps.contains(Capabilities::ROTATE),
                    caps.contains(Capabilities::DELETE),
                ),
            );
        }
        self.entries.push(Entry { sink, caps, name });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Delivers `record` to every sink. One sink failing never skips the others.
    pub fn write_all(&mut self, record: &Encoded) {
        for entry in &mut self.entries {
            if let Err(e) = entry.sink.write(record) {
                internal::error("DISPATCH", &format!("{} write failed: {e}", entry.name));
            }
        }
    }

    pub fn flush_all(&mut self) {
        self.each_with(Capabilities::FLUSH, "flush", |sink| sink.flush());
    }

    pub fn rotate_all(&mut self) {
        self.each_with(Capabilities::ROTATE, "rotate", |sink| sink.rotate());
    }

    pub fn delete_all(&mut self) {
        self.each_with(Capabilities::DELETE, "delete", |sink| sink.delete());
    }

    fn each_with(
        &mut self,
        cap: Capabilities,
        action: &str,
        mut op: impl FnMut(&mut dyn Sink) -> Result<(), crate::Error>,
    ) {
        for entry in self.entries.iter_mut().filter(|e| e.caps.contains(cap)) {
            if let Err(e) = op(entry.sink.as_mut()) {
                internal::error("DISPATCH", &format!("{} {action} failed: {e}", entry.name));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::FileSink;
    use std::fs::File;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    #[test]
    fn delete_pass_spares_sibling_active_file() {
        let tmp = TempDir::new().unwrap();
        let main_path = tmp.path().join("service.log");
        let public_path = tmp.path().join("public.log");
        let stale = tmp.path().join("service.log.2020010100");
        File::create(&stale).unwrap();

        let sink = |path: &Path| {
            let mut sink = FileSink::new(path)
                .root(tmp.path())
                .retention(Duration::from_secs(60));
            sink.init().unwrap();
            Box::new(sink)
        };
        let mut registry = SinkRegistry::new();
        registry.push(sink(&main_path));
        registry.push(sink(&public_path));

        let hour_ago = SystemTime::now() - Duration::from_secs(3600);
        for path in [&public_path, &stale] {
            File::options()
                .write(true)
                .open(path)
                .unwrap()
                .set_modified(hour_ago)
                .unwrap();
        }

        registry.delete_all();
        assert!(main_path.exists());
        assert!(public_path.exists());
        assert!(!stale.exists());
    }
}
