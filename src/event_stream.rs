/// Splits a `text/event-stream` into event payloads.
///
/// Consecutive `data:` lines are joined with `\n`; an empty line dispatches
/// the event. Comments and the other event-stream fields are skipped. Input
/// may arrive in arbitrary chunks; incomplete lines are buffered.
#[derive(Debug, Default, Clone)]
pub struct EventStreamDecoder {
    line: String,
    data: Vec<String>,
}

impl EventStreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, chunk: &str) -> Vec<String> {
        let mut events = Vec::new();
        self.line.push_str(chunk);

        while let Some(pos) = self.line.find(['\n', '\r']) {
            let line: String = self.line[..pos].to_string();
            let mut consumed = pos + 1;
            // CRLF counts as one line break
            if self.line[pos..].starts_with("\r\n") {
                consumed += 1;
            } else if self.line[pos..].starts_with('\r') && consumed == self.line.len() {
                // a lone CR at the end may be the first half of CRLF
                break;
            }
            self.line.drain(..consumed);
            if let Some(event) = self.process_line(&line) {
                events.push(event);
            }
        }
        events
    }

    /// Dispatch whatever data is pending, e.g. when the connection drops.
    pub fn finish(&mut self) -> Option<String> {
        if !self.line.is_empty() {
            let line = std::mem::take(&mut self.line);
            let line = line.trim_end_matches('\r');
            if let Some(event) = self.process_line(line) {
                return Some(event);
            }
        }
        self.dispatch()
    }

    fn process_line(&mut self, line: &str) -> Option<String> {
        if line.is_empty() {
            return self.dispatch();
        }
        if line.starts_with(':') {
            return None;
        }
        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        match field {
            "data" => self.data.push(value.to_string()),
            "event" | "id" | "retry" => {
                log::trace!("Ignoring event-stream field {}: {}", field, value)
            }
            other => log::debug!("Unknown event-stream field [{}]", other),
        }
        None
    }

    fn dispatch(&mut self) -> Option<String> {
        if self.data.is_empty() {
            return None;
        }
        Some(std::mem::take(&mut self.data).join("\n"))
    }
}
