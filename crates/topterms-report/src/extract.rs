//! Incremental extraction of array elements from a streamed JSON document.
//!
//! [`ArrayElementScanner`] consumes a document of the shape
//! `{ ... "<field>" : [ {...}, {...}, ... ] ... }` as raw byte chunks and
//! yields each complete top-level `{...}` element of the named array, without
//! ever materializing the array. Element boundaries are found by tracking
//! brace depth and JSON string/escape state, so pretty-printing, separator
//! whitespace, and `}, {` sequences inside string values have no effect on
//! the split — only the document's structure does.
//!
//! The internal buffer holds at most one partial element plus the unconsumed
//! remainder of the current chunk; consumed bytes are drained as elements are
//! emitted. While the field name has not yet been seen, only a needle-sized
//! tail is retained. Memory use is therefore bounded by the largest single
//! element, not by the document size.
//!
//! Precondition: the first occurrence of the quoted field name that is
//! followed (modulo whitespace) by `: [` is the target array. If the field
//! never appears, the scanner emits nothing and the stream completes cleanly.

/// Streaming splitter for one named JSON array field.
pub struct ArrayElementScanner {
    needle: Vec<u8>,
    buf: Vec<u8>,
    state: State,
}

#[derive(Debug, Clone, Copy)]
enum State {
    /// Searching the byte stream for the quoted array field name.
    SeekingField,
    /// Field name seen; expecting `:` then `[`, whitespace allowed.
    SeekingBracket { colon_seen: bool },
    /// Inside the array, before or between elements.
    BetweenElements,
    /// Inside one element object; `pos` is the resume offset into the buffer.
    InElement {
        pos: usize,
        depth: u32,
        in_string: bool,
        escaped: bool,
    },
    /// Array closed; all further input is ignored.
    Closed,
}

impl ArrayElementScanner {
    /// Creates a scanner for the array stored under `field`.
    #[must_use]
    pub fn new(field: &str) -> Self {
        Self {
            needle: format!("\"{field}\"").into_bytes(),
            buf: Vec::new(),
            state: State::SeekingField,
        }
    }

    /// Feeds one chunk of input and returns every element completed by it.
    ///
    /// Chunks may split the document anywhere, including inside multi-byte
    /// UTF-8 sequences; emitted elements are always whole. After the array's
    /// closing `]` has been seen, further chunks are ignored.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Vec<u8>> {
        let mut elements = Vec::new();
        if matches!(self.state, State::Closed) {
            return elements;
        }
        self.buf.extend_from_slice(chunk);

        loop {
            match self.state {
                State::SeekingField => {
                    if let Some(i) = find(&self.buf, &self.needle) {
                        self.buf.drain(..i + self.needle.len());
                        self.state = State::SeekingBracket { colon_seen: false };
                    } else {
                        // Keep a needle-sized tail so an occurrence split
                        // across chunks is still found.
                        let keep = self.needle.len().saturating_sub(1);
                        if self.buf.len() > keep {
                            let cut = self.buf.len() - keep;
                            self.buf.drain(..cut);
                        }
                        break;
                    }
                }
                State::SeekingBracket { colon_seen } => {
                    if !self.seek_bracket(colon_seen) {
                        break;
                    }
                }
                State::BetweenElements => {
                    if !self.seek_element_start() {
                        break;
                    }
                }
                State::InElement {
                    pos,
                    depth,
                    in_string,
                    escaped,
                } => match self.scan_element(pos, depth, in_string, escaped) {
                    Some(element) => elements.push(element),
                    None => break,
                },
                State::Closed => break,
            }
        }
        elements
    }

    /// True once the array's closing `]` has been consumed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self.state, State::Closed)
    }

    /// Bytes currently buffered; bounded by the largest single element.
    #[must_use]
    pub fn buffered_bytes(&self) -> usize {
        self.buf.len()
    }

    /// Advances past `: [`. Returns false when more input is needed.
    fn seek_bracket(&mut self, mut colon_seen: bool) -> bool {
        let mut consumed = 0;
        let mut next = None;
        for &b in &self.buf {
            if b.is_ascii_whitespace() {
                consumed += 1;
            } else if !colon_seen && b == b':' {
                colon_seen = true;
                consumed += 1;
            } else if colon_seen && b == b'[' {
                consumed += 1;
                next = Some(State::BetweenElements);
                break;
            } else {
                // Not the array key after all (e.g. the field name quoted as
                // a string value); resume the search from this byte.
                next = Some(State::SeekingField);
                break;
            }
        }
        self.buf.drain(..consumed);
        match next {
            Some(state) => {
                self.state = state;
                true
            }
            None => {
                self.state = State::SeekingBracket { colon_seen };
                false
            }
        }
    }

    /// Advances to the next `{` or the array's closing `]`.
    /// Returns false when more input is needed or the array closed.
    fn seek_element_start(&mut self) -> bool {
        let mut consumed = 0;
        let mut next = None;
        for &b in &self.buf {
            if b == b'{' {
                next = Some(State::InElement {
                    pos: 1,
                    depth: 1,
                    in_string: false,
                    escaped: false,
                });
                break;
            } else if b == b']' {
                consumed += 1;
                next = Some(State::Closed);
                break;
            } else {
                // Separator whitespace and commas; stray bytes are tolerated.
                consumed += 1;
            }
        }
        self.buf.drain(..consumed);
        match next {
            Some(State::Closed) => {
                self.state = State::Closed;
                self.buf.clear();
                self.buf.shrink_to_fit();
                false
            }
            Some(state) => {
                self.state = state;
                true
            }
            None => false,
        }
    }

    /// Scans forward inside the current element; on its closing brace,
    /// drains and returns the element bytes. Returns `None` when the element
    /// is still incomplete (the partial stays buffered, scan position saved).
    fn scan_element(
        &mut self,
        mut pos: usize,
        mut depth: u32,
        mut in_string: bool,
        mut escaped: bool,
    ) -> Option<Vec<u8>> {
        let mut end = None;
        while pos < self.buf.len() {
            let b = self.buf[pos];
            pos += 1;
            if escaped {
                escaped = false;
                continue;
            }
            if in_string {
                match b {
                    b'\\' => escaped = true,
                    b'"' => in_string = false,
                    _ => {}
                }
                continue;
            }
            match b {
                b'"' => in_string = true,
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        end = Some(pos);
                        break;
                    }
                }
                _ => {}
            }
        }
        if let Some(end) = end {
            let element = self.buf[..end].to_vec();
            self.buf.drain(..end);
            self.state = State::BetweenElements;
            Some(element)
        } else {
            self.state = State::InElement {
                pos,
                depth,
                in_string,
                escaped,
            };
            None
        }
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}
