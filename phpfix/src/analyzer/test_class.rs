//! Detects the body ranges of test-case classes.
//!
//! A class counts as a test case when it extends a base and either its own
//! name ends in `Test` or the base name ends in `TestCase`. This is the
//! lexical heuristic the data-provider rename relies on; no symbol
//! resolution happens here.

use crate::token::TokenKind;
use crate::tokens::TokenStream;

/// Lazy iterator over `(body_start, body_end)` brace indices, one pair per
/// recognized test class.
pub struct TestClassRanges<'a> {
    stream: &'a TokenStream,
    cursor: usize,
}

impl<'a> TestClassRanges<'a> {
    /// Starts a scan over the whole stream.
    #[must_use]
    pub fn new(stream: &'a TokenStream) -> Self {
        Self { stream, cursor: 0 }
    }
}

impl Iterator for TestClassRanges<'_> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while self.cursor < self.stream.len() {
            let class_index = self.cursor;
            self.cursor += 1;
            if !self.stream[class_index].is_keyword("class") {
                continue;
            }
            let Some(range) = classify(self.stream, class_index) else {
                continue;
            };
            // Skip past this class body so nested scans don't re-match.
            self.cursor = range.1 + 1;
            return Some(range);
        }
        None
    }
}

fn classify(stream: &TokenStream, class_index: usize) -> Option<(usize, usize)> {
    let name_index = stream.next_meaningful(class_index)?;
    let name = stream.get(name_index)?;
    if !name.is_kind(TokenKind::Identifier) {
        // Anonymous class.
        return None;
    }

    let body_start = stream.next_content(class_index, "{")?;
    let body_end = stream.find_block_end(body_start)?;

    let base = extends_base(stream, name_index, body_start);
    let is_test = match base {
        Some(base_name) => {
            base_name.ends_with("TestCase") || name.content().ends_with("Test")
        }
        // Without a parent there is nothing PHPUnit would run.
        None => return None,
    };
    is_test.then_some((body_start, body_end))
}

/// The last identifier of the `extends` target, if any, so namespaced bases
/// like `\PHPUnit\Framework\TestCase` compare on their final segment.
fn extends_base<'a>(
    stream: &'a TokenStream,
    name_index: usize,
    body_start: usize,
) -> Option<&'a str> {
    let mut cursor = name_index;
    let extends = loop {
        cursor = stream.next_meaningful(cursor)?;
        if cursor >= body_start {
            return None;
        }
        if stream[cursor].is_keyword("extends") {
            break cursor;
        }
        if stream[cursor].is_keyword("implements") {
            return None;
        }
    };

    let mut last_identifier = None;
    let mut cursor = extends;
    while let Some(next) = stream.next_meaningful(cursor) {
        if next >= body_start {
            break;
        }
        let token = &stream[next];
        if token.is_kind(TokenKind::Identifier) {
            last_identifier = Some(token.content());
        } else if !token.is_content("\\") {
            break;
        }
        cursor = next;
    }
    last_identifier
}
