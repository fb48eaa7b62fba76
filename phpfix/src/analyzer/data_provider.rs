//! Collects data-provider declarations and their `@dataProvider` usages
//! inside one test-class body.

use crate::token::TokenKind;
use crate::tokens::TokenStream;
use compact_str::CompactString;
use regex::Regex;
use rustc_hash::FxHashMap;
use std::sync::OnceLock;

/// Regex extracting the referenced method name from a `@dataProvider`
/// annotation line.
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
fn annotation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(r"@dataProvider\s+(\w+)").expect("invalid data provider annotation regex")
    })
}

/// One method referenced by `@dataProvider` annotations, with every
/// reference site collected.
///
/// Eligibility decisions (single use, name collisions) belong to the caller;
/// this record reports multi-use providers too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataProviderRecord {
    /// The provider method's name.
    pub name: CompactString,
    /// Token index of the provider method's name identifier.
    pub name_index: usize,
    /// Doc-comment token indices mentioning the provider, in stream order.
    pub usage_indices: Vec<usize>,
}

/// Scans `[start, end]` for provider methods and their annotation usages.
///
/// Records come back in declaration order. Annotations naming a method that
/// does not exist in the range are dropped (nothing to rename).
#[must_use]
pub fn data_providers(stream: &TokenStream, start: usize, end: usize) -> Vec<DataProviderRecord> {
    let mut declarations: Vec<(CompactString, usize)> = Vec::new();
    let mut usages: FxHashMap<CompactString, Vec<usize>> = FxHashMap::default();

    let end = end.min(stream.len().saturating_sub(1));
    for index in start..=end {
        let token = &stream[index];
        if token.is_keyword("function") {
            let Some(name_index) = stream.next_meaningful(index) else {
                continue;
            };
            let name_token = &stream[name_index];
            if name_index <= end && name_token.is_kind(TokenKind::Identifier) {
                let name = CompactString::new(name_token.content());
                declarations.push((name, name_index));
            }
        } else if token.is_kind(TokenKind::DocComment) {
            for caps in annotation_re().captures_iter(token.content()) {
                if let Some(name) = caps.get(1) {
                    usages
                        .entry(CompactString::new(name.as_str()))
                        .or_default()
                        .push(index);
                }
            }
        }
    }

    declarations
        .into_iter()
        .filter_map(|(name, name_index)| {
            let usage_indices = usages.remove(&name)?;
            Some(DataProviderRecord {
                name,
                name_index,
                usage_indices,
            })
        })
        .collect()
}
