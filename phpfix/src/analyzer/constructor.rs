//! Constructor discovery and parameter-list structure.
//!
//! Promoted parameters are recognized structurally: a visibility or
//! `readonly` modifier inside the constructor's parameter list promotes the
//! parameter to a property. Comma splitting tracks nesting depth so commas
//! inside default-value arrays or nested calls never terminate a parameter.

use crate::token::TokenKind;
use crate::tokens::{BlockKind, TokenStream};

/// Modifier keywords that promote a constructor parameter.
const PROMOTION_KEYWORDS: &[&str] = &["public", "protected", "private", "readonly"];

/// Modifier keywords that may precede a method declaration.
const METHOD_MODIFIERS: &[&str] = &[
    "public", "protected", "private", "static", "final", "abstract",
];

/// A located non-abstract constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstructorAnalysis {
    /// Token index of the `__construct` name identifier.
    pub name_index: usize,
}

/// One parameter of a constructor's parameter list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    /// First token index of the parameter (inclusive).
    pub start: usize,
    /// Last token index of the parameter (inclusive).
    pub end: usize,
    /// Index of the parameter's `$variable` token, when present.
    pub variable_index: Option<usize>,
    /// Whether a visibility/`readonly` modifier promotes this parameter.
    pub promoted: bool,
}

/// Finds the class's `__construct`, skipping abstract declarations.
///
/// `class_index` must point at the `class` keyword. Methods of nested
/// anonymous classes are not descended into.
#[must_use]
pub fn find_non_abstract_constructor(
    stream: &TokenStream,
    class_index: usize,
) -> Option<ConstructorAnalysis> {
    let body_start = stream.next_content(class_index, "{")?;
    let body_end = stream.find_block_end(body_start)?;

    let mut index = body_start;
    while let Some(next) = stream.next_of_kind(index, &[TokenKind::Keyword]) {
        index = next;
        if index >= body_end {
            break;
        }
        if !stream[index].is_keyword("function") {
            continue;
        }
        let name_index = stream.next_meaningful(index)?;
        let name = &stream[name_index];
        if !name.is_kind(TokenKind::Identifier)
            || !name.content().eq_ignore_ascii_case("__construct")
        {
            continue;
        }
        if is_abstract(stream, index, body_start) {
            return None;
        }
        return Some(ConstructorAnalysis { name_index });
    }
    None
}

/// Whether the method at `function_index` carries an `abstract` modifier.
fn is_abstract(stream: &TokenStream, function_index: usize, body_start: usize) -> bool {
    let mut cursor = function_index;
    while let Some(prev) = stream.prev_meaningful(cursor) {
        if prev <= body_start {
            return false;
        }
        let token = &stream[prev];
        if token.is_keyword("abstract") {
            return true;
        }
        let is_modifier = METHOD_MODIFIERS.iter().any(|m| token.is_keyword(m));
        if !is_modifier {
            return false;
        }
        cursor = prev;
    }
    false
}

/// Splits the parenthesis block `(open_paren, close_paren)` into
/// parameter descriptors on top-level commas only.
#[must_use]
pub fn parameters(
    stream: &TokenStream,
    open_paren: usize,
    close_paren: usize,
) -> Vec<ParameterDescriptor> {
    let mut out = Vec::new();
    let mut current: Option<ParameterDescriptor> = None;

    let mut index = open_paren + 1;
    while index < close_paren {
        let token = &stream[index];

        if token.is_content(",") {
            if let Some(param) = current.take() {
                out.push(param);
            }
            index += 1;
            continue;
        }

        if !token.kind().is_ignorable() {
            let param = current.get_or_insert(ParameterDescriptor {
                start: index,
                end: index,
                variable_index: None,
                promoted: false,
            });
            param.end = index;
            if token.is_kind(TokenKind::Variable) && param.variable_index.is_none() {
                param.variable_index = Some(index);
            }
            if PROMOTION_KEYWORDS.iter().any(|k| token.is_keyword(k)) {
                param.promoted = true;
            }
        }

        // Jump over nested blocks so their commas stay untouched.
        if BlockKind::from_opener(token).is_some() {
            if let Some(end) = stream.find_block_end(index) {
                if let Some(param) = current.as_mut() {
                    param.end = end.min(close_paren - 1);
                }
                index = end + 1;
                continue;
            }
        }

        index += 1;
    }

    if let Some(param) = current.take() {
        out.push(param);
    }
    out
}
