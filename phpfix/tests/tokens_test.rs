//! Tests for token stream navigation and editing.
#![allow(clippy::unwrap_used)]

use phpfix::token::{Token, TokenKind};
use phpfix::tokenizer::tokenize;

#[test]
fn test_next_and_prev_meaningful_skip_trivia() {
    let stream = tokenize("<?php $a /* note */ = 1;").unwrap();
    let a = stream.iter().position(|t| t.is_content("$a")).unwrap();
    let eq = stream.next_meaningful(a).unwrap();
    assert!(stream[eq].is_content("="));
    assert_eq!(stream.prev_meaningful(eq), Some(a));
}

#[test]
fn test_find_block_end_and_start() {
    let stream = tokenize("<?php f(g(1, [2, 3]), 4);").unwrap();
    let outer_open = stream.iter().position(|t| t.is_content("(")).unwrap();
    let outer_close = stream.find_block_end(outer_open).unwrap();
    assert!(stream[outer_close].is_content(")"));
    assert_eq!(stream.find_block_start(outer_close), Some(outer_open));

    // The outer close is the last parenthesis before the semicolon.
    let semicolon = stream.iter().position(|t| t.is_content(";")).unwrap();
    assert_eq!(stream.next_meaningful(outer_close), Some(semicolon));
}

#[test]
fn test_find_sequence_skips_whitespace_and_matches_keywords_loosely() {
    let stream = tokenize("<?php FUNCTION   provideCases() {}").unwrap();
    let found = stream.find_sequence(
        &[
            (TokenKind::Keyword, Some("function")),
            (TokenKind::Identifier, Some("provideCases")),
        ],
        0,
        stream.len(),
    );
    assert!(found.is_some());

    let not_found = stream.find_sequence(
        &[
            (TokenKind::Keyword, Some("function")),
            (TokenKind::Identifier, Some("otherName")),
        ],
        0,
        stream.len(),
    );
    assert!(not_found.is_none());
}

#[test]
fn test_ensure_whitespace_replaces_or_inserts() {
    let mut stream = tokenize("<?php $a=1;").unwrap();
    let eq = stream.iter().position(|t| t.is_content("=")).unwrap();

    // No whitespace before "=": one gets inserted.
    assert!(stream.ensure_whitespace_before(eq, " "));
    assert_eq!(stream.to_source(), "<?php $a =1;");

    // Existing whitespace after "$a" is already right: no change.
    assert!(!stream.ensure_whitespace_before(eq + 1, " "));

    let eq = stream.iter().position(|t| t.is_content("=")).unwrap();
    assert!(stream.ensure_whitespace_after(eq, " "));
    assert_eq!(stream.to_source(), "<?php $a = 1;");
}

#[test]
fn test_insert_many_and_remove_round_trip() {
    let mut stream = tokenize("<?php $a;").unwrap();
    let semicolon = stream.iter().position(|t| t.is_content(";")).unwrap();
    stream.insert_many(
        semicolon,
        [
            Token::whitespace(" "),
            Token::new(TokenKind::Comment, "// tail".to_owned()),
        ],
    );
    assert_eq!(stream.to_source(), "<?php $a // tail;");
    stream.remove(semicolon);
    stream.remove(semicolon);
    assert_eq!(stream.to_source(), "<?php $a;");
}

#[test]
fn test_kind_queries() {
    let stream = tokenize("<?php class Foo extends Bar {}").unwrap();
    assert!(stream.keyword_found("class"));
    assert!(stream.keyword_found("EXTENDS"));
    assert!(!stream.keyword_found("function"));
    assert!(stream.all_kinds_found(&[TokenKind::Keyword, TokenKind::Identifier]));
    assert!(!stream.any_kind_found(&[TokenKind::DocComment, TokenKind::Variable]));
}
