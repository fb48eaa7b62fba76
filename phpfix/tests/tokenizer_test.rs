//! Tests for the lossless tokenizer and stream validation.
#![allow(clippy::unwrap_used)]

use phpfix::error::TokenizeError;
use phpfix::token::TokenKind;
use phpfix::tokenizer::tokenize;

#[test]
fn test_round_trip_is_lossless() {
    let source = r#"<html>
<?php

declare(strict_types=1);

/**
 * Sample class.
 */
final class Sample extends Base
{
    public function __construct(private readonly array $items = [1, 2]) {}

    // line comment
    # hash comment
    public function total(): int
    {
        $sum = 0x1A + 1.5e3;
        return $sum <=> \count($this->items) ?? -1;
    }
}
?>
trailing html
"#;
    let stream = tokenize(source).unwrap();
    assert_eq!(stream.to_source(), source);
}

#[test]
fn test_token_kinds() {
    let stream = tokenize("<?php $x = 'str' + 42; // note\n").unwrap();
    let kinds: Vec<TokenKind> = stream.iter().map(phpfix::token::Token::kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::OpenTag,
            TokenKind::Whitespace,
            TokenKind::Variable,
            TokenKind::Whitespace,
            TokenKind::Operator,
            TokenKind::Whitespace,
            TokenKind::StringLiteral,
            TokenKind::Whitespace,
            TokenKind::Operator,
            TokenKind::Whitespace,
            TokenKind::NumberLiteral,
            TokenKind::Punctuation,
            TokenKind::Whitespace,
            TokenKind::Comment,
            TokenKind::Whitespace,
        ]
    );
}

#[test]
fn test_doc_comment_classification() {
    let stream = tokenize("<?php /** doc */ /* plain */ /**not doc*/").unwrap();
    let kinds: Vec<TokenKind> = stream
        .iter()
        .filter(|t| t.is_comment())
        .map(phpfix::token::Token::kind)
        .collect();
    assert_eq!(
        kinds,
        vec![TokenKind::DocComment, TokenKind::Comment, TokenKind::Comment]
    );
}

#[test]
fn test_keywords_are_case_insensitive() {
    let stream = tokenize("<?php CLASS Foo EXTENDS Bar {}").unwrap();
    let class = stream.get(2).unwrap();
    assert_eq!(class.kind(), TokenKind::Keyword);
    assert!(class.is_keyword("class"));
}

#[test]
fn test_inline_html_and_short_echo() {
    let stream = tokenize("before <?= $x ?> after").unwrap();
    assert_eq!(stream.get(0).unwrap().kind(), TokenKind::InlineHtml);
    assert_eq!(stream.get(1).unwrap().kind(), TokenKind::OpenTag);
    assert_eq!(stream.get(1).unwrap().content(), "<?=");
    let close = stream
        .iter()
        .find(|t| t.kind() == TokenKind::CloseTag)
        .unwrap();
    assert_eq!(close.content(), "?>");
}

#[test]
fn test_attribute_opener_balances_with_bracket() {
    let source = "<?php #[Attribute] class A {}";
    let stream = tokenize(source).unwrap();
    assert_eq!(stream.to_source(), source);
    assert!(stream.iter().any(|t| t.content() == "#["));
}

#[test]
fn test_unclosed_brace_is_rejected() {
    let err = tokenize("<?php function f() {").unwrap_err();
    assert!(matches!(err, TokenizeError::UnclosedDelimiter { .. }));
}

#[test]
fn test_mismatched_delimiter_is_rejected() {
    let err = tokenize("<?php $a = (1];").unwrap_err();
    assert!(matches!(
        err,
        TokenizeError::MismatchedDelimiter { line: 1, .. }
    ));
}

#[test]
fn test_unexpected_close_reports_line() {
    let err = tokenize("<?php\n\n}\n").unwrap_err();
    assert!(matches!(err, TokenizeError::UnexpectedClose { line: 3, .. }));
}

#[test]
fn test_unterminated_string_is_rejected() {
    let err = tokenize("<?php $a = \"oops;").unwrap_err();
    assert!(matches!(err, TokenizeError::UnterminatedString { .. }));
}

#[test]
fn test_escaped_quote_stays_in_string() {
    let stream = tokenize(r#"<?php $a = "he said \"hi\"";"#).unwrap();
    let string = stream
        .iter()
        .find(|t| t.kind() == TokenKind::StringLiteral)
        .unwrap();
    assert_eq!(string.content(), r#""he said \"hi\"""#);
}

#[test]
fn test_multibyte_html_after_stray_open_tag() {
    let source = "<?php echo 1; ?>\n<?éé more html\n";
    let stream = tokenize(source).unwrap();
    assert_eq!(stream.to_source(), source);
    let tail = stream.get(stream.len() - 1).unwrap();
    assert_eq!(tail.kind(), TokenKind::InlineHtml);
    assert!(tail.content().contains("éé"));
}

#[test]
fn test_close_tag_ends_line_comment() {
    let stream = tokenize("<?php // note ?> after\n").unwrap();
    let comment = stream
        .iter()
        .find(|t| t.kind() == TokenKind::Comment)
        .unwrap();
    assert_eq!(comment.content(), "// note ");
    let close = stream
        .iter()
        .position(|t| t.kind() == TokenKind::CloseTag)
        .unwrap();
    assert_eq!(stream.get(close + 1).unwrap().kind(), TokenKind::InlineHtml);
}

#[test]
fn test_longest_operator_match() {
    let stream = tokenize("<?php $a <=> $b ?? $c === $d;").unwrap();
    let operators: Vec<&str> = stream
        .iter()
        .filter(|t| t.kind() == TokenKind::Operator)
        .map(phpfix::token::Token::content)
        .collect();
    assert_eq!(operators, vec!["<=>", "??", "==="]);
}
