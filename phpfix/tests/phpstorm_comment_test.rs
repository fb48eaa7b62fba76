//! Tests for the PhpStorm generated comment remover.
#![allow(clippy::unwrap_used)]

use phpfix::fixer::no_phpstorm_generated_comment::NoPhpStormGeneratedCommentFixer;
use phpfix::fixer::Fixer;
use phpfix::tokenizer::tokenize;

fn fix(source: &str) -> String {
    let fixer = NoPhpStormGeneratedCommentFixer;
    let mut stream = tokenize(source).unwrap();
    if fixer.is_candidate(&stream) {
        fixer.apply(&mut stream);
    }
    stream.to_source()
}

#[test]
fn test_removes_doc_comment_header() {
    let input = "<?php
/**
 * Created by PhpStorm.
 * User: root
 * Date: 01.01.70
 * Time: 12:34
 */
namespace Foo;
";
    assert_eq!(fix(input), "<?php\nnamespace Foo;\n");
}

#[test]
fn test_removes_plain_comment_header() {
    let input = "<?php
/*
 * Created by PhpStorm.
 * User: root
 */
namespace Foo;
";
    assert_eq!(fix(input), "<?php\nnamespace Foo;\n");
}

#[test]
fn test_other_comments_survive() {
    let input = "<?php
/**
 * Created by PhpStorm.
 */
namespace Foo;
/** class Bar */
class Bar {}
";
    assert_eq!(fix(input), "<?php\nnamespace Foo;\n/** class Bar */\nclass Bar {}\n");
}

#[test]
fn test_blank_line_before_comment_is_kept() {
    let input = "<?php\n\n/**\n * Created by PHPStorm.\n */\nnamespace Foo;\n";
    assert_eq!(fix(input), "<?php\n\nnamespace Foo;\n");
}

#[test]
fn test_blank_line_after_comment_is_kept() {
    let input = "<?php\n/**\n * Created by PHPStorm.\n */\n\nnamespace Foo;\n";
    assert_eq!(fix(input), "<?php\n\nnamespace Foo;\n");
}

#[test]
fn test_indented_comment_drops_its_indentation() {
    let input =
        "<?php\n\n    /**\n     * Created by PHPStorm.\n     */\n\n    namespace Foo;\n";
    assert_eq!(fix(input), "<?php\n\n\n    namespace Foo;\n");
}

#[test]
fn test_deeply_indented_comment() {
    let input = "<?php
                /**
                 * Created by PHPStorm.
                 */
                namespace Foo;
";
    assert_eq!(fix(input), "<?php\n                namespace Foo;\n");
}

#[test]
fn test_single_line_comment_glued_to_code() {
    assert_eq!(
        fix("<?php\n/** Created by PhpStorm */namespace Foo;\n"),
        "<?php\nnamespace Foo;\n"
    );
    assert_eq!(
        fix("<?php\n/** Created by PhpStorm */    namespace Foo;\n"),
        "<?php\n    namespace Foo;\n"
    );
}

#[test]
fn test_unrelated_author_is_kept() {
    let source = "<?php\n/**\n * Created by not PhpStorm.\n */\nnamespace Foo;\n";
    assert_eq!(fix(source), source);
}

#[test]
fn test_metadata() {
    let fixer = NoPhpStormGeneratedCommentFixer;
    assert!(!fixer.is_risky());
    assert_eq!(fixer.priority(), 0);
    assert_eq!(fixer.name(), "no_phpstorm_generated_comment");
}
