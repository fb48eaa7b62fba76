//! Tests for the multiline promoted properties fixer.
#![allow(clippy::unwrap_used)]

use phpfix::fixer::promoted_properties::MultilinePromotedPropertiesFixer;
use phpfix::fixer::Fixer;
use phpfix::tokenizer::tokenize;

fn fix(source: &str) -> String {
    fix_with(&MultilinePromotedPropertiesFixer::default(), source)
}

fn fix_with(fixer: &MultilinePromotedPropertiesFixer, source: &str) -> String {
    let mut stream = tokenize(source).unwrap();
    if fixer.is_candidate(&stream) {
        fixer.apply(&mut stream);
    }
    stream.to_source()
}

#[test]
fn test_splits_promoted_parameters_onto_own_lines() {
    let input = "<?php class Foo {
    public function __construct(private array $a, private bool $b, private int $i) {}
}
";
    let expected = "<?php class Foo {
    public function __construct(
        private array $a,
        private bool $b,
        private int $i
    ) {}
}
";
    assert_eq!(fix(input), expected);
}

#[test]
fn test_trailing_comma_keeps_closing_paren_indent() {
    let input = "<?php class Foo {
    public function __construct(private int $x,) {}
}
";
    let expected = "<?php class Foo {
    public function __construct(
        private int $x,
    ) {}
}
";
    assert_eq!(fix(input), expected);
}

#[test]
fn test_constructor_without_promotion_untouched() {
    let source = "<?php class Foo {
    public function __construct(array $a, bool $b) {}
}
";
    assert_eq!(fix(source), source);
}

#[test]
fn test_readonly_promotion_counts() {
    let input = "<?php class Foo {
    public function __construct(readonly int $x) {}
}
";
    let expected = "<?php class Foo {
    public function __construct(
        readonly int $x
    ) {}
}
";
    assert_eq!(fix(input), expected);
}

#[test]
fn test_minimum_number_of_parameters_gate() {
    let fixer = MultilinePromotedPropertiesFixer::new(3);
    let short = "<?php class Foo {
    public function __construct(private int $x, private int $y) {}
}
";
    assert_eq!(fix_with(&fixer, short), short);

    let long = "<?php class Foo {
    public function __construct(private int $x, private int $y, private int $z) {}
}
";
    assert!(fix_with(&fixer, long).contains("(\n        private int $x,"));
}

#[test]
fn test_abstract_constructor_untouched() {
    let source = "<?php abstract class Foo {
    abstract public function __construct(private int $x);
}
";
    assert_eq!(fix(source), source);
}

#[test]
fn test_already_multiline_is_idempotent() {
    let source = "<?php class Foo {
    public function __construct(
        private array $a,
        private bool $b
    ) {}
}
";
    assert_eq!(fix(source), source);
}

#[test]
fn test_nested_array_default_commas_are_ignored() {
    let input = "<?php class Foo {
    public function __construct(private array $a = [1, 2], private bool $b = false) {}
}
";
    let expected = "<?php class Foo {
    public function __construct(
        private array $a = [1, 2],
        private bool $b = false
    ) {}
}
";
    assert_eq!(fix(input), expected);
}

#[test]
fn test_anonymous_class_constructor() {
    let input = "<?php $foo = new class() {
    public function __construct(private int $x) {}
};
";
    let expected = "<?php $foo = new class() {
    public function __construct(
        private int $x
    ) {}
};
";
    assert_eq!(fix(input), expected);
}

#[test]
fn test_metadata() {
    let fixer = MultilinePromotedPropertiesFixer::default();
    assert_eq!(fixer.name(), "multiline_promoted_properties");
    assert_eq!(fixer.priority(), 36);
    assert!(!fixer.is_risky());
    assert_eq!(fixer.definition().minimum_php_version, Some("8.0"));
    assert!(fixer.constraints().runs_before.contains(&"braces"));
}
