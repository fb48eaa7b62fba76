//! Tests for the data provider rename fixer.
#![allow(clippy::unwrap_used)]

use phpfix::fixer::data_provider_name::DataProviderNameFixer;
use phpfix::fixer::Fixer;
use phpfix::tokenizer::tokenize;

fn fix(source: &str) -> String {
    fix_with(&DataProviderNameFixer::default(), source)
}

fn fix_with(fixer: &DataProviderNameFixer, source: &str) -> String {
    let mut stream = tokenize(source).unwrap();
    if fixer.is_candidate(&stream) {
        fixer.apply(&mut stream);
    }
    stream.to_source()
}

#[test]
fn test_renames_single_use_provider() {
    let input = r"<?php
class FooTest extends TestCase {
    /**
     * @dataProvider dataProvider
     */
    public function testSomething($expected, $actual) {}
    public function dataProvider() {}
}
";
    let expected = r"<?php
class FooTest extends TestCase {
    /**
     * @dataProvider provideSomethingCases
     */
    public function testSomething($expected, $actual) {}
    public function provideSomethingCases() {}
}
";
    assert_eq!(fix(input), expected);
}

#[test]
fn test_ignores_provider_used_twice() {
    let input = r"<?php
class FooTest extends TestCase {
    /**
     * @dataProvider dataProvider
     */
    public function testFoo($x) {}
    /**
     * @dataProvider dataProvider
     */
    public function testBar($x) {}
    public function dataProvider() {}
}
";
    assert_eq!(fix(input), input);
}

#[test]
fn test_ignores_class_without_extends() {
    let input = r"<?php
class FooTest {
    /**
     * @dataProvider dataProvider
     */
    public function testSomething($x) {}
    public function dataProvider() {}
}
";
    assert_eq!(fix(input), input);
}

#[test]
fn test_skips_when_target_name_already_taken() {
    let input = r"<?php
class FooTest extends TestCase {
    /**
     * @dataProvider dataProvider
     */
    public function testSomething($x) {}
    public function dataProvider() {}
    public function provideSomethingCases() {}
}
";
    assert_eq!(fix(input), input);
}

#[test]
fn test_strips_test_prefix_with_underscores() {
    let input = r"<?php
class FooTest extends TestCase {
    /**
     * @dataProvider data
     */
    public function test_something($x) {}
    public function data() {}
}
";
    let output = fix(input);
    assert!(output.contains("@dataProvider provideSomethingCases"));
    assert!(output.contains("function provideSomethingCases()"));
}

#[test]
fn test_empty_prefix_lowercases_first_letter() {
    let fixer = DataProviderNameFixer::new("", "Provider");
    let input = r"<?php
class FooTest extends TestCase {
    /**
     * @dataProvider data
     */
    public function testSomething($x) {}
    public function data() {}
}
";
    let output = fix_with(&fixer, input);
    assert!(output.contains("@dataProvider somethingProvider"));
}

#[test]
fn test_underscore_prefix_keeps_case() {
    let fixer = DataProviderNameFixer::new("provide_", "");
    let input = r"<?php
class FooTest extends TestCase {
    /**
     * @dataProvider data
     */
    public function testsomething($x) {}
    public function data() {}
}
";
    let output = fix_with(&fixer, input);
    assert!(output.contains("@dataProvider provide_something"));
}

#[test]
fn test_handles_multiple_test_classes_in_one_file() {
    let input = r"<?php
class FooTest extends TestCase {
    /**
     * @dataProvider dataFoo
     */
    public function testFoo($x) {}
    public function dataFoo() {}
}
class BarTest extends TestCase {
    /**
     * @dataProvider dataBar
     */
    public function testBar($x) {}
    public function dataBar() {}
}
";
    let output = fix(input);
    assert!(output.contains("provideFooCases"));
    assert!(output.contains("provideBarCases"));
    assert!(!output.contains("dataFoo"));
    assert!(!output.contains("dataBar"));
}

#[test]
fn test_risky_and_metadata() {
    let fixer = DataProviderNameFixer::default();
    assert!(fixer.is_risky());
    assert_eq!(fixer.name(), "data_provider_name");
    assert_eq!(fixer.priority(), 0);
}
