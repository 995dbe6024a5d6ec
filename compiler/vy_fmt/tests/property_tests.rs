//! Property-based tests for the Vyper formatter.
//!
//! These tests use proptest to generate Vyper code and verify:
//! 1. Idempotence: format(format(code)) == format(code)
//! 2. Equivalence: the formatted code has the same syntax tree
//! 3. Parse-ability: formatted output can be re-parsed
//!
//! Generated statements are deliberately long so that narrow widths
//! exercise every split strategy.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::uninlined_format_args,
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use proptest::prelude::*;
use vy_fmt::{format_source, FormatConfig};
use vy_parse::equivalence::ast_equivalent;
use vy_parse::Parser;

// -- Code Generation Strategies --

/// Generate a valid Vyper identifier.
fn identifier_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z_]{2,10}")
        .expect("valid regex")
        .prop_filter("not a keyword", |s| !is_keyword(s))
}

/// Check if a string is a reserved word.
fn is_keyword(s: &str) -> bool {
    matches!(
        s,
        "and"
            | "as"
            | "assert"
            | "break"
            | "continue"
            | "def"
            | "elif"
            | "else"
            | "enum"
            | "event"
            | "exports"
            | "extcall"
            | "flag"
            | "for"
            | "from"
            | "if"
            | "implements"
            | "import"
            | "in"
            | "initializes"
            | "interface"
            | "log"
            | "not"
            | "or"
            | "pass"
            | "raise"
            | "return"
            | "staticcall"
            | "struct"
            | "uses"
    )
}

/// Generate an integer literal.
fn int_literal_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u64..=1000).prop_map(|n| n.to_string()),
        (1_000_000_000u64..10_000_000_000).prop_map(|n| n.to_string()),
    ]
}

/// Generate a string literal (simple, no escapes).
fn string_literal_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9 _]{0,20}")
        .expect("valid regex")
        .prop_map(|s| format!("'{}'", s))
}

/// Generate a simple expression.
fn simple_expr_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => identifier_strategy(),
        2 => int_literal_strategy(),
        1 => string_literal_strategy(),
        1 => identifier_strategy().prop_map(|name| format!("self.{}", name)),
    ]
}

/// Generate a binary operator.
fn binary_op_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("+"),
        Just("-"),
        Just("*"),
        Just("//"),
        Just("%"),
        Just("=="),
        Just("!="),
        Just("<"),
        Just(">="),
        Just("and"),
        Just("or"),
    ]
}

/// Generate an expression (recursive with depth limit).
fn expr_strategy(depth: u32) -> BoxedStrategy<String> {
    if depth == 0 {
        return simple_expr_strategy().boxed();
    }
    prop_oneof![
        simple_expr_strategy(),
        (
            expr_strategy(depth - 1),
            binary_op_strategy(),
            expr_strategy(depth - 1)
        )
            .prop_map(|(left, op, right)| format!("{} {} {}", left, op, right)),
        expr_strategy(depth - 1).prop_map(|e| format!("({})", e)),
        (
            identifier_strategy(),
            prop::collection::vec(expr_strategy(depth - 1), 0..4)
        )
            .prop_map(|(name, args)| format!("{}({})", name, args.join(", "))),
        prop::collection::vec(expr_strategy(depth - 1), 0..4)
            .prop_map(|items| format!("[{}]", items.join(", "))),
        (identifier_strategy(), expr_strategy(depth - 1))
            .prop_map(|(name, index)| format!("{}[{}]", name, index)),
    ]
    .boxed()
}

/// Generate a statement for a function body.
fn statement_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (identifier_strategy(), expr_strategy(3))
            .prop_map(|(name, value)| format!("{} = {}", name, value)),
        (identifier_strategy(), expr_strategy(3))
            .prop_map(|(name, value)| format!("{}: uint256 = {}", name, value)),
        (identifier_strategy(), expr_strategy(2))
            .prop_map(|(name, value)| format!("self.{} += {}", name, value)),
        expr_strategy(3).prop_map(|value| format!("return {}", value)),
        expr_strategy(3).prop_map(|test| format!("assert {}", test)),
        (identifier_strategy(), prop::collection::vec(expr_strategy(2), 0..4))
            .prop_map(|(name, args)| format!("log {}({})", name, args.join(", "))),
    ]
}

/// Generate a function definition.
fn function_strategy() -> impl Strategy<Value = String> {
    (
        identifier_strategy(),
        prop::collection::vec(identifier_strategy(), 0..4),
        prop::collection::vec(statement_strategy(), 1..5),
    )
        .prop_map(|(name, params, body)| {
            let params: Vec<String> = params.iter().map(|p| format!("{}: uint256", p)).collect();
            let body: Vec<String> = body.iter().map(|s| format!("    {}\n", s)).collect();
            format!(
                "@external\ndef {}({}) -> uint256:\n{}",
                name,
                params.join(", "),
                body.concat()
            )
        })
}

/// Generate a module of storage declarations and functions.
fn module_strategy() -> impl Strategy<Value = String> {
    (
        prop::collection::vec((identifier_strategy(), expr_strategy(2)), 0..4),
        prop::collection::vec(function_strategy(), 1..3),
    )
        .prop_map(|(constants, functions)| {
            let mut out = String::new();
            for (name, value) in constants {
                out.push_str(&format!("{}: constant(uint256) = {}\n", name.to_uppercase(), value));
            }
            for function in functions {
                out.push('\n');
                out.push_str(&function);
            }
            out
        })
}

/// Format at `max_width`, checking idempotence and equivalence.
fn check_round_trip(source: &str, max_width: usize) -> Result<(), String> {
    let parser = Parser::new();
    let config = FormatConfig::with_max_width(max_width);

    // Generated code the parser rejects is not interesting.
    let Ok(first) = format_source(&parser, source, &config) else {
        return Ok(());
    };

    let second = format_source(&parser, &first, &config).map_err(|e| {
        format!("Second parse failed: {}\nFirst output:\n{}", e, first)
    })?;
    if first != second {
        return Err(format!(
            "Idempotence failure at width {}:\n\n--- First ---\n{}\n--- Second ---\n{}",
            max_width, first, second
        ));
    }

    match ast_equivalent(&parser, source, &first) {
        Ok(true) => Ok(()),
        Ok(false) => Err(format!(
            "Formatting changed the syntax tree at width {}:\n\n--- Source ---\n{}\n--- Formatted ---\n{}",
            max_width, source, first
        )),
        Err(e) => Err(format!("Formatted output does not parse: {}\n{}", e, first)),
    }
}

// -- Property Tests --

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        max_shrink_iters: 1000,
        ..ProptestConfig::default()
    })]

    /// Idempotence and equivalence for single assignments.
    #[test]
    fn prop_assignment_round_trip(
        name in identifier_strategy(),
        value in expr_strategy(3),
        width in prop_oneof![Just(40usize), Just(80), Just(120)],
    ) {
        let source = format!("{} = {}\n", name, value);
        check_round_trip(&source, width).map_err(TestCaseError::fail)?;
    }

    /// Idempotence and equivalence for generated functions.
    #[test]
    fn prop_function_round_trip(
        function in function_strategy(),
        width in prop_oneof![Just(40usize), Just(80)],
    ) {
        check_round_trip(&function, width).map_err(TestCaseError::fail)?;
    }

    /// Idempotence and equivalence for generated modules.
    #[test]
    fn prop_module_round_trip(module in module_strategy()) {
        check_round_trip(&module, 80).map_err(TestCaseError::fail)?;
    }

    /// Lists are rendered on one line when they fit.
    #[test]
    fn prop_short_list_stays_flat(items in prop::collection::vec(int_literal_strategy(), 0..5)) {
        let source = format!("x = [{}]\n", items.join(","));
        let formatted = format_source(&Parser::new(), &source, &FormatConfig::default()).unwrap();
        prop_assert_eq!(formatted, format!("x = [{}]\n", items.join(", ")));
    }
}
