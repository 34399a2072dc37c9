use frontend::lexer::Lexer;
use frontend::parser::Parser;
use runtime::environment::Env;
use runtime::interpreter::{Interpreter, InterpreterError};

// Output printed before the run stopped, and the diagnostics if any
struct Run {
    output: String,
    errors: Vec<String>,
    runtime_error: Option<InterpreterError>,
}

fn run_in(code: &str, env: &mut Env) -> Run {
    let mut lexer: Lexer = Default::default();
    let mut parser: Parser = Default::default();

    let mut errors: Vec<String> = vec![];

    if let Err(errs) = lexer.tokenize(code) {
        errors.extend(errs.iter().map(|e| e.to_string()));
    }
    if let Err(errs) = parser.build_ast(lexer.tokens) {
        errors.extend(errs.iter().map(|e| e.to_string()));
    }

    let mut interpr = Interpreter::new(Vec::new());
    let mut runtime_error = None;

    if errors.is_empty() {
        if let Err(e) = interpr.execute_program(&parser.ast_nodes, env) {
            errors.push(e.to_code_err().to_string());
            runtime_error = Some(e);
        }
    }

    Run {
        output: String::from_utf8(interpr.into_output()).expect("utf8 output"),
        errors,
        runtime_error,
    }
}

fn run(code: &str) -> Run {
    run_in(code, &mut Env::new())
}

#[test]
fn arithmetic_precedence() {
    let res = run("print (1 + 2) * 3;\nprint 1 - 2 - 3;\nprint 2 + 3 * 4 - -1;");

    assert!(res.errors.is_empty());
    assert_eq!(res.output, "9\n-4\n15\n");
}

#[test]
fn number_formatting() {
    let res = run("print 6.0 / 2.0;\nprint 7.0 / 2.0;\nprint 1 / 0;\nprint -1 / 0;\nprint 0 / 0;");

    assert_eq!(res.output, "3\n3.5\nInfinity\n-Infinity\nNaN\n");
}

#[test]
fn block_shadowing() {
    let res = run("var x = 1; { var x = 2; print x; } print x;");

    assert!(res.errors.is_empty());
    assert_eq!(res.output, "2\n1\n");
}

#[test]
fn assignment_reaches_enclosing_scope() {
    let res = run("var a = 1;\n{ { a = a + 1; } }\nprint a;");

    assert_eq!(res.output, "2\n");
}

#[test]
fn chained_assignment() {
    let res = run("var a; var b; a = b = 3; print a; print b; print a = 4;");

    assert_eq!(res.output, "3\n3\n4\n");
}

#[test]
fn uninitialized_var_is_nil() {
    let res = run("var a; print a;");

    assert_eq!(res.output, "nil\n");
}

#[test]
fn strings_and_truthiness() {
    let res = run(
        "print \"foo\" + \"bar\";
        print !nil;
        print !0;
        print !\"\";
        print !!false;",
    );

    assert_eq!(res.output, "foobar\ntrue\nfalse\nfalse\nfalse\n");
}

#[test]
fn equality_across_types() {
    let res = run(
        "print nil == nil;
        print nil == false;
        print 1 == \"1\";
        print \"a\" == \"a\";
        print 1 != 2;",
    );

    assert_eq!(res.output, "true\nfalse\nfalse\ntrue\ntrue\n");
}

#[test]
fn number_equality_compares_bits() {
    let res = run("var n = 0 / 0;\nprint n == n;\nprint n != n;\nprint 0 == -0;\nprint -0 == -0;");

    assert!(res.errors.is_empty());
    assert_eq!(res.output, "true\nfalse\nfalse\ntrue\n");
}

#[test]
fn comparisons() {
    let res = run("print 1 < 2; print 2 <= 2; print 3 > 4; print 4 >= 5;");

    assert_eq!(res.output, "true\ntrue\nfalse\nfalse\n");
}

#[test]
fn type_mismatch_prints_nothing() {
    let res = run("print 1 + \"a\";");

    assert_eq!(res.output, "");
    assert_eq!(res.errors, vec!["Operands must be two numbers or two strings.\n[line 1]"]);
    assert!(matches!(res.runtime_error, Some(InterpreterError::TypeMismatch { .. })));
}

#[test]
fn runtime_error_messages() {
    assert_eq!(run("print -\"a\";").errors, vec!["Operand must be a number.\n[line 1]"]);
    assert_eq!(run("\n\nprint 1 < nil;").errors, vec!["Operands must be numbers.\n[line 3]"]);
}

#[test]
fn undefined_variable() {
    let res = run("print x;");

    assert_eq!(res.errors, vec!["Undefined variable 'x'.\n[line 1]"]);
    assert!(matches!(res.runtime_error, Some(InterpreterError::UndefinedVariable { .. })));

    let res = run("y = 1;");
    assert_eq!(res.errors, vec!["Undefined variable 'y'.\n[line 1]"]);
}

#[test]
fn runtime_error_keeps_earlier_effects() {
    let mut env = Env::new();

    let res = run_in("var a = 1; print a; print b; print 2;", &mut env);

    assert_eq!(res.output, "1\n");
    assert_eq!(res.errors.len(), 1);
    assert!(env.lookup_var("a").is_ok());
}

#[test]
fn runtime_error_in_nested_block_restores_depth() {
    let mut env = Env::new();

    let res = run_in("var a = 1; { var b = 2; { print a + nil; } }", &mut env);

    assert!(res.runtime_error.is_some());
    assert_eq!(env.depth(), 1);
    assert!(env.lookup_var("b").is_err());
}

#[test]
fn environment_persists_between_runs() {
    let mut env = Env::new();

    run_in("var count = 1;", &mut env);
    let res = run_in("count = count + 1; print count;", &mut env);

    assert_eq!(res.output, "2\n");
}

#[test]
fn syntax_error_skips_evaluation() {
    let res = run("print 1;\n1 +");

    assert_eq!(res.output, "");
    assert_eq!(res.errors, vec!["[line 2] Error at end: Expect expression."]);
}

#[test]
fn every_syntax_error_is_reported() {
    let res = run("print 1 +;\nvar = 2;\n(a) = 3;\n{ print 4;");

    assert_eq!(
        res.errors,
        vec![
            "[line 1] Error at ';': Expect expression.",
            "[line 2] Error at '=': Expect variable name.",
            "[line 3] Error at '=': Invalid assignment target.",
            "[line 4] Error at end: Expect '}' after block.",
        ]
    );
}

#[test]
fn deep_nesting_is_a_syntax_error() {
    let too_deep = format!("print {}1{};", "(".repeat(1000), ")".repeat(1000));
    let res = run(&too_deep);

    assert_eq!(res.output, "");
    assert_eq!(res.errors, vec!["[line 1] Error at '(': Expression nesting too deep."]);

    let res = run(&format!("print {}1;", "-".repeat(20_000)));
    assert_eq!(res.errors, vec!["[line 1] Error at '-': Expression nesting too deep."]);

    // Reasonable nesting still runs
    let res = run(&format!("print {}-2{};", "(".repeat(60), ")".repeat(60)));
    assert!(res.errors.is_empty());
    assert_eq!(res.output, "-2\n");
}

#[test]
fn lexical_errors_are_reported() {
    let res = run("print 1;\nprint @;\nprint \"open");

    assert_eq!(res.output, "");
    assert!(res.errors.contains(&"[line 2] Error: Unexpected character.".to_string()));
    assert!(res.errors.contains(&"[line 3] Error: Unterminated string.".to_string()));
}
