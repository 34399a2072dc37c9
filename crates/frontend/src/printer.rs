// Debug views of the AST. They only read the tree.
use crate::ast::{ExpressionKind, StatementKind, UnaryOp};

/// Lisp like form: `(* (group (+ 1 2)) 3)`
pub fn sexpr(expr: &ExpressionKind) -> String {
    match expr {
        ExpressionKind::Assign { name, value } => format!("(= {} {})", name.lexeme, sexpr(value)),
        ExpressionKind::Binary { left, operator, right, .. } => {
            format!("({} {} {})", operator.lexeme, sexpr(left), sexpr(right))
        }
        ExpressionKind::Grouping { expression } => format!("(group {})", sexpr(expression)),
        ExpressionKind::Literal { value } => value.to_string(),
        ExpressionKind::Unary { operator, right, .. } => format!("({} {})", operator.lexeme, sexpr(right)),
        ExpressionKind::Variable { name } => name.lexeme.clone(),
    }
}

/// Reverse polish notation: `1 2 + 4 3 - *`
///
/// Parenthesis are not needed in this form so groupings are transparent.
/// Unary minus is written `neg` to not be mistaken for the binary one.
pub fn rpn(expr: &ExpressionKind) -> String {
    match expr {
        ExpressionKind::Assign { name, value } => format!("{} {} =", name.lexeme, rpn(value)),
        ExpressionKind::Binary { left, operator, right, .. } => {
            format!("{} {} {}", rpn(left), rpn(right), operator.lexeme)
        }
        ExpressionKind::Grouping { expression } => rpn(expression),
        ExpressionKind::Literal { value } => value.to_string(),
        ExpressionKind::Unary { op, operator, right } => match op {
            UnaryOp::Negate => format!("{} neg", rpn(right)),
            UnaryOp::Not => format!("{} {}", rpn(right), operator.lexeme),
        },
        ExpressionKind::Variable { name } => name.lexeme.clone(),
    }
}

/// One line per statement, expressions written with the given printer.
/// Blocks are indented by two spaces per level.
pub fn program(statements: &[StatementKind], printer: fn(&ExpressionKind) -> String) -> String {
    let mut out = String::new();
    write_statements(statements, printer, 0, &mut out);

    out
}

fn write_statements(statements: &[StatementKind], printer: fn(&ExpressionKind) -> String, level: usize, out: &mut String) {
    let indent = "  ".repeat(level);

    for stmt in statements {
        match stmt {
            StatementKind::Block { statements } => {
                out.push_str(&format!("{}{{\n", indent));
                write_statements(statements, printer, level + 1, out);
                out.push_str(&format!("{}}}\n", indent));
            }
            StatementKind::Expression { expression } => {
                out.push_str(&format!("{}{}\n", indent, printer(expression)))
            }
            StatementKind::Print { expression, .. } => {
                out.push_str(&format!("{}print {}\n", indent, printer(expression)))
            }
            StatementKind::VarDeclaration { name, initializer } => match initializer {
                Some(init) => out.push_str(&format!("{}var {} = {}\n", indent, name.lexeme, printer(init))),
                None => out.push_str(&format!("{}var {}\n", indent, name.lexeme)),
            },
        }
    }
}

enum Node<'a> {
    Stmt(&'a StatementKind),
    Expr(&'a ExpressionKind),
}

impl<'a> Node<'a> {
    fn label_and_children(&self) -> (String, Vec<Node<'a>>) {
        match self {
            Node::Stmt(stmt) => match *stmt {
                StatementKind::Block { statements } => {
                    ("Block".into(), statements.iter().map(Node::Stmt).collect())
                }
                StatementKind::Expression { expression } => {
                    ("ExpressionStmt".into(), vec![Node::Expr(expression)])
                }
                StatementKind::Print { expression, .. } => ("PrintStmt".into(), vec![Node::Expr(expression)]),
                StatementKind::VarDeclaration { name, initializer } => (
                    format!("VarStmt {}", name.lexeme),
                    initializer.iter().map(Node::Expr).collect(),
                ),
            },
            Node::Expr(expr) => match *expr {
                ExpressionKind::Assign { name, value } => (format!("Assign {}", name.lexeme), vec![Node::Expr(value)]),
                ExpressionKind::Binary { left, operator, right, .. } => (
                    format!("Binary '{}'", operator.lexeme),
                    vec![Node::Expr(left), Node::Expr(right)],
                ),
                ExpressionKind::Grouping { expression } => ("Grouping".into(), vec![Node::Expr(expression)]),
                ExpressionKind::Literal { value } => (format!("Literal {}", value), vec![]),
                ExpressionKind::Unary { operator, right, .. } => {
                    (format!("Unary '{}'", operator.lexeme), vec![Node::Expr(right)])
                }
                ExpressionKind::Variable { name } => (format!("Variable {}", name.lexeme), vec![]),
            },
        }
    }

    fn render(&self, prefix: &str, out: &mut String) {
        let (label, children) = self.label_and_children();
        out.push_str(&label);
        out.push('\n');

        for (idx, child) in children.iter().enumerate() {
            let last = idx == children.len() - 1;

            out.push_str(prefix);
            out.push_str(if last { "└── " } else { "├── " });
            child.render(&format!("{}{}", prefix, if last { "    " } else { "│   " }), out);
        }
    }
}

/// Box drawing tree of each statement, numbered from 0
pub fn tree(statements: &[StatementKind]) -> String {
    let mut out = String::new();

    for (idx, stmt) in statements.iter().enumerate() {
        out.push_str(&format!("Statement: {}\n", idx));
        Node::Stmt(stmt).render("", &mut out);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::Parser;

    fn parse(code: &str) -> Vec<StatementKind> {
        let mut lexer: Lexer = Default::default();
        let mut parser: Parser = Default::default();

        let _ = lexer.tokenize(code);
        parser.build_ast(lexer.tokens).expect("valid program");

        parser.ast_nodes
    }

    fn first_expression(code: &str) -> ExpressionKind {
        match parse(code).remove(0) {
            StatementKind::Expression { expression } => expression,
            other => panic!("expected an expression statement, found {other:?}"),
        }
    }

    #[test]
    fn sexpr_printer() {
        assert_eq!(sexpr(&first_expression("(1 + 2) * 3;")), "(* (group (+ 1 2)) 3)");
        assert_eq!(sexpr(&first_expression("-123 * (45.67);")), "(* (- 123) (group 45.67))");
        assert_eq!(sexpr(&first_expression("a = !b == \"s\";")), "(= a (== (! b) \"s\"))");
        assert_eq!(sexpr(&first_expression("nil != true;")), "(!= nil true)");
    }

    #[test]
    fn rpn_printer() {
        assert_eq!(rpn(&first_expression("(1 + 2) * (4 - 3);")), "1 2 + 4 3 - *");
        assert_eq!(rpn(&first_expression("-2 - 1;")), "2 neg 1 -");
        assert_eq!(rpn(&first_expression("x = !y;")), "x y ! =");
    }

    #[test]
    fn sexpr_mentions_each_token_once() {
        // Operators come first, literals keep their source order
        let printed = sexpr(&first_expression("1 - 2 * 3 >= 4;"));

        let mut lexer: Lexer = Default::default();
        let _ = lexer.tokenize(&printed);

        let lexemes: Vec<&str> = lexer
            .tokens
            .iter()
            .map(|t| t.lexeme.as_str())
            .filter(|l| !matches!(*l, "(" | ")" | ""))
            .collect();

        assert_eq!(lexemes, vec![">=", "-", "1", "*", "2", "3", "4"]);
    }

    #[test]
    fn program_printer() {
        let statements = parse("var a = 1 + 2;\n{ print -a; var b; }\na = 3;");

        assert_eq!(
            program(&statements, sexpr),
            "var a = (+ 1 2)\n{\n  print (- a)\n  var b\n}\n(= a 3)\n"
        );
        assert_eq!(
            program(&statements, rpn),
            "var a = 1 2 +\n{\n  print a neg\n  var b\n}\na 3 =\n"
        );
    }

    #[test]
    fn tree_printer() {
        let statements = parse("print -1;\n{ var a = 2; a; }\nvar b;");

        assert_eq!(
            tree(&statements),
            "Statement: 0
PrintStmt
└── Unary '-'
    └── Literal 1
Statement: 1
Block
├── VarStmt a
│   └── Literal 2
└── ExpressionStmt
    └── Variable a
Statement: 2
VarStmt b
"
        );
    }
}
