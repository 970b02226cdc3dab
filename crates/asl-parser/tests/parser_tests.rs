use asl_parser::ast::{
    ArithOp, BasicType, ExprKind, Program, RelOp, StmtKind, TypeNodeKind, Value,
};
use asl_parser::parse;
use std::collections::HashSet;

fn parse_ok(source: &str) -> Program {
    let output = parse(source, "test.asl");
    assert!(
        output.diagnostics.is_empty(),
        "unexpected diagnostics: {:?}",
        output.diagnostics
    );
    output.program
}

fn first_body_stmt(program: &Program) -> &asl_parser::ast::Stmt {
    &program.functions[0].body.stmts[0]
}

#[test]
fn function_shape() {
    let program = parse_ok("func main() endfunc");
    assert_eq!(program.functions.len(), 1);
    let f = &program.functions[0];
    assert_eq!(f.name.name, "main");
    assert!(f.params.is_empty());
    assert!(f.ret.is_none());
    assert!(f.decls.is_empty());
    assert!(f.body.stmts.is_empty());
}

#[test]
fn function_with_params_and_return() {
    let program = parse_ok("func f(a : int, b : float) : bool return true; endfunc");
    let f = &program.functions[0];
    assert_eq!(f.params.len(), 2);
    assert_eq!(f.params[0].name.name, "a");
    assert_eq!(f.params[0].ty.kind, TypeNodeKind::Basic(BasicType::Int));
    assert_eq!(f.params[1].ty.kind, TypeNodeKind::Basic(BasicType::Float));
    assert_eq!(f.ret.as_ref().map(|r| r.kind), Some(BasicType::Bool));
}

#[test]
fn variable_declarations() {
    let program = parse_ok("func main() var a, b : int; var v : array[10] of float; endfunc");
    let f = &program.functions[0];
    assert_eq!(f.decls.len(), 2);
    assert_eq!(f.decls[0].names.len(), 2);
    assert_eq!(f.decls[0].ty.kind, TypeNodeKind::Basic(BasicType::Int));
    assert_eq!(
        f.decls[1].ty.kind,
        TypeNodeKind::Array {
            size: 10,
            elem: BasicType::Float
        }
    );
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let program = parse_ok("func main() var a, b, c, x : int; x = a + b * c; endfunc");
    let StmtKind::Assign { value, .. } = &first_body_stmt(&program).kind else {
        panic!("expected assignment");
    };
    let ExprKind::Arithmetic { op, rhs, .. } = &value.kind else {
        panic!("expected arithmetic node, got {:?}", value.kind);
    };
    assert_eq!(*op, ArithOp::Add);
    let ExprKind::Arithmetic { op: inner, .. } = &rhs.kind else {
        panic!("expected nested multiplication");
    };
    assert_eq!(*inner, ArithOp::Mul);
}

#[test]
fn relational_binds_tighter_than_logical() {
    let program = parse_ok("func main() var a, b : int; var ok : bool; ok = a < b and b < a; endfunc");
    let StmtKind::Assign { value, .. } = &first_body_stmt(&program).kind else {
        panic!("expected assignment");
    };
    let ExprKind::Logical { lhs, rhs, .. } = &value.kind else {
        panic!("expected logical node, got {:?}", value.kind);
    };
    assert!(matches!(lhs.kind, ExprKind::Relational { op: RelOp::Lt, .. }));
    assert!(matches!(rhs.kind, ExprKind::Relational { op: RelOp::Lt, .. }));
}

#[test]
fn parenthesis_overrides_precedence() {
    let program = parse_ok("func main() var a, b, c, x : int; x = (a + b) * c; endfunc");
    let StmtKind::Assign { value, .. } = &first_body_stmt(&program).kind else {
        panic!("expected assignment");
    };
    let ExprKind::Arithmetic { op, lhs, .. } = &value.kind else {
        panic!("expected arithmetic node");
    };
    assert_eq!(*op, ArithOp::Mul);
    assert!(matches!(lhs.kind, ExprKind::Paren(_)));
}

#[test]
fn call_statement_vs_assignment() {
    let program = parse_ok("func main() var x : int; f(); x = g(1, 2); endfunc");
    let stmts = &program.functions[0].body.stmts;
    assert!(matches!(&stmts[0].kind, StmtKind::ProcCall(c) if c.callee.name == "f"));
    let StmtKind::Assign { value, .. } = &stmts[1].kind else {
        panic!("expected assignment");
    };
    let ExprKind::Call(call) = &value.kind else {
        panic!("expected call expression");
    };
    assert_eq!(call.callee.name, "g");
    assert_eq!(call.args.len(), 2);
}

#[test]
fn array_access_left_and_right() {
    let program = parse_ok("func main() var v : array[3] of int; v[0] = v[1]; endfunc");
    let StmtKind::Assign { target, value, .. } = &first_body_stmt(&program).kind else {
        panic!("expected assignment");
    };
    assert!(target.index.is_some());
    assert!(matches!(value.kind, ExprKind::ArrayIndex { .. }));
}

#[test]
fn write_string_strips_quotes() {
    let program = parse_ok(r#"func main() write "hi\n"; endfunc"#);
    let StmtKind::WriteString { value } = &first_body_stmt(&program).kind else {
        panic!("expected write-string");
    };
    assert_eq!(value, r"hi\n");
}

#[test]
fn char_value_strips_quotes() {
    let program = parse_ok("func main() var c : char; c = 'x'; endfunc");
    let StmtKind::Assign { value, .. } = &first_body_stmt(&program).kind else {
        panic!("expected assignment");
    };
    let ExprKind::Value(v) = &value.kind else {
        panic!("expected literal");
    };
    assert_eq!(v, &Value::Char("x".to_string()));
}

#[test]
fn if_else_and_while() {
    let program = parse_ok(
        "func main() var b : bool; if b then else endif while b do endwhile endfunc",
    );
    let stmts = &program.functions[0].body.stmts;
    assert!(matches!(
        &stmts[0].kind,
        StmtKind::If {
            else_branch: Some(_),
            ..
        }
    ));
    assert!(matches!(&stmts[1].kind, StmtKind::While { .. }));
}

#[test]
fn return_with_and_without_value() {
    let program = parse_ok("func f() : int return 1; endfunc func g() return; endfunc");
    assert!(matches!(
        &program.functions[0].body.stmts[0].kind,
        StmtKind::Return { value: Some(_) }
    ));
    assert!(matches!(
        &program.functions[1].body.stmts[0].kind,
        StmtKind::Return { value: None }
    ));
}

#[test]
fn missing_semicolon_is_reported_and_recovered() {
    let output = parse(
        "func main() var a : int; a = 1 a = 2; endfunc",
        "test.asl",
    );
    assert!(!output.diagnostics.is_empty());
    // The function itself still parses.
    assert_eq!(output.program.functions.len(), 1);
}

#[test]
fn stray_top_level_tokens_are_reported() {
    let output = parse("42 func main() endfunc", "test.asl");
    assert_eq!(output.diagnostics.len(), 1);
    assert!(output.diagnostics[0].message.contains("expected 'func'"));
    assert_eq!(output.program.functions.len(), 1);
}

#[test]
fn node_ids_are_unique() {
    let program = parse_ok(
        "func f(a : int) : int return a + 1; endfunc func main() var x : int; x = f(2); endfunc",
    );
    let mut seen = HashSet::new();
    let mut check = |id: asl_parser::NodeIndex| {
        assert!(seen.insert(id), "duplicate node id {id:?}");
    };
    check(program.node);
    for f in &program.functions {
        check(f.node);
        check(f.name.node);
        for p in &f.params {
            check(p.name.node);
            check(p.ty.node);
        }
        if let Some(ret) = &f.ret {
            check(ret.node);
        }
        for d in &f.decls {
            check(d.node);
            check(d.ty.node);
            for n in &d.names {
                check(n.node);
            }
        }
        for s in &f.body.stmts {
            check(s.node);
        }
    }
}
