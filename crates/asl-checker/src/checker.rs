//! Statement and program-level checking.

use tracing::debug;

use asl_common::diagnostics::{
    Diagnostic, DiagnosticSink, diagnostic_codes, diagnostic_messages, format_message,
};
use asl_common::Span;
use asl_parser::ast::{BasicType, Expr, Function, LeftExpr, Program, Statements, Stmt, StmtKind};
use asl_parser::NodeIndex;
use asl_types::{TypeId, TypeRegistry};
use asl_binder::{Decorations, SymbolTable};

pub struct Checker<'a> {
    pub(crate) types: &'a TypeRegistry,
    pub(crate) symbols: &'a mut SymbolTable,
    pub(crate) decorations: &'a mut Decorations,
    pub(crate) sink: &'a mut DiagnosticSink,
    pub(crate) file: &'a str,
    /// Declared return type of the function being checked.
    pub(crate) current_ret: TypeId,
}

impl<'a> Checker<'a> {
    pub fn new(
        types: &'a TypeRegistry,
        symbols: &'a mut SymbolTable,
        decorations: &'a mut Decorations,
        sink: &'a mut DiagnosticSink,
        file: &'a str,
    ) -> Self {
        let void = types.void_ty();
        Self {
            types,
            symbols,
            decorations,
            sink,
            file,
            current_ret: void,
        }
    }

    pub fn run(&mut self, program: &Program) {
        let Some(scope) = self.decorations.scope_of(program.node) else {
            return;
        };
        self.symbols.push_scope(scope);
        for function in &program.functions {
            self.check_function(function);
        }
        if !self.symbols.main_properly_declared(self.types) {
            self.diag(
                program.span,
                diagnostic_messages::NO_MAIN_PROPERLY_DECLARED.to_string(),
                diagnostic_codes::NO_MAIN_PROPERLY_DECLARED,
            );
        }
        self.symbols.pop_scope();
    }

    fn check_function(&mut self, function: &Function) {
        debug!(function = %function.name.name, "checking function");
        let Some(scope) = self.decorations.scope_of(function.node) else {
            return;
        };
        self.symbols.push_scope(scope);
        self.current_ret = match &function.ret {
            Some(basic) => match basic.kind {
                BasicType::Int => self.types.integer_ty(),
                BasicType::Float => self.types.float_ty(),
                BasicType::Bool => self.types.boolean_ty(),
                BasicType::Char => self.types.character_ty(),
            },
            None => self.types.void_ty(),
        };
        self.check_statements(&function.body);
        self.symbols.pop_scope();
    }

    fn check_statements(&mut self, statements: &Statements) {
        for stmt in &statements.stmts {
            self.check_stmt(stmt);
        }
    }

    fn check_stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Assign {
                target,
                assign_span,
                value,
            } => {
                self.check_left_expr(target);
                self.check_expr(value);
                let t1 = self.node_ty(target.node);
                let t2 = self.node_ty(value.node);
                if !self.types.is_error_ty(t1)
                    && !self.types.is_error_ty(t2)
                    && !self.types.copyable_types(t1, t2)
                {
                    self.diag(
                        *assign_span,
                        diagnostic_messages::INCOMPATIBLE_ASSIGNMENT.to_string(),
                        diagnostic_codes::INCOMPATIBLE_ASSIGNMENT,
                    );
                }
                if !self.types.is_error_ty(t1) && !self.decorations.is_lvalue(target.node) {
                    self.diag(
                        target.span,
                        diagnostic_messages::NON_REFERENCEABLE_LEFT_EXPR.to_string(),
                        diagnostic_codes::NON_REFERENCEABLE_LEFT_EXPR,
                    );
                }
            }
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.check_expr(cond);
                self.require_boolean(cond.node, stmt.span);
                self.check_statements(then_branch);
                if let Some(else_branch) = else_branch {
                    self.check_statements(else_branch);
                }
            }
            StmtKind::While { cond, body } => {
                self.check_expr(cond);
                self.require_boolean(cond.node, stmt.span);
                self.check_statements(body);
            }
            StmtKind::ProcCall(call) => {
                self.check_call(call, false);
            }
            StmtKind::Return { value } => self.check_return(stmt, value.as_ref()),
            StmtKind::Read { target } => {
                self.check_left_expr(target);
                let t = self.node_ty(target.node);
                if !self.types.is_error_ty(t) && !self.types.is_primitive_ty(t) {
                    self.diag(
                        stmt.span,
                        diagnostic_messages::READ_WRITE_REQUIRE_BASIC.to_string(),
                        diagnostic_codes::READ_WRITE_REQUIRE_BASIC,
                    );
                }
                if !self.types.is_error_ty(t) && !self.decorations.is_lvalue(target.node) {
                    self.diag(
                        stmt.span,
                        diagnostic_messages::NON_REFERENCEABLE_EXPRESSION.to_string(),
                        diagnostic_codes::NON_REFERENCEABLE_EXPRESSION,
                    );
                }
            }
            StmtKind::WriteExpr { value } => {
                self.check_expr(value);
                let t = self.node_ty(value.node);
                if !self.types.is_error_ty(t) && !self.types.is_primitive_ty(t) {
                    self.diag(
                        stmt.span,
                        diagnostic_messages::READ_WRITE_REQUIRE_BASIC.to_string(),
                        diagnostic_codes::READ_WRITE_REQUIRE_BASIC,
                    );
                }
            }
            StmtKind::WriteString { .. } => {}
        }
    }

    fn check_return(&mut self, stmt: &Stmt, value: Option<&Expr>) {
        match value {
            Some(expr) => {
                self.check_expr(expr);
                let t = self.node_ty(expr.node);
                if self.types.is_error_ty(t) {
                    return;
                }
                let incompatible = !self.types.is_primitive_non_void_ty(t)
                    || self.types.is_void_ty(self.current_ret)
                    || !self.types.copyable_types(self.current_ret, t);
                if incompatible {
                    self.diag(
                        stmt.span,
                        diagnostic_messages::INCOMPATIBLE_RETURN.to_string(),
                        diagnostic_codes::INCOMPATIBLE_RETURN,
                    );
                }
            }
            None => {
                if !self.types.is_void_ty(self.current_ret) {
                    self.diag(
                        stmt.span,
                        diagnostic_messages::INCOMPATIBLE_RETURN.to_string(),
                        diagnostic_codes::INCOMPATIBLE_RETURN,
                    );
                }
            }
        }
    }

    /// Left expression: bare identifier, or indexed array element.
    pub(crate) fn check_left_expr(&mut self, left: &LeftExpr) {
        self.check_ident(&left.ident);
        let tid = self.node_ty(left.ident.node);
        match &left.index {
            None => {
                self.decorations.set_type(left.node, tid);
                let lvalue = self.decorations.is_lvalue(left.ident.node);
                self.decorations.set_lvalue(left.node, lvalue);
            }
            Some(index) => {
                self.check_expr(index);
                let (elem, valid_array) = self.check_array_access(tid, index, left.span);
                self.decorations.set_type(left.node, elem);
                self.decorations.set_lvalue(left.node, valid_array);
            }
        }
    }

    fn require_boolean(&mut self, cond: NodeIndex, span: Span) {
        let t = self.node_ty(cond);
        if !self.types.is_error_ty(t) && !self.types.is_boolean_ty(t) {
            self.diag(
                span,
                diagnostic_messages::BOOLEAN_REQUIRED.to_string(),
                diagnostic_codes::BOOLEAN_REQUIRED,
            );
        }
    }

    /// Type decoration of a node; `Error` when the node was never decorated.
    pub(crate) fn node_ty(&self, node: NodeIndex) -> TypeId {
        self.decorations
            .type_of(node)
            .unwrap_or_else(|| self.types.error_ty())
    }

    pub(crate) fn diag(&mut self, span: Span, message: String, code: u32) {
        self.sink
            .push(Diagnostic::error(self.file, span, message, code));
    }

    pub(crate) fn format(&self, template: &str, args: &[&str]) -> String {
        format_message(template, args)
    }
}
