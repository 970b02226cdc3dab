//! Expression typing rules.
//!
//! Every expression node leaves this walk with a type and an l-value flag.
//! Checks are guarded on the participating operand types not being `Error`,
//! so a single undeclared identifier or bad operand produces exactly one
//! diagnostic.

use asl_common::Span;
use asl_parser::ast::{ArithOp, Call, Expr, ExprKind, Ident, RelOp, UnaryOp, Value};
use asl_types::{Comparison, TypeId};

use crate::checker::Checker;
use asl_common::diagnostics::{diagnostic_codes, diagnostic_messages};

impl Checker<'_> {
    pub(crate) fn check_expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Value(value) => {
                let t = match value {
                    Value::Int(_) => self.types.integer_ty(),
                    Value::Float(_) => self.types.float_ty(),
                    Value::Bool(_) => self.types.boolean_ty(),
                    Value::Char(_) => self.types.character_ty(),
                };
                self.decorations.set_type(expr.node, t);
                self.decorations.set_lvalue(expr.node, false);
            }
            ExprKind::Ident(ident) => {
                self.check_ident(ident);
                let t = self.node_ty(ident.node);
                self.decorations.set_type(expr.node, t);
                let lvalue = self.decorations.is_lvalue(ident.node);
                self.decorations.set_lvalue(expr.node, lvalue);
            }
            ExprKind::Paren(inner) => {
                self.check_expr(inner);
                let t = self.node_ty(inner.node);
                self.decorations.set_type(expr.node, t);
                let lvalue = self.decorations.is_lvalue(inner.node);
                self.decorations.set_lvalue(expr.node, lvalue);
            }
            ExprKind::Unary {
                op,
                op_span,
                operand,
            } => {
                self.check_expr(operand);
                let t = self.node_ty(operand.node);
                let result = match op {
                    UnaryOp::Not => {
                        if !self.types.is_error_ty(t) && !self.types.is_boolean_ty(t) {
                            self.incompatible_operator(*op_span, &op.to_string());
                        }
                        self.types.boolean_ty()
                    }
                    UnaryOp::Neg => {
                        if !self.types.is_error_ty(t) && !self.types.is_numeric_ty(t) {
                            self.incompatible_operator(*op_span, &op.to_string());
                        }
                        if self.types.is_float_ty(t) {
                            t
                        } else {
                            self.types.integer_ty()
                        }
                    }
                };
                self.decorations.set_type(expr.node, result);
                self.decorations.set_lvalue(expr.node, false);
            }
            ExprKind::Arithmetic {
                op,
                op_span,
                lhs,
                rhs,
            } => {
                self.check_expr(lhs);
                self.check_expr(rhs);
                let t1 = self.node_ty(lhs.node);
                let t2 = self.node_ty(rhs.node);
                let bad = if *op == ArithOp::Mod {
                    (!self.types.is_error_ty(t1) && !self.types.is_integer_ty(t1))
                        || (!self.types.is_error_ty(t2) && !self.types.is_integer_ty(t2))
                } else {
                    (!self.types.is_error_ty(t1) && !self.types.is_numeric_ty(t1))
                        || (!self.types.is_error_ty(t2) && !self.types.is_numeric_ty(t2))
                };
                if bad {
                    self.incompatible_operator(*op_span, &op.to_string());
                }
                let result = if self.types.is_float_ty(t1) || self.types.is_float_ty(t2) {
                    self.types.float_ty()
                } else {
                    self.types.integer_ty()
                };
                self.decorations.set_type(expr.node, result);
                self.decorations.set_lvalue(expr.node, false);
            }
            ExprKind::Relational {
                op,
                op_span,
                lhs,
                rhs,
            } => {
                self.check_expr(lhs);
                self.check_expr(rhs);
                let t1 = self.node_ty(lhs.node);
                let t2 = self.node_ty(rhs.node);
                let cmp = match op {
                    RelOp::Eq | RelOp::Ne => Comparison::Equality,
                    _ => Comparison::Ordering,
                };
                if !self.types.is_error_ty(t1)
                    && !self.types.is_error_ty(t2)
                    && !self.types.comparable_types(t1, t2, cmp)
                {
                    self.incompatible_operator(*op_span, &op.to_string());
                }
                self.decorations.set_type(expr.node, self.types.boolean_ty());
                self.decorations.set_lvalue(expr.node, false);
            }
            ExprKind::Logical {
                op,
                op_span,
                lhs,
                rhs,
            } => {
                self.check_expr(lhs);
                self.check_expr(rhs);
                let t1 = self.node_ty(lhs.node);
                let t2 = self.node_ty(rhs.node);
                if !self.types.is_error_ty(t1)
                    && !self.types.is_error_ty(t2)
                    && (!self.types.is_boolean_ty(t1) || !self.types.is_boolean_ty(t2))
                {
                    self.incompatible_operator(*op_span, &op.to_string());
                }
                self.decorations.set_type(expr.node, self.types.boolean_ty());
                self.decorations.set_lvalue(expr.node, false);
            }
            ExprKind::ArrayIndex { ident, index } => {
                self.check_ident(ident);
                self.check_expr(index);
                let tid = self.node_ty(ident.node);
                let (elem, _) = self.check_array_access(tid, index, expr.span);
                self.decorations.set_type(expr.node, elem);
                self.decorations.set_lvalue(expr.node, true);
            }
            ExprKind::Call(call) => {
                let result = self.check_call(call, true);
                self.decorations.set_type(expr.node, result);
                self.decorations.set_lvalue(expr.node, false);
            }
        }
    }

    /// Identifier rule: stack lookup, `Error` + l-value on a miss so the
    /// enclosing rules stay quiet about it.
    pub(crate) fn check_ident(&mut self, ident: &Ident) {
        if self.symbols.find_in_stack(&ident.name).is_none() {
            let message = self.format(diagnostic_messages::UNDECLARED_IDENT, &[&ident.name]);
            self.diag(ident.span, message, diagnostic_codes::UNDECLARED_IDENT);
            self.decorations
                .set_type(ident.node, self.types.error_ty());
            self.decorations.set_lvalue(ident.node, true);
        } else {
            let t = self
                .symbols
                .type_of(&ident.name)
                .unwrap_or_else(|| self.types.error_ty());
            self.decorations.set_type(ident.node, t);
            self.decorations
                .set_lvalue(ident.node, !self.symbols.is_function(&ident.name));
        }
    }

    /// Array access checks shared by `ArrayIndex` expressions and indexed
    /// left expressions. Returns the element type (or `Error`) and whether
    /// the base was a valid array.
    pub(crate) fn check_array_access(
        &mut self,
        base_ty: TypeId,
        index: &Expr,
        span: Span,
    ) -> (TypeId, bool) {
        let mut elem = self.types.error_ty();
        let mut valid_array = false;
        if !self.types.is_error_ty(base_ty) {
            if self.types.is_array_ty(base_ty) {
                elem = self.types.array_elem_ty(base_ty);
                valid_array = true;
            } else {
                self.diag(
                    span,
                    diagnostic_messages::NON_ARRAY_IN_ARRAY_ACCESS.to_string(),
                    diagnostic_codes::NON_ARRAY_IN_ARRAY_ACCESS,
                );
            }
        }
        let t_index = self.node_ty(index.node);
        if !self.types.is_error_ty(t_index) && !self.types.is_integer_ty(t_index) {
            self.diag(
                index.span,
                diagnostic_messages::NON_INTEGER_INDEX_IN_ARRAY_ACCESS.to_string(),
                diagnostic_codes::NON_INTEGER_INDEX_IN_ARRAY_ACCESS,
            );
        }
        (elem, valid_array)
    }

    /// Call checking shared by procedure-call statements and function-call
    /// expressions. Returns the call's result type (`Error` for procedure
    /// calls and on any failure).
    pub(crate) fn check_call(&mut self, call: &Call, as_expression: bool) -> TypeId {
        for arg in &call.args {
            self.check_expr(arg);
        }
        self.check_ident(&call.callee);
        let t1 = self.node_ty(call.callee.node);
        if self.types.is_error_ty(t1) {
            return self.types.error_ty();
        }
        if !self.types.is_function_ty(t1) {
            let message = self.format(diagnostic_messages::IS_NOT_CALLABLE, &[&call.callee.name]);
            self.diag(
                call.callee.span,
                message,
                diagnostic_codes::IS_NOT_CALLABLE,
            );
            return self.types.error_ty();
        }

        let ret = self.types.function_ret_ty(t1);
        let mut result = self.types.error_ty();
        if as_expression {
            if self.types.is_void_ty(ret) {
                let message =
                    self.format(diagnostic_messages::IS_NOT_FUNCTION, &[&call.callee.name]);
                self.diag(
                    call.callee.span,
                    message,
                    diagnostic_codes::IS_NOT_FUNCTION,
                );
            } else {
                result = ret;
            }
        }

        let params: Vec<TypeId> = self.types.function_params(t1).to_vec();
        if params.len() != call.args.len() {
            let message = self.format(
                diagnostic_messages::NUMBER_OF_PARAMETERS,
                &[&call.callee.name],
            );
            self.diag(call.span, message, diagnostic_codes::NUMBER_OF_PARAMETERS);
        } else {
            for (i, (param, arg)) in params.iter().zip(&call.args).enumerate() {
                let ta = self.node_ty(arg.node);
                if !self.types.is_error_ty(ta) && !self.types.copyable_types(*param, ta) {
                    let position = (i + 1).to_string();
                    let message = self.format(
                        diagnostic_messages::INCOMPATIBLE_PARAMETER,
                        &[&position, &call.callee.name],
                    );
                    self.diag(arg.span, message, diagnostic_codes::INCOMPATIBLE_PARAMETER);
                }
            }
        }
        result
    }

    fn incompatible_operator(&mut self, span: Span, op: &str) {
        let message = self.format(diagnostic_messages::INCOMPATIBLE_OPERATOR, &[op]);
        self.diag(span, message, diagnostic_codes::INCOMPATIBLE_OPERATOR);
    }
}
