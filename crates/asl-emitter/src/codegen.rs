//! The code pass: third walk over the decorated tree.
//!
//! Each expression lowers to an `ExprValue`: the symbolic address holding
//! its r-value, the in-array offset when the node denotes an array element,
//! and the instructions establishing both. Statements lower to plain
//! instruction lists. Temporary and label counters reset at function entry,
//! so every subroutine starts at `%t0` and label `1`.
//!
//! The pass assumes a well-typed tree: the driver never runs it when the
//! earlier passes emitted diagnostics.

use tracing::debug;

use asl_binder::{Decorations, SymbolTable};
use asl_parser::ast::{
    ArithOp, Call, Expr, ExprKind, Function, LeftExpr, LogicOp, Program, RelOp, Statements, Stmt,
    StmtKind, UnaryOp, Value,
};
use asl_parser::NodeIndex;
use asl_types::{TypeId, TypeRegistry};

use crate::instruction::Instr;
use crate::program::{Subroutine, TacProgram};
use crate::RESULT_PARAM;

/// Per-subroutine counters for temporaries and labels.
#[derive(Debug, Default)]
struct CodeCounters {
    temps: u32,
    if_labels: u32,
    while_labels: u32,
}

impl CodeCounters {
    fn reset(&mut self) {
        *self = Self::default();
    }

    fn new_temp(&mut self) -> String {
        let temp = format!("%t{}", self.temps);
        self.temps += 1;
        temp
    }

    fn new_if_label(&mut self) -> u32 {
        self.if_labels += 1;
        self.if_labels
    }

    fn new_while_label(&mut self) -> u32 {
        self.while_labels += 1;
        self.while_labels
    }
}

/// Lowered form of an expression node.
struct ExprValue {
    /// Symbolic name holding the r-value (or the array base for element
    /// l-values).
    addr: String,
    /// In-array offset temp for array-element l-values; empty otherwise.
    offset: String,
    code: Vec<Instr>,
}

impl ExprValue {
    fn new(addr: impl Into<String>, code: Vec<Instr>) -> Self {
        Self {
            addr: addr.into(),
            offset: String::new(),
            code,
        }
    }
}

pub struct CodeGen<'a> {
    types: &'a TypeRegistry,
    symbols: &'a mut SymbolTable,
    decorations: &'a Decorations,
    counters: CodeCounters,
    /// Declared return type of the function being emitted.
    current_ret: TypeId,
}

impl<'a> CodeGen<'a> {
    pub fn new(
        types: &'a TypeRegistry,
        symbols: &'a mut SymbolTable,
        decorations: &'a Decorations,
    ) -> Self {
        let void = types.void_ty();
        Self {
            types,
            symbols,
            decorations,
            counters: CodeCounters::default(),
            current_ret: void,
        }
    }

    pub fn run(mut self, program: &Program) -> TacProgram {
        let mut tac = TacProgram::default();
        let Some(scope) = self.decorations.scope_of(program.node) else {
            return tac;
        };
        self.symbols.push_scope(scope);
        for function in &program.functions {
            tac.subroutines.push(self.emit_function(function));
        }
        self.symbols.pop_scope();
        tac
    }

    fn emit_function(&mut self, function: &Function) -> Subroutine {
        debug!(function = %function.name.name, "emitting subroutine");
        let Some(scope) = self.decorations.scope_of(function.node) else {
            return Subroutine::new(function.name.name.clone());
        };
        self.symbols.push_scope(scope);
        self.counters.reset();

        let mut subroutine = Subroutine::new(function.name.name.clone());
        self.current_ret = match &function.ret {
            Some(basic) => {
                subroutine.add_param(RESULT_PARAM);
                self.node_ty(basic.node)
            }
            None => self.types.void_ty(),
        };
        for param in &function.params {
            subroutine.add_param(param.name.name.clone());
        }
        for decl in &function.decls {
            let ty = self.node_ty(decl.ty.node);
            let size = self.types.size_of(ty);
            for ident in &decl.names {
                subroutine.add_local(ident.name.clone(), size);
            }
        }

        let mut code = self.emit_statements(&function.body);
        code.push(Instr::Return);
        subroutine.instructions = code;

        self.symbols.pop_scope();
        subroutine
    }

    fn emit_statements(&mut self, statements: &Statements) -> Vec<Instr> {
        let mut code = Vec::new();
        for stmt in &statements.stmts {
            code.extend(self.emit_stmt(stmt));
        }
        code
    }

    fn emit_stmt(&mut self, stmt: &Stmt) -> Vec<Instr> {
        match &stmt.kind {
            StmtKind::Assign { target, value, .. } => self.emit_assign(target, value),
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => self.emit_if(cond, then_branch, else_branch.as_ref()),
            StmtKind::While { cond, body } => self.emit_while(cond, body),
            StmtKind::ProcCall(call) => self.emit_call(call, false).0,
            StmtKind::Return { value } => self.emit_return(value.as_ref()),
            StmtKind::Read { target } => self.emit_read(target),
            StmtKind::WriteExpr { value } => self.emit_write_expr(value),
            StmtKind::WriteString { value } => self.emit_write_string(value),
        }
    }

    fn emit_assign(&mut self, target: &LeftExpr, value: &Expr) -> Vec<Instr> {
        let lhs = self.emit_left_expr(target);
        let rhs = self.emit_expr(value);
        let t1 = self.node_ty(target.node);
        let t2 = self.node_ty(value.node);

        let mut code = lhs.code;
        code.extend(rhs.code);

        // Whole-array assignment copies element by element.
        if self.types.is_array_ty(t1) && self.types.is_array_ty(t2) {
            let size = self.types.array_size(t1);
            let copy = self.emit_array_copy(&target.ident.name, &rhs.addr, size);
            code.extend(copy);
            return code;
        }

        let mut rhs_addr = rhs.addr;
        if self.types.is_float_ty(t1) && self.types.is_integer_ty(t2) {
            let temp = self.counters.new_temp();
            code.push(Instr::Float {
                dst: temp.clone(),
                src: rhs_addr,
            });
            rhs_addr = temp;
        }

        if target.index.is_some() {
            code.push(Instr::XLoad {
                base: lhs.addr,
                offset: lhs.offset,
                src: rhs_addr,
            });
        } else {
            code.push(Instr::Load {
                dst: lhs.addr,
                src: rhs_addr,
            });
        }
        code
    }

    /// Counted copy loop over `[0, size)`: LOADX from the source element,
    /// XLOAD into the destination element.
    fn emit_array_copy(&mut self, dst_name: &str, src_name: &str, size: u32) -> Vec<Instr> {
        let mut code = Vec::new();
        let dst = self.array_base(dst_name, &mut code);
        let src = self.array_base(src_name, &mut code);

        let index = self.counters.new_temp();
        let bound = self.counters.new_temp();
        let stride = self.counters.new_temp();
        code.push(Instr::ILoad {
            dst: index.clone(),
            value: "0".to_string(),
        });
        code.push(Instr::ILoad {
            dst: bound.clone(),
            value: size.to_string(),
        });
        code.push(Instr::ILoad {
            dst: stride.clone(),
            value: "1".to_string(),
        });

        let label = self.counters.new_while_label();
        let label_while = format!("while{label}");
        let label_end = format!("endwhile{label}");
        code.push(Instr::Label(label_while.clone()));
        let guard = self.counters.new_temp();
        code.push(Instr::Lt {
            dst: guard.clone(),
            lhs: index.clone(),
            rhs: bound,
        });
        code.push(Instr::FJump {
            cond: guard,
            label: label_end.clone(),
        });
        let element = self.counters.new_temp();
        code.push(Instr::LoadX {
            dst: element.clone(),
            base: src,
            offset: index.clone(),
        });
        code.push(Instr::XLoad {
            base: dst,
            offset: index.clone(),
            src: element,
        });
        code.push(Instr::Add {
            dst: index.clone(),
            lhs: index.clone(),
            rhs: stride,
        });
        code.push(Instr::UJump(label_while));
        code.push(Instr::Label(label_end));
        code
    }

    fn emit_if(
        &mut self,
        cond: &Expr,
        then_branch: &Statements,
        else_branch: Option<&Statements>,
    ) -> Vec<Instr> {
        let cond_value = self.emit_expr(cond);
        let then_code = self.emit_statements(then_branch);
        let else_code = else_branch.map(|branch| self.emit_statements(branch));

        let label = self.counters.new_if_label();
        let label_endif = format!("endif{label}");

        let mut code = cond_value.code;
        match else_code {
            Some(else_code) => {
                let label_else = format!("else{label}");
                code.push(Instr::FJump {
                    cond: cond_value.addr,
                    label: label_else.clone(),
                });
                code.extend(then_code);
                code.push(Instr::UJump(label_endif.clone()));
                code.push(Instr::Label(label_else));
                code.extend(else_code);
                code.push(Instr::Label(label_endif));
            }
            None => {
                code.push(Instr::FJump {
                    cond: cond_value.addr,
                    label: label_endif.clone(),
                });
                code.extend(then_code);
                code.push(Instr::Label(label_endif));
            }
        }
        code
    }

    fn emit_while(&mut self, cond: &Expr, body: &Statements) -> Vec<Instr> {
        let cond_value = self.emit_expr(cond);
        let body_code = self.emit_statements(body);

        let label = self.counters.new_while_label();
        let label_while = format!("while{label}");
        let label_end = format!("endwhile{label}");

        let mut code = vec![Instr::Label(label_while.clone())];
        code.extend(cond_value.code);
        code.push(Instr::FJump {
            cond: cond_value.addr,
            label: label_end.clone(),
        });
        code.extend(body_code);
        code.push(Instr::UJump(label_while));
        code.push(Instr::Label(label_end));
        code
    }

    fn emit_return(&mut self, value: Option<&Expr>) -> Vec<Instr> {
        match value {
            Some(expr) => {
                let value = self.emit_expr(expr);
                let mut code = value.code;
                let mut addr = value.addr;
                let t = self.node_ty(expr.node);
                if self.types.is_float_ty(self.current_ret) && self.types.is_integer_ty(t) {
                    let temp = self.counters.new_temp();
                    code.push(Instr::Float {
                        dst: temp.clone(),
                        src: addr,
                    });
                    addr = temp;
                }
                code.push(Instr::Load {
                    dst: RESULT_PARAM.to_string(),
                    src: addr,
                });
                code.push(Instr::Return);
                code
            }
            // Function exit appends the terminal RETURN.
            None => Vec::new(),
        }
    }

    fn emit_read(&mut self, target: &LeftExpr) -> Vec<Instr> {
        let lhs = self.emit_left_expr(target);
        let t = self.node_ty(target.node);
        let mut code = lhs.code;
        if target.index.is_some() {
            let temp = self.counters.new_temp();
            code.push(self.read_instr(t, temp.clone()));
            code.push(Instr::XLoad {
                base: lhs.addr,
                offset: lhs.offset,
                src: temp,
            });
        } else {
            code.push(self.read_instr(t, lhs.addr));
        }
        code
    }

    fn read_instr(&self, ty: TypeId, dst: String) -> Instr {
        if self.types.is_float_ty(ty) {
            Instr::ReadF(dst)
        } else if self.types.is_character_ty(ty) {
            Instr::ReadC(dst)
        } else {
            // Booleans read as integers.
            Instr::ReadI(dst)
        }
    }

    fn emit_write_expr(&mut self, value: &Expr) -> Vec<Instr> {
        let result = self.emit_expr(value);
        let t = self.node_ty(value.node);
        let mut code = result.code;
        if self.types.is_float_ty(t) {
            code.push(Instr::WriteF(result.addr));
        } else if self.types.is_character_ty(t) {
            code.push(Instr::WriteC(result.addr));
        } else {
            code.push(Instr::WriteI(result.addr));
        }
        code
    }

    /// Lower a string literal one character at a time, reusing a single
    /// temp. `\n` becomes WRITELN; `\t`, `\"` and `\\` stay two-character
    /// escapes; any other backslash falls back to the backslash itself.
    fn emit_write_string(&mut self, value: &str) -> Vec<Instr> {
        let mut code = Vec::new();
        let temp = self.counters.new_temp();
        let mut chars = value.chars().peekable();
        while let Some(c) = chars.next() {
            if c != '\\' {
                code.push(Instr::ChLoad {
                    dst: temp.clone(),
                    value: c.to_string(),
                });
                code.push(Instr::WriteC(temp.clone()));
                continue;
            }
            match chars.peek() {
                Some('n') => {
                    chars.next();
                    code.push(Instr::WriteLn);
                }
                Some(&escape) if escape == 't' || escape == '"' || escape == '\\' => {
                    chars.next();
                    code.push(Instr::ChLoad {
                        dst: temp.clone(),
                        value: format!("\\{escape}"),
                    });
                    code.push(Instr::WriteC(temp.clone()));
                }
                _ => {
                    code.push(Instr::ChLoad {
                        dst: temp.clone(),
                        value: "\\".to_string(),
                    });
                    code.push(Instr::WriteC(temp.clone()));
                }
            }
        }
        code
    }

    // ---- expressions ----

    fn emit_expr(&mut self, expr: &Expr) -> ExprValue {
        match &expr.kind {
            ExprKind::Value(value) => self.emit_value(value),
            ExprKind::Ident(ident) => ExprValue::new(ident.name.clone(), Vec::new()),
            ExprKind::Paren(inner) => self.emit_expr(inner),
            ExprKind::Unary { op, operand, .. } => self.emit_unary(*op, operand),
            ExprKind::Arithmetic { op, lhs, rhs, .. } => self.emit_arithmetic(expr, *op, lhs, rhs),
            ExprKind::Relational { op, lhs, rhs, .. } => self.emit_relational(*op, lhs, rhs),
            ExprKind::Logical { op, lhs, rhs, .. } => self.emit_logical(*op, lhs, rhs),
            ExprKind::ArrayIndex { ident, index } => self.emit_array_index(&ident.name, index),
            ExprKind::Call(call) => {
                let (code, result) = self.emit_call(call, true);
                ExprValue::new(result.unwrap_or_default(), code)
            }
        }
    }

    fn emit_value(&mut self, value: &Value) -> ExprValue {
        let temp = self.counters.new_temp();
        let instr = match value {
            Value::Int(text) => Instr::ILoad {
                dst: temp.clone(),
                value: text.clone(),
            },
            Value::Float(text) => Instr::FLoad {
                dst: temp.clone(),
                value: text.clone(),
            },
            Value::Char(text) => Instr::ChLoad {
                dst: temp.clone(),
                value: text.clone(),
            },
            Value::Bool(value) => Instr::Load {
                dst: temp.clone(),
                src: if *value { "1" } else { "0" }.to_string(),
            },
        };
        ExprValue::new(temp, vec![instr])
    }

    fn emit_unary(&mut self, op: UnaryOp, operand: &Expr) -> ExprValue {
        let value = self.emit_expr(operand);
        let t = self.node_ty(operand.node);
        let mut code = value.code;
        let temp = self.counters.new_temp();
        let instr = match op {
            UnaryOp::Not => Instr::Not {
                dst: temp.clone(),
                src: value.addr,
            },
            UnaryOp::Neg if self.types.is_float_ty(t) => Instr::FNeg {
                dst: temp.clone(),
                src: value.addr,
            },
            UnaryOp::Neg => Instr::Neg {
                dst: temp.clone(),
                src: value.addr,
            },
        };
        code.push(instr);
        ExprValue::new(temp, code)
    }

    fn emit_arithmetic(&mut self, expr: &Expr, op: ArithOp, lhs: &Expr, rhs: &Expr) -> ExprValue {
        let v0 = self.emit_expr(lhs);
        let v1 = self.emit_expr(rhs);
        let t0 = self.node_ty(lhs.node);
        let t1 = self.node_ty(rhs.node);
        let result_ty = self.node_ty(expr.node);

        let mut code = v0.code;
        code.extend(v1.code);

        if self.types.is_integer_ty(result_ty) {
            let temp = self.counters.new_temp();
            match op {
                ArithOp::Mul => code.push(Instr::Mul {
                    dst: temp.clone(),
                    lhs: v0.addr,
                    rhs: v1.addr,
                }),
                ArithOp::Add => code.push(Instr::Add {
                    dst: temp.clone(),
                    lhs: v0.addr,
                    rhs: v1.addr,
                }),
                ArithOp::Div => code.push(Instr::Div {
                    dst: temp.clone(),
                    lhs: v0.addr,
                    rhs: v1.addr,
                }),
                ArithOp::Sub => code.push(Instr::Sub {
                    dst: temp.clone(),
                    lhs: v0.addr,
                    rhs: v1.addr,
                }),
                ArithOp::Mod => {
                    // a % b  =  a - (a / b) * b, in one temp
                    code.push(Instr::Div {
                        dst: temp.clone(),
                        lhs: v0.addr.clone(),
                        rhs: v1.addr.clone(),
                    });
                    code.push(Instr::Mul {
                        dst: temp.clone(),
                        lhs: temp.clone(),
                        rhs: v1.addr,
                    });
                    code.push(Instr::Sub {
                        dst: temp.clone(),
                        lhs: v0.addr,
                        rhs: temp.clone(),
                    });
                }
            }
            return ExprValue::new(temp, code);
        }

        // Float result: widen the one integer operand, if any.
        let mut addr0 = v0.addr;
        let mut addr1 = v1.addr;
        if self.types.is_integer_ty(t0) {
            let cast = self.counters.new_temp();
            code.push(Instr::Float {
                dst: cast.clone(),
                src: addr0,
            });
            addr0 = cast;
        } else if self.types.is_integer_ty(t1) {
            let cast = self.counters.new_temp();
            code.push(Instr::Float {
                dst: cast.clone(),
                src: addr1,
            });
            addr1 = cast;
        }
        let temp = self.counters.new_temp();
        let instr = match op {
            ArithOp::Mul => Instr::FMul {
                dst: temp.clone(),
                lhs: addr0,
                rhs: addr1,
            },
            ArithOp::Add => Instr::FAdd {
                dst: temp.clone(),
                lhs: addr0,
                rhs: addr1,
            },
            ArithOp::Div => Instr::FDiv {
                dst: temp.clone(),
                lhs: addr0,
                rhs: addr1,
            },
            // `%` never types as float
            ArithOp::Sub | ArithOp::Mod => Instr::FSub {
                dst: temp.clone(),
                lhs: addr0,
                rhs: addr1,
            },
        };
        code.push(instr);
        ExprValue::new(temp, code)
    }

    fn emit_relational(&mut self, op: RelOp, lhs: &Expr, rhs: &Expr) -> ExprValue {
        let v0 = self.emit_expr(lhs);
        let v1 = self.emit_expr(rhs);
        let t0 = self.node_ty(lhs.node);
        let t1 = self.node_ty(rhs.node);

        let mut code = v0.code;
        code.extend(v1.code);

        let float = self.types.is_float_ty(t0) || self.types.is_float_ty(t1);
        let mut addr0 = v0.addr;
        let mut addr1 = v1.addr;
        if float {
            if self.types.is_integer_ty(t0) {
                let cast = self.counters.new_temp();
                code.push(Instr::Float {
                    dst: cast.clone(),
                    src: addr0,
                });
                addr0 = cast;
            } else if self.types.is_integer_ty(t1) {
                let cast = self.counters.new_temp();
                code.push(Instr::Float {
                    dst: cast.clone(),
                    src: addr1,
                });
                addr1 = cast;
            }
        }

        let temp = self.counters.new_temp();
        let compare = |dst: String, lhs: String, rhs: String, op: RelOp| -> Instr {
            match (op, float) {
                (RelOp::Eq | RelOp::Ne, false) => Instr::Eq { dst, lhs, rhs },
                (RelOp::Lt | RelOp::Ge, false) => Instr::Lt { dst, lhs, rhs },
                (RelOp::Le | RelOp::Gt, false) => Instr::Le { dst, lhs, rhs },
                (RelOp::Eq | RelOp::Ne, true) => Instr::FEq { dst, lhs, rhs },
                (RelOp::Lt | RelOp::Ge, true) => Instr::FLt { dst, lhs, rhs },
                (RelOp::Le | RelOp::Gt, true) => Instr::FLe { dst, lhs, rhs },
            }
        };
        code.push(compare(temp.clone(), addr0, addr1, op));
        // NE, GT and GE are the negations of EQ, LE and LT.
        if matches!(op, RelOp::Ne | RelOp::Gt | RelOp::Ge) {
            code.push(Instr::Not {
                dst: temp.clone(),
                src: temp.clone(),
            });
        }
        ExprValue::new(temp, code)
    }

    fn emit_logical(&mut self, op: LogicOp, lhs: &Expr, rhs: &Expr) -> ExprValue {
        let v0 = self.emit_expr(lhs);
        let v1 = self.emit_expr(rhs);
        let mut code = v0.code;
        code.extend(v1.code);
        let temp = self.counters.new_temp();
        let instr = match op {
            LogicOp::And => Instr::And {
                dst: temp.clone(),
                lhs: v0.addr,
                rhs: v1.addr,
            },
            LogicOp::Or => Instr::Or {
                dst: temp.clone(),
                lhs: v0.addr,
                rhs: v1.addr,
            },
        };
        code.push(instr);
        ExprValue::new(temp, code)
    }

    /// `id[e]` in r-value position: offset computation, then LOADX into a
    /// fresh temp.
    fn emit_array_index(&mut self, name: &str, index: &Expr) -> ExprValue {
        let index_value = self.emit_expr(index);
        let mut code = index_value.code;
        let offset = self.emit_index_offset(&index_value.addr, &mut code);
        let base = self.array_base(name, &mut code);
        let temp = self.counters.new_temp();
        code.push(Instr::LoadX {
            dst: temp.clone(),
            base,
            offset,
        });
        ExprValue::new(temp, code)
    }

    fn emit_left_expr(&mut self, left: &LeftExpr) -> ExprValue {
        match &left.index {
            None => ExprValue::new(left.ident.name.clone(), Vec::new()),
            Some(index) => {
                let index_value = self.emit_expr(index);
                let mut code = index_value.code;
                let offset = self.emit_index_offset(&index_value.addr, &mut code);
                let base = self.array_base(&left.ident.name, &mut code);
                ExprValue {
                    addr: base,
                    offset,
                    code,
                }
            }
        }
    }

    /// Element offset: load the unit stride into a temp, multiply by the
    /// index.
    fn emit_index_offset(&mut self, index_addr: &str, code: &mut Vec<Instr>) -> String {
        let stride = self.counters.new_temp();
        code.push(Instr::ILoad {
            dst: stride.clone(),
            value: "1".to_string(),
        });
        let offset = self.counters.new_temp();
        code.push(Instr::Mul {
            dst: offset.clone(),
            lhs: stride,
            rhs: index_addr.to_string(),
        });
        offset
    }

    /// Base address of an array: locally owned arrays are addressed by
    /// name; arrays received by reference are dereferenced into a temp
    /// first.
    fn array_base(&mut self, name: &str, code: &mut Vec<Instr>) -> String {
        if self.symbols.is_local_var(name) {
            name.to_string()
        } else {
            let temp = self.counters.new_temp();
            code.push(Instr::Load {
                dst: temp.clone(),
                src: name.to_string(),
            });
            temp
        }
    }

    /// The calling convention: arguments' code in order, per-argument
    /// widening / address-of conversions, the empty PUSH reserving the
    /// result slot, one PUSH per argument, CALL, one POP per argument, and
    /// a final POP for the result slot.
    fn emit_call(&mut self, call: &Call, want_result: bool) -> (Vec<Instr>, Option<String>) {
        let name = &call.callee.name;
        let fn_ty = self
            .symbols
            .type_of(name)
            .unwrap_or_else(|| self.types.error_ty());
        let params: Vec<TypeId> = self.types.function_params(fn_ty).to_vec();

        let mut code = Vec::new();
        let mut addrs = Vec::with_capacity(call.args.len());
        for arg in &call.args {
            let value = self.emit_expr(arg);
            code.extend(value.code);
            addrs.push((value.addr, self.node_ty(arg.node)));
        }

        let mut final_addrs = Vec::with_capacity(addrs.len());
        for (i, (addr, arg_ty)) in addrs.into_iter().enumerate() {
            let formal = params.get(i).copied();
            if formal.is_some_and(|p| self.types.is_float_ty(p)) && self.types.is_integer_ty(arg_ty)
            {
                let temp = self.counters.new_temp();
                code.push(Instr::Float {
                    dst: temp.clone(),
                    src: addr,
                });
                final_addrs.push(temp);
            } else if self.types.is_array_ty(arg_ty) {
                // Arrays pass by reference.
                let temp = self.counters.new_temp();
                code.push(Instr::ALoad {
                    dst: temp.clone(),
                    name: addr,
                });
                final_addrs.push(temp);
            } else {
                final_addrs.push(addr);
            }
        }

        code.push(Instr::Push(None));
        for addr in final_addrs {
            code.push(Instr::Push(Some(addr)));
        }
        code.push(Instr::Call(name.clone()));
        for _ in &call.args {
            code.push(Instr::Pop(None));
        }
        let result = if want_result {
            let temp = self.counters.new_temp();
            code.push(Instr::Pop(Some(temp.clone())));
            Some(temp)
        } else {
            code.push(Instr::Pop(None));
            None
        };
        (code, result)
    }

    fn node_ty(&self, node: NodeIndex) -> TypeId {
        self.decorations
            .type_of(node)
            .unwrap_or_else(|| self.types.error_ty())
    }
}
