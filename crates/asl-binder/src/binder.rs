//! The symbol pass: first walk over the tree.
//!
//! Builds the scope structure ($global$ plus one scope per function),
//! resolves declared types onto their type nodes, adds parameters and local
//! variables, and registers each function's type in the enclosing scope.
//! Redeclarations are diagnosed here; everything else is left to the
//! type-check pass.

use tracing::debug;

use asl_common::diagnostics::{
    Diagnostic, DiagnosticSink, diagnostic_codes, diagnostic_messages, format_message,
};
use asl_parser::ast::{BasicType, Function, Ident, Program, TypeNode, TypeNodeKind, VarDecl};
use asl_types::{TypeId, TypeRegistry};

use crate::decorations::Decorations;
use crate::symbol_table::SymbolTable;
use crate::GLOBAL_SCOPE_NAME;

pub struct Binder<'a> {
    types: &'a mut TypeRegistry,
    symbols: &'a mut SymbolTable,
    decorations: &'a mut Decorations,
    sink: &'a mut DiagnosticSink,
    file: &'a str,
}

impl<'a> Binder<'a> {
    pub fn new(
        types: &'a mut TypeRegistry,
        symbols: &'a mut SymbolTable,
        decorations: &'a mut Decorations,
        sink: &'a mut DiagnosticSink,
        file: &'a str,
    ) -> Self {
        Self {
            types,
            symbols,
            decorations,
            sink,
            file,
        }
    }

    pub fn run(&mut self, program: &Program) {
        let global = self.symbols.push_new_scope(GLOBAL_SCOPE_NAME);
        self.decorations.set_scope(program.node, global);
        for function in &program.functions {
            self.bind_function(function);
        }
        self.symbols.pop_scope();
    }

    fn bind_function(&mut self, function: &Function) {
        let name = &function.name.name;
        debug!(function = %name, "binding function");
        let scope = self.symbols.push_new_scope(name);
        self.decorations.set_scope(function.node, scope);

        let mut param_types = Vec::with_capacity(function.params.len());
        for param in &function.params {
            let ty = self.resolve_type(&param.ty);
            param_types.push(ty);
            self.symbols.add_parameter(&param.name.name, ty);
        }

        for decl in &function.decls {
            self.bind_var_decl(decl);
        }

        self.symbols.pop_scope();

        // The function itself is declared in the enclosing scope.
        if self.symbols.contains_in_current(name) {
            self.declared_ident(&function.name);
            return;
        }
        let ret = match &function.ret {
            Some(basic) => {
                let ty = self.basic_type(basic.kind);
                self.decorations.set_type(basic.node, ty);
                ty
            }
            None => self.types.void_ty(),
        };
        let fn_ty = self.types.function_ty(param_types, ret);
        self.symbols.add_function(name, fn_ty);
    }

    fn bind_var_decl(&mut self, decl: &VarDecl) {
        let ty = self.resolve_type(&decl.ty);
        for ident in &decl.names {
            if self.symbols.contains_in_current(&ident.name) {
                self.declared_ident(ident);
            } else {
                self.symbols.add_local_var(&ident.name, ty);
            }
        }
    }

    /// Resolve a declared type and decorate its node.
    fn resolve_type(&mut self, node: &TypeNode) -> TypeId {
        let ty = match &node.kind {
            TypeNodeKind::Basic(basic) => self.basic_type(*basic),
            TypeNodeKind::Array { size, elem } => {
                let elem = self.basic_type(*elem);
                self.types.array_ty(*size, elem)
            }
        };
        self.decorations.set_type(node.node, ty);
        ty
    }

    fn basic_type(&self, basic: BasicType) -> TypeId {
        match basic {
            BasicType::Int => self.types.integer_ty(),
            BasicType::Float => self.types.float_ty(),
            BasicType::Bool => self.types.boolean_ty(),
            BasicType::Char => self.types.character_ty(),
        }
    }

    fn declared_ident(&mut self, ident: &Ident) {
        self.sink.push(Diagnostic::error(
            self.file,
            ident.span,
            format_message(diagnostic_messages::DECLARED_IDENT, &[&ident.name]),
            diagnostic_codes::DECLARED_IDENT,
        ));
    }
}
