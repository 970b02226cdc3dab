//! Emitted subroutines and the whole three-address program.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::instruction::Instr;

/// A local variable slot: name plus size in words (1 for primitives, the
/// declared size for arrays).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Local {
    pub name: String,
    pub size: usize,
}

/// One emitted procedure or function.
///
/// Functions returning a value carry the synthetic `_result` parameter at
/// index 0 of `params`; actions omit it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subroutine {
    pub name: String,
    pub params: Vec<String>,
    pub locals: Vec<Local>,
    pub instructions: Vec<Instr>,
}

impl Subroutine {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn add_param(&mut self, name: impl Into<String>) {
        self.params.push(name.into());
    }

    pub fn add_local(&mut self, name: impl Into<String>, size: usize) {
        self.locals.push(Local {
            name: name.into(),
            size,
        });
    }
}

impl fmt::Display for Subroutine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "func {}", self.name)?;
        write!(f, "  params:")?;
        for param in &self.params {
            write!(f, " {param}")?;
        }
        writeln!(f)?;
        for local in &self.locals {
            writeln!(f, "  local {} {}", local.name, local.size)?;
        }
        for instr in &self.instructions {
            writeln!(f, "  {instr}")?;
        }
        write!(f, "endfunc")
    }
}

/// The emitted program: subroutines in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TacProgram {
    pub subroutines: Vec<Subroutine>,
}

impl TacProgram {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Subroutine> {
        self.subroutines.iter().find(|s| s.name == name)
    }
}

impl fmt::Display for TacProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, subroutine) in self.subroutines.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{subroutine}")?;
        }
        Ok(())
    }
}
