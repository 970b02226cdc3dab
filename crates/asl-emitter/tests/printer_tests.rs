//! Text form of instructions, subroutines and whole programs.

use asl_emitter::{Instr, Local, Subroutine, TacProgram};

#[test]
fn nullary_push_and_pop_print_bare() {
    assert_eq!(Instr::Push(None).to_string(), "PUSH");
    assert_eq!(Instr::Pop(None).to_string(), "POP");
    assert_eq!(Instr::Push(Some("%t0".into())).to_string(), "PUSH %t0");
    assert_eq!(Instr::Pop(Some("%t1".into())).to_string(), "POP %t1");
}

#[test]
fn three_operand_instructions() {
    let add = Instr::Add {
        dst: "%t2".into(),
        lhs: "a".into(),
        rhs: "%t1".into(),
    };
    assert_eq!(add.to_string(), "ADD %t2, a, %t1");
    let loadx = Instr::LoadX {
        dst: "%t0".into(),
        base: "v".into(),
        offset: "%t1".into(),
    };
    assert_eq!(loadx.to_string(), "LOADX %t0, v, %t1");
    let xload = Instr::XLoad {
        base: "v".into(),
        offset: "%t1".into(),
        src: "%t2".into(),
    };
    assert_eq!(xload.to_string(), "XLOAD v, %t1, %t2");
}

#[test]
fn control_flow_instructions() {
    assert_eq!(Instr::Label("while1".into()).to_string(), "LABEL while1");
    assert_eq!(Instr::UJump("while1".into()).to_string(), "UJUMP while1");
    assert_eq!(
        Instr::FJump {
            cond: "%t0".into(),
            label: "endif1".into()
        }
        .to_string(),
        "FJUMP %t0, endif1"
    );
    assert_eq!(Instr::Return.to_string(), "RETURN");
    assert_eq!(Instr::WriteLn.to_string(), "WRITELN");
}

#[test]
fn subroutine_header_lists_params_and_locals() {
    let subroutine = Subroutine {
        name: "f".into(),
        params: vec!["_result".into(), "a".into()],
        locals: vec![Local {
            name: "v".into(),
            size: 3,
        }],
        instructions: vec![Instr::Return],
    };
    assert_eq!(
        subroutine.to_string(),
        "func f\n  params: _result a\n  local v 3\n  RETURN\nendfunc"
    );
}

#[test]
fn program_prints_subroutines_in_order_with_blank_lines() {
    let mut program = TacProgram::default();
    let mut a = Subroutine::new("a");
    a.instructions.push(Instr::Return);
    let mut main = Subroutine::new("main");
    main.instructions.push(Instr::Return);
    program.subroutines.push(a);
    program.subroutines.push(main);
    assert_eq!(
        program.to_string(),
        "func a\n  params:\n  RETURN\nendfunc\n\nfunc main\n  params:\n  RETURN\nendfunc\n"
    );
}

#[test]
fn lookup_by_name() {
    let mut program = TacProgram::default();
    program.subroutines.push(Subroutine::new("main"));
    assert!(program.get("main").is_some());
    assert!(program.get("other").is_none());
}

#[test]
fn instructions_round_trip_through_json() {
    let instr = Instr::FJump {
        cond: "%t0".into(),
        label: "endif1".into(),
    };
    let json = serde_json::to_string(&instr).unwrap();
    let back: Instr = serde_json::from_str(&json).unwrap();
    assert_eq!(instr, back);
}
