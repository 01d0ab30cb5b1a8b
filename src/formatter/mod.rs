//! Canonical pretty-printer for EasyLang programs.
//!
//! The printed form uses explicit `.` terminators and two-space indentation,
//! and re-parses to an AST identical to the one it was printed from. Number
//! literals are emitted as plain decimal digits so the lexer reads them back
//! as a single token; comparisons and `and` are emitted without parentheses
//! because the grammar only admits them outside of `( ... )`.

use std::fmt::Write;

use crate::ast::{Ast, Block, Expression, Statement};

pub fn format_ast(ast: &Ast) -> String {
    let mut out = String::new();

    for statement in ast.nodes() {
        format_statement(statement, 0, &mut out);
    }

    out
}

fn indent(level: usize, out: &mut String) {
    for _ in 0..level {
        out.push_str("  ");
    }
}

fn format_block(block: &Block, level: usize, out: &mut String) {
    for statement in &block.statements {
        format_statement(statement, level, out);
    }
}

fn format_statement(statement: &Statement, level: usize, out: &mut String) {
    indent(level, out);

    match statement {
        Statement::Assignment(assignment) => {
            let _ = write!(out, "set {} to ", assignment.name);
            format_expression(&assignment.value, out);
            out.push_str(".\n");
        }
        Statement::Print(print) => {
            out.push_str("print ");
            format_expression(&print.value, out);
            out.push_str(".\n");
        }
        Statement::Read(read) => {
            let _ = writeln!(out, "read {}.", read.name);
        }
        Statement::If(if_statement) => {
            out.push_str("if ");
            format_condition(&if_statement.condition, out);
            out.push_str(" then\n");
            format_block(&if_statement.then_block, level + 1, out);
            if let Some(else_block) = &if_statement.else_block {
                indent(level, out);
                out.push_str("else\n");
                format_block(else_block, level + 1, out);
            }
            indent(level, out);
            out.push_str("end.\n");
        }
        Statement::WhileLoop(while_loop) => {
            out.push_str("while ");
            format_condition(&while_loop.condition, out);
            out.push_str(" do\n");
            format_block(&while_loop.block, level + 1, out);
            indent(level, out);
            out.push_str("end.\n");
        }
        Statement::FnDef(fn_def) => {
            let _ = write!(out, "function {}({})", fn_def.name, fn_def.params.join(", "));
            out.push_str(" {\n");
            format_block(&fn_def.block, level + 1, out);
            indent(level, out);
            out.push_str("}\n");
        }
        Statement::Return(return_statement) => {
            out.push_str("return");
            if let Some(value) = &return_statement.value {
                out.push(' ');
                format_expression(value, out);
            }
            out.push_str(".\n");
        }
    }
}

/// Conditions admit comparisons and `and`; both are printed without
/// parentheses. Operands fall through to plain expression formatting.
fn format_condition(expression: &Expression, out: &mut String) {
    match expression {
        Expression::Binary(binary) if !binary.verb.is_arithmetic() => {
            format_condition(&binary.lhs, out);
            let _ = write!(out, " {} ", binary.verb);
            format_condition(&binary.rhs, out);
        }
        _ => format_expression(expression, out),
    }
}

fn format_expression(expression: &Expression, out: &mut String) {
    match expression {
        Expression::Number(number) => {
            let _ = write!(out, "{number}");
        }
        Expression::Str(string) => {
            let _ = write!(out, "\"{string}\"");
        }
        Expression::Var(name) => out.push_str(name),
        Expression::Call(call) => {
            out.push_str(&call.name);
            out.push('(');
            for (index, arg) in call.args.iter().enumerate() {
                if index > 0 {
                    out.push_str(", ");
                }
                format_expression(arg, out);
            }
            out.push(')');
        }
        Expression::Binary(binary) if binary.verb.is_arithmetic() => {
            out.push('(');
            format_expression(&binary.lhs, out);
            let _ = write!(out, " {} ", binary.verb);
            format_expression(&binary.rhs, out);
            out.push(')');
        }
        Expression::Binary(binary) => format_condition(&Expression::Binary(binary.clone()), out),
    }
}
