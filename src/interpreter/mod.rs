//! Tree-walking evaluator for EasyLang.
//!
//! The interpreter executes the AST directly against a scope stack and a
//! function table. Statement evaluation yields a [`Flow`]: either a normal
//! value or a returning value that unwinds to the nearest call frame.

mod functions;
mod scope;
mod value;

pub use functions::*;
pub use scope::*;
pub use value::*;

use std::{
    error::Error,
    fmt::Display,
    io::Write,
};

use log::trace;

use crate::{
    ast::{Assignment, Ast, BinaryExpr, BinaryVerb, Expression, FnCall, If, Statement, WhileLoop},
    io::LineReader,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeError {
    pub message: String,
}

impl Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error: {}", self.message)
    }
}

impl Error for RuntimeError {}

pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Result of running a statement. `Return` unwinds enclosing statements up
/// to the nearest function call (or the end of the program at top level).
#[derive(Debug, Clone, PartialEq)]
enum Flow {
    Normal(Value),
    Return(Value),
}

pub struct Interpreter<R, W> {
    ast: Ast,
    scope: Scope,
    functions: FunctionTable,
    reader: R,
    writer: W,
}

impl<R, W> Interpreter<R, W>
where
    R: LineReader,
    W: Write,
{
    pub fn from_ast(ast: Ast, reader: R, writer: W) -> Self {
        Self {
            ast,
            scope: Scope::new(),
            functions: FunctionTable::default(),
            reader,
            writer,
        }
    }

    /// Execute the program. A top-level `return` stops execution normally.
    pub fn run(mut self) -> RuntimeResult<()> {
        let nodes = self.ast.nodes().to_vec();
        self.eval_statements(&nodes)?;

        Ok(())
    }

    /// Evaluate statements in order, stopping on a returning flow. The value
    /// is the last executed statement's value.
    fn eval_statements(&mut self, statements: &[Statement]) -> RuntimeResult<Flow> {
        let mut result = Value::None;

        for statement in statements {
            match self.eval_statement(statement)? {
                Flow::Normal(value) => result = value,
                returning => return Ok(returning),
            }
        }

        Ok(Flow::Normal(result))
    }

    fn eval_statement(&mut self, statement: &Statement) -> RuntimeResult<Flow> {
        match statement {
            Statement::Assignment(assignment) => self.eval_assignment(assignment),
            Statement::Print(print) => {
                let value = self.eval_expression(&print.value)?;
                self.print_value(&value)?;
                Ok(Flow::Normal(Value::None))
            }
            Statement::Read(read) => self.eval_read(&read.name),
            Statement::If(if_statement) => self.eval_if(if_statement),
            Statement::WhileLoop(while_loop) => self.eval_while(while_loop),
            Statement::FnDef(fn_def) => {
                self.functions
                    .define(&fn_def.name, &fn_def.params, &fn_def.block)?;
                Ok(Flow::Normal(Value::None))
            }
            Statement::Return(return_statement) => {
                let value = match &return_statement.value {
                    Some(expression) => self.eval_expression(expression)?,
                    None => Value::Number(0.0),
                };
                Ok(Flow::Return(value))
            }
        }
    }

    fn eval_assignment(&mut self, assignment: &Assignment) -> RuntimeResult<Flow> {
        let value = self.eval_expression(&assignment.value)?;
        self.scope.assign(&assignment.name, value.clone());

        Ok(Flow::Normal(value))
    }

    fn print_value(&mut self, value: &Value) -> RuntimeResult<()> {
        // a None value prints nothing, not even the newline
        if let Value::None = value {
            return Ok(());
        }

        writeln!(self.writer, "{value}").map_err(|err| RuntimeError {
            message: format!("failed to write output: {err}"),
        })
    }

    fn eval_read(&mut self, name: &str) -> RuntimeResult<Flow> {
        let line = self
            .reader
            .read_line()
            .map_err(|err| RuntimeError {
                message: format!("Input error: {err}"),
            })?
            .ok_or_else(|| RuntimeError {
                message: "Input error".to_owned(),
            })?;

        let line = line.trim_end_matches('\n').trim_end_matches('\r');

        // a line that parses entirely as a number is stored numerically
        let value = match line.trim().parse::<f64>() {
            Ok(number) => Value::Number(number),
            Err(_) => Value::Str(line.to_owned()),
        };

        self.scope.assign(name, value.clone());

        Ok(Flow::Normal(value))
    }

    fn eval_condition(&mut self, condition: &Expression) -> RuntimeResult<f64> {
        let Value::Number(condition) = self.eval_expression(condition)? else {
            return Err(RuntimeError {
                message: "Condition must be numeric".to_owned(),
            });
        };

        Ok(condition)
    }

    fn eval_if(&mut self, if_statement: &If) -> RuntimeResult<Flow> {
        if self.eval_condition(&if_statement.condition)? != 0.0 {
            self.eval_statements(&if_statement.then_block.statements)
        } else if let Some(else_block) = &if_statement.else_block {
            self.eval_statements(&else_block.statements)
        } else {
            Ok(Flow::Normal(Value::None))
        }
    }

    fn eval_while(&mut self, while_loop: &WhileLoop) -> RuntimeResult<Flow> {
        let mut result = Value::None;

        while self.eval_condition(&while_loop.condition)? != 0.0 {
            match self.eval_statements(&while_loop.block.statements)? {
                Flow::Normal(value) => result = value,
                returning => return Ok(returning),
            }
        }

        Ok(Flow::Normal(result))
    }

    fn eval_expression(&mut self, expression: &Expression) -> RuntimeResult<Value> {
        match expression {
            Expression::Number(number) => Ok(Value::Number(*number)),
            Expression::Str(string) => Ok(Value::Str(string.clone())),
            Expression::Var(name) => self.scope.find(name).ok_or_else(|| RuntimeError {
                message: format!("Undefined variable {name}"),
            }),
            Expression::Binary(binary) => self.eval_binary(binary),
            Expression::Call(call) => self.eval_call(call),
        }
    }

    fn eval_call(&mut self, call: &FnCall) -> RuntimeResult<Value> {
        let Some(function) = self.functions.find(&call.name) else {
            return Err(RuntimeError {
                message: format!("Undefined function {}", call.name),
            });
        };

        if function.params.len() != call.args.len() {
            return Err(RuntimeError {
                message: format!(
                    "Function {} expects {} arguments, got {}",
                    call.name,
                    function.params.len(),
                    call.args.len()
                ),
            });
        }

        trace!("calling function '{}'", call.name);

        // Arguments resolve against the caller's bindings, so they must be
        // evaluated before the callee frame is pushed.
        let mut arguments = Vec::with_capacity(call.args.len());
        for arg in &call.args {
            arguments.push(self.eval_expression(arg)?);
        }

        self.scope.push();
        for (param, value) in function.params.iter().zip(arguments) {
            self.scope.assign(param, value);
        }

        let flow = self.eval_statements(&function.body.statements);
        self.scope.pop();

        // without an explicit return, a call yields the body's last value
        match flow? {
            Flow::Return(value) | Flow::Normal(value) => Ok(value),
        }
    }

    fn eval_binary(&mut self, binary: &BinaryExpr) -> RuntimeResult<Value> {
        let lhs = self.eval_expression(&binary.lhs)?;
        let rhs = self.eval_expression(&binary.rhs)?;

        // `+` concatenates as soon as either side is a string
        if binary.verb == BinaryVerb::Plus
            && (matches!(lhs, Value::Str(_)) || matches!(rhs, Value::Str(_)))
            && !matches!(lhs, Value::None)
            && !matches!(rhs, Value::None)
        {
            return Ok(Value::Str(format!("{lhs}{rhs}")));
        }

        let (Value::Number(left), Value::Number(right)) = (&lhs, &rhs) else {
            return Err(RuntimeError {
                message: "Numeric operation on non-numeric types".to_owned(),
            });
        };
        let (left, right) = (*left, *right);

        let truth = |condition: bool| Value::Number(if condition { 1.0 } else { 0.0 });

        let result = match binary.verb {
            BinaryVerb::Plus => Value::Number(left + right),
            BinaryVerb::Minus => Value::Number(left - right),
            BinaryVerb::Times => Value::Number(left * right),
            BinaryVerb::Divide => {
                if right == 0.0 {
                    return Err(RuntimeError {
                        message: "Division by zero".to_owned(),
                    });
                }
                Value::Number(left / right)
            }
            BinaryVerb::Modulo => Value::Number(left % right),
            BinaryVerb::Equal => truth(left == right),
            BinaryVerb::NotEqual => truth(left != right),
            BinaryVerb::GreaterThan => truth(left > right),
            BinaryVerb::LessThan => truth(left < right),
            BinaryVerb::GreaterOrEqual => truth(left >= right),
            BinaryVerb::LessOrEqual => truth(left <= right),
            BinaryVerb::And => truth(left != 0.0 && right != 0.0),
        };

        Ok(result)
    }
}
