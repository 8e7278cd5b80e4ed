//! Recursive-descent parser and expression tree.
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! expression := term (('+' | '-') term)*
//! term       := unary (('*' | '/' | '%') unary)*
//! unary      := ('+' | '-') unary | power
//! power      := primary ('**' unary)?
//! primary    := number | name | function '(' arguments ')' | '(' expression ')'
//! ```
//!
//! Power is right-associative and binds tighter than a unary minus on its
//! left, so `-x**2` is `-(x**2)` and `2**3**2` is `2**9`.
//!
//! Runs of `+ -` and `* / %` are stored flat ([`Node::Chain`]), so tree
//! height grows only with the nesting counted against [`MAX_DEPTH`], never
//! with the length of a sum or product.

use super::builtins::{self, Builtin};
use super::tokenizer::{Spanned, Token};
use crate::types::ExpressionError;

/// Deepest nesting of sub-expressions accepted by the parser.
pub const MAX_DEPTH: usize = 64;

/// Binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    /// Floored modulo; the result takes the sign of the divisor.
    Rem,
    Pow,
}

impl BinaryOp {
    #[inline]
    fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            BinaryOp::Add => a + b,
            BinaryOp::Sub => a - b,
            BinaryOp::Mul => a * b,
            BinaryOp::Div => a / b,
            BinaryOp::Rem => {
                let r = a % b;
                if r != 0.0 && (r < 0.0) != (b < 0.0) {
                    r + b
                } else {
                    r
                }
            }
            BinaryOp::Pow => a.powf(b),
        }
    }
}

/// Expression tree. Variables are resolved to argument indices and
/// constants to their values at parse time.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    Number(f64),
    Variable(usize),
    Negate(Box<Node>),
    /// Left-associative run `first op₁ operand₁ op₂ operand₂ …`.
    Chain {
        first: Box<Node>,
        rest: Vec<(BinaryOp, Node)>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Node>,
        rhs: Box<Node>,
    },
    Call {
        function: Builtin,
        args: Vec<Node>,
    },
}

impl Node {
    /// Evaluate with `args[i]` bound to variable `i`. Missing arguments read
    /// as NaN.
    pub fn eval(&self, args: &[f64]) -> f64 {
        match self {
            Node::Number(value) => *value,
            Node::Variable(index) => args.get(*index).copied().unwrap_or(f64::NAN),
            Node::Negate(inner) => -inner.eval(args),
            Node::Chain { first, rest } => rest
                .iter()
                .fold(first.eval(args), |acc, (op, operand)| op.apply(acc, operand.eval(args))),
            Node::Binary { op, lhs, rhs } => op.apply(lhs.eval(args), rhs.eval(args)),
            Node::Call { function, args: params } => {
                let mut values = [f64::NAN; 2];
                for (slot, param) in values.iter_mut().zip(params) {
                    *slot = param.eval(args);
                }
                function.apply(&values[..params.len().min(2)])
            }
        }
    }
}

/// Parse a token stream against the declared variable names.
pub(crate) fn parse(tokens: &[Spanned], variables: &[String]) -> Result<Node, ExpressionError> {
    let mut parser = Parser {
        tokens,
        pos: 0,
        variables,
        depth: 0,
    };
    let node = parser.expression()?;
    match parser.peek() {
        Some(extra) => Err(unexpected(extra)),
        None => Ok(node),
    }
}

fn unexpected(spanned: &Spanned) -> ExpressionError {
    ExpressionError::UnexpectedToken {
        token: spanned.token.to_string(),
        position: spanned.position,
    }
}

struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
    variables: &'a [String],
    depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Spanned> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Result<&'a Spanned, ExpressionError> {
        let spanned = self.tokens.get(self.pos).ok_or(ExpressionError::UnexpectedEnd)?;
        self.pos += 1;
        Ok(spanned)
    }

    /// Consume the next token if it equals `token`.
    fn eat(&mut self, token: &Token) -> bool {
        if self.peek().is_some_and(|s| &s.token == token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &Token) -> Result<(), ExpressionError> {
        let spanned = self.next()?;
        if &spanned.token == token {
            Ok(())
        } else {
            Err(unexpected(spanned))
        }
    }

    fn nested<R>(&mut self, f: impl FnOnce(&mut Self) -> Result<R, ExpressionError>) -> Result<R, ExpressionError> {
        if self.depth >= MAX_DEPTH {
            return Err(ExpressionError::NestingTooDeep { limit: MAX_DEPTH });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn binary_op(&self, ops: &[(Token, BinaryOp)]) -> Option<BinaryOp> {
        let current = &self.peek()?.token;
        ops.iter().find(|(t, _)| t == current).map(|&(_, op)| op)
    }

    /// `operand (op operand)*` for the operators in `ops`.
    fn chain(
        &mut self,
        ops: &[(Token, BinaryOp)],
        operand: fn(&mut Self) -> Result<Node, ExpressionError>,
    ) -> Result<Node, ExpressionError> {
        let first = operand(self)?;
        let mut rest = Vec::new();
        while let Some(op) = self.binary_op(ops) {
            self.pos += 1;
            rest.push((op, operand(self)?));
        }
        if rest.is_empty() {
            Ok(first)
        } else {
            Ok(Node::Chain {
                first: Box::new(first),
                rest,
            })
        }
    }

    fn expression(&mut self) -> Result<Node, ExpressionError> {
        const OPS: [(Token, BinaryOp); 2] = [(Token::Plus, BinaryOp::Add), (Token::Minus, BinaryOp::Sub)];
        self.chain(&OPS, Self::term)
    }

    fn term(&mut self) -> Result<Node, ExpressionError> {
        const OPS: [(Token, BinaryOp); 3] = [
            (Token::Star, BinaryOp::Mul),
            (Token::Slash, BinaryOp::Div),
            (Token::Percent, BinaryOp::Rem),
        ];
        self.chain(&OPS, Self::unary)
    }

    fn unary(&mut self) -> Result<Node, ExpressionError> {
        if self.eat(&Token::Minus) {
            let inner = self.nested(Self::unary)?;
            return Ok(Node::Negate(Box::new(inner)));
        }
        if self.eat(&Token::Plus) {
            return self.nested(Self::unary);
        }
        self.power()
    }

    fn power(&mut self) -> Result<Node, ExpressionError> {
        let base = self.primary()?;
        if self.eat(&Token::Power) {
            let exponent = self.nested(Self::unary)?;
            return Ok(Node::Binary {
                op: BinaryOp::Pow,
                lhs: Box::new(base),
                rhs: Box::new(exponent),
            });
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Node, ExpressionError> {
        let spanned = self.next()?;
        match &spanned.token {
            Token::Number(value) => Ok(Node::Number(*value)),
            Token::LParen => {
                let inner = self.nested(Self::expression)?;
                self.expect(&Token::RParen)?;
                Ok(inner)
            }
            Token::Ident(name) => self.name(name, spanned),
            _ => Err(unexpected(spanned)),
        }
    }

    fn name(&mut self, name: &str, spanned: &Spanned) -> Result<Node, ExpressionError> {
        if let Some(index) = self.variables.iter().position(|v| v == name) {
            return Ok(Node::Variable(index));
        }
        if let Some(value) = builtins::constant(name) {
            return Ok(Node::Number(value));
        }
        let function = Builtin::lookup(name).ok_or_else(|| ExpressionError::UnknownIdentifier(name.to_string()))?;
        if !self.eat(&Token::LParen) {
            return Err(unexpected(spanned));
        }

        let args = self.nested(Self::arguments)?;
        if !function.accepts(args.len()) {
            return Err(ExpressionError::ArityMismatch {
                name: function.name().to_string(),
                expected: function.arity_text(),
                got: args.len(),
            });
        }
        Ok(Node::Call { function, args })
    }

    /// Comma-separated arguments up to and including the closing parenthesis.
    fn arguments(&mut self) -> Result<Vec<Node>, ExpressionError> {
        let mut args = Vec::new();
        if self.eat(&Token::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.expression()?);
            if self.eat(&Token::Comma) {
                continue;
            }
            self.expect(&Token::RParen)?;
            return Ok(args);
        }
    }
}
