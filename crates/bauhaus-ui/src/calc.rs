//! Tiny arithmetic evaluator for keyboard entry on sliders.
//!
//! Grammar: `+ - * / ^ ( )`, unary minus, `x` (the slider's current
//! display value), a postfix `%` meaning "divided by 100", and numbers
//! with either `.` or `,` as the decimal separator. Whitespace is
//! ignored. Anything else is an error and the caller discards the input.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CalcError {
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("expected ')'")]
    UnbalancedParen,
    #[error("malformed number '{0}'")]
    BadNumber(String),
    #[error("trailing input after expression")]
    TrailingInput,
}

/// Evaluate `input` with `x` bound to the current display value.
/// Non-finite results are reported as errors so callers never see them.
pub fn eval(input: &str, x: f64) -> Result<f64, CalcError> {
    let mut p = Parser { chars: input.chars().collect(), at: 0, x };
    p.skip_ws();
    if p.peek().is_none() {
        return Err(CalcError::UnexpectedEnd);
    }
    let value = p.expr()?;
    p.skip_ws();
    if p.peek().is_some() {
        return Err(CalcError::TrailingInput);
    }
    if !value.is_finite() {
        return Err(CalcError::BadNumber(input.to_string()));
    }
    Ok(value)
}

struct Parser {
    chars: Vec<char>,
    at: usize,
    x: f64,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.at).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.at += 1;
        }
        c
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.at += 1;
        }
    }

    fn eat(&mut self, want: char) -> bool {
        self.skip_ws();
        if self.peek() == Some(want) {
            self.at += 1;
            true
        } else {
            false
        }
    }

    fn expr(&mut self) -> Result<f64, CalcError> {
        let mut acc = self.term()?;
        loop {
            if self.eat('+') {
                acc += self.term()?;
            } else if self.eat('-') {
                acc -= self.term()?;
            } else {
                return Ok(acc);
            }
        }
    }

    fn term(&mut self) -> Result<f64, CalcError> {
        let mut acc = self.power()?;
        loop {
            if self.eat('*') {
                acc *= self.power()?;
            } else if self.eat('/') {
                acc /= self.power()?;
            } else {
                return Ok(acc);
            }
        }
    }

    // right-associative
    fn power(&mut self) -> Result<f64, CalcError> {
        let base = self.unary()?;
        if self.eat('^') {
            let exp = self.power()?;
            Ok(base.powf(exp))
        } else {
            Ok(base)
        }
    }

    fn unary(&mut self) -> Result<f64, CalcError> {
        if self.eat('-') {
            Ok(-self.unary()?)
        } else {
            self.primary()
        }
    }

    fn primary(&mut self) -> Result<f64, CalcError> {
        self.skip_ws();
        let value = match self.peek() {
            Some('(') => {
                self.bump();
                let inner = self.expr()?;
                if !self.eat(')') {
                    return Err(CalcError::UnbalancedParen);
                }
                inner
            }
            Some('x') | Some('X') => {
                self.bump();
                self.x
            }
            Some(c) if c.is_ascii_digit() || c == '.' || c == ',' => self.number()?,
            Some(c) => return Err(CalcError::UnexpectedChar(c)),
            None => return Err(CalcError::UnexpectedEnd),
        };
        // postfix percent binds tighter than any operator
        if self.eat('%') { Ok(value / 100.0) } else { Ok(value) }
    }

    fn number(&mut self) -> Result<f64, CalcError> {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            match c {
                '0'..='9' => text.push(c),
                // decimal comma is accepted for locales that type it
                '.' | ',' => text.push('.'),
                _ => break,
            }
            self.at += 1;
        }
        text.parse::<f64>().map_err(|_| CalcError::BadNumber(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(input: &str, x: f64) -> f64 {
        eval(input, x).unwrap()
    }

    #[test]
    fn arithmetic() {
        assert_eq!(ok("1+2*3", 0.0), 7.0);
        assert_eq!(ok("(1+2)*3", 0.0), 9.0);
        assert_eq!(ok("2^3^2", 0.0), 512.0); // right-assoc
        assert_eq!(ok("-4/2", 0.0), -2.0);
        assert_eq!(ok(" 1 + 1 ", 0.0), 2.0);
    }

    #[test]
    fn display_value_substitution() {
        assert_eq!(ok("x*2", 50.0), 100.0);
        assert_eq!(ok("X+10", 50.0), 60.0);
    }

    #[test]
    fn percent_and_comma() {
        assert_eq!(ok("50%", 0.0), 0.5);
        assert_eq!(ok("x*10%", 50.0), 5.0);
        assert_eq!(ok("0,5", 0.0), 0.5);
    }

    #[test]
    fn rejects_garbage() {
        assert!(eval("", 0.0).is_err());
        assert!(eval("1+", 0.0).is_err());
        assert!(eval("(1", 0.0).is_err());
        assert!(eval("abc", 0.0).is_err());
        assert!(eval("1 2", 0.0).is_err());
    }

    #[test]
    fn rejects_non_finite() {
        assert!(eval("1/0", 0.0).is_err());
    }
}
