/*!
 * Program Parser
 * Line-oriented program text to instruction streams
 */

use super::{BinOp, Instruction, Operand, Program};
use crate::core::errors::ProgramError;

/// Parse a whole program
///
/// One instruction per line, tokens separated by whitespace. `#` starts a
/// comment; blank lines are skipped.
pub fn parse_program(name: &str, source: &str) -> Result<Program, ProgramError> {
    let mut instructions = Vec::new();

    for (index, raw) in source.lines().enumerate() {
        let line = match raw.find('#') {
            Some(pos) => &raw[..pos],
            None => raw,
        };
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }

        let instruction = parse_line(&tokens).map_err(|message| ProgramError::Syntax {
            file: name.to_string(),
            line: index + 1,
            message,
        })?;
        instructions.push(instruction);
    }

    Ok(Program::new(name, instructions))
}

fn parse_line(tokens: &[&str]) -> Result<Instruction, String> {
    match tokens {
        ["idle"] => Ok(Instruction::Idle),
        ["print", value] => Ok(Instruction::Print(parse_operand(value)?)),
        ["read", file, token, target] => {
            let token = token
                .parse::<usize>()
                .map_err(|_| format!("token index '{}' is not a non-negative integer", token))?;
            Ok(Instruction::Read {
                file: file.to_string(),
                token,
                target: parse_identifier(target)?,
            })
        }
        [target, "=", value] => Ok(Instruction::Assign {
            target: parse_identifier(target)?,
            value: parse_operand(value)?,
        }),
        [target, "=", lhs, op, rhs] => {
            let op = BinOp::from_symbol(op).ok_or_else(|| format!("unknown operator '{}'", op))?;
            Ok(Instruction::Compute {
                target: parse_identifier(target)?,
                lhs: parse_operand(lhs)?,
                op,
                rhs: parse_operand(rhs)?,
            })
        }
        _ => Err(format!("unrecognised instruction '{}'", tokens.join(" "))),
    }
}

fn parse_operand(token: &str) -> Result<Operand, String> {
    if let Ok(value) = token.parse::<f64>() {
        return Ok(Operand::Literal(value));
    }
    parse_identifier(token).map(Operand::Variable)
}

fn parse_identifier(token: &str) -> Result<String, String> {
    let mut chars = token.chars();
    let valid = chars
        .next()
        .map(|c| c.is_ascii_alphabetic() || c == '_')
        .unwrap_or(false)
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid {
        Ok(token.to_string())
    } else {
        Err(format!("'{}' is not a valid variable name", token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_all_forms() {
        let program = parse_program(
            "demo.code",
            "# demo\nx = 1\ny = x * 2.5\n\nprint y   # trailing comment\nread data.txt 3 z\nidle\n",
        )
        .unwrap();

        assert_eq!(
            program.instructions(),
            &[
                Instruction::Assign {
                    target: "x".into(),
                    value: Operand::Literal(1.0),
                },
                Instruction::Compute {
                    target: "y".into(),
                    lhs: Operand::Variable("x".into()),
                    op: BinOp::Mul,
                    rhs: Operand::Literal(2.5),
                },
                Instruction::Print(Operand::Variable("y".into())),
                Instruction::Read {
                    file: "data.txt".into(),
                    token: 3,
                    target: "z".into(),
                },
                Instruction::Idle,
            ]
        );
        assert_eq!(program.name(), "demo.code");
    }

    #[test]
    fn test_syntax_error_reports_line() {
        let err = parse_program("bad.code", "x = 1\nx = 1 % 2\n").unwrap_err();
        assert_eq!(
            err,
            ProgramError::Syntax {
                file: "bad.code".into(),
                line: 2,
                message: "unknown operator '%'".into(),
            }
        );
    }

    #[test]
    fn test_rejects_bad_identifiers_and_indices() {
        assert!(parse_program("p", "1x = 2").is_err());
        assert!(parse_program("p", "read f -1 x").is_err());
        assert!(parse_program("p", "jump 4").is_err());
    }
}
