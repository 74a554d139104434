//! Argument validation against a command's declared signature.

use super::{CommandSpec, ConsoleError, ParamType};

/// Check supplied arguments against a command spec.
///
/// Every supplied argument is type-checked, so a failure lists all bad
/// positions rather than only the first.
pub fn validate(spec: &CommandSpec, args: &[String]) -> Result<(), ConsoleError> {
    validate_params(spec.params(), spec.requires_exact_arity(), args)
}

/// Check arguments against a bare parameter list and arity policy.
pub fn validate_params(
    params: &[ParamType],
    exact_arity: bool,
    args: &[String],
) -> Result<(), ConsoleError> {
    let expected = params.len();
    let supplied = args.len();

    if supplied == 0 && expected == 0 {
        return Ok(());
    }

    if (exact_arity && supplied != expected) || supplied > expected {
        return Err(ConsoleError::ArityMismatch { expected, supplied });
    }

    let positions: Vec<usize> = params
        .iter()
        .zip(args)
        .enumerate()
        .filter(|(_, (ty, arg))| !ty.accepts(arg))
        .map(|(i, _)| i + 1)
        .collect();

    if positions.is_empty() {
        Ok(())
    } else {
        Err(ConsoleError::TypeMismatch { positions })
    }
}
