//! The execution safety gate.

use crate::error::ExecError;

/// Environment variable that must be `true` for any code to run.
pub const ALLOW_EXECUTION_VAR: &str = "ALLOW_EXECUTION";

/// Refuse to execute unless the environment opts in.
///
/// Evaluating predictions means running untrusted machine-generated
/// programs; the gate prevents doing that by accident on a trusted machine.
pub fn ensure_execution_allowed() -> Result<(), ExecError> {
    match std::env::var(ALLOW_EXECUTION_VAR) {
        Ok(value) if value == "true" => Ok(()),
        _ => Err(ExecError::SafetyGate),
    }
}

/// Serializes every test that touches `ALLOW_EXECUTION`; the variable is
/// process-global and the test harness is multi-threaded.
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
pub(crate) fn env_guard() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_blocks_by_default() {
        let _guard = env_guard();
        std::env::remove_var(ALLOW_EXECUTION_VAR);
        assert!(matches!(
            ensure_execution_allowed(),
            Err(ExecError::SafetyGate)
        ));
    }

    #[test]
    fn gate_requires_exactly_true() {
        let _guard = env_guard();
        std::env::set_var(ALLOW_EXECUTION_VAR, "1");
        assert!(ensure_execution_allowed().is_err());
        std::env::set_var(ALLOW_EXECUTION_VAR, "true");
        assert!(ensure_execution_allowed().is_ok());
        std::env::remove_var(ALLOW_EXECUTION_VAR);
    }
}
