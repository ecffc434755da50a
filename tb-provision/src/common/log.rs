// Diagnostics raised while dispatching a provisioning response go through a Logger chosen by
// the caller at the call site, so that constrained targets can route them to a serial console
// and tests can capture them. LogFacade is the usual choice and forwards to the `log` crate,
// leaving the actual backend (env_logger, esp-idf logger...) to the application.
pub trait Logger {
    fn log(message: &str);
}

/// Forwards every message to the `log` facade at warn level
pub struct LogFacade;

impl Logger for LogFacade {
    fn log(message: &str) {
        ::log::warn!(target: "tb_provision", "{}", message);
    }
}
