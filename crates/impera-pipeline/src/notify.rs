/// User-facing feedback seam. The web client renders toasts and confetti;
/// here the surface is a trait so sessions stay testable and the CLI can
/// log instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

pub trait Notifier: Send + Sync {
    fn toast(&self, level: ToastLevel, message: &str);

    /// Cosmetic side effect fired when a lead lands on the won stage.
    fn celebrate(&self);
}

/// Routes feedback through `tracing`. Celebrations can be switched off
/// (config `celebrations = false`) without losing toasts.
pub struct TracingNotifier {
    celebrations: bool,
}

impl TracingNotifier {
    pub fn new(celebrations: bool) -> Self {
        Self { celebrations }
    }
}

impl Default for TracingNotifier {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Notifier for TracingNotifier {
    fn toast(&self, level: ToastLevel, message: &str) {
        match level {
            ToastLevel::Info => tracing::info!(target: "impera::toast", "{}", message),
            ToastLevel::Success => tracing::info!(target: "impera::toast", "{}", message),
            ToastLevel::Error => tracing::warn!(target: "impera::toast", "{}", message),
        }
    }

    fn celebrate(&self) {
        if self.celebrations {
            tracing::info!(target: "impera::toast", "lead fechado 🎉");
        }
    }
}
