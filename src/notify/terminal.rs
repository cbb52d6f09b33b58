//! Terminal implementations of the local capabilities.

use async_trait::async_trait;
use log::debug;
use std::io::Write;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use super::{Alerter, LocalNotifier, NotifyError, Permission, TonePlayer};
use crate::entities::Tone;

const BEL: &[u8] = b"\x07";

/// Rings the terminal bell following a tone's beep pattern.
#[derive(Debug, Default)]
pub struct TerminalBell;

#[async_trait]
impl TonePlayer for TerminalBell {
    async fn play(&self, tone: Tone) {
        debug!("Playing tone {}", tone);
        let mut elapsed = 0u64;
        for &onset in tone.beep_pattern() {
            if onset > elapsed {
                tokio::time::sleep(Duration::from_millis(onset - elapsed)).await;
                elapsed = onset;
            }
            let mut stdout = std::io::stdout();
            let _ = stdout.write_all(BEL);
            let _ = stdout.flush();
        }
    }
}

/// Prints notifications as a framed block on stdout.
///
/// Permission starts undecided and is granted on request when enabled.
#[derive(Debug)]
pub struct TerminalNotifier {
    enabled: bool,
    permission: AtomicU8,
}

impl TerminalNotifier {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            permission: AtomicU8::new(encode(Permission::Default)),
        }
    }
}

impl LocalNotifier for TerminalNotifier {
    fn permission(&self) -> Permission {
        decode(self.permission.load(Ordering::SeqCst))
    }

    fn request_permission(&self) -> Permission {
        let current = self.permission();
        if current != Permission::Default {
            return current;
        }
        let decided = if self.enabled {
            Permission::Granted
        } else {
            Permission::Denied
        };
        self.permission.store(encode(decided), Ordering::SeqCst);
        decided
    }

    fn show(&self, title: &str, body: &str) -> Result<(), NotifyError> {
        if self.permission() != Permission::Granted {
            return Err(NotifyError::PermissionDenied);
        }
        let mut stdout = std::io::stdout();
        writeln!(stdout, "\n┌ {}\n└ {}", title, body).map_err(|e| NotifyError::Request(e.to_string()))?;
        stdout.flush().map_err(|e| NotifyError::Request(e.to_string()))
    }
}

/// Plain line on stdout.
#[derive(Debug, Default)]
pub struct StdoutAlerter;

impl Alerter for StdoutAlerter {
    fn alert(&self, message: &str) {
        println!("\n{}", message);
    }
}

fn encode(permission: Permission) -> u8 {
    match permission {
        Permission::Default => 0,
        Permission::Granted => 1,
        Permission::Denied => 2,
    }
}

fn decode(raw: u8) -> Permission {
    match raw {
        1 => Permission::Granted,
        2 => Permission::Denied,
        _ => Permission::Default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_notifier_is_denied_on_request() {
        let notifier = TerminalNotifier::new(false);
        assert_eq!(notifier.permission(), Permission::Default);
        assert_eq!(notifier.request_permission(), Permission::Denied);
        assert_eq!(notifier.show("t", "b"), Err(NotifyError::PermissionDenied));
    }

    #[test]
    fn test_enabled_notifier_is_granted_on_request() {
        let notifier = TerminalNotifier::new(true);
        assert_eq!(notifier.request_permission(), Permission::Granted);
        assert_eq!(notifier.permission(), Permission::Granted);
    }
}
