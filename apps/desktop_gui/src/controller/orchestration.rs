//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status =
                "Backend command processor disconnected (possible startup/runtime failure); restart the app"
                    .to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::bounded;

    use super::*;

    #[test]
    fn reports_full_queue_in_status() {
        let (tx, _rx) = bounded(1);
        let mut status = String::new();
        dispatch_backend_command(&tx, BackendCommand::FetchUsers, &mut status);
        assert!(status.is_empty());

        dispatch_backend_command(&tx, BackendCommand::FetchUsers, &mut status);
        assert_eq!(status, "UI command queue is full; please retry");
    }

    #[test]
    fn reports_disconnected_backend_in_status() {
        let (tx, rx) = bounded(4);
        drop(rx);
        let mut status = String::new();
        dispatch_backend_command(&tx, BackendCommand::ClearUserError, &mut status);
        assert!(status.starts_with("Backend command processor disconnected"));
    }
}
