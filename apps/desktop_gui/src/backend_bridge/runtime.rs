//! Backend worker: owns the tokio runtime and both stores, executes queued
//! commands, and forwards every store change to the UI thread.

use std::{sync::Arc, thread, time::Duration};

use client_core::{
    handle_create, handle_delete, message_from_payload, AppStore, DeleteConfirmation,
    HttpIdentityClient, IdentityApi, UserStore,
};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

const UI_QUEUE_RETRY_DELAY: Duration = Duration::from_millis(16);

pub struct Stores {
    pub app: AppStore,
    pub users: UserStore,
}

impl Stores {
    pub fn new(api: Arc<dyn IdentityApi>) -> Self {
        Self {
            app: AppStore::new(api.clone()),
            users: UserStore::new(api),
        }
    }
}

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, api_base_url: String) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::unexpected(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(run(cmd_rx, ui_tx, api_base_url));
    });
}

async fn run(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, api_base_url: String) {
    let client = match HttpIdentityClient::new(&api_base_url) {
        Ok(client) => client,
        Err(err) => {
            error!(%api_base_url, "backend worker startup failure: {err}");
            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_client_error(
                UiErrorContext::BackendStartup,
                &err,
            )));
            return;
        }
    };
    info!(api_base_url = client.base_url(), "backend worker ready");
    let _ = ui_tx.try_send(UiEvent::Info(format!("Using backend {}", client.base_url())));

    let stores = Arc::new(Stores::new(Arc::new(client)));
    forward_changes(stores.users.subscribe(), ui_tx.clone(), UiEvent::UsersChanged);
    forward_changes(stores.app.subscribe(), ui_tx.clone(), UiEvent::AppChanged);

    while let Ok(cmd) = cmd_rx.recv() {
        spawn_command(stores.clone(), ui_tx.clone(), cmd);
    }
    info!("ui command channel closed; backend worker stopping");
}

/// Pushes an event to the UI, waiting out a full queue. Returns `false` once
/// the UI side is gone.
async fn deliver(ui_tx: &Sender<UiEvent>, mut event: UiEvent) -> bool {
    loop {
        match ui_tx.try_send(event) {
            Ok(()) => return true,
            Err(TrySendError::Full(returned)) => {
                event = returned;
                tokio::time::sleep(UI_QUEUE_RETRY_DELAY).await;
            }
            Err(TrySendError::Disconnected(_)) => return false,
        }
    }
}

fn forward_changes<T>(
    mut rx: watch::Receiver<T>,
    ui_tx: Sender<UiEvent>,
    wrap: fn(T) -> UiEvent,
) where
    T: Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let snapshot = rx.borrow_and_update().clone();
            if !deliver(&ui_tx, wrap(snapshot)).await {
                break;
            }
        }
    });
}

pub fn command_context(cmd: &BackendCommand) -> UiErrorContext {
    match cmd {
        BackendCommand::FetchRandomNumber | BackendCommand::ClearAppError => {
            UiErrorContext::RandomNumber
        }
        BackendCommand::FetchUsers | BackendCommand::ClearUserError => UiErrorContext::LoadUsers,
        BackendCommand::CreateUser { .. } => UiErrorContext::CreateUser,
        BackendCommand::DeleteUser { .. } => UiErrorContext::DeleteUser,
    }
}

/// Runs `cmd` on its own task so slow requests never block the queue.
/// Commands are not serialized; a double click issues two requests.
fn spawn_command(stores: Arc<Stores>, ui_tx: Sender<UiEvent>, cmd: BackendCommand) {
    let name = cmd.name();
    let context = command_context(&cmd);
    let task = tokio::spawn(execute(stores, ui_tx.clone(), cmd));

    tokio::spawn(async move {
        match task.await {
            Ok(()) => {}
            Err(err) if err.is_panic() => {
                let message = message_from_payload(&*err.into_panic());
                error!(command = name, %message, "backend command panicked");
                deliver(&ui_tx, UiEvent::Error(UiError::unexpected(context, message))).await;
            }
            Err(err) => warn!(command = name, "backend command aborted: {err}"),
        }
    });
}

pub async fn execute(stores: Arc<Stores>, ui_tx: Sender<UiEvent>, cmd: BackendCommand) {
    match cmd {
        BackendCommand::FetchRandomNumber => stores.app.fetch_random_number().await,
        BackendCommand::ClearAppError => stores.app.clear_error(),
        BackendCommand::FetchUsers => stores.users.fetch_users().await,
        BackendCommand::CreateUser { request } => {
            let outcome = handle_create(&stores.users, request).await;
            deliver(&ui_tx, UiEvent::UserCreateFinished(outcome)).await;
        }
        BackendCommand::DeleteUser { id, cancel } => {
            let outcome = handle_delete(
                &stores.users,
                id,
                DeleteConfirmation::Confirmed,
                Some(&cancel),
            )
            .await;
            deliver(&ui_tx, UiEvent::UserDeleteFinished { id, outcome }).await;
        }
        BackendCommand::ClearUserError => stores.users.clear_error(),
    }
}

#[cfg(test)]
mod tests {
    use client_core::ActionOutcome;
    use crossbeam_channel::bounded;
    use shared::domain::{CreateUserRequest, UserId};
    use tokio_util::sync::CancellationToken;

    use super::*;

    fn offline_stores() -> Arc<Stores> {
        // Never contacted: every case here settles before a request is sent.
        let client = HttpIdentityClient::new("http://127.0.0.1:9").expect("client");
        Arc::new(Stores::new(Arc::new(client)))
    }

    #[tokio::test]
    async fn delete_from_a_closed_page_reports_cancellation() {
        let (ui_tx, ui_rx) = bounded(8);
        let cancel = CancellationToken::new();
        cancel.cancel();

        execute(
            offline_stores(),
            ui_tx,
            BackendCommand::DeleteUser {
                id: UserId(3),
                cancel,
            },
        )
        .await;

        match ui_rx.try_recv().expect("event") {
            UiEvent::UserDeleteFinished { id, outcome } => {
                assert_eq!(id, UserId(3));
                assert_eq!(outcome, ActionOutcome::Cancelled);
            }
            _ => panic!("unexpected event"),
        }
    }

    #[tokio::test]
    async fn invalid_create_is_answered_without_network() {
        let (ui_tx, ui_rx) = bounded(8);

        execute(
            offline_stores(),
            ui_tx,
            BackendCommand::CreateUser {
                request: CreateUserRequest::trimmed("Ann", "not-an-email"),
            },
        )
        .await;

        match ui_rx.try_recv().expect("event") {
            UiEvent::UserCreateFinished(outcome) => assert_eq!(
                outcome,
                ActionOutcome::Failed("Please enter a valid email address".to_string())
            ),
            _ => panic!("unexpected event"),
        }
    }

    #[test]
    fn commands_map_to_error_contexts() {
        assert_eq!(
            command_context(&BackendCommand::FetchRandomNumber),
            UiErrorContext::RandomNumber
        );
        assert_eq!(
            command_context(&BackendCommand::FetchUsers),
            UiErrorContext::LoadUsers
        );
        assert_eq!(
            command_context(&BackendCommand::DeleteUser {
                id: UserId(1),
                cancel: CancellationToken::new(),
            }),
            UiErrorContext::DeleteUser
        );
    }
}
