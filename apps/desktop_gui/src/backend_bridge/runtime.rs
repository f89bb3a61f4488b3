//! Background worker that owns the tokio runtime and the notification
//! dispatcher. The UI never waits on it.

use std::thread;

use client_core::{ClientContext, DeliveryReport, NotificationDispatcher, Settings};
use crossbeam_channel::{Receiver, Sender};
use tokio::task::JoinHandle;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{DeliveryStatus, UiEvent};

pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    settings: Settings,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("notify-worker")
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build dispatch runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::BackendUnavailable(format!(
                    "failed to build dispatch runtime: {err}"
                )));
                return;
            }
        };

        runtime.block_on(async move {
            let dispatcher =
                match NotificationDispatcher::from_settings(&settings, ClientContext::detect()) {
                    Ok(dispatcher) => dispatcher,
                    Err(err) => {
                        tracing::error!("notifications disabled: {err:#}");
                        let _ = ui_tx.try_send(UiEvent::BackendUnavailable(format!("{err:#}")));
                        return;
                    }
                };
            let _ = ui_tx.try_send(UiEvent::BackendReady {
                channels: dispatcher.channel_names(),
            });

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Notify { response } => {
                        tracing::info!(answer = %response.answer(), "backend: notify");
                        forward_reports(dispatcher.dispatch_detached(&response), &ui_tx);
                    }
                }
            }
            tracing::debug!("command queue closed; dispatch worker exiting");
        });
    })
}

fn forward_reports(handles: Vec<JoinHandle<DeliveryReport>>, ui_tx: &Sender<UiEvent>) {
    for handle in handles {
        let ui_tx = ui_tx.clone();
        tokio::spawn(async move {
            match handle.await {
                Ok(report) => {
                    let status = match report.result {
                        Ok(()) => DeliveryStatus::Delivered,
                        Err(err) => DeliveryStatus::Failed(err.to_string()),
                    };
                    let _ = ui_tx.try_send(UiEvent::DeliveryReported {
                        channel: report.channel,
                        status,
                    });
                }
                Err(err) => tracing::error!("delivery task ended abnormally: {err}"),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use shared::domain::{Answer, Response};
    use std::time::Duration;

    fn quiet_settings() -> Settings {
        let mut settings = Settings::default();
        settings.issue.enabled = false;
        settings.email.enabled = false;
        settings
    }

    #[test]
    fn reports_ready_with_no_channels_wired() {
        let (cmd_tx, cmd_rx) = bounded(4);
        let (ui_tx, ui_rx) = bounded(4);
        let worker = launch(cmd_rx, ui_tx, quiet_settings());

        let event = ui_rx.recv_timeout(Duration::from_secs(5)).expect("ready event");
        assert_eq!(event, UiEvent::BackendReady { channels: vec![] });

        cmd_tx
            .send(BackendCommand::Notify {
                response: Response::now(Answer::Yes),
            })
            .expect("queue notify");
        drop(cmd_tx);
        worker.join().expect("worker exits once the queue closes");
        assert!(ui_rx.try_recv().is_err());
    }

    #[test]
    fn unreachable_channel_is_reported_as_failed() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);

        let mut settings = quiet_settings();
        settings.issue.enabled = true;
        settings.issue.url = format!("http://{addr}/issues");
        settings.dispatch_timeout_secs = 2;

        let (cmd_tx, cmd_rx) = bounded(4);
        let (ui_tx, ui_rx) = bounded(4);
        let _worker = launch(cmd_rx, ui_tx, settings);

        let ready = ui_rx.recv_timeout(Duration::from_secs(5)).expect("ready event");
        assert_eq!(ready, UiEvent::BackendReady { channels: vec!["issue"] });

        cmd_tx
            .send(BackendCommand::Notify {
                response: Response::now(Answer::No),
            })
            .expect("queue notify");

        match ui_rx.recv_timeout(Duration::from_secs(10)).expect("delivery report") {
            UiEvent::DeliveryReported {
                channel: "issue",
                status: DeliveryStatus::Failed(_),
            } => {}
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
