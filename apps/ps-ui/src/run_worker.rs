use std::sync::mpsc::{Receiver, channel};
use std::thread::{self, JoinHandle};

use ps_app::{AppResult, CancelToken, EstimateReport, RunProgressEvent, RunRequest, SleepPacer};

pub struct RunWorker {
    pub progress_rx: Receiver<WorkerMessage>,
    _handle: JoinHandle<()>,
}

#[derive(Debug)]
pub enum WorkerMessage {
    Progress(RunProgressEvent),
    Finished(AppResult<EstimateReport>),
}

impl RunWorker {
    pub fn start(request: RunRequest, cancel: CancelToken, ctx: egui::Context) -> Self {
        let (tx, rx) = channel();

        let handle = thread::spawn(move || {
            let progress_tx = tx.clone();
            let progress_ctx = ctx.clone();
            let outcome = ps_app::execute_with_progress(
                &request,
                &mut SleepPacer,
                &cancel,
                Some(&mut |event: RunProgressEvent| {
                    let _ = progress_tx.send(WorkerMessage::Progress(event));
                    progress_ctx.request_repaint();
                }),
            );
            let _ = tx.send(WorkerMessage::Finished(outcome));
            ctx.request_repaint();
        });

        Self {
            progress_rx: rx,
            _handle: handle,
        }
    }
}
