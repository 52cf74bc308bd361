use std::time::Duration;

use ps_app::{
    AppError, CancelToken, InstantPacer, Pacer, RunMode, RunRequest, SessionController,
    SessionState, SleepPacer, execute,
};
use ps_project::Workbench;

/// Cancels the token on its first pause.
struct CancellingPacer {
    token: CancelToken,
    pauses: usize,
}

impl Pacer for CancellingPacer {
    fn pause(&mut self, _delay: Duration) {
        self.pauses += 1;
        self.token.cancel();
    }
}

#[test]
fn cancelled_before_start_returns_cancelled() {
    let request = RunRequest::from_workbench(&Workbench::default(), RunMode::Simulate);
    let token = CancelToken::new();
    token.cancel();
    let err = execute(&request, &mut InstantPacer::default(), &token).unwrap_err();
    assert!(matches!(err, AppError::Cancelled));
}

#[test]
fn cancel_between_stages_stops_the_run() {
    let request = RunRequest::from_workbench(&Workbench::default(), RunMode::AutoTune);
    let token = CancelToken::new();
    let mut pacer = CancellingPacer {
        token: token.clone(),
        pauses: 0,
    };
    let err = execute(&request, &mut pacer, &token).unwrap_err();
    assert!(matches!(err, AppError::Cancelled));
    assert_eq!(pacer.pauses, 1);
}

#[test]
fn stop_from_controller_cancels_worker() {
    let mut workbench = Workbench::default();
    workbench.pacing.stage_delay_ms = 200;
    let mut session = SessionController::new(workbench);

    let (request, token) = session.begin(RunMode::Simulate).unwrap();
    let worker = std::thread::spawn(move || execute(&request, &mut SleepPacer, &token));

    assert!(session.request_stop());
    assert!(matches!(session.state(), SessionState::Stopping { .. }));

    let outcome = worker.join().unwrap();
    assert!(matches!(outcome, Err(AppError::Cancelled)));
    session.complete(outcome).unwrap();
    assert_eq!(session.state(), &SessionState::Idle);
    assert!(session.report().is_none());
}

#[test]
fn stop_when_idle_is_a_no_op() {
    let mut session = SessionController::default();
    assert!(!session.request_stop());
    assert_eq!(session.state(), &SessionState::Idle);
}
