use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

use crate::app::reports::BatchReport;

pub enum WorkerEvent {
    Log(String),
    Progress { done: usize, total: usize },
    ItemStatus {
        index: usize,
        status: String,
        details: String,
    },
    Finished { report: Option<BatchReport> },
}

/// UI-side handle to one background action: an event stream plus the
/// cooperative cancel flag. The thread itself is detached; `Finished` is the
/// end-of-stream marker.
pub struct WorkerHandle {
    receiver: Receiver<WorkerEvent>,
    cancel: Arc<AtomicBool>,
}

impl WorkerHandle {
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    /// Drain whatever the worker has produced so far. Non-blocking; called
    /// once per UI frame.
    pub fn poll_events(&self) -> Vec<WorkerEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.receiver.try_recv() {
            events.push(event);
        }
        events
    }
}

/// Worker-side endpoints. Sends are best-effort: if the UI dropped the
/// handle, the worker just runs to completion unheard.
pub struct WorkerCtx {
    sender: Sender<WorkerEvent>,
    cancel: Arc<AtomicBool>,
}

impl WorkerCtx {
    pub fn log(&self, message: impl Into<String>) {
        let _ = self.sender.send(WorkerEvent::Log(message.into()));
    }

    pub fn progress(&self, done: usize, total: usize) {
        let _ = self.sender.send(WorkerEvent::Progress { done, total });
    }

    pub fn item_status(&self, index: usize, status: impl Into<String>, details: impl Into<String>) {
        let _ = self.sender.send(WorkerEvent::ItemStatus {
            index,
            status: status.into(),
            details: details.into(),
        });
    }

    pub fn cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }
}

pub fn spawn_worker<F>(name: &str, task: F) -> WorkerHandle
where
    F: FnOnce(&WorkerCtx) -> Option<BatchReport> + Send + 'static,
{
    let (sender, receiver) = channel();
    let cancel = Arc::new(AtomicBool::new(false));
    let ctx = WorkerCtx {
        sender,
        cancel: Arc::clone(&cancel),
    };
    let label = name.to_string();
    std::thread::spawn(move || {
        let report = match catch_unwind(AssertUnwindSafe(|| task(&ctx))) {
            Ok(report) => report,
            Err(_) => {
                ctx.log(format!("Error in {label} worker: panicked"));
                None
            }
        };
        let _ = ctx.sender.send(WorkerEvent::Finished { report });
    });
    WorkerHandle { receiver, cancel }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn wait_for_finish(handle: &WorkerHandle) -> Vec<WorkerEvent> {
        let mut events = Vec::new();
        for _ in 0..200 {
            events.extend(handle.poll_events());
            if events
                .iter()
                .any(|event| matches!(event, WorkerEvent::Finished { .. }))
            {
                return events;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("worker did not finish in time");
    }

    #[test]
    fn worker_emits_events_then_finished() {
        let handle = spawn_worker("test", |ctx| {
            ctx.log("starting");
            ctx.progress(1, 2);
            ctx.item_status(0, "ok", "fine");
            None
        });
        let events = wait_for_finish(&handle);
        assert!(events
            .iter()
            .any(|event| matches!(event, WorkerEvent::Log(line) if line == "starting")));
        assert!(events
            .iter()
            .any(|event| matches!(event, WorkerEvent::Progress { done: 1, total: 2 })));
        assert!(events
            .iter()
            .any(|event| matches!(event, WorkerEvent::ItemStatus { index: 0, .. })));
    }

    #[test]
    fn cancel_flag_reaches_the_worker() {
        let handle = spawn_worker("loop", |ctx| {
            for _ in 0..1000 {
                if ctx.cancelled() {
                    ctx.log("stopped");
                    return None;
                }
                std::thread::sleep(Duration::from_millis(5));
            }
            None
        });
        handle.cancel();
        let events = wait_for_finish(&handle);
        assert!(events
            .iter()
            .any(|event| matches!(event, WorkerEvent::Log(line) if line == "stopped")));
    }

    #[test]
    fn panicking_worker_still_finishes() {
        let handle = spawn_worker("boom", |_ctx| panic!("boom"));
        let events = wait_for_finish(&handle);
        assert!(events
            .iter()
            .any(|event| matches!(event, WorkerEvent::Log(line) if line.contains("panicked"))));
    }
}
