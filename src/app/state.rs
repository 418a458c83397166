use std::process::Child;

pub struct RecordingHandle {
    pub child: Child,
    pub remote_path: String,
}

/// Long-lived child processes owned by the UI thread. Workers never touch
/// these; each worker owns its own short-lived children via the runner.
#[derive(Default)]
pub struct AppState {
    pub scrcpy: Option<Child>,
    pub recording: Option<RecordingHandle>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scrcpy_running(&mut self) -> bool {
        match &mut self.scrcpy {
            Some(child) => match child.try_wait() {
                Ok(Some(_)) => {
                    self.scrcpy = None;
                    false
                }
                _ => true,
            },
            None => false,
        }
    }

    pub fn stop_scrcpy(&mut self) -> bool {
        match self.scrcpy.take() {
            Some(mut child) => {
                let _ = child.kill();
                let _ = child.wait();
                true
            }
            None => false,
        }
    }

    pub fn recording_running(&self) -> bool {
        self.recording.is_some()
    }

    /// Stop the on-device recorder; returns the remote file path so the
    /// caller can pull it.
    pub fn stop_recording(&mut self) -> Option<String> {
        self.recording.take().map(|mut handle| {
            let _ = handle.child.kill();
            let _ = handle.child.wait();
            handle.remote_path
        })
    }
}
