use crate::error::{Error, Result};
use std::sync::mpsc as std_mpsc;
use std::time::Duration;

/// Linux clipboard managers read the selection lazily, so the owning
/// `Clipboard` must outlive the copy call for a while.
const HOLD_FOR: Duration = Duration::from_secs(2);

/// Performs one copy and reports its outcome through the callback. The writer
/// may keep running after reporting.
type Writer = Box<dyn Fn(&str, &mut dyn FnMut(Result<()>)) + Send>;

/// Background thread that owns clipboard writes so the UI never blocks on
/// them. The outcome of every copy comes back through [`drain`](Self::drain).
pub struct ClipboardWorker {
    jobs: std_mpsc::Sender<String>,
    results: std_mpsc::Receiver<Result<()>>,
}

impl ClipboardWorker {
    pub fn spawn() -> Self {
        Self::spawn_with(Box::new(hold_text))
    }

    fn spawn_with(write: Writer) -> Self {
        let (jobs, job_rx) = std_mpsc::channel::<String>();
        let (result_tx, results) = std_mpsc::channel();

        std::thread::spawn(move || {
            for text in job_rx {
                write(&text, &mut |result: Result<()>| {
                    let _ = result_tx.send(result);
                });
            }
        });

        Self { jobs, results }
    }

    /// Queue `text` for the clipboard without blocking the UI thread.
    pub fn copy(&self, text: &str) -> Result<()> {
        self.jobs
            .send(text.to_string())
            .map_err(|_| Error::custom("Clipboard worker has stopped"))
    }

    /// Outcomes of finished copies, oldest first.
    pub fn drain(&self) -> Vec<Result<()>> {
        self.results.try_iter().collect()
    }
}

fn hold_text(text: &str, report: &mut dyn FnMut(Result<()>)) {
    let copied = arboard::Clipboard::new().and_then(|mut clipboard| {
        clipboard.set_text(text)?;
        Ok(clipboard)
    });

    match copied {
        Ok(clipboard) => {
            report(Ok(()));
            std::thread::sleep(HOLD_FOR);
            drop(clipboard);
        }
        Err(e) => report(Err(Error::custom(e))),
    }
}

#[cfg(test)]
pub(crate) fn worker_with(
    write: impl Fn(&str) -> Result<()> + Send + 'static,
) -> ClipboardWorker {
    ClipboardWorker::spawn_with(Box::new(
        move |text: &str, report: &mut dyn FnMut(Result<()>)| report(write(text)),
    ))
}
