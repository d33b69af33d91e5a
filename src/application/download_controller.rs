use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::channel::mpsc::{self, UnboundedSender};
use futures::stream::{self, BoxStream};
use futures::{future, FutureExt, StreamExt};
use log::{error, info, warn};

use super::{MediaResolver, SavePrompt};
use crate::domain::{AppError, DownloadRequest, Notification};
use crate::utils::{default_filename, percent_complete, split_save_path};

/// What a running download reports back to the UI thread.
///
/// Every worker ends with exactly one `Finished`, after at most one `Notify`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadEvent {
    Progress(u8),
    Notify(Notification),
    Finished,
}

/// Validates download requests and runs at most one download worker at a time.
#[derive(Clone)]
pub struct DownloadController {
    resolver: Arc<dyn MediaResolver>,
    prompt: Arc<dyn SavePrompt>,
    in_flight: Arc<AtomicBool>,
}

impl DownloadController {
    pub fn new(resolver: Arc<dyn MediaResolver>, prompt: Arc<dyn SavePrompt>) -> Self {
        Self {
            resolver,
            prompt,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Validate `url` and create the worker for it.
    ///
    /// Nothing is created when the URL is invalid or another worker holds the
    /// in-flight slot. The returned stream is the worker itself: it runs as it
    /// is polled and yields its events until `Finished`.
    pub fn start(&self, url: &str) -> Result<BoxStream<'static, DownloadEvent>, AppError> {
        let request = DownloadRequest::new(url).inspect_err(|_| {
            warn!("Rejected download request for {:?}", url);
        })?;

        let guard = InFlightGuard::acquire(&self.in_flight).ok_or_else(|| {
            warn!("Download requested while another one is running");
            AppError::Busy
        })?;

        info!("Starting download for {}", request.url());

        let (tx, rx) = mpsc::unbounded();
        let worker = run_worker(
            Arc::clone(&self.resolver),
            Arc::clone(&self.prompt),
            request,
            tx,
            guard,
        )
        .into_stream()
        .filter_map(|()| future::ready(None::<DownloadEvent>));

        Ok(stream::select(worker, rx).boxed())
    }
}

/// Holds the single in-flight slot until dropped
struct InFlightGuard(Arc<AtomicBool>);

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(Arc::clone(flag)))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

async fn run_worker(
    resolver: Arc<dyn MediaResolver>,
    prompt: Arc<dyn SavePrompt>,
    request: DownloadRequest,
    tx: UnboundedSender<DownloadEvent>,
    guard: InFlightGuard,
) {
    match fetch_audio(resolver.as_ref(), prompt.as_ref(), request.url(), &tx).await {
        Ok(Some(title)) => {
            info!("Downloaded audio for {:?}", title);
            let _ = tx.unbounded_send(DownloadEvent::Notify(Notification::success(&title)));
        }
        Ok(None) => {
            info!("Save dialog dismissed, nothing downloaded");
        }
        Err(e) => {
            error!("Download of {} failed: {}", request.url(), e);
            let _ = tx.unbounded_send(DownloadEvent::Notify(Notification::failure(&e)));
        }
    }

    // The slot must be free by the time the UI re-enables the start button.
    drop(guard);
    let _ = tx.unbounded_send(DownloadEvent::Finished);
}

/// Resolve, ask for a destination and download. `Ok(None)` means the user cancelled.
async fn fetch_audio(
    resolver: &dyn MediaResolver,
    prompt: &dyn SavePrompt,
    url: &str,
    tx: &UnboundedSender<DownloadEvent>,
) -> Result<Option<String>, AppError> {
    let handle = resolver.resolve(url).await?;
    let title = handle.title().to_string();

    let Some(path) = prompt.choose_save_path(&default_filename(&title)).await else {
        return Ok(None);
    };
    let (directory, filename) = split_save_path(&path)?;
    info!("Saving {:?} to {}", title, directory.join(&filename).display());

    let total = handle.total_size();
    let progress = tx.clone();
    let mut last_percent = None;
    let mut on_progress = move |remaining: u64| {
        let percent = percent_complete(total, remaining);
        if last_percent != Some(percent) {
            last_percent = Some(percent);
            let _ = progress.unbounded_send(DownloadEvent::Progress(percent));
        }
    };

    handle
        .download(&directory, &filename, &mut on_progress)
        .await?;

    Ok(Some(title))
}
