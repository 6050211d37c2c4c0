//! gui/update/util.rs
use std::future::Future;

use iced::futures::channel::{mpsc, oneshot};
use iced::futures::{SinkExt, StreamExt, future};

/// Run a blocking function on a background thread and await the result.
///
/// `None` only if the worker panicked before answering.
pub(crate) async fn spawn_blocking<T>(f: impl FnOnce() -> T + Send + 'static) -> Option<T>
where
    T: Send + 'static,
{
    let (tx, rx) = oneshot::channel::<T>();

    std::thread::spawn(move || {
        let _ = tx.send(f());
    });

    rx.await.ok()
}

/// Log the full cause chain, hand the banner something short.
pub(crate) fn report(context: &str, err: impl std::error::Error + Send + Sync + 'static) -> String {
    let err = anyhow::Error::new(err);
    tracing::error!("{context}: {err:#}");
    format!("{context}. See the log for details.")
}

/// Drive `work` while relaying every event it emits into `output`, in order.
///
/// `work` gets an unbounded sender so it never blocks or drops; the relay
/// side waits on `output` for room. Returns once `work` is done and the
/// backlog is flushed (or the UI side hung up).
pub(crate) async fn forward_all<E, T, R, Fut>(
    output: &mut mpsc::Sender<T>,
    wrap: impl Fn(E) -> T,
    work: impl FnOnce(mpsc::UnboundedSender<E>) -> Fut,
) -> R
where
    Fut: Future<Output = R>,
{
    let (tx, mut rx) = mpsc::unbounded();

    let relay = async {
        while let Some(ev) = rx.next().await {
            if output.send(wrap(ev)).await.is_err() {
                break;
            }
        }
    };

    let ((), result) = future::join(relay, work(tx)).await;
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn forward_all_delivers_every_event_through_a_tight_channel() {
        let (mut output, rx) = mpsc::channel::<u32>(1);
        let collector = tokio::spawn(rx.collect::<Vec<_>>());

        let result = forward_all(&mut output, |n: u32| n * 10, |events| async move {
            for n in 1..=50 {
                events.unbounded_send(n).unwrap();
            }
            "done"
        })
        .await;
        drop(output);

        assert_eq!(result, "done");
        let got = collector.await.unwrap();
        assert_eq!(got, (1..=50).map(|n| n * 10).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn forward_all_still_finishes_when_receiver_is_gone() {
        let (mut output, rx) = mpsc::channel::<u32>(1);
        drop(rx);

        let result = forward_all(&mut output, |n: u32| n, |events| async move {
            for n in 0..10 {
                let _ = events.unbounded_send(n);
            }
            7
        })
        .await;

        assert_eq!(result, 7);
    }
}
