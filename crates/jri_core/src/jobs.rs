use std::future::Future;

use futures::{stream, StreamExt};

/// Runs the given jobs concurrently, at most `limit` at a time.
///
/// Every job runs to completion even when another one fails; the
/// first error is reported only once the whole batch has finished.
/// When this returns, no job is still mid-flight, so callers can
/// safely tear down whatever the jobs were writing to.
pub async fn do_jobs_with_limit<T, E, F: Future<Output = Result<T, E>>>(
    jobs: impl Iterator<Item = F>,
    limit: usize,
) -> Result<Vec<T>, E> {
    let mut stream = stream::iter(jobs).buffer_unordered(limit);
    let mut outputs = Vec::new();
    let mut first_err = None;
    while let Some(result) = stream.next().await {
        match result {
            Ok(output) => outputs.push(output),
            Err(err) => {
                if first_err.is_none() {
                    first_err = Some(err);
                }
            }
        }
    }
    match first_err {
        Some(err) => Err(err),
        None => Ok(outputs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test]
    async fn first_error_waits_for_the_whole_batch() {
        let finished = AtomicBool::new(false);
        let jobs = (0..2).map(|i| {
            let finished = &finished;
            async move {
                if i == 0 {
                    return Err("boom");
                }
                for _ in 0..16 {
                    tokio::task::yield_now().await;
                }
                finished.store(true, Ordering::SeqCst);
                Ok(())
            }
        });

        let result: Result<Vec<()>, &str> = do_jobs_with_limit(jobs, 2).await;
        assert_eq!(result.unwrap_err(), "boom");
        // The slow job was not dropped mid-flight
        assert!(finished.load(Ordering::SeqCst));
    }
}
