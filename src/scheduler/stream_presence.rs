use std::time::Duration;

use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{
    error::AppError,
    service::{incident::IncidentReporter, presence::PresenceService},
};

/// Interval between Twitch polls.
const POLL_INTERVAL: Duration = Duration::from_secs(22);

/// Starts the stream presence scheduler
///
/// Polls Twitch every 22 seconds, updating the bot's presence and announcing new
/// streams. A failed poll is reported and the next poll runs as usual.
///
/// # Arguments
/// - `presence`: Presence service performing each poll
/// - `incidents`: Reporter for failed polls
///
/// # Returns
/// - `Ok(JobScheduler)` - Running scheduler; dropping it does not stop the job
/// - `Err(AppError::SchedulerErr)` - Scheduler failed to start
pub async fn start_scheduler(
    presence: PresenceService,
    incidents: IncidentReporter,
) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_repeated_async(POLL_INTERVAL, move |_uuid, _lock| {
        let presence = presence.clone();
        let incidents = incidents.clone();

        Box::pin(async move {
            match presence.tick().await {
                Ok(update) => tracing::debug!("Stream presence poll: {:?}", update),
                Err(e) => {
                    incidents
                        .report("Stream presence poll failed", &e.to_string())
                        .await
                }
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Stream presence scheduler started");

    Ok(scheduler)
}
