//! Async event pump for hosts running on tokio.
//!
//! Hosts that already have their own loop can call
//! [`LayoutDriver::handle_event`] and [`LayoutDriver::run_scheduled`]
//! directly. Hosts that deliver events over a channel can hand the receiver
//! to [`run_event_loop`] instead; it yields to the runtime between
//! dispatching an event and running the resumption that event scheduled.

use crate::driver::{EventOutcome, LayoutDriver};
use crate::host::{HostEvent, SessionHost};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Feed host events to `driver` until the event channel closes.
///
/// Events the driver does not consume are passed on through `forward`. If
/// the forward receiver is gone, forwarding stops but layouts keep running.
///
/// Locks are always taken host first, then driver, and never held across an
/// await point.
pub async fn run_event_loop<H>(
    driver: Arc<Mutex<LayoutDriver>>,
    host: Arc<Mutex<H>>,
    mut events: mpsc::UnboundedReceiver<HostEvent>,
    forward: mpsc::UnboundedSender<HostEvent>,
) where
    H: SessionHost + Send,
{
    let mut forwarding = true;

    while let Some(event) = events.recv().await {
        let (outcome, pending) = {
            let mut host = host.lock();
            let mut driver = driver.lock();
            let outcome = driver.handle_event(&event, &mut *host);
            (outcome, driver.is_resume_pending())
        };

        if outcome == EventOutcome::Forward && forwarding && forward.send(event).is_err() {
            log::debug!("Event forward receiver dropped; no longer forwarding");
            forwarding = false;
        }

        if pending {
            // Let the host finish dispatching before the sequencer moves on
            tokio::task::yield_now().await;
            let mut host = host.lock();
            driver.lock().run_scheduled(&mut *host);
        }
    }

    log::debug!("Host event channel closed, layout event loop exiting");
}

/// Spawn [`run_event_loop`] on the current tokio runtime.
pub fn spawn_event_loop<H>(
    driver: Arc<Mutex<LayoutDriver>>,
    host: Arc<Mutex<H>>,
    events: mpsc::UnboundedReceiver<HostEvent>,
    forward: mpsc::UnboundedSender<HostEvent>,
) -> JoinHandle<()>
where
    H: SessionHost + Send + 'static,
{
    tokio::spawn(run_event_loop(driver, host, events, forward))
}
