use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crate::config::Config;
use crate::engine::Trigger;

// Creates the surface once, then shows it again every `tick_rate`.
pub struct Dispatcher {
    rx: mpsc::Receiver<Trigger>,
    _update_handle: thread::JoinHandle<()>,
}

impl Dispatcher {
    pub fn from_config(config: &Config) -> Dispatcher {
        Dispatcher::with_tick_rate(config.tick_rate())
    }

    pub fn with_tick_rate(tick_rate: Duration) -> Dispatcher {
        let (tx, rx) = mpsc::channel();

        let update_handle = thread::spawn(move || {
            if tx.send(Trigger::SurfaceCreated).is_err() {
                return;
            }
            loop {
                thread::sleep(tick_rate);
                if tx.send(Trigger::VisibilityChanged(true)).is_err() {
                    return;
                }
            }
        });

        Dispatcher {
            rx,
            _update_handle: update_handle,
        }
    }

    pub fn next(&self) -> Result<Trigger, mpsc::RecvError> {
        self.rx.recv()
    }
}
