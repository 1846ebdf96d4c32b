/*!
Log-forwarding channel.

One-directional diagnostics stream from the logic layer to the
presentation layer. Lines are mirrored to the `log` facade and
broadcast as `LogEvent`s to every subscriber; the channel is in
overflow mode, so a slow subscriber drops old events instead of
blocking the logic layer.
*/

use crate::types::{LogEvent, LogKind};

const DEFAULT_LOG_CAPACITY: usize = 256;

/// Clone-able handle to the diagnostics broadcast channel.
#[derive(Clone)]
pub struct LogChannel {
  tx: async_broadcast::Sender<LogEvent>,
  // Keeps the channel open while no subscriber is connected.
  _keep: async_broadcast::InactiveReceiver<LogEvent>,
}

impl Default for LogChannel {
  fn default() -> Self {
    Self::new()
  }
}

impl LogChannel {
  /// Create a channel with the default capacity.
  pub fn new() -> Self {
    let (mut tx, rx) = async_broadcast::broadcast(DEFAULT_LOG_CAPACITY);
    tx.set_overflow(true);
    Self {
      tx,
      _keep: rx.deactivate(),
    }
  }

  /// Subscribe to forwarded events.
  pub fn subscribe(&self) -> async_broadcast::Receiver<LogEvent> {
    self.tx.new_receiver()
  }

  /// Forward an informational line.
  pub fn log<S: Into<String>>(&self, args: impl IntoIterator<Item = S>) {
    self.emit(LogKind::Log, args.into_iter().map(Into::into).collect());
  }

  /// Forward an error line.
  pub fn error<S: Into<String>>(&self, args: impl IntoIterator<Item = S>) {
    self.emit(LogKind::Error, args.into_iter().map(Into::into).collect());
  }

  fn emit(&self, kind: LogKind, args: Vec<String>) {
    match kind {
      LogKind::Log => log::info!("{}", args.join(" ")),
      LogKind::Error => log::error!("{}", args.join(" ")),
    }
    drop(self.tx.try_broadcast(LogEvent { kind, args }));
  }
}

impl std::fmt::Debug for LogChannel {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("LogChannel").finish_non_exhaustive()
  }
}
