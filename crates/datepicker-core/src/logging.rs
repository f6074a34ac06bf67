use std::io::IsTerminal;

use anyhow::anyhow;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::TestWriter;

/// Installs a `fmt` subscriber on stderr,
/// filtered by `RUST_LOG` and falling
/// back to `default_level`. A second call
/// is a no-op.
pub fn init_tracing(
  default_level: &str
) -> anyhow::Result<()> {
  install(
    default_level,
    std::io::stderr,
    std::io::stderr().is_terminal()
  )
}

/// Same as [`init_tracing`], but writes
/// through the test harness so output is
/// captured per test.
pub fn init_test_tracing(
  default_level: &str
) -> anyhow::Result<()> {
  install(
    default_level,
    TestWriter::new(),
    false
  )
}

fn install<W>(
  default_level: &str,
  writer: W,
  ansi: bool
) -> anyhow::Result<()>
where
  W: for<'w> MakeWriter<'w>
    + Send
    + Sync
    + 'static
{
  let env_filter =
    EnvFilter::try_from_default_env()
      .or_else(|_| {
        EnvFilter::try_new(default_level)
      })
      .map_err(|e| {
        anyhow!(
          "invalid RUST_LOG / log \
           filter: {e}"
        )
      })?;

  let init_result =
    tracing_subscriber::fmt()
      .with_env_filter(env_filter)
      .with_target(true)
      .with_level(true)
      .with_ansi(ansi)
      .with_writer(writer)
      .try_init();

  if let Err(err) = init_result {
    debug!(
      error = %err,
      "tracing subscriber already set, \
       continuing"
    );
  }

  Ok(())
}
