pub use {anyhow, itertools, log, polars, pretty_env_logger, tempfile};
